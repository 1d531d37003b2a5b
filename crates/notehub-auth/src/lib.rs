//! # notehub-auth
//!
//! Authentication and authorization core for the NoteHub platform.
//!
//! ## Modules
//!
//! - `password` — Argon2id password hashing and policy enforcement
//! - `jwt` — session token issuance and verification
//! - `revocation` — jti revocation ledger for pre-expiry invalidation
//! - `guard` — failed-login tracking and account lockout
//! - `credential` — login, registration, refresh, and logout flows
//! - `access` — role- and ownership-based note access policy

pub mod access;
pub mod credential;
pub mod guard;
pub mod jwt;
pub mod password;
pub mod revocation;

pub use access::{AccessPolicy, NoteAction};
pub use credential::{AuthSession, CredentialService};
pub use guard::AccountGuard;
pub use jwt::{Claims, TokenIssuer, TokenVerifier};
pub use password::{PasswordHasher, PasswordValidator};
pub use revocation::RevocationLedger;
