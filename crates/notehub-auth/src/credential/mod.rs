//! Credential flows: login, registration, refresh, logout, unblock.

pub mod service;

pub use service::{AuthSession, CredentialService};
