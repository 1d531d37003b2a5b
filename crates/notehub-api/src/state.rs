//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use notehub_auth::access::AccessPolicy;
use notehub_auth::credential::CredentialService;
use notehub_auth::jwt::TokenVerifier;
use notehub_auth::revocation::RevocationLedger;
use notehub_core::config::AppConfig;
use notehub_database::Stores;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// User and note stores (Postgres or in-memory)
    pub stores: Stores,
    /// Session token verifier
    pub verifier: Arc<TokenVerifier>,
    /// Revocation ledger for logged-out jtis
    pub ledger: Arc<RevocationLedger>,
    /// Credential flows: login, register, refresh, logout, unblock
    pub credentials: Arc<CredentialService>,
    /// Role- and ownership-based note access policy
    pub policy: AccessPolicy,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("verifier", &self.verifier)
            .field("policy", &self.policy)
            .finish()
    }
}
