//! Application builder — wires state + router into an Axum app.

use std::sync::Arc;

use axum::Router;

use notehub_auth::access::AccessPolicy;
use notehub_auth::credential::CredentialService;
use notehub_auth::jwt::{TokenIssuer, TokenVerifier};
use notehub_auth::password::PasswordHasher;
use notehub_auth::revocation::RevocationLedger;
use notehub_core::config::AppConfig;
use notehub_database::Stores;

use crate::router::build_router;
use crate::state::AppState;

/// Assembles the shared application state from configuration and stores.
pub fn build_state(config: AppConfig, stores: Stores) -> AppState {
    let verifier = Arc::new(TokenVerifier::new(&config.auth));
    let ledger = Arc::new(RevocationLedger::new());

    let credentials = Arc::new(CredentialService::new(
        stores.users.clone(),
        Arc::new(PasswordHasher::new()),
        Arc::new(TokenIssuer::new(&config.auth)),
        ledger.clone(),
        &config.auth,
    ));

    AppState {
        config: Arc::new(config),
        stores,
        verifier,
        ledger,
        credentials,
        policy: AccessPolicy::new(),
    }
}

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    build_router(state)
}
