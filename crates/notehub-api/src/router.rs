//! Route definitions for the NoteHub HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.
//! The router receives `AppState` and passes it to all handlers via Axum's
//! `State` extractor.

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{delete, get, post, put},
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(note_routes())
        .merge(user_routes())
        .merge(health_routes());

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Auth endpoints: login, register, refresh, logout, validate
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/refresh-token", post(handlers::auth::refresh))
        .route("/auth/logout", post(handlers::auth::logout))
        .route("/auth/validate", get(handlers::auth::validate))
}

/// Note CRUD
fn note_routes() -> Router<AppState> {
    Router::new()
        .route("/notes", post(handlers::note::create_note))
        .route("/notes", get(handlers::note::list_notes))
        .route("/notes/{id}", get(handlers::note::get_note))
        .route("/notes/{id}", put(handlers::note::update_note))
        .route("/notes/{id}", delete(handlers::note::delete_note))
}

/// User administration
fn user_routes() -> Router<AppState> {
    Router::new().route("/users/{id}/unblock", post(handlers::user::unblock_user))
}

/// Health check
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
