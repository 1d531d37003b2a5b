//! Auth handlers — login, register, refresh, logout, validate.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use validator::Validate;

use notehub_core::error::AppError;

use crate::dto::request::{LoginRequest, RefreshRequest, RegisterRequest};
use crate::dto::response::{ApiResponse, MessageResponse, SessionResponse, TokenInfoResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ApiResponse<SessionResponse>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let session = state.credentials.login(&req.email, &req.password).await?;
    Ok(Json(ApiResponse::ok(SessionResponse::from(session))))
}

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<SessionResponse>>), ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let session = state
        .credentials
        .register(&req.name, &req.email, &req.password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(SessionResponse::from(session))),
    ))
}

/// POST /api/auth/refresh-token
pub async fn refresh(
    State(state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> Result<Json<ApiResponse<SessionResponse>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let session = state.credentials.refresh(&req.refresh_token).await?;
    Ok(Json(ApiResponse::ok(SessionResponse::from(session))))
}

/// POST /api/auth/logout
pub async fn logout(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.credentials.logout(auth.claims()).await?;

    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Logged out successfully".to_string(),
    })))
}

/// GET /api/auth/validate
///
/// The `AuthUser` extractor already rejected invalid and revoked tokens;
/// reaching the handler means the token is good.
pub async fn validate(auth: AuthUser) -> Json<ApiResponse<TokenInfoResponse>> {
    Json(ApiResponse::ok(TokenInfoResponse::from(auth.claims())))
}
