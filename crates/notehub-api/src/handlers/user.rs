//! User administration handlers.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use crate::dto::response::{ApiResponse, UserResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::middleware::rbac::require_admin;
use crate::state::AppState;

/// POST /api/users/{id}/unblock
///
/// Restores a blocked account to Active and resets its failure counter.
/// Admin only.
pub async fn unblock_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    require_admin(&auth)?;

    let user = state.credentials.unblock(id).await?;
    Ok(Json(ApiResponse::ok(UserResponse::from(&user))))
}
