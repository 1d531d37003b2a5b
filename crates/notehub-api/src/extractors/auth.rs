//! `AuthUser` extractor — pulls the session token from the Authorization
//! header, validates it, and injects the claims.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use uuid::Uuid;

use notehub_auth::jwt::Claims;
use notehub_core::error::AppError;
use notehub_entity::user::UserRole;

use crate::error::ApiError;
use crate::state::AppState;

/// Extracted authenticated user context available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    /// Subject user ID.
    pub fn user_id(&self) -> Uuid {
        self.0.sub
    }

    /// Role carried by the token.
    pub fn role(&self) -> UserRole {
        self.0.role
    }

    /// Returns the inner claims.
    pub fn claims(&self) -> &Claims {
        &self.0
    }
}

impl std::ops::Deref for AuthUser {
    type Target = Claims;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // A missing or malformed header gets the same uniform rejection as
        // a bad token.
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(AppError::invalid_token)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(AppError::invalid_token)?;

        let claims = state.verifier.verify(token)?;

        // A structurally valid token may still have been logged out.
        if state.ledger.is_revoked(&claims.jti) {
            return Err(ApiError(AppError::revoked()));
        }

        Ok(AuthUser(claims))
    }
}
