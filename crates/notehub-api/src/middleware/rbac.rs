//! Role gate helpers called at handler entry.
//!
//! Ownership-sensitive decisions go through `AccessPolicy`; these guards
//! cover routes gated purely by role.

use notehub_core::error::AppError;
use notehub_entity::user::UserRole;

use crate::extractors::AuthUser;

/// Rejects callers without the Admin role.
pub fn require_admin(auth: &AuthUser) -> Result<(), AppError> {
    if auth.role().is_admin() {
        Ok(())
    } else {
        Err(AppError::forbidden("Administrator role required"))
    }
}

/// Rejects callers below the Editor role.
pub fn require_editor(auth: &AuthUser) -> Result<(), AppError> {
    if auth.role().has_at_least(&UserRole::Editor) {
        Ok(())
    } else {
        Err(AppError::forbidden("Editor role required"))
    }
}
