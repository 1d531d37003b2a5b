//! Note CRUD handlers gated by the access policy.
//!
//! Every route resolves the target note first and evaluates the policy
//! against its real owner, so the decision is always existence-then-access:
//! an absent note is a 404, a denied action is a 403.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;
use validator::Validate;

use notehub_auth::access::NoteAction;
use notehub_core::error::AppError;
use notehub_entity::note::{CreateNote, UpdateNote};

use crate::dto::request::{CreateNoteRequest, UpdateNoteRequest};
use crate::dto::response::{ApiResponse, MessageResponse, NoteResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::middleware::rbac::require_editor;
use crate::state::AppState;

/// POST /api/notes
pub async fn create_note(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateNoteRequest>,
) -> Result<(StatusCode, Json<ApiResponse<NoteResponse>>), ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    // Creation has no existing owner to compare against; the gate is
    // purely role-based.
    require_editor(&auth)?;

    let note = state
        .stores
        .notes
        .create(&CreateNote {
            owner_id: auth.user_id(),
            title: req.title,
            content: req.content,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(NoteResponse::from(note))),
    ))
}

/// GET /api/notes
///
/// Admins see every note; everyone else sees only their own.
pub async fn list_notes(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<NoteResponse>>>, ApiError> {
    let notes = if auth.role().is_admin() {
        state.stores.notes.list_all().await?
    } else {
        state.stores.notes.list_by_owner(auth.user_id()).await?
    };

    Ok(Json(ApiResponse::ok(
        notes.into_iter().map(NoteResponse::from).collect(),
    )))
}

/// GET /api/notes/{id}
pub async fn get_note(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<NoteResponse>>, ApiError> {
    let note = find_note(&state, id).await?;

    if !state
        .policy
        .can_access(auth.user_id(), auth.role(), NoteAction::Read, note.owner_id)
    {
        return Err(ApiError(AppError::forbidden(
            "You do not have access to this note",
        )));
    }

    Ok(Json(ApiResponse::ok(NoteResponse::from(note))))
}

/// PUT /api/notes/{id}
pub async fn update_note(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateNoteRequest>,
) -> Result<Json<ApiResponse<NoteResponse>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let note = find_note(&state, id).await?;

    if !state
        .policy
        .can_access(auth.user_id(), auth.role(), NoteAction::Update, note.owner_id)
    {
        return Err(ApiError(AppError::forbidden(
            "You do not have permission to update this note",
        )));
    }

    let updated = state
        .stores
        .notes
        .update(
            id,
            &UpdateNote {
                title: req.title,
                content: req.content,
            },
        )
        .await?
        .ok_or_else(|| AppError::not_found(format!("Note {id} not found")))?;

    Ok(Json(ApiResponse::ok(NoteResponse::from(updated))))
}

/// DELETE /api/notes/{id}
pub async fn delete_note(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let note = find_note(&state, id).await?;

    if !state
        .policy
        .can_access(auth.user_id(), auth.role(), NoteAction::Delete, note.owner_id)
    {
        return Err(ApiError(AppError::forbidden(
            "Only administrators can delete notes",
        )));
    }

    state.stores.notes.delete(id).await?;

    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Note deleted".to_string(),
    })))
}

async fn find_note(state: &AppState, id: Uuid) -> Result<notehub_entity::note::Note, AppError> {
    state
        .stores
        .notes
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Note {id} not found")))
}
