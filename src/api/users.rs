//! User and profile API endpoints.

use axum::{
    extract::{Path, State},
    Json,
};

use super::{success, ApiResult};
use crate::errors::AppError;
use crate::models::{CreateUserRequest, SetStatusRequest, UpdateUserRequest, User};
use crate::AppState;

/// GET /api/users - List all users.
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Vec<User>> {
    let users = state.repo.list_users().await?;
    success(users)
}

/// GET /api/users/:id - Get a single user.
pub async fn get_user(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<User> {
    match state.repo.get_user(&id).await? {
        Some(user) => success(user),
        None => Err(AppError::NotFound(format!("User {} not found", id))),
    }
}

/// POST /api/users - Register a user.
///
/// Profile creation (and the optional initial team membership) happens here
/// as part of the same operation, not as a side effect elsewhere.
pub async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> ApiResult<User> {
    if request.username.trim().is_empty() {
        return Err(AppError::Validation("Username is required".to_string()));
    }

    let user = state.repo.create_user(&request).await?;
    tracing::info!(user_id = %user.id, role = user.role.as_str(), "user registered");
    success(user)
}

/// PUT /api/users/:id - Update account and profile settings.
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateUserRequest>,
) -> ApiResult<User> {
    let user = state.repo.update_user(&id, &request).await?;
    success(user)
}

/// PUT /api/users/:id/status - Set availability status.
pub async fn set_user_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<SetStatusRequest>,
) -> ApiResult<User> {
    if let Some(note) = &request.note {
        if note.len() > 140 {
            return Err(AppError::Validation(
                "Status note must be at most 140 characters".to_string(),
            ));
        }
    }

    let user = state.repo.set_user_status(&id, &request).await?;
    success(user)
}

/// DELETE /api/users/:id - Delete a user.
pub async fn delete_user(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<()> {
    state.repo.delete_user(&id).await?;
    success(())
}
