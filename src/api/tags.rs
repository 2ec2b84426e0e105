//! Team tag API endpoints.

use axum::{
    extract::{Path, State},
    Json,
};

use super::{success, ApiResult};
use crate::errors::AppError;
use crate::models::{CreateTagRequest, TeamTag, UpdateTagRequest};
use crate::AppState;

fn validate_color(color: &str) -> Result<(), AppError> {
    let valid = color.len() == 7
        && color.starts_with('#')
        && color[1..].bytes().all(|b| b.is_ascii_hexdigit());
    if !valid {
        return Err(AppError::Validation(
            "Color must be a hex value like #0d6efd".to_string(),
        ));
    }
    Ok(())
}

/// GET /api/teams/:team_id/tags - List a team's tags.
pub async fn list_tags(
    State(state): State<AppState>,
    Path(team_id): Path<String>,
) -> ApiResult<Vec<TeamTag>> {
    if state.repo.get_team(&team_id).await?.is_none() {
        return Err(AppError::NotFound(format!("Team {} not found", team_id)));
    }
    let tags = state.repo.list_tags(&team_id).await?;
    success(tags)
}

/// POST /api/teams/:team_id/tags - Create a tag.
pub async fn create_tag(
    State(state): State<AppState>,
    Path(team_id): Path<String>,
    Json(request): Json<CreateTagRequest>,
) -> ApiResult<TeamTag> {
    if request.name.trim().is_empty() {
        return Err(AppError::Validation("Tag name is required".to_string()));
    }
    validate_color(&request.color)?;

    let tag = state.repo.create_tag(&team_id, &request).await?;
    success(tag)
}

/// PUT /api/teams/:team_id/tags/:tag_id - Update a tag.
pub async fn update_tag(
    State(state): State<AppState>,
    Path((team_id, tag_id)): Path<(String, String)>,
    Json(request): Json<UpdateTagRequest>,
) -> ApiResult<TeamTag> {
    if let Some(name) = &request.name {
        if name.trim().is_empty() {
            return Err(AppError::Validation("Tag name is required".to_string()));
        }
    }
    if let Some(color) = &request.color {
        validate_color(color)?;
    }

    let tag = state.repo.update_tag(&team_id, &tag_id, &request).await?;
    success(tag)
}

/// DELETE /api/teams/:team_id/tags/:tag_id - Delete a tag.
///
/// Schedule entries pointing at the tag are purged in the same operation.
pub async fn delete_tag(
    State(state): State<AppState>,
    Path((team_id, tag_id)): Path<(String, String)>,
) -> ApiResult<()> {
    state.repo.delete_tag(&team_id, &tag_id).await?;
    success(())
}
