//! Team API endpoints: CRUD, enrollment and branding.

use axum::{
    extract::{Multipart, Path, State},
    Json,
};

use super::{success, ApiResult};
use crate::errors::AppError;
use crate::models::{CreateTeamRequest, JoinTeamRequest, Team, UpdateTeamRequest, User};
use crate::readiness::join_code;
use crate::upload;
use crate::AppState;

/// GET /api/teams - List all teams.
pub async fn list_teams(State(state): State<AppState>) -> ApiResult<Vec<Team>> {
    let teams = state.repo.list_teams().await?;
    success(teams)
}

/// GET /api/teams/:id - Get a single team.
pub async fn get_team(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Team> {
    match state.repo.get_team(&id).await? {
        Some(team) => success(team),
        None => Err(AppError::NotFound(format!("Team {} not found", id))),
    }
}

/// POST /api/teams - Create a team. The join code is generated here.
pub async fn create_team(
    State(state): State<AppState>,
    Json(request): Json<CreateTeamRequest>,
) -> ApiResult<Team> {
    if request.name.trim().is_empty() {
        return Err(AppError::Validation("Team name is required".to_string()));
    }
    if let Some(target) = request.target_readiness {
        if target > 100 {
            return Err(AppError::Validation(
                "Target readiness must be between 0 and 100".to_string(),
            ));
        }
    }

    let team = state.repo.create_team(&request).await?;
    tracing::info!(team_id = %team.id, "team created");
    success(team)
}

/// PUT /api/teams/:id - Update team settings and branding.
pub async fn update_team(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateTeamRequest>,
) -> ApiResult<Team> {
    if let Some(name) = &request.name {
        if name.trim().is_empty() {
            return Err(AppError::Validation("Team name is required".to_string()));
        }
    }
    if let Some(target) = request.target_readiness {
        if target > 100 {
            return Err(AppError::Validation(
                "Target readiness must be between 0 and 100".to_string(),
            ));
        }
    }
    if let Some(opacity) = request.background_opacity {
        if !(0.01..=0.5).contains(&opacity) {
            return Err(AppError::Validation(
                "Background opacity must be between 0.01 and 0.5".to_string(),
            ));
        }
    }

    let team = state.repo.update_team(&id, &request).await?;
    success(team)
}

/// DELETE /api/teams/:id - Delete a team.
pub async fn delete_team(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<()> {
    state.repo.delete_team(&id).await?;
    success(())
}

/// POST /api/teams/:id/join-code - Invalidate the current join code and
/// issue a new one.
pub async fn regenerate_join_code(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Team> {
    let team = state.repo.regenerate_join_code(&id).await?;
    tracing::info!(team_id = %id, "join code regenerated");
    success(team)
}

/// GET /api/teams/:id/athletes - Athletes attached to the team.
pub async fn list_team_athletes(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Vec<User>> {
    if state.repo.get_team(&id).await?.is_none() {
        return Err(AppError::NotFound(format!("Team {} not found", id)));
    }
    let athletes = state.repo.list_team_athletes(&id).await?;
    success(athletes)
}

/// POST /api/teams/join - Enroll a user by join code.
///
/// The code is format-checked before any lookup: garbage input never
/// reaches the database.
pub async fn join_team(
    State(state): State<AppState>,
    Json(request): Json<JoinTeamRequest>,
) -> ApiResult<User> {
    let code = match join_code::validate(&request.code) {
        Ok(code) => code,
        Err(err) => {
            tracing::warn!(user_id = %request.user_id, "rejected malformed join code");
            return Err(err);
        }
    };

    let Some(team) = state.repo.find_team_by_join_code(&code).await? else {
        tracing::warn!(user_id = %request.user_id, %code, "join attempt with unknown code");
        return Err(AppError::JoinCodeNotFound);
    };

    let user = state.repo.join_team(&team.id, &request.user_id).await?;
    tracing::info!(user_id = %user.id, team_id = %team.id, "user joined team");
    success(user)
}

/// POST /api/teams/:id/logo - Upload a team logo (multipart field `logo`).
///
/// Content is sniffed, the filename sanitized and the per-team storage
/// quota enforced before anything touches disk.
pub async fn upload_team_logo(
    State(state): State<AppState>,
    Path(id): Path<String>,
    mut multipart: Multipart,
) -> ApiResult<Team> {
    if state.repo.get_team(&id).await?.is_none() {
        return Err(AppError::NotFound(format!("Team {} not found", id)));
    }

    let mut upload_data = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {}", e)))?
    {
        if field.name() == Some("logo") {
            let filename = field.file_name().unwrap_or("logo").to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {}", e)))?;
            upload_data = Some((filename, bytes));
            break;
        }
    }

    let Some((filename, bytes)) = upload_data else {
        return Err(AppError::Validation(
            "Multipart field 'logo' is required".to_string(),
        ));
    };

    let (_, sanitized) = upload::validate_upload(&filename, &bytes)?;

    let logo_dir = state.config.media_path.join("team_logos");
    tokio::fs::create_dir_all(&logo_dir).await?;

    let used = team_storage_used(&logo_dir, &id).await?;
    if used + bytes.len() as u64 > upload::TEAM_STORAGE_QUOTA {
        return Err(AppError::PayloadTooLarge(
            "Team storage quota exceeded".to_string(),
        ));
    }

    let storage_name = upload::storage_name(&id, &sanitized);
    tokio::fs::write(logo_dir.join(&storage_name), &bytes).await?;

    let team = state
        .repo
        .set_team_logo(&id, &format!("team_logos/{}", storage_name))
        .await?;
    tracing::info!(team_id = %id, file = %storage_name, "team logo uploaded");
    success(team)
}

/// Bytes already stored for a team's logos.
async fn team_storage_used(dir: &std::path::Path, team_id: &str) -> Result<u64, AppError> {
    let prefix = format!("{}_", team_id);
    let mut used = 0u64;
    let mut entries = tokio::fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        if entry.file_name().to_string_lossy().starts_with(&prefix) {
            used += entry.metadata().await?.len();
        }
    }
    Ok(used)
}
