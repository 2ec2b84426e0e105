//! Personal label API endpoints.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{Duration, NaiveDate, Utc};
use serde::Deserialize;

use super::{success, ApiResult};
use crate::errors::AppError;
use crate::models::{CreateLabelRequest, PersonalLabel, UpdateLabelRequest};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct LabelRangeParams {
    #[serde(default)]
    pub from: Option<NaiveDate>,
    #[serde(default)]
    pub to: Option<NaiveDate>,
}

/// GET /api/users/:id/labels?from=&to= - An athlete's labels, defaulting to
/// the trailing 30 days.
pub async fn list_labels(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<LabelRangeParams>,
) -> ApiResult<Vec<PersonalLabel>> {
    if state.repo.get_user(&id).await?.is_none() {
        return Err(AppError::NotFound(format!("User {} not found", id)));
    }

    let to = params.to.unwrap_or_else(|| Utc::now().date_naive());
    let from = params.from.unwrap_or(to - Duration::days(29));

    let labels = state.repo.list_labels(&id, from, to).await?;
    success(labels)
}

/// POST /api/users/:id/labels - Label a day. One label per athlete per day.
pub async fn create_label(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<CreateLabelRequest>,
) -> ApiResult<PersonalLabel> {
    if request.label.trim().is_empty() {
        return Err(AppError::Validation("Label text is required".to_string()));
    }
    if request.label.len() > 100 {
        return Err(AppError::Validation(
            "Label must be at most 100 characters".to_string(),
        ));
    }

    let label = state.repo.create_label(&id, &request).await?;
    success(label)
}

/// PUT /api/users/:id/labels/:date - Rewrite the label for a day.
pub async fn update_label(
    State(state): State<AppState>,
    Path((id, date)): Path<(String, NaiveDate)>,
    Json(request): Json<UpdateLabelRequest>,
) -> ApiResult<PersonalLabel> {
    if request.label.trim().is_empty() {
        return Err(AppError::Validation("Label text is required".to_string()));
    }

    let label = state.repo.update_label(&id, date, &request).await?;
    success(label)
}

/// DELETE /api/users/:id/labels/:date - Remove the label for a day.
pub async fn delete_label(
    State(state): State<AppState>,
    Path((id, date)): Path<(String, NaiveDate)>,
) -> ApiResult<()> {
    state.repo.delete_label(&id, date).await?;
    success(())
}
