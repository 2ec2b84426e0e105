//! Feature request API endpoints.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use super::{success, ApiResult};
use crate::errors::AppError;
use crate::models::{
    CreateCommentRequest, CreateFeatureRequest, FeatureComment, FeatureRequest, RequestStatus,
    RequestType, UpdateFeatureStatusRequest, UpvoteRequest, UpvoteResult,
};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct FeatureListParams {
    #[serde(default)]
    pub request_type: Option<RequestType>,
    #[serde(default)]
    pub status: Option<RequestStatus>,
}

/// GET /api/feature-requests - List requests, optionally filtered.
pub async fn list_feature_requests(
    State(state): State<AppState>,
    Query(params): Query<FeatureListParams>,
) -> ApiResult<Vec<FeatureRequest>> {
    let requests = state
        .repo
        .list_feature_requests(params.request_type, params.status)
        .await?;
    success(requests)
}

/// POST /api/feature-requests - Submit a request or bug report.
pub async fn create_feature_request(
    State(state): State<AppState>,
    Json(request): Json<CreateFeatureRequest>,
) -> ApiResult<FeatureRequest> {
    if request.title.trim().is_empty() {
        return Err(AppError::Validation("Title is required".to_string()));
    }
    if request.title.len() > 200 {
        return Err(AppError::Validation(
            "Title must be at most 200 characters".to_string(),
        ));
    }
    if request.description.trim().is_empty() {
        return Err(AppError::Validation("Description is required".to_string()));
    }
    if request.description.len() > 2000 {
        return Err(AppError::Validation(
            "Description must be at most 2000 characters".to_string(),
        ));
    }

    let created = state.repo.create_feature_request(&request).await?;
    success(created)
}

/// GET /api/feature-requests/:id - Get a single request.
pub async fn get_feature_request(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<FeatureRequest> {
    match state.repo.get_feature_request(&id).await? {
        Some(request) => success(request),
        None => Err(AppError::NotFound(format!(
            "Feature request {} not found",
            id
        ))),
    }
}

/// PUT /api/feature-requests/:id/status - Move a request through its
/// lifecycle.
pub async fn update_feature_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateFeatureStatusRequest>,
) -> ApiResult<FeatureRequest> {
    let updated = state.repo.update_feature_status(&id, request.status).await?;
    success(updated)
}

/// POST /api/feature-requests/:id/upvote - Toggle the caller's upvote.
pub async fn toggle_upvote(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpvoteRequest>,
) -> ApiResult<UpvoteResult> {
    let result = state.repo.toggle_upvote(&id, &request.user_id).await?;
    success(result)
}

/// GET /api/feature-requests/:id/comments - Comments on a request.
pub async fn list_comments(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Vec<FeatureComment>> {
    if state.repo.get_feature_request(&id).await?.is_none() {
        return Err(AppError::NotFound(format!(
            "Feature request {} not found",
            id
        )));
    }
    let comments = state.repo.list_comments(&id).await?;
    success(comments)
}

/// POST /api/feature-requests/:id/comments - Comment on a request.
pub async fn create_comment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<CreateCommentRequest>,
) -> ApiResult<FeatureComment> {
    if request.comment.trim().is_empty() {
        return Err(AppError::Validation("Comment is required".to_string()));
    }
    if request.comment.len() > 1000 {
        return Err(AppError::Validation(
            "Comment must be at most 1000 characters".to_string(),
        ));
    }

    let comment = state.repo.create_comment(&id, &request).await?;
    success(comment)
}
