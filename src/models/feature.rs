//! Feature request models: user-submitted requests and bug reports with
//! upvotes and comments.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestType {
    Feature,
    Bug,
}

impl RequestType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestType::Feature => "FEATURE",
            RequestType::Bug => "BUG",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "FEATURE" => Some(RequestType::Feature),
            "BUG" => Some(RequestType::Bug),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestStatus {
    Open,
    InProgress,
    Completed,
    Rejected,
    Duplicate,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Open => "OPEN",
            RequestStatus::InProgress => "IN_PROGRESS",
            RequestStatus::Completed => "COMPLETED",
            RequestStatus::Rejected => "REJECTED",
            RequestStatus::Duplicate => "DUPLICATE",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "OPEN" => Some(RequestStatus::Open),
            "IN_PROGRESS" => Some(RequestStatus::InProgress),
            "COMPLETED" => Some(RequestStatus::Completed),
            "REJECTED" => Some(RequestStatus::Rejected),
            "DUPLICATE" => Some(RequestStatus::Duplicate),
            _ => None,
        }
    }
}

/// A feature request or bug report.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureRequest {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub description: String,
    pub request_type: RequestType,
    pub status: RequestStatus,
    pub upvote_count: i64,
    pub created_at: String,
    pub updated_at: String,
}

/// Request body for submitting a feature request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFeatureRequest {
    pub user_id: String,
    pub title: String,
    pub description: String,
    #[serde(default = "default_request_type")]
    pub request_type: RequestType,
}

fn default_request_type() -> RequestType {
    RequestType::Feature
}

/// Request body for moving a request through its lifecycle.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFeatureStatusRequest {
    pub status: RequestStatus,
}

/// Request body for toggling an upvote.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpvoteRequest {
    pub user_id: String,
}

/// Result of an upvote toggle.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpvoteResult {
    pub upvoted: bool,
    pub upvote_count: i64,
}

/// A comment on a feature request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureComment {
    pub id: String,
    pub request_id: String,
    pub user_id: String,
    pub comment: String,
    pub created_at: String,
}

/// Request body for commenting on a feature request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    pub user_id: String,
    pub comment: String,
}
