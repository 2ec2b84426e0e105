//! Team tag model: a coach-defined day type with an acceptable readiness range.

use serde::{Deserialize, Serialize};

/// A day type owned by one team (e.g. "Game Day", "Rest").
///
/// `target_min`/`target_max` bound the readiness range considered acceptable
/// on days carrying this tag; `color` is a hex value used in UI badges.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamTag {
    pub id: String,
    pub team_id: String,
    pub name: String,
    pub target_min: u8,
    pub target_max: u8,
    pub color: String,
}

/// Request body for creating a new tag.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTagRequest {
    pub name: String,
    #[serde(default = "default_target_min")]
    pub target_min: u8,
    #[serde(default = "default_target_max")]
    pub target_max: u8,
    #[serde(default = "default_color")]
    pub color: String,
}

fn default_target_min() -> u8 {
    60
}

fn default_target_max() -> u8 {
    80
}

fn default_color() -> String {
    "#0d6efd".to_string()
}

/// Request body for updating an existing tag.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTagRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub target_min: Option<u8>,
    #[serde(default)]
    pub target_max: Option<u8>,
    #[serde(default)]
    pub color: Option<String>,
}
