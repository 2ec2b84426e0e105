//! Team model: the unit of grouping for athletes, schedules and tags.

use serde::{Deserialize, Serialize};

/// How the team logo is rendered by clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogoDisplayMode {
    None,
    Header,
    Background,
    Both,
}

impl LogoDisplayMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogoDisplayMode::None => "NONE",
            LogoDisplayMode::Header => "HEADER",
            LogoDisplayMode::Background => "BACKGROUND",
            LogoDisplayMode::Both => "BOTH",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "NONE" => Some(LogoDisplayMode::None),
            "HEADER" => Some(LogoDisplayMode::Header),
            "BACKGROUND" => Some(LogoDisplayMode::Background),
            "BOTH" => Some(LogoDisplayMode::Both),
            _ => None,
        }
    }
}

/// Anchor position for a background logo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BackgroundPosition {
    Center,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl BackgroundPosition {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackgroundPosition::Center => "CENTER",
            BackgroundPosition::TopLeft => "TOP_LEFT",
            BackgroundPosition::TopRight => "TOP_RIGHT",
            BackgroundPosition::BottomLeft => "BOTTOM_LEFT",
            BackgroundPosition::BottomRight => "BOTTOM_RIGHT",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "CENTER" => Some(BackgroundPosition::Center),
            "TOP_LEFT" => Some(BackgroundPosition::TopLeft),
            "TOP_RIGHT" => Some(BackgroundPosition::TopRight),
            "BOTTOM_LEFT" => Some(BackgroundPosition::BottomLeft),
            "BOTTOM_RIGHT" => Some(BackgroundPosition::BottomRight),
            _ => None,
        }
    }
}

/// A sports team. Owns its tags and schedule; athletes enroll via the join code.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: String,
    pub name: String,
    /// Six-character uppercase alphanumeric enrollment code.
    pub join_code: String,
    /// Readiness percentage the team aims for (0-100).
    pub target_readiness: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_path: Option<String>,
    pub logo_display_mode: LogoDisplayMode,
    pub background_opacity: f64,
    pub background_position: BackgroundPosition,
    pub created_at: String,
}

/// Request body for creating a new team.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTeamRequest {
    pub name: String,
    #[serde(default)]
    pub target_readiness: Option<u8>,
}

/// Request body for updating a team's settings and branding.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTeamRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub target_readiness: Option<u8>,
    #[serde(default)]
    pub logo_display_mode: Option<LogoDisplayMode>,
    #[serde(default)]
    pub background_opacity: Option<f64>,
    #[serde(default)]
    pub background_position: Option<BackgroundPosition>,
}

/// Request body for self-service enrollment by join code.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinTeamRequest {
    pub code: String,
    pub user_id: String,
}
