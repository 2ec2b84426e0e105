//! User and profile models.
//!
//! Storage keeps accounts and profiles in separate tables; the API presents
//! them as one combined resource.

use serde::{Deserialize, Serialize};

/// Whether a user submits reports or reads dashboards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Athlete,
    Coach,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Athlete => "ATHLETE",
            Role::Coach => "COACH",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ATHLETE" => Some(Role::Athlete),
            "COACH" => Some(Role::Coach),
            _ => None,
        }
    }
}

/// Current availability of an athlete, set by the athlete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlayerStatus {
    Available,
    Injured,
    Sick,
    Excused,
}

impl PlayerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlayerStatus::Available => "AVAILABLE",
            PlayerStatus::Injured => "INJURED",
            PlayerStatus::Sick => "SICK",
            PlayerStatus::Excused => "EXCUSED",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "AVAILABLE" => Some(PlayerStatus::Available),
            "INJURED" => Some(PlayerStatus::Injured),
            "SICK" => Some(PlayerStatus::Sick),
            "EXCUSED" => Some(PlayerStatus::Excused),
            _ => None,
        }
    }
}

/// A user account together with its profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub role: Role,
    /// Primary team. Coaches have at most one; for athletes this is the
    /// first team they joined.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_id: Option<String>,
    /// All team memberships (athletes can belong to several teams).
    pub team_ids: Vec<String>,
    pub current_status: PlayerStatus,
    pub status_note: String,
    pub status_updated_at: String,
    /// IANA timezone name used for daily-reminder scheduling.
    pub timezone: String,
    pub daily_reminder_enabled: bool,
    pub created_at: String,
}

/// Request body for registering a user.
///
/// Creating a user also creates its profile (and the optional initial team
/// membership) in one step.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default = "default_role")]
    pub role: Role,
    #[serde(default)]
    pub team_id: Option<String>,
    #[serde(default)]
    pub timezone: Option<String>,
}

fn default_role() -> Role {
    Role::Athlete
}

/// Request body for updating profile settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub team_id: Option<String>,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub daily_reminder_enabled: Option<bool>,
}

/// Request body for setting an athlete's availability status.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetStatusRequest {
    pub status: PlayerStatus,
    #[serde(default)]
    pub note: Option<String>,
}
