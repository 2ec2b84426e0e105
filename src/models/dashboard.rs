//! Response shapes for the coach dashboard, player overview and calendar.

use chrono::NaiveDate;
use serde::Serialize;

use super::TeamTag;

/// The tag fields dashboards need for rendering a day.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayTagInfo {
    pub id: String,
    pub name: String,
    pub color: String,
    pub target_min: u8,
    pub target_max: u8,
}

impl From<&TeamTag> for DayTagInfo {
    fn from(tag: &TeamTag) -> Self {
        Self {
            id: tag.id.clone(),
            name: tag.name.clone(),
            color: tag.color.clone(),
            target_min: tag.target_min,
            target_max: tag.target_max,
        }
    }
}

/// The acceptable readiness band applied to a day.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetRange {
    pub min: u8,
    pub max: u8,
}

/// Attention pill shown next to an athlete in the squad list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SquadPill {
    /// High soreness combined with low energy today.
    Rest,
    /// Below the day's target range three days running.
    Risk,
    /// Missed two or more of the last three daily reports.
    NonCompliant,
}

/// One athlete's row in the coach dashboard squad list.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SquadEntry {
    pub athlete_id: String,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub readiness: Option<u8>,
    pub submitted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pill: Option<SquadPill>,
    pub has_comment: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// Team-wide average for one metric on the selected date.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricInsight {
    pub key: &'static str,
    pub name: &'static str,
    /// Rounded team average on the 1-10 scale.
    pub score: u8,
}

/// Everything the coach dashboard renders for one date.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoachDashboard {
    pub date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day_tag: Option<DayTagInfo>,
    pub target_range: TargetRange,
    pub team_average: u8,
    pub seven_day_average: u8,
    pub above_target: usize,
    pub in_target: usize,
    pub below_target: usize,
    pub compliance_pct: u8,
    pub insights: Vec<MetricInsight>,
    pub squad: Vec<SquadEntry>,
}

/// One day in the player overview's week series.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayScore {
    pub date: NaiveDate,
    pub label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<u8>,
}

/// Best / needs-attention metric chip from today's report.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricChip {
    pub key: &'static str,
    pub name: &'static str,
    pub score: u8,
}

/// The athlete's weekly overview.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerOverview {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub series: Vec<DayScore>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub today_score: Option<u8>,
    pub seven_day_average: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seven_day_min: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seven_day_max: Option<u8>,
    /// Consecutive days with a report, counting back from today.
    pub streak: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_metric: Option<MetricChip>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attention_metric: Option<MetricChip>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
    /// 14-day average score, one decimal; absent with fewer than 3 reports.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub baseline: Option<f64>,
    /// 14-day score standard deviation, one decimal; absent with fewer than
    /// 3 reports.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consistency: Option<f64>,
}

/// One cell of the month calendar.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub weekday: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<DayTagInfo>,
    /// Rounded team average readiness for the day, when any report exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_score: Option<u8>,
}

/// The month calendar for a team.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarMonth {
    pub year: i32,
    pub month: u32,
    pub days: Vec<CalendarDay>,
}

/// Resolution result for a single date.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedDay {
    pub date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<DayTagInfo>,
    pub target_range: TargetRange,
}
