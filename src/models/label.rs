//! Personal day labels athletes attach to their own calendar.
//!
//! Labels are informational only: they never affect scores or target ranges.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One free-text label per athlete per day.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalLabel {
    pub id: String,
    pub athlete_id: String,
    pub label_date: NaiveDate,
    pub label: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Request body for adding a label to a day.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLabelRequest {
    pub label_date: NaiveDate,
    pub label: String,
}

/// Request body for editing an existing day's label.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLabelRequest {
    pub label: String,
}
