//! Team schedule model: a recurring weekly pattern plus exact-date overrides.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Weekday keys for the weekly pattern, serialized as `Mon`..`Sun`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Weekday {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl Weekday {
    pub fn as_str(&self) -> &'static str {
        match self {
            Weekday::Mon => "Mon",
            Weekday::Tue => "Tue",
            Weekday::Wed => "Wed",
            Weekday::Thu => "Thu",
            Weekday::Fri => "Fri",
            Weekday::Sat => "Sat",
            Weekday::Sun => "Sun",
        }
    }

    pub fn of(date: NaiveDate) -> Self {
        use chrono::Datelike;
        match date.weekday() {
            chrono::Weekday::Mon => Weekday::Mon,
            chrono::Weekday::Tue => Weekday::Tue,
            chrono::Weekday::Wed => Weekday::Wed,
            chrono::Weekday::Thu => Weekday::Thu,
            chrono::Weekday::Fri => Weekday::Fri,
            chrono::Weekday::Sat => Weekday::Sat,
            chrono::Weekday::Sun => Weekday::Sun,
        }
    }
}

/// Weekly pattern: weekday name to tag id. An absent weekday means no default.
pub type WeeklyPattern = BTreeMap<Weekday, Option<String>>;

/// Date overrides: ISO date to tag id. An explicit `None` clears that day
/// even when the weekly pattern would assign a tag.
pub type DateOverrides = BTreeMap<NaiveDate, Option<String>>;

/// One schedule per team.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamSchedule {
    pub team_id: String,
    pub weekly_pattern: WeeklyPattern,
    pub date_overrides: DateOverrides,
    pub created_at: String,
    pub updated_at: String,
}

impl TeamSchedule {
    /// Set the recurring tag for a weekday. `None` removes the entry so the
    /// day has no default.
    pub fn set_weekday_tag(&mut self, weekday: Weekday, tag_id: Option<String>) {
        match tag_id {
            Some(id) => {
                self.weekly_pattern.insert(weekday, Some(id));
            }
            None => {
                self.weekly_pattern.remove(&weekday);
            }
        }
    }

    /// Set the override for an exact date. `None` stores an explicit clear,
    /// which shadows any weekly-pattern entry for that date.
    pub fn set_date_tag(&mut self, date: NaiveDate, tag_id: Option<String>) {
        self.date_overrides.insert(date, tag_id);
    }

    /// Drop every reference to `tag_id` from both mappings. Called when the
    /// tag itself is deleted.
    pub fn purge_tag(&mut self, tag_id: &str) {
        self.weekly_pattern
            .retain(|_, v| v.as_deref() != Some(tag_id));
        self.date_overrides
            .retain(|_, v| v.as_deref() != Some(tag_id));
    }
}

/// Request body for assigning a day tag.
///
/// Exactly one of `date` / `weekday` must be set: a date writes an override,
/// a weekday writes the recurring pattern. An absent `tagId` clears the day.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetDayTagRequest {
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub weekday: Option<Weekday>,
    #[serde(default)]
    pub tag_id: Option<String>,
}
