//! Schedule resolution: which day tag applies to a calendar date.

use chrono::NaiveDate;

use crate::models::{DateOverrides, TeamTag, Weekday, WeeklyPattern};

/// Resolve the tag id scheduled for `date`.
///
/// An exact-date override always wins over the weekly pattern, including an
/// explicit `None` override, which clears a day the pattern would tag.
/// Overrides are keyed by date so they never drift when the pattern changes.
pub fn resolve_day_tag_id<'a>(
    weekly_pattern: &'a WeeklyPattern,
    date_overrides: &'a DateOverrides,
    date: NaiveDate,
) -> Option<&'a str> {
    if let Some(entry) = date_overrides.get(&date) {
        return entry.as_deref();
    }
    weekly_pattern
        .get(&Weekday::of(date))
        .and_then(|entry| entry.as_deref())
}

/// Resolve the live tag scheduled for `date` against the team's tag set.
///
/// A dangling id (the tag was deleted after being scheduled) resolves to
/// `None` rather than failing; callers may log it as a data-hygiene note.
pub fn resolve_day_tag<'a>(
    weekly_pattern: &WeeklyPattern,
    date_overrides: &DateOverrides,
    tags: &'a [TeamTag],
    date: NaiveDate,
) -> Option<&'a TeamTag> {
    let tag_id = resolve_day_tag_id(weekly_pattern, date_overrides, date)?;
    let found = tags.iter().find(|t| t.id == tag_id);
    if found.is_none() {
        tracing::debug!(tag_id, %date, "schedule references a deleted tag");
    }
    found
}

/// The acceptable readiness band for a day: the tag's range when the day is
/// tagged, otherwise the team target plus/minus 5, clamped to 0-100.
pub fn target_range(tag: Option<&TeamTag>, team_target: u8) -> (u8, u8) {
    match tag {
        Some(tag) => (tag.target_min, tag.target_max),
        None => (team_target.saturating_sub(5), (team_target + 5).min(100)),
    }
}
