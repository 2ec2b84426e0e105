//! Team schedule API endpoints: read, write and resolve.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;

use super::{success, ApiResult};
use crate::errors::AppError;
use crate::models::{
    CalendarDay, CalendarMonth, DayTagInfo, ResolvedDay, SetDayTagRequest, TargetRange,
    TeamSchedule, Weekday,
};
use crate::readiness::resolve;
use crate::AppState;

/// GET /api/teams/:team_id/schedule - Get the team's schedule.
pub async fn get_schedule(
    State(state): State<AppState>,
    Path(team_id): Path<String>,
) -> ApiResult<TeamSchedule> {
    let schedule = state.repo.get_or_create_schedule(&team_id).await?;
    success(schedule)
}

/// PUT /api/teams/:team_id/schedule/day - Assign or clear a day tag.
///
/// A `date` writes an exact-date override; a `weekday` writes the recurring
/// pattern. The referenced tag must belong to the team.
pub async fn set_day_tag(
    State(state): State<AppState>,
    Path(team_id): Path<String>,
    Json(request): Json<SetDayTagRequest>,
) -> ApiResult<TeamSchedule> {
    if request.date.is_some() == request.weekday.is_some() {
        return Err(AppError::Validation(
            "Exactly one of date or weekday is required".to_string(),
        ));
    }

    let schedule = state
        .repo
        .set_day_tag(&team_id, request.date, request.weekday, request.tag_id)
        .await?;
    success(schedule)
}

#[derive(Debug, Deserialize)]
pub struct ResolveParams {
    pub date: NaiveDate,
}

/// GET /api/teams/:team_id/schedule/resolve?date=YYYY-MM-DD - Resolve the
/// tag and target range applying to one date.
pub async fn resolve_day(
    State(state): State<AppState>,
    Path(team_id): Path<String>,
    Query(params): Query<ResolveParams>,
) -> ApiResult<ResolvedDay> {
    let team = state
        .repo
        .get_team(&team_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Team {} not found", team_id)))?;
    let schedule = state.repo.get_or_create_schedule(&team_id).await?;
    let tags = state.repo.list_tags(&team_id).await?;

    let tag = resolve::resolve_day_tag(
        &schedule.weekly_pattern,
        &schedule.date_overrides,
        &tags,
        params.date,
    );
    let (min, max) = resolve::target_range(tag, team.target_readiness);

    success(ResolvedDay {
        date: params.date,
        tag: tag.map(DayTagInfo::from),
        target_range: TargetRange { min, max },
    })
}

#[derive(Debug, Deserialize)]
pub struct CalendarParams {
    /// Month in YYYY-MM format.
    pub month: String,
}

/// GET /api/teams/:team_id/calendar?month=YYYY-MM - The month's resolved
/// tags and daily team averages.
pub async fn get_calendar(
    State(state): State<AppState>,
    Path(team_id): Path<String>,
    Query(params): Query<CalendarParams>,
) -> ApiResult<CalendarMonth> {
    let (year, month) = parse_month(&params.month)?;

    if state.repo.get_team(&team_id).await?.is_none() {
        return Err(AppError::NotFound(format!("Team {} not found", team_id)));
    }
    let schedule = state.repo.get_or_create_schedule(&team_id).await?;
    let tags = state.repo.list_tags(&team_id).await?;

    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| AppError::Validation("Invalid month".to_string()))?;
    let last = last_day_of_month(year, month);

    let averages = state.repo.daily_team_averages(&team_id, first, last).await?;

    let mut days = Vec::new();
    let mut date = first;
    while date <= last {
        let tag = resolve::resolve_day_tag(
            &schedule.weekly_pattern,
            &schedule.date_overrides,
            &tags,
            date,
        );
        days.push(CalendarDay {
            date,
            weekday: Weekday::of(date).as_str(),
            tag: tag.map(DayTagInfo::from),
            average_score: averages.get(&date).map(|avg| avg.round() as u8),
        });
        let Some(next) = date.succ_opt() else { break };
        date = next;
    }

    success(CalendarMonth { year, month, days })
}

/// Parse and bounds-check a YYYY-MM month string.
fn parse_month(input: &str) -> Result<(i32, u32), AppError> {
    let parts: Vec<&str> = input.split('-').collect();
    let parsed = match parts.as_slice() {
        [y, m] if y.len() == 4 && m.len() == 2 => {
            match (y.parse::<i32>(), m.parse::<u32>()) {
                (Ok(year), Ok(month)) => Some((year, month)),
                _ => None,
            }
        }
        _ => None,
    };

    let Some((year, month)) = parsed else {
        return Err(AppError::Validation(
            "month must be in YYYY-MM format".to_string(),
        ));
    };
    if !(1..=12).contains(&month) {
        return Err(AppError::Validation(
            "month must be between 01 and 12".to_string(),
        ));
    }
    if !(2000..=2100).contains(&year) {
        return Err(AppError::Validation(
            "year must be between 2000 and 2100".to_string(),
        ));
    }
    Ok((year, month))
}

fn last_day_of_month(year: i32, month: u32) -> NaiveDate {
    let next_month = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    next_month
        .and_then(|d| d.pred_opt())
        .expect("valid month end")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_valid_months() {
        assert_eq!(parse_month("2025-11").unwrap(), (2025, 11));
        assert_eq!(parse_month("2000-01").unwrap(), (2000, 1));
    }

    #[test]
    fn rejects_bad_month_strings() {
        assert!(parse_month("2025-13").is_err());
        assert!(parse_month("1999-05").is_err());
        assert!(parse_month("2025-1").is_err());
        assert!(parse_month("202511").is_err());
        assert!(parse_month("").is_err());
    }

    #[test]
    fn month_end_handles_february_and_december() {
        assert_eq!(
            last_day_of_month(2024, 2),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
        assert_eq!(
            last_day_of_month(2025, 12),
            NaiveDate::from_ymd_opt(2025, 12, 31).unwrap()
        );
    }
}
