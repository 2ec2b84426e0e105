//! Dashboard endpoints: the coach's team view and the athlete's overview.

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use chrono::{Datelike, Duration, NaiveDate, Utc};
use serde::Deserialize;

use super::{success, ApiResult};
use crate::errors::AppError;
use crate::models::{
    CoachDashboard, DayScore, DayTagInfo, Metric, MetricChip, MetricInsight, PlayerOverview,
    ReadinessReport, Role, SquadEntry, SquadPill, TargetRange, User, Weekday,
};
use crate::readiness::{feedback, resolve, stats};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct DashboardParams {
    /// Defaults to the current UTC date.
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

/// GET /api/teams/:team_id/dashboard?date= - The coach dashboard for a date.
pub async fn coach_dashboard(
    State(state): State<AppState>,
    Path(team_id): Path<String>,
    Query(params): Query<DashboardParams>,
) -> ApiResult<CoachDashboard> {
    let team = state
        .repo
        .get_team(&team_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Team {} not found", team_id)))?;
    let date = params.date.unwrap_or_else(|| Utc::now().date_naive());

    let schedule = state.repo.get_or_create_schedule(&team_id).await?;
    let tags = state.repo.list_tags(&team_id).await?;
    let athletes = state.repo.list_team_athletes(&team_id).await?;

    let day_tag = resolve::resolve_day_tag(
        &schedule.weekly_pattern,
        &schedule.date_overrides,
        &tags,
        date,
    );
    let (range_min, range_max) = resolve::target_range(day_tag, team.target_readiness);

    // Reports for the selected date and the two days before it feed both the
    // summary counts and the squad pills.
    let mut by_day: Vec<HashMap<String, ReadinessReport>> = Vec::with_capacity(3);
    for offset in 0..3 {
        let day = date - Duration::days(offset);
        let reports = state.repo.team_reports_for_date(&team_id, day).await?;
        by_day.push(
            reports
                .into_iter()
                .map(|r| (r.athlete_id.clone(), r))
                .collect(),
        );
    }

    let today_scores: Vec<u8> = by_day[0].values().map(|r| r.readiness_score).collect();
    let team_average = match state.repo.team_average(&team_id, date, date).await? {
        Some(avg) => avg.round() as u8,
        None => 0,
    };
    let seven_day_average = match state
        .repo
        .team_average(&team_id, date - Duration::days(6), date)
        .await?
    {
        Some(avg) => avg.round() as u8,
        None => 0,
    };

    let above_target = today_scores.iter().filter(|s| **s > range_max).count();
    let in_target = today_scores
        .iter()
        .filter(|s| (range_min..=range_max).contains(*s))
        .count();
    let below_target = today_scores.len() - above_target - in_target;

    let compliance_pct = if athletes.is_empty() {
        0
    } else {
        ((today_scores.len() as f64 / athletes.len() as f64) * 100.0).round() as u8
    };

    let insights = match state.repo.metric_averages_for_date(&team_id, date).await? {
        Some(averages) => Metric::ALL
            .iter()
            .zip(averages)
            .map(|(metric, avg)| MetricInsight {
                key: metric.key(),
                name: metric.label(),
                score: avg.round() as u8,
            })
            .collect(),
        None => Vec::new(),
    };

    // Per-day target ranges for the risk pill's three-day lookback.
    let day_ranges: Vec<(u8, u8)> = (0..3)
        .map(|offset| {
            let day = date - Duration::days(offset);
            let tag = resolve::resolve_day_tag(
                &schedule.weekly_pattern,
                &schedule.date_overrides,
                &tags,
                day,
            );
            resolve::target_range(tag, team.target_readiness)
        })
        .collect();

    let mut squad: Vec<SquadEntry> = athletes
        .iter()
        .map(|athlete| squad_entry(athlete, &by_day, &day_ranges))
        .collect();
    // Lowest readiness first; athletes who have not submitted sort last.
    squad.sort_by_key(|entry| (entry.readiness.is_none(), entry.readiness.unwrap_or(0)));

    success(CoachDashboard {
        date,
        day_tag: day_tag.map(DayTagInfo::from),
        target_range: TargetRange {
            min: range_min,
            max: range_max,
        },
        team_average,
        seven_day_average,
        above_target,
        in_target,
        below_target,
        compliance_pct,
        insights,
        squad,
    })
}

/// Build one athlete's squad row, including the attention pill.
fn squad_entry(
    athlete: &User,
    by_day: &[HashMap<String, ReadinessReport>],
    day_ranges: &[(u8, u8)],
) -> SquadEntry {
    let today = by_day[0].get(&athlete.id);

    let pill = match today {
        Some(report) => {
            if feedback::rest_recommended(&report.metrics) {
                Some(SquadPill::Rest)
            } else if below_range_streak(&athlete.id, by_day, day_ranges) {
                Some(SquadPill::Risk)
            } else if missed_days(&athlete.id, by_day) >= 2 {
                Some(SquadPill::NonCompliant)
            } else {
                None
            }
        }
        None => Some(SquadPill::NonCompliant),
    };

    let comment = today
        .and_then(|r| r.comments.clone())
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty());

    SquadEntry {
        athlete_id: athlete.id.clone(),
        username: athlete.username.clone(),
        readiness: today.map(|r| r.readiness_score),
        submitted: today.is_some(),
        pill,
        has_comment: comment.is_some(),
        comment,
    }
}

/// True when the athlete reported on all three days and scored below that
/// day's target range every time.
fn below_range_streak(
    athlete_id: &str,
    by_day: &[HashMap<String, ReadinessReport>],
    day_ranges: &[(u8, u8)],
) -> bool {
    by_day.iter().zip(day_ranges).all(|(reports, (min, _))| {
        reports
            .get(athlete_id)
            .map(|r| r.readiness_score < *min)
            .unwrap_or(false)
    })
}

/// How many of the three days have no report.
fn missed_days(athlete_id: &str, by_day: &[HashMap<String, ReadinessReport>]) -> usize {
    by_day
        .iter()
        .filter(|reports| !reports.contains_key(athlete_id))
        .count()
}

#[derive(Debug, Deserialize)]
pub struct OverviewParams {
    /// Monday of the week to show; defaults to the current week.
    #[serde(default)]
    pub week_start: Option<NaiveDate>,
}

/// GET /api/users/:id/overview?week_start= - The athlete's weekly overview.
pub async fn player_overview(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<OverviewParams>,
) -> ApiResult<PlayerOverview> {
    let user = state
        .repo
        .get_user(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))?;
    if user.role != Role::Athlete {
        return Err(AppError::Validation(
            "Overview is only available for athletes".to_string(),
        ));
    }

    let today = Utc::now().date_naive();
    let week_start = params.week_start.unwrap_or_else(|| {
        today - Duration::days(today.weekday().num_days_from_monday() as i64)
    });
    let week_end = week_start + Duration::days(6);

    let reports = state.repo.list_reports(&id, week_start, week_end).await?;
    let by_date: HashMap<NaiveDate, &ReadinessReport> =
        reports.iter().map(|r| (r.report_date, r)).collect();

    let series: Vec<DayScore> = (0..7)
        .map(|i| {
            let date = week_start + Duration::days(i);
            DayScore {
                date,
                label: Weekday::of(date).as_str(),
                score: by_date.get(&date).map(|r| r.readiness_score),
            }
        })
        .collect();

    let week_scores: Vec<u8> = series.iter().filter_map(|d| d.score).collect();
    let seven_day_average = if week_scores.is_empty() {
        0
    } else {
        let sum: u32 = week_scores.iter().map(|s| u32::from(*s)).sum();
        (f64::from(sum) / week_scores.len() as f64).round() as u8
    };

    let today_report = state.repo.get_report_for_day(&id, today).await?;

    // Streak of consecutive reported days ending today, capped at 30.
    let window_start = today - Duration::days(29);
    let reported = state
        .repo
        .report_dates_in_window(&id, window_start, today)
        .await?;
    let mut streak = 0u32;
    for i in 0..30 {
        if reported.contains(&(today - Duration::days(i))) {
            streak += 1;
        } else {
            break;
        }
    }

    let (best_metric, attention_metric, feedback_msg) = match &today_report {
        Some(report) => {
            let entries = report.metrics.entries();
            // First maximal wins ties, mirroring the limiter's tie-break.
            let mut best = entries[0];
            for (metric, value) in entries {
                if value > best.1 {
                    best = (metric, value);
                }
            }
            let worst = feedback::primary_limiter(&report.metrics);
            let chip = |(metric, value): (Metric, u8)| MetricChip {
                key: metric.key(),
                name: metric.label(),
                score: value,
            };
            (
                Some(chip(best)),
                Some(chip(worst)),
                Some(
                    feedback::personalized_feedback(&report.metrics, report.readiness_score)
                        .to_string(),
                ),
            )
        }
        None => (None, None, None),
    };

    // 14-day baseline and consistency need at least three reports.
    let window_scores = state
        .repo
        .scores_in_window(&id, today - Duration::days(13), today)
        .await?;
    let (baseline, consistency) = if window_scores.len() >= 3 {
        (
            stats::mean(&window_scores).map(stats::round1),
            stats::sample_std_dev(&window_scores).map(stats::round1),
        )
    } else {
        (None, None)
    };

    success(PlayerOverview {
        week_start,
        week_end,
        series,
        today_score: today_report.as_ref().map(|r| r.readiness_score),
        seven_day_average,
        seven_day_min: week_scores.iter().min().copied(),
        seven_day_max: week_scores.iter().max().copied(),
        streak,
        best_metric,
        attention_metric,
        feedback: feedback_msg,
        baseline,
        consistency,
    })
}
