//! Readiness report API endpoints.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{Duration, NaiveDate, Utc};
use serde::Deserialize;

use super::{success, ApiResult};
use crate::errors::AppError;
use crate::models::{CreateReportRequest, MetricSet, ReadinessReport, UpdateReportRequest};
use crate::AppState;

/// Bounds-check ratings at the request boundary, before they reach the
/// scorer.
fn validate_metrics(metrics: &MetricSet) -> Result<(), AppError> {
    for (metric, value) in metrics.entries() {
        if !(1..=10).contains(&value) {
            return Err(AppError::Validation(format!(
                "{} must be between 1 and 10",
                metric.key()
            )));
        }
    }
    Ok(())
}

/// POST /api/reports - Submit a daily report.
///
/// One report per athlete per day; a second submission conflicts.
pub async fn create_report(
    State(state): State<AppState>,
    Json(request): Json<CreateReportRequest>,
) -> ApiResult<ReadinessReport> {
    validate_metrics(&request.metrics)?;
    let report_date = request
        .report_date
        .unwrap_or_else(|| Utc::now().date_naive());

    let report = state.repo.create_report(&request, report_date).await?;
    tracing::info!(
        athlete_id = %report.athlete_id,
        date = %report.report_date,
        score = report.readiness_score,
        "readiness report submitted"
    );
    success(report)
}

/// GET /api/reports/:id - Get a single report.
pub async fn get_report(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ReadinessReport> {
    match state.repo.get_report(&id).await? {
        Some(report) => success(report),
        None => Err(AppError::NotFound(format!("Report {} not found", id))),
    }
}

/// PUT /api/reports/:id - Correct a report's metrics.
///
/// The readiness score is recomputed from the merged metrics.
pub async fn update_report(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateReportRequest>,
) -> ApiResult<ReadinessReport> {
    let provided = [
        request.sleep_quality,
        request.energy_fatigue,
        request.muscle_soreness,
        request.mood_stress,
        request.motivation,
        request.nutrition_quality,
        request.hydration,
    ];
    for value in provided.into_iter().flatten() {
        if !(1..=10).contains(&value) {
            return Err(AppError::Validation(
                "Metrics must be between 1 and 10".to_string(),
            ));
        }
    }

    let report = state.repo.update_report(&id, &request).await?;
    success(report)
}

/// DELETE /api/reports/:id - Remove a report (management action).
pub async fn delete_report(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    state.repo.delete_report(&id).await?;
    success(())
}

#[derive(Debug, Deserialize)]
pub struct ReportRangeParams {
    #[serde(default)]
    pub from: Option<NaiveDate>,
    #[serde(default)]
    pub to: Option<NaiveDate>,
}

/// GET /api/users/:id/reports?from=&to= - An athlete's reports, defaulting
/// to the trailing 30 days.
pub async fn list_reports(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<ReportRangeParams>,
) -> ApiResult<Vec<ReadinessReport>> {
    if state.repo.get_user(&id).await?.is_none() {
        return Err(AppError::NotFound(format!("User {} not found", id)));
    }

    let to = params.to.unwrap_or_else(|| Utc::now().date_naive());
    let from = params.from.unwrap_or(to - Duration::days(29));
    if from > to {
        return Err(AppError::Validation(
            "from must not be after to".to_string(),
        ));
    }

    let reports = state.repo.list_reports(&id, from, to).await?;
    success(reports)
}
