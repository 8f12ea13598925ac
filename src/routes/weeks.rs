// Week calendar handlers: listing, horizon status, fill, and slot updates.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use chrono::{Datelike, Utc};
use serde::Deserialize;
use serde_json::json;
use validator::Validate;

use super::AppState;
use crate::calendar::{self, WeekStore, fill_next_missing_weeks};
use crate::error::{ApiError, ApiResult};
use crate::models::UpdateWeek;

fn current_year() -> i32 {
    chrono::Local::now().year()
}

#[derive(Debug, Deserialize)]
pub(super) struct YearParams {
    year: Option<i32>,
}

/// GET /api/weeks?year=YYYY: slots of one year (default: current year).
pub(super) async fn list_weeks(
    State(state): State<AppState>,
    Query(params): Query<YearParams>,
) -> ApiResult<impl IntoResponse> {
    let year = params.year.unwrap_or_else(current_year);
    let weeks = state.repo.list_weeks_for_year(year).await?;
    Ok(Json(weeks))
}

/// GET /api/weeks/available-years
pub(super) async fn available_years(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let years = state.repo.available_years().await?;
    Ok(Json(json!({ "years": years })))
}

/// GET /api/weeks/next-missing-year: earliest year in the horizon that still has gaps.
pub(super) async fn next_missing_year(
    State(state): State<AppState>,
) -> ApiResult<impl IntoResponse> {
    let existing = state.repo.week_start_dates().await?;
    let next = calendar::next_missing_year(
        &existing,
        current_year(),
        state.config.calendar.horizon_years,
    );
    Ok(Json(json!({ "nextYear": next })))
}

/// POST /api/weeks/fill-missing: fill the earliest incomplete year, returns `{ year, created }`.
pub(super) async fn fill_missing(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let summary = fill_next_missing_weeks(
        state.repo.as_ref(),
        current_year(),
        state.fill_policy(),
        Utc::now(),
    )
    .await?;
    Ok(Json(summary))
}

/// PATCH /api/weeks/{id}
pub(super) async fn update_week(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<UpdateWeek>,
) -> ApiResult<impl IntoResponse> {
    let input = input.normalized();
    input.validate()?;
    input
        .check_assignment()
        .map_err(|msg| ApiError::BadRequest(msg.to_string()))?;
    if let Some(student_id) = input.student_id
        && !state.repo.student_exists(student_id).await?
    {
        return Err(ApiError::BadRequest(format!(
            "student {student_id} does not exist"
        )));
    }

    let week = state
        .repo
        .update_week(id, &input, Utc::now())
        .await?
        .ok_or(ApiError::NotFound { entity: "Week", id })?;
    tracing::info!(week_id = id, status = week.status.as_str(), "week updated");
    Ok(Json(week))
}
