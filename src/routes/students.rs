// /api/students

use axum::Json;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use chrono::Utc;
use validator::Validate;

use super::AppState;
use crate::error::{ApiError, ApiResult};
use crate::models::{OrganizationKind, StudentInput};

/// Linked school/company ids must point at existing rows.
async fn check_references(state: &AppState, input: &StudentInput) -> ApiResult<()> {
    for (kind, id) in [
        (OrganizationKind::School, input.school_id),
        (OrganizationKind::Company, input.company_id),
    ] {
        if let Some(id) = id
            && !state.repo.organization_exists(kind, id).await?
        {
            return Err(ApiError::BadRequest(format!(
                "{} {id} does not exist",
                kind.label()
            )));
        }
    }
    Ok(())
}

pub(super) async fn list_students(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    Ok(Json(state.repo.list_students().await?))
}

pub(super) async fn get_student(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<impl IntoResponse> {
    let student = state
        .repo
        .get_student(id)
        .await?
        .ok_or(ApiError::NotFound {
            entity: "Student",
            id,
        })?;
    Ok(Json(student))
}

pub(super) async fn create_student(
    State(state): State<AppState>,
    Json(input): Json<StudentInput>,
) -> ApiResult<impl IntoResponse> {
    let input = input.normalized();
    input.validate()?;
    check_references(&state, &input).await?;
    let student = state.repo.create_student(&input, Utc::now()).await?;
    tracing::info!(student_id = student.id, "student created");
    Ok(Json(student))
}

pub(super) async fn update_student(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<StudentInput>,
) -> ApiResult<impl IntoResponse> {
    let input = input.normalized();
    input.validate()?;
    check_references(&state, &input).await?;
    let student = state
        .repo
        .update_student(id, &input, Utc::now())
        .await?
        .ok_or(ApiError::NotFound {
            entity: "Student",
            id,
        })?;
    Ok(Json(student))
}

/// DELETE /api/students/{id}: also frees the student's booked weeks.
pub(super) async fn delete_student(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<impl IntoResponse> {
    let student = state
        .repo
        .delete_student(id, Utc::now())
        .await?
        .ok_or(ApiError::NotFound {
            entity: "Student",
            id,
        })?;
    tracing::info!(student_id = id, "student deleted");
    Ok(Json(student))
}
