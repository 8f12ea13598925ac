// /api/schools and /api/companies. Both resources share handlers, parameterized by kind.

use axum::Json;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use chrono::Utc;
use validator::Validate;

use super::AppState;
use crate::error::{ApiError, ApiResult};
use crate::models::{Organization, OrganizationInput, OrganizationKind};

async fn list(state: &AppState, kind: OrganizationKind) -> ApiResult<Json<Vec<Organization>>> {
    Ok(Json(state.repo.list_organizations(kind).await?))
}

async fn get_one(
    state: &AppState,
    kind: OrganizationKind,
    id: i64,
) -> ApiResult<Json<Organization>> {
    let org = state
        .repo
        .get_organization(kind, id)
        .await?
        .ok_or(ApiError::NotFound {
            entity: kind.label(),
            id,
        })?;
    Ok(Json(org))
}

async fn create(
    state: &AppState,
    kind: OrganizationKind,
    input: OrganizationInput,
) -> ApiResult<Json<Organization>> {
    let input = input.normalized();
    input.validate()?;
    let org = state
        .repo
        .create_organization(kind, &input, Utc::now())
        .await?;
    tracing::info!(table = kind.table(), id = org.id, "organization created");
    Ok(Json(org))
}

async fn update(
    state: &AppState,
    kind: OrganizationKind,
    id: i64,
    input: OrganizationInput,
) -> ApiResult<Json<Organization>> {
    let input = input.normalized();
    input.validate()?;
    let org = state
        .repo
        .update_organization(kind, id, &input, Utc::now())
        .await?
        .ok_or(ApiError::NotFound {
            entity: kind.label(),
            id,
        })?;
    Ok(Json(org))
}

/// Refuses to delete while students still reference the organization.
async fn delete(
    state: &AppState,
    kind: OrganizationKind,
    id: i64,
) -> ApiResult<Json<Organization>> {
    let org = state
        .repo
        .get_organization(kind, id)
        .await?
        .ok_or(ApiError::NotFound {
            entity: kind.label(),
            id,
        })?;

    let linked = state.repo.count_linked_students(kind, id).await?;
    if linked > 0 {
        return Err(ApiError::Conflict(format!(
            "{} \"{}\" cannot be deleted: {} student(s) are still linked to it. Remove or reassign them first.",
            kind.label(),
            org.name,
            linked
        )));
    }

    let deleted = state
        .repo
        .delete_organization(kind, id)
        .await?
        .ok_or(ApiError::NotFound {
            entity: kind.label(),
            id,
        })?;
    tracing::info!(table = kind.table(), id, "organization deleted");
    Ok(Json(deleted))
}

pub(super) async fn list_schools(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    list(&state, OrganizationKind::School).await
}

pub(super) async fn get_school(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<impl IntoResponse> {
    get_one(&state, OrganizationKind::School, id).await
}

pub(super) async fn create_school(
    State(state): State<AppState>,
    Json(input): Json<OrganizationInput>,
) -> ApiResult<impl IntoResponse> {
    create(&state, OrganizationKind::School, input).await
}

pub(super) async fn update_school(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<OrganizationInput>,
) -> ApiResult<impl IntoResponse> {
    update(&state, OrganizationKind::School, id, input).await
}

pub(super) async fn delete_school(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<impl IntoResponse> {
    delete(&state, OrganizationKind::School, id).await
}

pub(super) async fn list_companies(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    list(&state, OrganizationKind::Company).await
}

pub(super) async fn get_company(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<impl IntoResponse> {
    get_one(&state, OrganizationKind::Company, id).await
}

pub(super) async fn create_company(
    State(state): State<AppState>,
    Json(input): Json<OrganizationInput>,
) -> ApiResult<impl IntoResponse> {
    create(&state, OrganizationKind::Company, input).await
}

pub(super) async fn update_company(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<OrganizationInput>,
) -> ApiResult<impl IntoResponse> {
    update(&state, OrganizationKind::Company, id, input).await
}

pub(super) async fn delete_company(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<impl IntoResponse> {
    delete(&state, OrganizationKind::Company, id).await
}
