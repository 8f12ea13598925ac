// HTTP routes

mod http;
mod organizations;
mod students;
mod weeks;

use axum::{
    Router,
    routing::{get, patch, post},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::calendar::FillPolicy;
use crate::config::AppConfig;
use crate::planner_repo::PlannerRepo;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) repo: Arc<PlannerRepo>,
    pub(crate) config: AppConfig,
}

impl AppState {
    pub(crate) fn fill_policy(&self) -> FillPolicy {
        FillPolicy {
            horizon_years: self.config.calendar.horizon_years,
            batch_size: self.config.calendar.batch_size,
        }
    }
}

pub fn app(repo: Arc<PlannerRepo>, config: AppConfig) -> Router {
    let state = AppState { repo, config };
    Router::new()
        .route("/", get(|| async { "Practicum planner is running" })) // GET /
        .route("/version", get(http::version_handler)) // GET /version
        .route(
            "/api/schools",
            get(organizations::list_schools).post(organizations::create_school),
        )
        .route(
            "/api/schools/{id}",
            get(organizations::get_school)
                .patch(organizations::update_school)
                .delete(organizations::delete_school),
        )
        .route(
            "/api/companies",
            get(organizations::list_companies).post(organizations::create_company),
        )
        .route(
            "/api/companies/{id}",
            get(organizations::get_company)
                .patch(organizations::update_company)
                .delete(organizations::delete_company),
        )
        .route(
            "/api/students",
            get(students::list_students).post(students::create_student),
        )
        .route(
            "/api/students/{id}",
            get(students::get_student)
                .patch(students::update_student)
                .delete(students::delete_student),
        )
        .route("/api/weeks", get(weeks::list_weeks)) // GET /api/weeks?year=
        .route("/api/weeks/available-years", get(weeks::available_years))
        .route("/api/weeks/next-missing-year", get(weeks::next_missing_year))
        .route("/api/weeks/fill-missing", post(weeks::fill_missing)) // POST /api/weeks/fill-missing
        .route("/api/weeks/{id}", patch(weeks::update_week)) // PATCH /api/weeks/{id}
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(state)
}
