// Optional startup fill: one pass of the week filler before serving requests.

use crate::calendar::{FillPolicy, FillSummary, fill_next_missing_weeks};
use crate::planner_repo::PlannerRepo;
use chrono::{Datelike, Utc};
use tracing::info;

/// Fills the earliest incomplete year of the horizon once. Later years are left for
/// subsequent fill requests, same as the HTTP endpoint.
pub async fn run_backfill(repo: &PlannerRepo, policy: FillPolicy) -> anyhow::Result<FillSummary> {
    let summary =
        fill_next_missing_weeks(repo, chrono::Local::now().year(), policy, Utc::now()).await?;
    info!(year = ?summary.year, created = summary.created, "startup week fill complete");
    Ok(summary)
}
