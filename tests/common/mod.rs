// Shared test helpers

#![allow(dead_code)]

use chrono::NaiveDate;
use practicum_planner::planner_repo::PlannerRepo;
use tempfile::TempDir;

/// Fresh, initialized database in a temp dir. Keep the TempDir alive for the test.
pub async fn temp_repo() -> (TempDir, PlannerRepo) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("planner.db");
    let repo = PlannerRepo::connect(path.to_str().unwrap(), 4)
        .await
        .unwrap();
    repo.init().await.unwrap();
    (dir, repo)
}

pub fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn config_toml(db_path: &str) -> String {
    format!(
        r#"
[server]
port = 8081
host = "127.0.0.1"

[database]
path = "{db_path}"
max_pool_size = 4

[calendar]
horizon_years = 5
batch_size = 5
"#
    )
}
