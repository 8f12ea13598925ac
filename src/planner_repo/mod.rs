// SQLite store for schools, companies, students and week slots.
// Dates are ISO `YYYY-MM-DD` text; timestamps are unix seconds.
// weeks.week_start_date carries a UNIQUE index so concurrent fills cannot duplicate a week.

mod organizations;
mod students;
mod weeks;

use anyhow::Context;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::Row;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use std::path::Path;
use std::str::FromStr;

pub struct PlannerRepo {
    pool: SqlitePool,
}

impl PlannerRepo {
    /// Connect to SQLite at `path`, create parent dir and DB if missing, enable WAL + pragmas.
    pub async fn connect(path: &str, max_pool_size: u32) -> anyhow::Result<Self> {
        if let Some(parent) = Path::new(path).parent() {
            std::fs::create_dir_all(parent)?;
        }
        let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path))?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .busy_timeout(std::time::Duration::from_secs(5))
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal);
        let pool = SqlitePoolOptions::new()
            .max_connections(max_pool_size)
            .connect_with(opts)
            .await?;
        Ok(Self { pool })
    }

    pub async fn init(&self) -> anyhow::Result<()> {
        for table in ["schools", "companies"] {
            sqlx::query(&format!(
                r#"
                CREATE TABLE IF NOT EXISTS {table} (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    name TEXT NOT NULL,
                    contact_person TEXT,
                    phone TEXT,
                    email TEXT,
                    created_at INTEGER NOT NULL,
                    updated_at INTEGER NOT NULL
                )
                "#
            ))
            .execute(&self.pool)
            .await?;
        }

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS students (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                school_id INTEGER REFERENCES schools(id),
                company_id INTEGER REFERENCES companies(id),
                phone TEXT,
                email TEXT,
                created_at INTEGER NOT NULL,
                updated_at INTEGER NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS weeks (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                week_start_date TEXT NOT NULL,
                status TEXT NOT NULL DEFAULT 'free' CHECK (status IN ('free', 'booked', 'vacation')),
                student_id INTEGER REFERENCES students(id),
                notes TEXT,
                created_at INTEGER NOT NULL,
                updated_at INTEGER NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE UNIQUE INDEX IF NOT EXISTS idx_weeks_week_start_date ON weeks(week_start_date)",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_weeks_student_id ON weeks(student_id)")
            .execute(&self.pool)
            .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_students_school_id ON students(school_id)")
            .execute(&self.pool)
            .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_students_company_id ON students(company_id)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

fn timestamp_col(row: &SqliteRow, col: &str) -> anyhow::Result<DateTime<Utc>> {
    let secs: i64 = row.try_get(col)?;
    DateTime::from_timestamp(secs, 0).with_context(|| format!("{col} out of range: {secs}"))
}

fn date_col(row: &SqliteRow, col: &str) -> anyhow::Result<NaiveDate> {
    let raw: String = row.try_get(col)?;
    NaiveDate::from_str(&raw).with_context(|| format!("{col} is not an ISO date: {raw:?}"))
}
