// Week slot queries and the WeekStore implementation used by the filler.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;
use tracing::instrument;

use super::{PlannerRepo, date_col, timestamp_col};
use crate::calendar::WeekStore;
use crate::models::{UpdateWeek, Week, WeekListing, WeekStatus};

impl PlannerRepo {
    /// Week slots of one calendar year ordered by start date, with student and school names.
    #[instrument(skip(self), fields(repo = "planner", operation = "list_weeks_for_year"))]
    pub async fn list_weeks_for_year(&self, year: i32) -> anyhow::Result<Vec<WeekListing>> {
        let rows = sqlx::query(
            r#"
            SELECT w.id, w.week_start_date, w.status, w.student_id, w.notes,
                   st.name AS student_name, sc.name AS school_name
            FROM weeks w
            LEFT JOIN students st ON st.id = w.student_id
            LEFT JOIN schools sc ON sc.id = st.school_id
            WHERE w.week_start_date >= $1 AND w.week_start_date < $2
            ORDER BY w.week_start_date ASC
            "#,
        )
        .bind(format!("{year:04}-01-01"))
        .bind(format!("{:04}-01-01", year.saturating_add(1)))
        .fetch_all(&self.pool)
        .await?;

        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            out.push(WeekListing {
                id: row.try_get("id")?,
                week_start_date: date_col(&row, "week_start_date")?,
                status: WeekStatus::from_db(row.try_get("status")?)?,
                student_id: row.try_get("student_id")?,
                student_name: row.try_get("student_name")?,
                school_name: row.try_get("school_name")?,
                notes: row.try_get("notes")?,
            });
        }
        Ok(out)
    }

    /// Distinct years that have at least one week slot, ascending.
    pub async fn available_years(&self) -> anyhow::Result<Vec<i32>> {
        let years = sqlx::query_scalar::<_, i64>(
            "SELECT DISTINCT CAST(substr(week_start_date, 1, 4) AS INTEGER) AS year FROM weeks ORDER BY year",
        )
        .fetch_all(&self.pool)
        .await?;
        years
            .into_iter()
            .map(|y| i32::try_from(y).map_err(anyhow::Error::from))
            .collect()
    }

    pub async fn get_week(&self, id: i64) -> anyhow::Result<Option<Week>> {
        let row = sqlx::query("SELECT * FROM weeks WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(parse_week_row).transpose()
    }

    /// Apply a status/student/notes change. `None` when the week does not exist.
    #[instrument(skip(self, update), fields(repo = "planner", operation = "update_week"))]
    pub async fn update_week(
        &self,
        id: i64,
        update: &UpdateWeek,
        now: DateTime<Utc>,
    ) -> anyhow::Result<Option<Week>> {
        let row = sqlx::query(
            "UPDATE weeks SET status = $1, student_id = $2, notes = $3, updated_at = $4 WHERE id = $5 RETURNING *",
        )
        .bind(update.status.as_str())
        .bind(update.student_id)
        .bind(update.notes.as_deref())
        .bind(now.timestamp())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(parse_week_row).transpose()
    }
}

impl WeekStore for PlannerRepo {
    #[instrument(skip(self), fields(repo = "planner", operation = "week_start_dates"))]
    async fn week_start_dates(&self) -> anyhow::Result<Vec<NaiveDate>> {
        let rows = sqlx::query("SELECT week_start_date FROM weeks")
            .fetch_all(&self.pool)
            .await?;
        rows.iter()
            .map(|row| date_col(row, "week_start_date"))
            .collect()
    }

    #[instrument(skip(self, starts, now), fields(repo = "planner", operation = "insert_free_weeks", batch = starts.len()))]
    async fn insert_free_weeks(
        &self,
        starts: &[NaiveDate],
        now: DateTime<Utc>,
    ) -> anyhow::Result<u64> {
        if starts.is_empty() {
            return Ok(0);
        }
        let ts = now.timestamp();
        let mut tx = self.pool.begin().await?;
        let mut created = 0;
        for start in starts {
            let r = sqlx::query(
                "INSERT INTO weeks (week_start_date, status, created_at, updated_at)
                 VALUES ($1, $2, $3, $4)
                 ON CONFLICT(week_start_date) DO NOTHING",
            )
            .bind(start.to_string())
            .bind(WeekStatus::Free.as_str())
            .bind(ts)
            .bind(ts)
            .execute(&mut *tx)
            .await?;
            created += r.rows_affected();
        }
        tx.commit().await?;
        Ok(created)
    }
}

fn parse_week_row(row: &SqliteRow) -> anyhow::Result<Week> {
    Ok(Week {
        id: row.try_get("id")?,
        week_start_date: date_col(row, "week_start_date")?,
        status: WeekStatus::from_db(row.try_get("status")?)?,
        student_id: row.try_get("student_id")?,
        notes: row.try_get("notes")?,
        created_at: timestamp_col(row, "created_at")?,
        updated_at: timestamp_col(row, "updated_at")?,
    })
}
