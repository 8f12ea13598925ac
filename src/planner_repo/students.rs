// Students: CRUD plus releasing their week slots on delete.

use chrono::{DateTime, Utc};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;
use tracing::instrument;

use super::{PlannerRepo, timestamp_col};
use crate::models::{Student, StudentInput};

impl PlannerRepo {
    pub async fn list_students(&self) -> anyhow::Result<Vec<Student>> {
        let rows = sqlx::query("SELECT * FROM students ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(parse_student_row).collect()
    }

    pub async fn get_student(&self, id: i64) -> anyhow::Result<Option<Student>> {
        let row = sqlx::query("SELECT * FROM students WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(parse_student_row).transpose()
    }

    pub async fn student_exists(&self, id: i64) -> anyhow::Result<bool> {
        let found = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM students WHERE id = $1")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(found > 0)
    }

    #[instrument(skip(self, input), fields(repo = "planner", operation = "create_student"))]
    pub async fn create_student(
        &self,
        input: &StudentInput,
        now: DateTime<Utc>,
    ) -> anyhow::Result<Student> {
        let row = sqlx::query(
            "INSERT INTO students (name, school_id, company_id, phone, email, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $6) RETURNING *",
        )
        .bind(&input.name)
        .bind(input.school_id)
        .bind(input.company_id)
        .bind(input.phone.as_deref())
        .bind(input.email.as_deref())
        .bind(now.timestamp())
        .fetch_one(&self.pool)
        .await?;
        parse_student_row(&row)
    }

    #[instrument(skip(self, input), fields(repo = "planner", operation = "update_student"))]
    pub async fn update_student(
        &self,
        id: i64,
        input: &StudentInput,
        now: DateTime<Utc>,
    ) -> anyhow::Result<Option<Student>> {
        let row = sqlx::query(
            "UPDATE students SET name = $1, school_id = $2, company_id = $3, phone = $4, email = $5, updated_at = $6
             WHERE id = $7 RETURNING *",
        )
        .bind(&input.name)
        .bind(input.school_id)
        .bind(input.company_id)
        .bind(input.phone.as_deref())
        .bind(input.email.as_deref())
        .bind(now.timestamp())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(parse_student_row).transpose()
    }

    /// Delete a student. Booked weeks go back to `free`; vacation weeks keep
    /// their status; all lose the student reference. Notes are kept.
    #[instrument(skip(self), fields(repo = "planner", operation = "delete_student"))]
    pub async fn delete_student(
        &self,
        id: i64,
        now: DateTime<Utc>,
    ) -> anyhow::Result<Option<Student>> {
        let mut tx = self.pool.begin().await?;

        let released = sqlx::query(
            "UPDATE weeks
             SET status = CASE WHEN status = 'booked' THEN 'free' ELSE status END,
                 student_id = NULL,
                 updated_at = $1
             WHERE student_id = $2",
        )
        .bind(now.timestamp())
        .bind(id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        let row = sqlx::query("DELETE FROM students WHERE id = $1 RETURNING *")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        let Some(row) = row else {
            return Ok(None);
        };
        let student = parse_student_row(&row)?;
        tx.commit().await?;

        tracing::debug!(student_id = id, released, "student deleted");
        Ok(Some(student))
    }
}

fn parse_student_row(row: &SqliteRow) -> anyhow::Result<Student> {
    Ok(Student {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        school_id: row.try_get("school_id")?,
        company_id: row.try_get("company_id")?,
        phone: row.try_get("phone")?,
        email: row.try_get("email")?,
        created_at: timestamp_col(row, "created_at")?,
        updated_at: timestamp_col(row, "updated_at")?,
    })
}
