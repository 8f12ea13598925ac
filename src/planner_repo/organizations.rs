// Schools and companies. Both tables share a schema; the table name comes from
// OrganizationKind (static strings only, never user input).

use chrono::{DateTime, Utc};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;
use tracing::instrument;

use super::{PlannerRepo, timestamp_col};
use crate::models::{Organization, OrganizationInput, OrganizationKind};

impl PlannerRepo {
    pub async fn list_organizations(
        &self,
        kind: OrganizationKind,
    ) -> anyhow::Result<Vec<Organization>> {
        let rows = sqlx::query(&format!("SELECT * FROM {} ORDER BY name ASC", kind.table()))
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(parse_organization_row).collect()
    }

    pub async fn get_organization(
        &self,
        kind: OrganizationKind,
        id: i64,
    ) -> anyhow::Result<Option<Organization>> {
        let row = sqlx::query(&format!("SELECT * FROM {} WHERE id = $1", kind.table()))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(parse_organization_row).transpose()
    }

    pub async fn organization_exists(
        &self,
        kind: OrganizationKind,
        id: i64,
    ) -> anyhow::Result<bool> {
        let found = sqlx::query_scalar::<_, i64>(&format!(
            "SELECT COUNT(*) FROM {} WHERE id = $1",
            kind.table()
        ))
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(found > 0)
    }

    #[instrument(skip(self, input), fields(repo = "planner", operation = "create_organization", table = kind.table()))]
    pub async fn create_organization(
        &self,
        kind: OrganizationKind,
        input: &OrganizationInput,
        now: DateTime<Utc>,
    ) -> anyhow::Result<Organization> {
        let row = sqlx::query(&format!(
            "INSERT INTO {} (name, contact_person, phone, email, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $5) RETURNING *",
            kind.table()
        ))
        .bind(&input.name)
        .bind(input.contact_person.as_deref())
        .bind(input.phone.as_deref())
        .bind(input.email.as_deref())
        .bind(now.timestamp())
        .fetch_one(&self.pool)
        .await?;
        parse_organization_row(&row)
    }

    #[instrument(skip(self, input), fields(repo = "planner", operation = "update_organization", table = kind.table()))]
    pub async fn update_organization(
        &self,
        kind: OrganizationKind,
        id: i64,
        input: &OrganizationInput,
        now: DateTime<Utc>,
    ) -> anyhow::Result<Option<Organization>> {
        let row = sqlx::query(&format!(
            "UPDATE {} SET name = $1, contact_person = $2, phone = $3, email = $4, updated_at = $5
             WHERE id = $6 RETURNING *",
            kind.table()
        ))
        .bind(&input.name)
        .bind(input.contact_person.as_deref())
        .bind(input.phone.as_deref())
        .bind(input.email.as_deref())
        .bind(now.timestamp())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(parse_organization_row).transpose()
    }

    /// Number of students linked to this school or company.
    pub async fn count_linked_students(
        &self,
        kind: OrganizationKind,
        id: i64,
    ) -> anyhow::Result<i64> {
        let n = sqlx::query_scalar::<_, i64>(&format!(
            "SELECT COUNT(*) FROM students WHERE {} = $1",
            kind.student_column()
        ))
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(n)
    }

    #[instrument(skip(self), fields(repo = "planner", operation = "delete_organization", table = kind.table()))]
    pub async fn delete_organization(
        &self,
        kind: OrganizationKind,
        id: i64,
    ) -> anyhow::Result<Option<Organization>> {
        let row = sqlx::query(&format!(
            "DELETE FROM {} WHERE id = $1 RETURNING *",
            kind.table()
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(parse_organization_row).transpose()
    }
}

fn parse_organization_row(row: &SqliteRow) -> anyhow::Result<Organization> {
    Ok(Organization {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        contact_person: row.try_get("contact_person")?,
        phone: row.try_get("phone")?,
        email: row.try_get("email")?,
        created_at: timestamp_col(row, "created_at")?,
        updated_at: timestamp_col(row, "updated_at")?,
    })
}
