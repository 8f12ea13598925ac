// Schools and partner companies share one shape: a name plus contact details

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::blank_to_none;

/// Which organization table a record lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrganizationKind {
    School,
    Company,
}

impl OrganizationKind {
    pub fn table(&self) -> &'static str {
        match self {
            OrganizationKind::School => "schools",
            OrganizationKind::Company => "companies",
        }
    }

    /// Column on `students` that references this kind.
    pub fn student_column(&self) -> &'static str {
        match self {
            OrganizationKind::School => "school_id",
            OrganizationKind::Company => "company_id",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OrganizationKind::School => "School",
            OrganizationKind::Company => "Company",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub id: i64,
    pub name: String,
    pub contact_person: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create/update body for schools and companies.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationInput {
    #[validate(length(min = 1, max = 255, message = "name is required (1-255 characters)"))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 255, message = "contactPerson must be at most 255 characters"))]
    pub contact_person: Option<String>,
    #[serde(default)]
    #[validate(length(max = 50, message = "phone must be at most 50 characters"))]
    pub phone: Option<String>,
    #[serde(default)]
    #[validate(
        email(message = "invalid email address"),
        length(max = 255, message = "email must be at most 255 characters")
    )]
    pub email: Option<String>,
}

impl OrganizationInput {
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            contact_person: blank_to_none(self.contact_person),
            phone: blank_to_none(self.phone),
            email: blank_to_none(self.email),
        }
    }
}
