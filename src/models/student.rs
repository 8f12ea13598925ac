// Nursing students, optionally linked to a school and a company

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::blank_to_none;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: i64,
    pub name: String,
    pub school_id: Option<i64>,
    pub company_id: Option<i64>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct StudentInput {
    #[validate(length(min = 1, max = 255, message = "name is required (1-255 characters)"))]
    pub name: String,
    #[serde(default)]
    pub school_id: Option<i64>,
    #[serde(default)]
    pub company_id: Option<i64>,
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

impl StudentInput {
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            phone: blank_to_none(self.phone),
            email: blank_to_none(self.email),
            ..self
        }
    }
}
