// Week slot models: one row per Monday-anchored calendar week

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::blank_to_none;

/// Booking status of a week; serializes to lowercase JSON (e.g. "booked").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStatus {
    Free,
    Booked,
    Vacation,
}

impl WeekStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WeekStatus::Free => "free",
            WeekStatus::Booked => "booked",
            WeekStatus::Vacation => "vacation",
        }
    }

    /// Parse the `status` column value.
    pub fn from_db(s: &str) -> anyhow::Result<Self> {
        match s {
            "free" => Ok(WeekStatus::Free),
            "booked" => Ok(WeekStatus::Booked),
            "vacation" => Ok(WeekStatus::Vacation),
            other => anyhow::bail!("unknown week status {other:?}"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Week {
    pub id: i64,
    pub week_start_date: NaiveDate,
    pub status: WeekStatus,
    pub student_id: Option<i64>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Calendar row for one week, joined with the booked student and the student's school.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekListing {
    pub id: i64,
    pub week_start_date: NaiveDate,
    pub status: WeekStatus,
    pub student_id: Option<i64>,
    pub student_name: Option<String>,
    pub school_name: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWeek {
    pub status: WeekStatus,
    #[serde(default)]
    pub student_id: Option<i64>,
    #[serde(default)]
    #[validate(length(max = 1000, message = "notes must be at most 1000 characters"))]
    pub notes: Option<String>,
}

impl UpdateWeek {
    pub fn normalized(self) -> Self {
        Self {
            notes: blank_to_none(self.notes),
            ..self
        }
    }

    /// A free week has no student; a booked week must have one.
    pub fn check_assignment(&self) -> Result<(), &'static str> {
        match (self.status, self.student_id) {
            (WeekStatus::Free, Some(_)) => Err("a free week cannot have a student assigned"),
            (WeekStatus::Booked, None) => Err("a booked week requires a student"),
            _ => Ok(()),
        }
    }
}
