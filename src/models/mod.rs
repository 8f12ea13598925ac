// Domain models (JSON camelCase on the wire)

mod organization;
mod student;
mod week;

pub use organization::{Organization, OrganizationInput, OrganizationKind};
pub use student::{Student, StudentInput};
pub use week::{UpdateWeek, Week, WeekListing, WeekStatus};

/// Empty or whitespace-only optional strings are stored as NULL.
pub(crate) fn blank_to_none(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
