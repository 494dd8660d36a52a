use thiserror::Error;
use time::Date;

use super::models::ActivityStatus;

/// Errors that can occur while saving or reading timesheets.
///
/// Adapters report their own failures through `Storage`, and the service
/// passes them through untouched.
#[derive(Debug, Error)]
pub enum TimesheetError {
    /// The batch would push the activity over its allotted hours. Carries
    /// the status the activity would have had.
    #[error(
        "activity {} would be over budget ({} of {:?} hours booked)",
        .0.activity_id,
        .0.booked_hours,
        .0.allotted_hours
    )]
    OverBudget(Box<ActivityStatus>),
    #[error("activity not found: {0}")]
    ActivityNotFound(String),
    #[error("invalid date range")]
    InvalidDateRange,
    /// Hours must be a finite value between zero and a full day.
    #[error("invalid hours on {date}: {hours}")]
    InvalidHours { date: Date, hours: f64 },
    #[error("storage error: {0}")]
    Storage(String),
}

impl TimesheetError {
    pub fn over_budget(status: ActivityStatus) -> Self {
        Self::OverBudget(Box::new(status))
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }
}
