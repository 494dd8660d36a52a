//! HTTP response types for timesheet endpoints.
//!
//! These types serialize to the JSON format expected by the frontend.

use serde::Serialize;

use crate::domain::models::{
    ActivityStatus, ApprovalStatus, ApprovalStatusType, BudgetState, TimesheetComment,
    TimesheetEntry, TimesheetSaveOutcome,
};

/// Budget status of one activity.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityStatusResponse {
    pub activity_id: String,
    pub booked_hours: f64,
    /// Absent for activities without a budget.
    pub allotted_hours: Option<f64>,
    pub remaining_hours: Option<f64>,
    pub budget: BudgetState,
    pub valid: bool,
}

impl From<ActivityStatus> for ActivityStatusResponse {
    fn from(status: ActivityStatus) -> Self {
        Self {
            valid: status.is_valid(),
            remaining_hours: status.remaining_hours(),
            activity_id: status.activity_id.to_string(),
            booked_hours: status.booked_hours,
            allotted_hours: status.allotted_hours,
            budget: status.budget,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimesheetEntryResponse {
    pub activity_id: String,
    /// Date in YYYY-MM-DD format.
    pub date: String,
    pub hours: Option<f64>,
    pub comment: Option<String>,
}

impl From<TimesheetEntry> for TimesheetEntryResponse {
    fn from(entry: TimesheetEntry) -> Self {
        Self {
            activity_id: entry.key.activity_id.to_string(),
            date: entry.key.date.to_string(),
            hours: entry.hours,
            comment: entry.comment,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalStatusResponse {
    pub id: Option<i32>,
    pub user_id: i32,
    pub customer_id: String,
    pub from: String,
    pub to: String,
    pub status: ApprovalStatusType,
}

impl From<ApprovalStatus> for ApprovalStatusResponse {
    fn from(status: ApprovalStatus) -> Self {
        Self {
            id: status.id.map(|id| id.as_i32()),
            user_id: status.user_id.as_i32(),
            customer_id: status.customer_id.to_string(),
            from: status.date_range.start().to_string(),
            to: status.date_range.end().to_string(),
            status: status.status,
        }
    }
}

/// Result of saving a week. `complete` is false when any activity was
/// rejected for exceeding its budget.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimesheetSaveResponse {
    pub complete: bool,
    pub accepted: Vec<ActivityStatusResponse>,
    pub over_budget: Vec<ActivityStatusResponse>,
}

impl From<TimesheetSaveOutcome> for TimesheetSaveResponse {
    fn from(outcome: TimesheetSaveOutcome) -> Self {
        Self {
            complete: outcome.is_complete(),
            accepted: outcome.accepted.into_iter().map(Into::into).collect(),
            over_budget: outcome.over_budget.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub user_id: i32,
    pub week_start: String,
    pub text: String,
}

impl From<TimesheetComment> for CommentResponse {
    fn from(comment: TimesheetComment) -> Self {
        Self {
            user_id: comment.user_id.as_i32(),
            week_start: comment.week_start.to_string(),
            text: comment.text,
        }
    }
}
