use serde::{Deserialize, Serialize};
use strum::Display;

use super::{ApprovalStatusId, CustomerId, DateRange, UserId};

/// Lifecycle of a user's hours for one customer over one period.
///
/// Saving a timesheet only ever creates `InProgress`; the other
/// transitions are driven by the approval workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ApprovalStatusType {
    InProgress,
    ReadyForApproval,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApprovalStatus {
    /// `None` until the record has been persisted.
    pub id: Option<ApprovalStatusId>,
    pub user_id: UserId,
    pub customer_id: CustomerId,
    pub date_range: DateRange,
    pub status: ApprovalStatusType,
}

impl ApprovalStatus {
    pub fn in_progress(user_id: UserId, customer_id: CustomerId, date_range: DateRange) -> Self {
        Self {
            id: None,
            user_id,
            customer_id,
            date_range,
            status: ApprovalStatusType::InProgress,
        }
    }
}
