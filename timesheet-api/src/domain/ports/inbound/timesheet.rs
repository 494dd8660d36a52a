use async_trait::async_trait;
use time::Date;

use crate::domain::{
    models::{
        Activity, ActivityId, ActivityStatus, ApprovalStatus, CustomerId, DateRange, Timesheet,
        TimesheetComment, TimesheetEntry, TimesheetSaveOutcome, UserId,
    },
    TimesheetError,
};

/// Inbound port for timesheet operations.
///
/// This trait defines the use cases that HTTP handlers can invoke.
#[async_trait]
pub trait TimesheetService: Send + Sync + 'static {
    // ========================================================================
    // Saving
    // ========================================================================

    /// Reconcile a batch of edited entries for one activity with storage.
    ///
    /// Empty entries delete, the rest are merged. Fails with
    /// [`TimesheetError::OverBudget`] before writing anything if the batch
    /// adds hours and leaves the activity over its budget. On success the
    /// approval status for the assignee, customer and `range` exists, and
    /// the activity's refreshed status is returned.
    async fn validate_and_persist(
        &self,
        activity: &Activity,
        entries: Vec<TimesheetEntry>,
        range: DateRange,
    ) -> Result<Vec<ActivityStatus>, TimesheetError>;

    /// Save a whole week, one activity batch at a time.
    ///
    /// An over-budget batch is reported in the outcome and does not stop
    /// the remaining batches.
    async fn persist_timesheet_week(
        &self,
        timesheet: Timesheet,
    ) -> Result<TimesheetSaveOutcome, TimesheetError>;

    // ========================================================================
    // Lookups
    // ========================================================================

    async fn get_activity(&self, id: &ActivityId) -> Result<Activity, TimesheetError>;

    /// Stored entries for an activity, ordered by date.
    async fn get_entries(
        &self,
        activity_id: &ActivityId,
        range: DateRange,
    ) -> Result<Vec<TimesheetEntry>, TimesheetError>;

    async fn get_activity_status(
        &self,
        activity: &Activity,
    ) -> Result<ActivityStatus, TimesheetError>;

    async fn get_approval_statuses(
        &self,
        user_id: &UserId,
        customer_id: &CustomerId,
        range: DateRange,
    ) -> Result<Vec<ApprovalStatus>, TimesheetError>;

    async fn get_comment(
        &self,
        user_id: &UserId,
        week_start: Date,
    ) -> Result<Option<TimesheetComment>, TimesheetError>;
}
