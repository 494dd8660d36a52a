//! Approval status repository port (outbound).

use async_trait::async_trait;

use crate::domain::{
    models::{ApprovalStatus, CustomerId, DateRange, UserId},
    TimesheetError,
};

/// Outbound port for approval status records.
#[async_trait]
pub trait ApprovalStatusStore: Send + Sync + 'static {
    /// Records for the user's work for a customer over exactly `range`.
    ///
    /// An empty list means no record exists yet.
    async fn get_for_user_working_for_customer(
        &self,
        user_id: &UserId,
        customer_id: &CustomerId,
        range: &DateRange,
    ) -> Result<Vec<ApprovalStatus>, TimesheetError>;

    /// Insert a record without an id, or update the record with the same id.
    /// Inserting into a scope that already has a record returns that record
    /// instead, so concurrent first saves end up sharing one.
    ///
    /// Returns the stored record, which always has an id.
    async fn persist(&self, status: ApprovalStatus) -> Result<ApprovalStatus, TimesheetError>;
}
