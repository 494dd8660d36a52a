//! Timesheet entry storage port (outbound).

use async_trait::async_trait;

use crate::domain::{
    models::{ActivityId, DateRange, EntryKey, TimesheetEntry},
    TimesheetError,
};

/// Outbound port for persisting timesheet entries.
///
/// Entries are keyed by (activity, date). Concurrent writes to the same key
/// are last-writer-wins; implementations that need more must version rows
/// themselves.
#[async_trait]
pub trait EntryStore: Send + Sync + 'static {
    /// Remove the entry stored under `key`. Removing a missing key is not an error.
    async fn delete(&self, key: &EntryKey) -> Result<(), TimesheetError>;

    /// Insert the entry, or overwrite hours and comment if the key exists.
    async fn merge(&self, entry: TimesheetEntry) -> Result<TimesheetEntry, TimesheetError>;

    /// All entries for `activity_id` dated within `range`.
    async fn get_entries_in_range(
        &self,
        activity_id: &ActivityId,
        range: &DateRange,
    ) -> Result<Vec<TimesheetEntry>, TimesheetError>;
}
