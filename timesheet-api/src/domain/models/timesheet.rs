use super::{Activity, ActivityStatus, DateRange, TimesheetEntry, UserId};

/// The entries a user edited for one activity during a week.
#[derive(Debug, Clone)]
pub struct ActivityBatch {
    pub activity: Activity,
    pub entries: Vec<TimesheetEntry>,
}

/// A full week of edits submitted in one save.
#[derive(Debug, Clone)]
pub struct Timesheet {
    pub user_id: UserId,
    pub week: DateRange,
    pub batches: Vec<ActivityBatch>,
    /// Blank or missing removes the stored comment for the week.
    pub comment: Option<String>,
}

/// Result of saving a week: the activities whose batches were stored and
/// the ones rejected for exceeding their budget.
#[derive(Debug, Clone, Default)]
pub struct TimesheetSaveOutcome {
    pub accepted: Vec<ActivityStatus>,
    pub over_budget: Vec<ActivityStatus>,
}

impl TimesheetSaveOutcome {
    pub fn is_complete(&self) -> bool {
        self.over_budget.is_empty()
    }
}
