use time::Date;

use super::{ActivityId, UserId};

/// Storage key of a timesheet entry: one entry per activity per day.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryKey {
    pub activity_id: ActivityId,
    pub date: Date,
}

impl EntryKey {
    pub fn new(activity_id: impl Into<ActivityId>, date: Date) -> Self {
        Self {
            activity_id: activity_id.into(),
            date,
        }
    }
}

/// Hours booked on an activity for a single day.
///
/// An entry without hours (or with zero hours) is a request to remove
/// whatever is stored for its key.
#[derive(Debug, Clone, PartialEq)]
pub struct TimesheetEntry {
    pub key: EntryKey,
    pub hours: Option<f64>,
    pub comment: Option<String>,
}

impl TimesheetEntry {
    pub fn new(activity_id: impl Into<ActivityId>, date: Date, hours: Option<f64>) -> Self {
        Self {
            key: EntryKey::new(activity_id, date),
            hours,
            comment: None,
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn activity_id(&self) -> &ActivityId {
        &self.key.activity_id
    }

    pub fn date(&self) -> Date {
        self.key.date
    }

    pub fn is_empty(&self) -> bool {
        self.hours.map_or(true, |hours| hours == 0.0)
    }

    /// Booked hours, counting an empty entry as zero.
    pub fn booked_hours(&self) -> f64 {
        self.hours.unwrap_or(0.0)
    }
}

/// A weekly free-text comment a user attaches to their timesheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimesheetComment {
    pub user_id: UserId,
    pub week_start: Date,
    pub text: String,
}
