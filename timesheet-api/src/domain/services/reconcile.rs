//! Pure planning step of a timesheet save.
//!
//! Turns a proposed batch plus the stored entries into the list of writes
//! to perform and the net change in booked hours, so the budget can be
//! checked before anything is written.

use std::collections::{BTreeMap, HashMap};

use time::Date;

use crate::domain::{
    models::{ActivityId, ActivityStatus, EntryKey, TimesheetEntry},
    TimesheetError,
};

/// Hour differences below this are rounding noise, not a change.
const HOURS_TOLERANCE: f64 = 1e-6;

/// Most hours a single entry can book.
const MAX_HOURS_PER_DAY: f64 = 24.0;

/// A single write against the entry store.
#[derive(Debug, Clone, PartialEq)]
pub enum EntryChange {
    Delete { key: EntryKey, delta: f64 },
    Upsert { entry: TimesheetEntry, delta: f64 },
}

impl EntryChange {
    pub fn delta(&self) -> f64 {
        match self {
            Self::Delete { delta, .. } | Self::Upsert { delta, .. } => *delta,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReconcilePlan {
    /// Writes in date order.
    pub changes: Vec<EntryChange>,
    pub net_delta: f64,
    /// Proposed entries that belong to a different activity.
    pub skipped: usize,
}

/// Reject hours outside `0..=24`, NaN and infinities included.
pub fn validate_hours(entries: &[TimesheetEntry]) -> Result<(), TimesheetError> {
    match entries.iter().find(|entry| {
        entry
            .hours
            .is_some_and(|hours| !(0.0..=MAX_HOURS_PER_DAY).contains(&hours))
    }) {
        Some(entry) => Err(TimesheetError::InvalidHours {
            date: entry.date(),
            hours: entry.booked_hours(),
        }),
        None => Ok(()),
    }
}

/// Decide what has to be written for `proposed` given what is `existing`.
///
/// Later entries for the same date replace earlier ones. Entries that would
/// not change anything produce no write.
pub fn plan(
    activity_id: &ActivityId,
    proposed: Vec<TimesheetEntry>,
    existing: &[TimesheetEntry],
) -> ReconcilePlan {
    let stored: HashMap<Date, &TimesheetEntry> = existing
        .iter()
        .filter(|entry| entry.activity_id() == activity_id)
        .map(|entry| (entry.date(), entry))
        .collect();

    let mut skipped = 0;
    let mut by_date = BTreeMap::new();
    for entry in proposed {
        if entry.activity_id() != activity_id {
            skipped += 1;
            continue;
        }
        by_date.insert(entry.date(), entry);
    }

    let changes: Vec<EntryChange> = by_date
        .into_values()
        .filter_map(|entry| {
            let previous = stored.get(&entry.date()).copied();
            let previous_hours = previous.map_or(0.0, TimesheetEntry::booked_hours);

            if entry.is_empty() {
                return previous.map(|prev| EntryChange::Delete {
                    key: prev.key.clone(),
                    delta: -previous_hours,
                });
            }

            let delta = entry.booked_hours() - previous_hours;
            let unchanged = previous.is_some_and(|prev| {
                delta.abs() < HOURS_TOLERANCE && prev.comment == entry.comment
            });
            (!unchanged).then_some(EntryChange::Upsert { entry, delta })
        })
        .collect();

    let net_delta = changes.iter().map(EntryChange::delta).sum();

    ReconcilePlan {
        changes,
        net_delta,
        skipped,
    }
}

/// Apply the budget rule to a planned change.
///
/// Only a net increase can be rejected, and only when the projected status
/// is over budget. Activities that are already over budget can therefore
/// still be corrected downwards. Returns the projected status.
pub fn check_budget(
    before: &ActivityStatus,
    net_delta: f64,
) -> Result<ActivityStatus, TimesheetError> {
    let projected = before.project(net_delta);
    if net_delta > HOURS_TOLERANCE && !projected.is_valid() {
        return Err(TimesheetError::over_budget(projected));
    }
    Ok(projected)
}
