use std::fmt;

use time::{Date, Duration};

use crate::domain::TimesheetError;

/// An inclusive range of calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateRange {
    start: Date,
    end: Date,
}

impl DateRange {
    /// Create a range, rejecting a start after the end.
    pub fn new(start: Date, end: Date) -> Result<Self, TimesheetError> {
        if start > end {
            return Err(TimesheetError::InvalidDateRange);
        }
        Ok(Self { start, end })
    }

    /// The ISO week (Monday through Sunday) containing `date`.
    pub fn for_week(date: Date) -> Self {
        let offset = date.weekday().number_days_from_monday();
        let start = date - Duration::days(offset.into());
        Self {
            start,
            end: start + Duration::days(6),
        }
    }

    pub fn start(&self) -> Date {
        self.start
    }

    pub fn end(&self) -> Date {
        self.end
    }

    /// The smallest range covering this range and all of `dates`.
    pub fn span_including(&self, dates: impl IntoIterator<Item = Date>) -> Self {
        dates.into_iter().fold(*self, |range, date| Self {
            start: range.start.min(date),
            end: range.end.max(date),
        })
    }
}

#[cfg(test)]
impl DateRange {
    /// A range covering a single day.
    pub fn single_day(date: Date) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    /// The calendar month containing `date`.
    pub fn for_month(date: Date) -> Self {
        // Day 1 and day 28 exist in every month.
        let start = date.replace_day(1).unwrap_or(date);
        let end = (28..=31)
            .rev()
            .find_map(|day| date.replace_day(day).ok())
            .unwrap_or(date);
        Self { start, end }
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}
