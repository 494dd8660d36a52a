use serde::Serialize;

use super::ActivityId;

/// Where an activity's booked hours stand relative to its budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BudgetState {
    /// The activity has no allotted hours.
    Unrestricted,
    InAllotted,
    OverAllotted,
}

impl BudgetState {
    pub fn evaluate(allotted_hours: Option<f64>, booked_hours: f64) -> Self {
        match allotted_hours {
            None => Self::Unrestricted,
            Some(allotted) if booked_hours <= allotted => Self::InAllotted,
            Some(_) => Self::OverAllotted,
        }
    }
}

/// A point-in-time view of an activity's budget consumption.
///
/// Never cached: it is computed from the stored entries each time it is
/// requested, and projected in memory while a batch is being validated.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityStatus {
    pub activity_id: ActivityId,
    pub booked_hours: f64,
    pub allotted_hours: Option<f64>,
    pub budget: BudgetState,
}

impl ActivityStatus {
    pub fn new(activity_id: ActivityId, allotted_hours: Option<f64>, booked_hours: f64) -> Self {
        Self {
            activity_id,
            booked_hours,
            allotted_hours,
            budget: BudgetState::evaluate(allotted_hours, booked_hours),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.budget != BudgetState::OverAllotted
    }

    /// Hours left before the budget is exceeded. Negative once over budget.
    pub fn remaining_hours(&self) -> Option<f64> {
        self.allotted_hours
            .map(|allotted| allotted - self.booked_hours)
    }

    /// The status this activity would have after booking `delta` more hours.
    pub fn project(&self, delta: f64) -> Self {
        Self::new(
            self.activity_id.clone(),
            self.allotted_hours,
            self.booked_hours + delta,
        )
    }
}
