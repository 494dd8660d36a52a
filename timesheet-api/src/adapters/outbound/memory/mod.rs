//! In-memory implementations of the outbound ports.
//!
//! Used by the binary when no database is configured and by the tests.

mod activity_catalog;
mod activity_status;
mod approval_status;
mod comment;
mod entry_store;

use std::sync::PoisonError;

pub use activity_catalog::*;
pub use activity_status::*;
pub use approval_status::*;
pub use comment::*;
pub use entry_store::*;

use crate::domain::TimesheetError;

fn poisoned<T>(_: PoisonError<T>) -> TimesheetError {
    TimesheetError::storage("in-memory store lock poisoned")
}
