use std::sync::Arc;

use async_trait::async_trait;

use super::MemoryEntryStore;
use crate::domain::{
    models::{Activity, ActivityStatus},
    ports::outbound::ActivityStatusOracle,
    TimesheetError,
};

/// Computes activity status from the hours held in a [`MemoryEntryStore`].
pub struct MemoryActivityStatusOracle {
    entries: Arc<MemoryEntryStore>,
}

impl MemoryActivityStatusOracle {
    pub fn new(entries: Arc<MemoryEntryStore>) -> Self {
        Self { entries }
    }
}

#[async_trait]
impl ActivityStatusOracle for MemoryActivityStatusOracle {
    async fn get_activity_status(
        &self,
        activity: &Activity,
    ) -> Result<ActivityStatus, TimesheetError> {
        let booked = self.entries.total_hours(&activity.id)?;
        Ok(ActivityStatus::new(
            activity.id.clone(),
            activity.allotted_hours,
            booked,
        ))
    }
}
