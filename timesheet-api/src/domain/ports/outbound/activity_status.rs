use async_trait::async_trait;

use crate::domain::{
    models::{Activity, ActivityStatus},
    TimesheetError,
};

/// Outbound port reporting how much of its budget an activity has used.
#[async_trait]
pub trait ActivityStatusOracle: Send + Sync + 'static {
    /// Compute the activity's current status from what is stored right now.
    async fn get_activity_status(
        &self,
        activity: &Activity,
    ) -> Result<ActivityStatus, TimesheetError>;
}
