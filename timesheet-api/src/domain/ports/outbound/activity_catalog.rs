use async_trait::async_trait;

use crate::domain::{
    models::{Activity, ActivityId},
    TimesheetError,
};

/// Outbound port resolving activity ids to the activities (with their
/// project, customer and assignee) that time is booked against.
#[async_trait]
pub trait ActivityCatalog: Send + Sync + 'static {
    async fn get_activity(&self, id: &ActivityId) -> Result<Option<Activity>, TimesheetError>;
}
