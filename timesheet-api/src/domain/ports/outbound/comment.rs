use async_trait::async_trait;
use time::Date;

use crate::domain::{
    models::{TimesheetComment, UserId},
    TimesheetError,
};

/// No-op implementation of CommentStore.
///
/// Used when the service is created without comment support.
#[async_trait]
impl CommentStore for () {
    async fn get_comment(
        &self,
        _user_id: &UserId,
        _week_start: Date,
    ) -> Result<Option<TimesheetComment>, TimesheetError> {
        Ok(None)
    }

    async fn save_comment(&self, _comment: TimesheetComment) -> Result<(), TimesheetError> {
        Ok(())
    }

    async fn delete_comment(
        &self,
        _user_id: &UserId,
        _week_start: Date,
    ) -> Result<(), TimesheetError> {
        Ok(())
    }
}

/// Outbound port for the free-text comment attached to a user's week.
#[async_trait]
pub trait CommentStore: Send + Sync + 'static {
    async fn get_comment(
        &self,
        user_id: &UserId,
        week_start: Date,
    ) -> Result<Option<TimesheetComment>, TimesheetError>;

    /// Store the comment, replacing any comment for the same user and week.
    async fn save_comment(&self, comment: TimesheetComment) -> Result<(), TimesheetError>;

    async fn delete_comment(&self, user_id: &UserId, week_start: Date)
        -> Result<(), TimesheetError>;
}
