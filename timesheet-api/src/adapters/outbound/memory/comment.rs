use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use time::Date;

use super::poisoned;
use crate::domain::{
    models::{TimesheetComment, UserId},
    ports::outbound::CommentStore,
    TimesheetError,
};

#[derive(Default)]
pub struct MemoryCommentStore {
    comments: RwLock<HashMap<(UserId, Date), TimesheetComment>>,
}

impl MemoryCommentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CommentStore for MemoryCommentStore {
    async fn get_comment(
        &self,
        user_id: &UserId,
        week_start: Date,
    ) -> Result<Option<TimesheetComment>, TimesheetError> {
        let comments = self.comments.read().map_err(poisoned)?;
        Ok(comments.get(&(*user_id, week_start)).cloned())
    }

    async fn save_comment(&self, comment: TimesheetComment) -> Result<(), TimesheetError> {
        self.comments
            .write()
            .map_err(poisoned)?
            .insert((comment.user_id, comment.week_start), comment);
        Ok(())
    }

    async fn delete_comment(
        &self,
        user_id: &UserId,
        week_start: Date,
    ) -> Result<(), TimesheetError> {
        self.comments
            .write()
            .map_err(poisoned)?
            .remove(&(*user_id, week_start));
        Ok(())
    }
}
