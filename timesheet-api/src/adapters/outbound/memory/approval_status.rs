use std::sync::RwLock;

use async_trait::async_trait;

use super::poisoned;
use crate::domain::{
    models::{ApprovalStatus, ApprovalStatusId, CustomerId, DateRange, UserId},
    ports::outbound::ApprovalStatusStore,
    TimesheetError,
};

#[derive(Default)]
struct Records {
    next_id: i32,
    statuses: Vec<ApprovalStatus>,
}

/// Approval status store keeping records in insertion order.
#[derive(Default)]
pub struct MemoryApprovalStatusStore {
    records: RwLock<Records>,
}

impl MemoryApprovalStatusStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    /// Every stored record (for test assertions).
    pub fn all(&self) -> Result<Vec<ApprovalStatus>, TimesheetError> {
        Ok(self.records.read().map_err(poisoned)?.statuses.clone())
    }
}

#[async_trait]
impl ApprovalStatusStore for MemoryApprovalStatusStore {
    async fn get_for_user_working_for_customer(
        &self,
        user_id: &UserId,
        customer_id: &CustomerId,
        range: &DateRange,
    ) -> Result<Vec<ApprovalStatus>, TimesheetError> {
        let records = self.records.read().map_err(poisoned)?;
        Ok(records
            .statuses
            .iter()
            .filter(|status| {
                status.user_id == *user_id
                    && status.customer_id == *customer_id
                    && status.date_range == *range
            })
            .cloned()
            .collect())
    }

    async fn persist(&self, mut status: ApprovalStatus) -> Result<ApprovalStatus, TimesheetError> {
        let mut records = self.records.write().map_err(poisoned)?;

        if let Some(id) = status.id {
            let stored = records
                .statuses
                .iter_mut()
                .find(|existing| existing.id == Some(id))
                .ok_or_else(|| TimesheetError::storage(format!("approval status {id} not found")))?;
            *stored = status.clone();
            return Ok(status);
        }

        // Two saves may both have missed the record; keep the first.
        if let Some(existing) = records.statuses.iter().find(|existing| {
            existing.user_id == status.user_id
                && existing.customer_id == status.customer_id
                && existing.date_range == status.date_range
        }) {
            return Ok(existing.clone());
        }

        records.next_id += 1;
        status.id = Some(ApprovalStatusId::new(records.next_id));
        records.statuses.push(status.clone());
        Ok(status)
    }
}
