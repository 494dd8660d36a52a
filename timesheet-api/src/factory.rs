//! Composition root for the timesheet service.
//!
//! This is the only place that imports concrete outbound adapters.

use std::sync::Arc;

use crate::{
    adapters::outbound::memory::{
        MemoryActivityCatalog, MemoryActivityStatusOracle, MemoryApprovalStatusStore,
        MemoryCommentStore, MemoryEntryStore,
    },
    config::TimesheetSettings,
    domain::{ports::inbound::TimesheetService, services::TimesheetServiceImpl, TimesheetError},
};

/// Builds the activity catalog, seeded from the configured file when there is one.
pub fn load_catalog(settings: &TimesheetSettings) -> Result<MemoryActivityCatalog, TimesheetError> {
    match &settings.seed_file {
        Some(path) => {
            let catalog = MemoryActivityCatalog::from_seed_file(path)?;
            tracing::info!("Loaded {} activities from {}", catalog.len(), path);
            Ok(catalog)
        }
        None => {
            tracing::warn!("No seed file configured, starting with an empty activity catalog");
            Ok(MemoryActivityCatalog::new())
        }
    }
}

pub fn create_timesheet_service(catalog: MemoryActivityCatalog) -> Arc<dyn TimesheetService> {
    let entries = Arc::new(MemoryEntryStore::new());
    let oracle = Arc::new(MemoryActivityStatusOracle::new(entries.clone()));

    let service = TimesheetServiceImpl::new(
        entries,
        oracle,
        Arc::new(MemoryApprovalStatusStore::new()),
        Arc::new(catalog),
    )
    .with_comment_store(Arc::new(MemoryCommentStore::new()));

    Arc::new(service)
}
