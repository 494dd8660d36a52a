use std::collections::HashMap;
use std::path::Path;
use std::sync::RwLock;

use async_trait::async_trait;
use serde::Deserialize;

use super::poisoned;
use crate::domain::{
    models::{Activity, ActivityId, Customer, Project, User},
    ports::outbound::ActivityCatalog,
    TimesheetError,
};

/// Catalog of activities held in memory, optionally loaded from a JSON
/// seed file at startup.
#[derive(Default)]
pub struct MemoryActivityCatalog {
    activities: RwLock<HashMap<ActivityId, Activity>>,
}

impl MemoryActivityCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_activities(self, activities: impl IntoIterator<Item = Activity>) -> Self {
        if let Ok(mut map) = self.activities.write() {
            map.extend(
                activities
                    .into_iter()
                    .map(|activity| (activity.id.clone(), activity)),
            );
        }
        self
    }

    /// Load a catalog from a seed file (see `config/seed.json`).
    pub fn from_seed_file(path: impl AsRef<Path>) -> Result<Self, TimesheetError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            TimesheetError::storage(format!("could not read {}: {e}", path.display()))
        })?;
        Self::from_seed_json(&raw)
    }

    pub fn from_seed_json(raw: &str) -> Result<Self, TimesheetError> {
        let seed: CatalogSeed = serde_json::from_str(raw)
            .map_err(|e| TimesheetError::storage(format!("invalid catalog seed: {e}")))?;
        Ok(Self::new().with_activities(seed.activities.into_iter().map(Activity::from)))
    }

    pub fn len(&self) -> usize {
        self.activities.read().map(|map| map.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ActivityCatalog for MemoryActivityCatalog {
    async fn get_activity(&self, id: &ActivityId) -> Result<Option<Activity>, TimesheetError> {
        Ok(self.activities.read().map_err(poisoned)?.get(id).cloned())
    }
}

// ============================================================================
// Seed file format
// ============================================================================

#[derive(Debug, Deserialize)]
struct CatalogSeed {
    activities: Vec<ActivitySeed>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ActivitySeed {
    id: String,
    name: String,
    code: Option<String>,
    allotted_hours: Option<f64>,
    project: ProjectSeed,
    assignee: UserSeed,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProjectSeed {
    id: String,
    name: String,
    customer: CustomerSeed,
    project_manager: Option<UserSeed>,
}

#[derive(Debug, Deserialize)]
struct CustomerSeed {
    id: String,
    name: String,
}

#[derive(Debug, Deserialize)]
struct UserSeed {
    id: i32,
    name: String,
}

impl From<UserSeed> for User {
    fn from(seed: UserSeed) -> Self {
        User::new(seed.id, seed.name)
    }
}

impl From<ActivitySeed> for Activity {
    fn from(seed: ActivitySeed) -> Self {
        let customer = Customer::new(seed.project.customer.id, seed.project.customer.name);
        let mut project = Project::new(seed.project.id, seed.project.name, customer);
        if let Some(manager) = seed.project.project_manager {
            project = project.with_project_manager(manager.into());
        }

        let mut activity = Activity::new(seed.id, seed.name, project, seed.assignee.into());
        activity.code = seed.code;
        match seed.allotted_hours {
            Some(hours) => activity.with_allotted_hours(hours),
            None => activity,
        }
    }
}
