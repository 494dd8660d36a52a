use super::{ActivityId, CustomerId, ProjectId, UserId};

/// A user that books hours or manages projects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub name: String,
}

impl User {
    pub fn new(id: impl Into<UserId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// A customer that projects are run for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
}

impl Customer {
    pub fn new(id: impl Into<CustomerId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// A project run for a customer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub customer: Customer,
    pub project_manager: Option<User>,
}

impl Project {
    pub fn new(id: impl Into<ProjectId>, name: impl Into<String>, customer: Customer) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            customer,
            project_manager: None,
        }
    }

    pub fn with_project_manager(mut self, manager: User) -> Self {
        self.project_manager = Some(manager);
        self
    }
}

/// A unit of work a single user books time against.
///
/// `allotted_hours` is the budget for the whole activity; `None` means
/// bookings are unrestricted.
#[derive(Debug, Clone, PartialEq)]
pub struct Activity {
    pub id: ActivityId,
    pub name: String,
    pub code: Option<String>,
    pub project: Project,
    pub assignee: User,
    pub allotted_hours: Option<f64>,
}

impl Activity {
    pub fn new(
        id: impl Into<ActivityId>,
        name: impl Into<String>,
        project: Project,
        assignee: User,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            code: None,
            project,
            assignee,
            allotted_hours: None,
        }
    }

    pub fn with_allotted_hours(mut self, hours: f64) -> Self {
        self.allotted_hours = Some(hours);
        self
    }

    pub fn customer(&self) -> &Customer {
        &self.project.customer
    }
}
