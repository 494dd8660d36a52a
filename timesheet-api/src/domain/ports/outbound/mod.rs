mod activity_catalog;
mod activity_status;
mod approval_status;
mod comment;
mod entry_store;

pub use activity_catalog::*;
pub use activity_status::*;
pub use approval_status::*;
pub use comment::*;
pub use entry_store::*;
