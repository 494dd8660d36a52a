mod activity;
mod approval;
mod date_range;
mod entry;
mod ids;
mod status;
mod timesheet;

pub use activity::*;
pub use approval::*;
pub use date_range::*;
pub use entry::*;
pub use ids::*;
pub use status::*;
pub use timesheet::*;
