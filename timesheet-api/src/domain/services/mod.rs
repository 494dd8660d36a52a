mod reconcile;
mod timesheet;

pub use timesheet::TimesheetServiceImpl;
