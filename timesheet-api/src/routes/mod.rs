pub(crate) mod approval_statuses;
pub(crate) mod error;
pub(crate) mod timesheets;

use time::{macros::format_description, Date};

pub(crate) use error::ApiError;

use crate::domain::models::DateRange;

pub(crate) fn parse_date(s: &str) -> Result<Date, ApiError> {
    Date::parse(s, format_description!("[year]-[month]-[day]"))
        .map_err(|_| ApiError::bad_request(format!("could not parse date: {}", s)))
}

pub(crate) fn parse_range(from: &str, to: &str) -> Result<DateRange, ApiError> {
    Ok(DateRange::new(parse_date(from)?, parse_date(to)?)?)
}
