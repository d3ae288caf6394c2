//! Calendar helpers.

use chrono::{NaiveDate, Utc};

/// A calendar day without time zone, used for due dates and life dates.
pub type Date = NaiveDate;

/// Return the current UTC calendar day.
#[must_use]
pub fn today() -> Date {
    Utc::now().date_naive()
}
