// Date utility functions

use chrono::{Local, NaiveDate};

use crate::models::date_range::DateRange;

pub const API_DATE_FORMAT: &str = "%Y-%m-%d";

/// Serialize a day the way the events API expects it (`yyyy-MM-dd`).
pub fn format_api_date(date: NaiveDate) -> String {
    date.format(API_DATE_FORMAT).to_string()
}

pub fn parse_api_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), API_DATE_FORMAT).ok()
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Column days for a week window.
pub fn week_days(range: &DateRange) -> Vec<NaiveDate> {
    range.days().collect()
}

pub fn is_current_day(day: NaiveDate, today: NaiveDate) -> bool {
    day == today
}

/// Short column header, e.g. `Wed 06`.
pub fn day_label(day: NaiveDate) -> String {
    day.format("%a %d").to_string()
}
