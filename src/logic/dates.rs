use chrono::NaiveDate;

/// Convert a 1-based day-of-year to a calendar date.
///
/// Leap years are honored (day 60 is Feb 29 in a leap year, Mar 1 otherwise).
/// Returns `None` for a day outside the year or a year chrono cannot represent.
pub fn doy_to_date(doy: u32, year: i32) -> Option<NaiveDate> {
    NaiveDate::from_yo_opt(year, doy)
}

/// Short human display, e.g. `Sat, Mar 1`
pub fn format_display_date(date: NaiveDate) -> String {
    date.format("%a, %b %-d").to_string()
}
