//! Parsing of the calendar inputs accepted by the API: dates and month tokens.

use std::ops::RangeInclusive;

use time::{
    Date, Month, format_description::BorrowedFormatItem, macros::format_description,
    parsing::Parsed,
};

use crate::Error;

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");
const MONTH_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]");

/// Parse a date in the `yyyy-MM-dd` format.
///
/// # Errors
///
/// Returns [Error::InvalidDate] if `text` is not a valid calendar date in that format.
pub fn parse_date(text: &str) -> Result<Date, Error> {
    Date::parse(text, DATE_FORMAT).map_err(|_| Error::InvalidDate(text.to_owned()))
}

/// Resolve a month token in the `yyyy-MM` format to the inclusive range from
/// the first to the last day of that month.
///
/// Leading and trailing whitespace is ignored.
///
/// # Errors
///
/// Returns [Error::InvalidMonthFormat] if the token does not name a real month.
pub fn parse_month(token: &str) -> Result<RangeInclusive<Date>, Error> {
    let invalid = || Error::InvalidMonthFormat(token.to_owned());

    let mut parsed = Parsed::new();
    let remaining = parsed
        .parse_items(token.trim().as_bytes(), MONTH_FORMAT)
        .map_err(|_| invalid())?;

    if !remaining.is_empty() {
        return Err(invalid());
    }

    let year = parsed.year().ok_or_else(invalid)?;
    let month = parsed.month().ok_or_else(invalid)?;

    let start = Date::from_calendar_date(year, month, 1).map_err(|_| invalid())?;
    let end = last_day_of_month(start).ok_or_else(invalid)?;

    Ok(start..=end)
}

/// The `yyyy-MM` token for the month containing `date`.
pub fn month_token(date: Date) -> String {
    format!("{:04}-{:02}", date.year(), u8::from(date.month()))
}

fn last_day_of_month(first_day: Date) -> Option<Date> {
    let next_month_start = match first_day.month() {
        Month::December => Date::from_calendar_date(first_day.year() + 1, Month::January, 1),
        month => Date::from_calendar_date(first_day.year(), month.next(), 1),
    };

    next_month_start.ok()?.previous_day()
}
