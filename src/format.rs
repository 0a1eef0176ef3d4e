//! Display formatting for transaction types and dates.

use time::{
    Date, PrimitiveDateTime, format_description::BorrowedFormatItem, macros::format_description,
};

/// `YYYY-MM-DD`, the format dates are exchanged with the transaction API in.
pub const DATE_FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

const TIMESTAMP_FORMAT: &[BorrowedFormatItem<'_>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

const ISO_TIMESTAMP_FORMAT: &[BorrowedFormatItem<'_>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");

/// The HTTP-date layout the API uses when it serialises a single record,
/// e.g. "Tue, 14 Jan 2025 10:00:00 GMT".
const HTTP_DATE_FORMAT: &[BorrowedFormatItem<'_>] = format_description!(
    "[weekday repr:short], [day] [month repr:short] [year] [hour]:[minute]:[second] GMT"
);

const DAY_FORMAT: &[BorrowedFormatItem<'_>] =
    format_description!("[month repr:short] [day padding:none], [year]");

const MONTH_LABEL_FORMAT: &[BorrowedFormatItem<'_>] =
    format_description!("[month repr:short] [year]");

/// Converts a snake case transaction type into title case, e.g.
/// "MOBILE_MONEY" becomes "Mobile Money".
pub fn format_transaction_type(transaction_type: &str) -> String {
    transaction_type
        .split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Parses a timestamp sent by the transaction API.
pub fn parse_timestamp(text: &str) -> Option<PrimitiveDateTime> {
    let text = text.trim();

    [TIMESTAMP_FORMAT, ISO_TIMESTAMP_FORMAT, HTTP_DATE_FORMAT]
        .iter()
        .find_map(|format| PrimitiveDateTime::parse(text, *format).ok())
        .or_else(|| Date::parse(text, DATE_FORMAT).ok().map(|date| date.midnight()))
}

/// Formats a timestamp as `YYYY-MM-DD HH:mm:ss`.
///
/// Text that is not a recognised timestamp is returned as is.
pub fn format_timestamp(text: &str) -> String {
    parse_timestamp(text)
        .and_then(|timestamp| timestamp.format(TIMESTAMP_FORMAT).ok())
        .unwrap_or_else(|| text.to_owned())
}

/// Formats the most active day as e.g. "Jan 5, 2025", or "-" when there is
/// no such day.
pub fn format_active_day(day: Option<&str>) -> String {
    day.and_then(|day| Date::parse(day.trim(), DATE_FORMAT).ok())
        .and_then(|date| date.format(DAY_FORMAT).ok())
        .unwrap_or_else(|| "-".to_owned())
}

/// Formats a `YYYY-MM` month as e.g. "Jan 2025".
pub fn format_month_label(month: &str) -> String {
    Date::parse(&format!("{}-01", month.trim()), DATE_FORMAT)
        .ok()
        .and_then(|date| date.format(MONTH_LABEL_FORMAT).ok())
        .unwrap_or_else(|| month.to_owned())
}

/// Formats a date as `YYYY-MM-DD`.
pub fn format_date(date: Date) -> String {
    date.format(DATE_FORMAT).unwrap_or_else(|_| date.to_string())
}

/// Parses a `YYYY-MM-DD` date.
pub fn parse_date(text: &str) -> Option<Date> {
    Date::parse(text.trim(), DATE_FORMAT).ok()
}
