use chrono::{DateTime, NaiveDateTime};

/// Format in which clients submit post timestamps, and in which they are shown.
pub const POST_TIME_FORMAT: &str = "%d.%m.%Y %H:%M";
pub const DATE_FORMAT: &str = "%d.%m.%Y";

/// Parse a client-supplied "DD.MM.YYYY HH:MM" into the stored RFC 3339 form.
///
/// The client sends its local wall-clock time without an offset; it is stored
/// as-is with a UTC offset so it renders back unchanged.
pub fn parse_post_time(input: &str) -> Result<String, chrono::ParseError> {
    let naive = NaiveDateTime::parse_from_str(input.trim(), POST_TIME_FORMAT)?;
    Ok(naive.and_utc().to_rfc3339())
}

pub fn format_date(stored: &str) -> String {
    format_stored(stored, DATE_FORMAT)
}

pub fn format_datetime(stored: &str) -> String {
    format_stored(stored, POST_TIME_FORMAT)
}

fn format_stored(stored: &str, fmt: &str) -> String {
    match DateTime::parse_from_rfc3339(stored) {
        Ok(dt) => dt.format(fmt).to_string(),
        Err(_) => stored.to_string(),
    }
}
