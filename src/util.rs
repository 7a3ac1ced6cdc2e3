//! Extra utilities for use elsewhere in the API.

use once_cell::sync::Lazy;
use regex::Regex;
use time::format_description::FormatItem;
use time::macros::format_description;
use time::OffsetDateTime;

/// The `M/D/YYYY` shape the sheet uses for plain date columns.
pub const SHEET_DATE_FORMAT: &[FormatItem<'static>] =
    format_description!("[month padding:none]/[day padding:none]/[year]");

static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex is valid"));

/// Wall-clock time, falling back to UTC when the local offset is unknown.
pub fn current_time() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}

/// Today's date in the sheet's own format, for rows this service appends.
pub fn today_string() -> String {
    current_time()
        .date()
        .format(SHEET_DATE_FORMAT)
        .unwrap_or_default()
}

/// Emails compare case-insensitively everywhere. Rows are stored lowercased
/// so the sheet's `?email=` filter stays exact-match.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub fn email_is_valid(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}
