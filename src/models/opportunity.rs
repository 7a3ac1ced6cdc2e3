use async_graphql::SimpleObject;
use serde::Deserialize;
use time::{Date, Month, PrimitiveDateTime, Time};

use crate::models::SheetDateTime;

/// One volunteering opportunity, deserialized from a row of the
/// opportunities sheet. The sheet is filled in by hand through a form, so
/// every column is read leniently as text and blank cells default to empty.
#[derive(SimpleObject, Clone, Debug, Deserialize)]
pub struct OpportunityRecord {
    /// The opportunity's display name. Not a true identifier; duplicates
    /// are possible.
    #[serde(rename = "Name of your volunteering opportunity", default)]
    pub name: String,
    /// Contact email of whoever posted the opportunity
    #[serde(rename = "Email Address", default)]
    pub contact_email: String,
    /// The locale-formatted timestamp exactly as it appears in the sheet
    #[serde(rename = "Timestamp", default)]
    pub raw_timestamp: String,
    #[serde(rename = "Description", default)]
    pub description: String,
    #[serde(rename = "Category", default)]
    pub category: String,
    /// Free-text board tags, possibly several, comma or space separated
    #[serde(rename = "Filters", default)]
    pub board_tags: String,
    #[serde(rename = "duration_hours", default)]
    pub duration_hours: String,
    #[serde(rename = "people_limit", default)]
    pub people_limit: String,
    /// "Yes" or "No"
    #[serde(rename = "parent_approval", default)]
    pub parent_approval: String,

    /// Derived from `raw_timestamp` exactly once per fetch; `None` when the
    /// timestamp is malformed. Such records stay visible in undated views
    /// but never match a date filter.
    #[serde(skip)]
    pub parsed_date: Option<SheetDateTime>,
}

impl OpportunityRecord {
    /// Derives `parsed_date`. Called once by the sheet client right after
    /// deserialization; records are immutable afterwards.
    pub fn finalize(mut self) -> Self {
        self.parsed_date = parse_timestamp(&self.raw_timestamp).map(SheetDateTime);
        self
    }
}

/// Parses the sheet's `M/D/YYYY HH:MM:SS` timestamps. No zero-padding is
/// guaranteed and no timezone is attached; values are wall-clock time.
///
/// Returns `None` for anything malformed instead of an error: callers treat
/// `None` as "exclude from date-based operations, keep for display".
pub fn parse_timestamp(raw: &str) -> Option<PrimitiveDateTime> {
    let (date_part, time_part) = raw.trim().split_once(' ')?;

    let mut date_bits = date_part.split('/');
    let month: u8 = date_bits.next()?.parse().ok()?;
    let day: u8 = date_bits.next()?.parse().ok()?;
    let year: i32 = date_bits.next()?.parse().ok()?;
    if date_bits.next().is_some() {
        return None;
    }

    let mut time_bits = time_part.split(':');
    let hour: u8 = time_bits.next()?.parse().ok()?;
    let minute: u8 = time_bits.next()?.parse().ok()?;
    let second: u8 = time_bits.next()?.parse().ok()?;
    if time_bits.next().is_some() {
        return None;
    }

    let date = Date::from_calendar_date(year, Month::try_from(month).ok()?, day).ok()?;
    let time = Time::from_hms(hour, minute, second).ok()?;

    Some(PrimitiveDateTime::new(date, time))
}
