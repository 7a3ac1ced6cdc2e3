use async_graphql::SimpleObject;
use serde::{Deserialize, Serialize};

use crate::error::{ServeError, ServeResult};

/// One row of the attendance sheet's code table: a 6-digit voucher handed
/// out at an event, exchangeable for volunteer-hour credit.
#[derive(SimpleObject, Clone, Debug, Deserialize)]
pub struct AttendanceCode {
    #[serde(rename = "attendance_code", default)]
    pub code: String,
    #[serde(default)]
    pub event_name: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub duration_hours: String,
}

/// A redeemed credit row, keyed by member email. Appended on successful
/// redemption; never updated or deleted by this service.
#[derive(SimpleObject, Clone, Debug, Deserialize, Serialize)]
pub struct AttendanceRecord {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub event_name: String,
    #[serde(default)]
    pub hours: String,
}

/// The credit granted by a successful redemption.
#[derive(SimpleObject, Clone, Debug)]
pub struct RedeemedCredit {
    pub event_name: String,
    pub hours: f64,
}

/// A code is considered for lookup only if it is exactly six ASCII digits.
/// Anything else fails here, before any sheet call is made.
pub fn validate_code(code: &str) -> ServeResult<()> {
    if code.len() == 6 && code.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ServeError::InvalidFormat(String::from(
            "attendance codes are exactly 6 digits",
        )))
    }
}

/// Exact-match lookup of a code against the code table. Not prefix, not
/// fuzzy. Malformed codes fail before the table is consulted.
pub fn redeem(code: &str, code_table: &[AttendanceCode]) -> ServeResult<RedeemedCredit> {
    validate_code(code)?;

    let entry = code_table
        .iter()
        .find(|entry| entry.code == code)
        .ok_or_else(|| ServeError::CodeNotFound(code.to_owned()))?;

    Ok(RedeemedCredit {
        event_name: entry.event_name.clone(),
        hours: lenient_hours(&entry.duration_hours),
    })
}

/// Whether the member already holds a credit for the given event. Codes map
/// one-to-one to events, so this is the duplicate-redemption check.
pub fn already_redeemed(records: &[AttendanceRecord], event_name: &str) -> bool {
    records
        .iter()
        .any(|record| record.event_name.eq_ignore_ascii_case(event_name))
}

/// Sums a member's redeemed credit rows. A pure sum: permutation-invariant
/// and safe to recompute on every query.
pub fn total_hours(records: &[AttendanceRecord]) -> f64 {
    records.iter().map(|record| lenient_hours(&record.hours)).sum()
}

/// Blank or malformed cells count as zero hours. The upstream sheet is an
/// uncontrolled spreadsheet; a hard error here would poison whole fetches.
fn lenient_hours(raw: &str) -> f64 {
    raw.trim().parse().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::mock::{mock_code, mock_credit};

    #[test]
    fn malformed_codes_fail_before_lookup() {
        // the lookup table would match; the format check must run first
        let table = vec![mock_code("12345", "Talk", "1.5")];

        assert!(matches!(
            redeem("12345", &table),
            Err(ServeError::InvalidFormat(_))
        ));
        assert!(matches!(
            redeem("1234567", &table),
            Err(ServeError::InvalidFormat(_))
        ));
        assert!(matches!(
            redeem("12a456", &table),
            Err(ServeError::InvalidFormat(_))
        ));
        assert!(matches!(
            redeem("", &table),
            Err(ServeError::InvalidFormat(_))
        ));
    }

    #[test]
    fn unknown_codes_are_not_found() {
        let table = vec![mock_code("123456", "Talk", "1.5")];

        assert!(matches!(
            redeem("654321", &table),
            Err(ServeError::CodeNotFound(_))
        ));
        assert!(matches!(redeem("000000", &[]), Err(ServeError::CodeNotFound(_))));
    }

    #[test]
    fn matching_code_grants_the_entry_credit() {
        let table = vec![
            mock_code("111111", "Beach Cleanup", "2"),
            mock_code("123456", "Talk", "1.5"),
        ];

        let credit = redeem("123456", &table).unwrap();
        assert_eq!(credit.event_name, "Talk");
        assert_eq!(credit.hours, 1.5);
    }

    #[test]
    fn blank_duration_redeems_as_zero_hours() {
        let table = vec![mock_code("123456", "Talk", "")];

        assert_eq!(redeem("123456", &table).unwrap().hours, 0.0);
    }

    #[test]
    fn total_hours_of_nothing_is_zero() {
        assert_eq!(total_hours(&[]), 0.0);
    }

    #[test]
    fn total_hours_is_permutation_invariant() {
        let mut records = vec![
            mock_credit("john@email.com", "Talk", "1.5"),
            mock_credit("john@email.com", "Beach Cleanup", "2"),
            mock_credit("john@email.com", "Bake Sale", "0.5"),
        ];
        let forward = total_hours(&records);
        records.reverse();

        assert_eq!(forward, total_hours(&records));
        assert_eq!(forward, 4.0);
    }

    #[test]
    fn missing_hours_count_as_zero() {
        let records = vec![
            mock_credit("john@email.com", "Talk", "1.5"),
            mock_credit("john@email.com", "Beach Cleanup", ""),
            mock_credit("john@email.com", "Bake Sale", "n/a"),
        ];

        assert_eq!(total_hours(&records), 1.5);
    }

    #[test]
    fn duplicate_redemption_is_detected_by_event() {
        let records = vec![mock_credit("john@email.com", "Talk", "1.5")];

        assert!(already_redeemed(&records, "Talk"));
        assert!(already_redeemed(&records, "talk"));
        assert!(!already_redeemed(&records, "Beach Cleanup"));
        assert!(!already_redeemed(&[], "Talk"));
    }
}
