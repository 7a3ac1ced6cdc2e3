use async_graphql::InputObject;

use crate::models::opportunity::OpportunityRecord;
use crate::models::SheetDate;

/// The boards enumerated by the app's filter picker. "Others" is not a tag
/// of its own: it matches exactly the records whose free-text tags contain
/// none of these.
pub const KNOWN_BOARDS: &[&str] = &["Student Council", "Teachers", "ACE"];

pub const OTHERS: &str = "Others";

/// A member's current filter selection. An unset field matches every record,
/// so the default filter is the identity.
#[derive(InputObject, Clone, Debug, Default)]
pub struct OpportunityFilter {
    /// Board to filter by, or "Others" for the catch-all
    pub board: Option<String>,
    pub category: Option<String>,
    /// "Yes" or "No"
    pub parent_approval: Option<String>,
    /// Day-granularity dates; empty applies no date filtering
    #[graphql(default)]
    pub dates: Vec<SheetDate>,
}

impl OpportunityFilter {
    /// Applies every active predicate conjunctively, preserving input order.
    /// Recomputed in full on every call; the sheets hold at most a few
    /// hundred rows.
    pub fn apply(
        &self,
        records: Vec<OpportunityRecord>,
        known_boards: &[&str],
    ) -> Vec<OpportunityRecord> {
        records
            .into_iter()
            .filter(|record| self.matches(record, known_boards))
            .collect()
    }

    pub fn matches(&self, record: &OpportunityRecord, known_boards: &[&str]) -> bool {
        self.matches_board(record, known_boards)
            && self.matches_category(record)
            && self.matches_parent_approval(record)
            && self.matches_dates(record)
    }

    /// Substring matching is deliberately loose: the board column is
    /// free-text spreadsheet entry, so "ACE Club" should match "ACE".
    fn matches_board(&self, record: &OpportunityRecord, known_boards: &[&str]) -> bool {
        let selected = match &self.board {
            None => return true,
            Some(board) => board,
        };

        let tags = record.board_tags.to_lowercase();
        if selected == OTHERS {
            known_boards
                .iter()
                .all(|board| !tags.contains(&board.to_lowercase()))
        } else {
            tags.contains(&selected.to_lowercase())
        }
    }

    fn matches_category(&self, record: &OpportunityRecord) -> bool {
        match &self.category {
            None => true,
            Some(category) => record
                .category
                .to_lowercase()
                .contains(&category.to_lowercase()),
        }
    }

    /// Exact equality after case normalization, since approval is a closed
    /// Yes/No domain.
    fn matches_parent_approval(&self, record: &OpportunityRecord) -> bool {
        match &self.parent_approval {
            None => true,
            Some(approval) => record.parent_approval.trim().eq_ignore_ascii_case(approval),
        }
    }

    fn matches_dates(&self, record: &OpportunityRecord) -> bool {
        if self.dates.is_empty() {
            return true;
        }

        match &record.parsed_date {
            // unparseable timestamps never match a date filter
            None => false,
            Some(datetime) => self.dates.iter().any(|day| day.0 == datetime.0.date()),
        }
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::*;
    use crate::tests::mock::mock_opportunity;

    fn sample_records() -> Vec<OpportunityRecord> {
        vec![
            mock_opportunity("A", "Elderly", "Student Council", "6/18/2025 14:00:00"),
            mock_opportunity("B", "Children", "Teachers", "7/5/2025 14:00:00"),
            mock_opportunity("C", "Community", "Parent Volunteers", "not a date"),
        ]
    }

    fn names(records: &[OpportunityRecord]) -> Vec<&str> {
        records.iter().map(|record| record.name.as_str()).collect()
    }

    #[test]
    fn empty_filter_is_the_identity() {
        let records = sample_records();
        let filtered = OpportunityFilter::default().apply(records.clone(), KNOWN_BOARDS);

        assert_eq!(names(&filtered), names(&records));
    }

    #[test]
    fn result_is_an_order_preserving_subsequence() {
        let filter = OpportunityFilter {
            board: Some(String::from("Others")),
            ..Default::default()
        };
        let mut records = sample_records();
        records.push(mock_opportunity("D", "Sports", "PTA", "8/1/2025 9:00:00"));

        // C and D both lack known-board tags; relative order holds
        assert_eq!(names(&filter.apply(records, KNOWN_BOARDS)), vec!["C", "D"]);
    }

    #[test]
    fn category_filter_selects_by_substring() {
        let filter = OpportunityFilter {
            category: Some(String::from("Elderly")),
            ..Default::default()
        };

        assert_eq!(
            names(&filter.apply(sample_records(), KNOWN_BOARDS)),
            vec!["A"]
        );

        let loose = OpportunityFilter {
            category: Some(String::from("child")),
            ..Default::default()
        };
        assert_eq!(names(&loose.apply(sample_records(), KNOWN_BOARDS)), vec!["B"]);
    }

    #[test]
    fn board_filter_is_a_case_insensitive_substring() {
        let filter = OpportunityFilter {
            board: Some(String::from("teachers")),
            ..Default::default()
        };
        let records = vec![mock_opportunity(
            "B",
            "Children",
            "Teachers, ACE",
            "7/5/2025 14:00:00",
        )];

        assert_eq!(names(&filter.apply(records, KNOWN_BOARDS)), vec!["B"]);
    }

    #[test]
    fn others_is_defined_negatively_against_known_boards() {
        let known = &["Teachers", "ACE"];
        let filter = OpportunityFilter {
            board: Some(String::from("Others")),
            ..Default::default()
        };

        let unlisted = mock_opportunity("X", "", "Parent Volunteers", "");
        assert!(filter.matches(&unlisted, known));

        // "ACE Club" contains a known board, so it is not an other
        let tagged = mock_opportunity("Y", "", "ACE Club", "");
        assert!(!filter.matches(&tagged, known));
    }

    #[test]
    fn parent_approval_is_exact_after_case_normalization() {
        let filter = OpportunityFilter {
            parent_approval: Some(String::from("yes")),
            ..Default::default()
        };

        let mut record = mock_opportunity("A", "", "", "");
        record.parent_approval = String::from("Yes");
        assert!(filter.matches(&record, KNOWN_BOARDS));

        record.parent_approval = String::from("No");
        assert!(!filter.matches(&record, KNOWN_BOARDS));

        // substring equality would wrongly accept this
        record.parent_approval = String::from("Yes (guardian)");
        assert!(!filter.matches(&record, KNOWN_BOARDS));
    }

    #[test]
    fn date_filter_matches_on_the_day() {
        let filter = OpportunityFilter {
            dates: vec![SheetDate(date!(2025 - 06 - 18))],
            ..Default::default()
        };

        assert_eq!(
            names(&filter.apply(sample_records(), KNOWN_BOARDS)),
            vec!["A"]
        );
    }

    #[test]
    fn unparseable_timestamps_never_match_a_date_filter() {
        let filter = OpportunityFilter {
            dates: vec![SheetDate(date!(2025 - 06 - 18))],
            ..Default::default()
        };
        let record = mock_opportunity("C", "Community", "", "not a date");

        assert!(!filter.matches(&record, KNOWN_BOARDS));
    }

    #[test]
    fn all_active_predicates_are_conjunctive() {
        let filter = OpportunityFilter {
            board: Some(String::from("Student Council")),
            category: Some(String::from("Children")),
            ..Default::default()
        };

        // A matches the board but not the category
        assert!(filter.apply(sample_records(), KNOWN_BOARDS).is_empty());
    }
}
