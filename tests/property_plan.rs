use chrono::{Datelike, Timelike};
use plansync::domain::models::{
    quarter_due_date, truncate_description, Quarter, MILESTONE_DESCRIPTION_LIMIT,
};
use plansync::services::parse_document;
use proptest::prelude::*;

fn issue_section(number: u64) -> String {
    format!(
        "### Issue #{number}: Task {number}\n\
         **Labels:** `boot, priority-low`\n\
         **Milestone:** v1.0-alpha\n\
         **Estimate:** 1d\n\
         **Description:**\n\
         Work item {number}.\n\
         **Tasks:**\n\
         - [ ] do it\n\n"
    )
}

proptest! {
    /// Property: a quarter falls due on the 1st of month 3*Q at midnight UTC
    #[test]
    fn prop_quarter_due_date_shape(q in 1u8..=4, year in 1970i32..3000) {
        let quarter = Quarter::new(q).unwrap();
        let due = quarter_due_date(quarter, year).unwrap();

        prop_assert_eq!(due.year(), year);
        prop_assert_eq!(due.month(), u32::from(q) * 3);
        prop_assert_eq!(due.day(), 1);
        prop_assert_eq!((due.hour(), due.minute(), due.second()), (0, 0, 0));
    }

    /// Property: quarters outside 1..=4 are never constructed
    #[test]
    fn prop_quarter_rejects_out_of_range(q in 5u8..) {
        prop_assert!(Quarter::new(q).is_none());
    }

    /// Property: truncation keeps a character prefix of at most the limit
    #[test]
    fn prop_truncate_description_is_bounded_prefix(text in "\\PC{0,400}") {
        let truncated = truncate_description(&text);

        prop_assert!(truncated.chars().count() <= MILESTONE_DESCRIPTION_LIMIT);
        prop_assert!(text.starts_with(&truncated));
        if text.chars().count() <= MILESTONE_DESCRIPTION_LIMIT {
            prop_assert_eq!(truncated, text);
        }
    }

    /// Property: issues come back in ascending ordinal whatever the
    /// declaration order
    #[test]
    fn prop_issues_sorted_by_ordinal(
        numbers in proptest::collection::hash_set(1u64..10_000, 1..15)
    ) {
        let declared: Vec<u64> = numbers.into_iter().collect();
        let document: String = declared.iter().map(|n| issue_section(*n)).collect();

        let plan = parse_document(&document);
        let parsed: Vec<u64> = plan.issues.iter().map(|i| i.number).collect();

        let mut expected = declared.clone();
        expected.sort_unstable();
        prop_assert_eq!(parsed, expected);
    }

    /// Property: text that never forms a heading yields nothing
    #[test]
    fn prop_headingless_text_is_empty_plan(lines in proptest::collection::vec("[a-z ]{0,40}", 0..20)) {
        let plan = parse_document(&lines.join("\n"));
        prop_assert!(plan.milestones.is_empty());
        prop_assert!(plan.issues.is_empty());
    }
}
