//! Edit-window policy.
//!
//! A transaction may be modified only within a fixed window after its
//! creation; `created_at` is immutable, so the window never moves.

use chrono::{DateTime, Duration, Utc};

/// Hours after creation during which a transaction may still be edited.
pub const EDIT_WINDOW_HOURS: i64 = 12;

/// Whether a transaction created at `created_at` is still editable at `now`.
///
/// Editable iff the age is at most [`EDIT_WINDOW_HOURS`]; the boundary
/// instant itself is still editable.
#[must_use]
pub fn is_within_edit_window(created_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    now - created_at <= Duration::hours(EDIT_WINDOW_HOURS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    fn base() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2026-03-01T08:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[rstest]
    #[case::just_created(Duration::zero(), true)]
    #[case::one_second_before_close(Duration::hours(12) - Duration::seconds(1), true)]
    #[case::exactly_at_boundary(Duration::hours(12), true)]
    #[case::one_second_past_close(Duration::hours(12) + Duration::seconds(1), false)]
    #[case::thirteen_hours(Duration::hours(13), false)]
    fn test_edit_window_boundaries(#[case] age: Duration, #[case] editable: bool) {
        let created_at = base();
        assert_eq!(is_within_edit_window(created_at, created_at + age), editable);
    }

    #[test]
    fn test_future_created_at_is_editable() {
        // Clock skew between app servers must not lock a fresh row
        let created_at = base();
        assert!(is_within_edit_window(created_at, created_at - Duration::seconds(30)));
    }

    proptest! {
        /// The predicate agrees with the raw age comparison for any age.
        #[test]
        fn prop_window_matches_age_comparison(age_secs in -100_000i64..200_000i64) {
            let created_at = base();
            let now = created_at + Duration::seconds(age_secs);
            let expected = age_secs <= EDIT_WINDOW_HOURS * 3600;
            prop_assert_eq!(is_within_edit_window(created_at, now), expected);
        }
    }
}
