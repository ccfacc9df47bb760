//! Calendar bucketing for chart series.
//!
//! Buckets are anchored to the calendar unit containing "now": the current
//! Sun..Sat week, the current month split into 7-day weeks, or the current
//! year by month. Transactions outside the anchor unit fall into no bucket.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use rust_decimal::Decimal;

use crate::ledger::TransactionKind;

const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Bucketing granularity for a chart series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartRange {
    /// The current calendar week (Sun..Sat), one bucket per day.
    Week,
    /// The current month, one bucket per 7-day week.
    Month,
    /// The current year, one bucket per month.
    Year,
}

/// One chart bucket with its income/expense sums.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartBucket {
    /// Bucket label ("Tue", "Week 2", "Aug", ...).
    pub label: String,
    /// Sum of income amounts in the bucket.
    pub income: Decimal,
    /// Sum of expense amounts in the bucket.
    pub expense: Decimal,
}

/// Bucket labels for a range anchored at `now`.
#[must_use]
pub fn bucket_labels(range: ChartRange, now: DateTime<Utc>) -> Vec<String> {
    match range {
        ChartRange::Week => WEEKDAY_LABELS.iter().map(ToString::to_string).collect(),
        ChartRange::Month => {
            let weeks = days_in_month(now.year(), now.month()).div_ceil(7);
            (1..=weeks).map(|w| format!("Week {w}")).collect()
        }
        ChartRange::Year => MONTH_LABELS.iter().map(ToString::to_string).collect(),
    }
}

/// Index of the bucket that `at` falls into, or `None` when it lies outside
/// the calendar unit containing `now`.
#[must_use]
pub fn bucket_index(range: ChartRange, now: DateTime<Utc>, at: DateTime<Utc>) -> Option<usize> {
    match range {
        ChartRange::Week => {
            let week_start = start_of_week(now);
            let offset = (at.date_naive() - week_start).num_days();
            if (0..7).contains(&offset) {
                usize::try_from(offset).ok()
            } else {
                None
            }
        }
        ChartRange::Month => {
            if at.year() == now.year() && at.month() == now.month() {
                usize::try_from((at.day() - 1) / 7).ok()
            } else {
                None
            }
        }
        ChartRange::Year => {
            if at.year() == now.year() {
                usize::try_from(at.month0()).ok()
            } else {
                None
            }
        }
    }
}

/// Buckets transactions into the series for `range`, summing income and
/// expense per bucket. Transfers contribute to neither sum.
#[must_use]
pub fn bucket_series<I>(range: ChartRange, now: DateTime<Utc>, transactions: I) -> Vec<ChartBucket>
where
    I: IntoIterator<Item = (TransactionKind, Decimal, DateTime<Utc>)>,
{
    let mut buckets: Vec<ChartBucket> = bucket_labels(range, now)
        .into_iter()
        .map(|label| ChartBucket {
            label,
            income: Decimal::ZERO,
            expense: Decimal::ZERO,
        })
        .collect();

    for (kind, amount, at) in transactions {
        let Some(index) = bucket_index(range, now, at) else {
            continue;
        };
        match kind {
            TransactionKind::Income => buckets[index].income += amount,
            TransactionKind::Expense => buckets[index].expense += amount,
            TransactionKind::Transfer => {}
        }
    }

    buckets
}

/// The Sunday starting the calendar week that contains `now`.
fn start_of_week(now: DateTime<Utc>) -> NaiveDate {
    now.date_naive() - Duration::days(i64::from(now.weekday().num_days_from_sunday()))
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let first_of_next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    first_of_next
        .and_then(|d| d.pred_opt())
        .map_or(30, |d| d.day())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn at(rfc3339: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(rfc3339)
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_week_series_buckets_by_calendar_day() {
        // 2026-01-06 is a Tuesday; its week runs Sun 2026-01-04 .. Sat 2026-01-10
        let now = at("2026-01-06T12:00:00Z");
        let buckets = bucket_series(
            ChartRange::Week,
            now,
            vec![
                (TransactionKind::Income, dec!(100), at("2026-01-04T08:00:00Z")),
                (TransactionKind::Expense, dec!(40), at("2026-01-06T23:59:00Z")),
                (TransactionKind::Income, dec!(10), at("2026-01-11T00:00:00Z")), // next week
                (TransactionKind::Expense, dec!(5), at("2026-01-03T12:00:00Z")), // previous week
            ],
        );

        assert_eq!(buckets.len(), 7);
        assert_eq!(buckets[0].label, "Sun");
        assert_eq!(buckets[0].income, dec!(100));
        assert_eq!(buckets[2].label, "Tue");
        assert_eq!(buckets[2].expense, dec!(40));

        let total_income: Decimal = buckets.iter().map(|b| b.income).sum();
        let total_expense: Decimal = buckets.iter().map(|b| b.expense).sum();
        assert_eq!(total_income, dec!(100));
        assert_eq!(total_expense, dec!(40));
    }

    #[test]
    fn test_month_series_splits_into_seven_day_weeks() {
        // February 2026 has 28 days -> 4 buckets
        let now = at("2026-02-15T12:00:00Z");
        let buckets = bucket_series(
            ChartRange::Month,
            now,
            vec![
                (TransactionKind::Expense, dec!(10), at("2026-02-01T00:00:00Z")), // day 1  -> Week 1
                (TransactionKind::Expense, dec!(20), at("2026-02-07T12:00:00Z")), // day 7  -> Week 1
                (TransactionKind::Income, dec!(30), at("2026-02-08T12:00:00Z")),  // day 8  -> Week 2
                (TransactionKind::Income, dec!(40), at("2026-02-28T23:00:00Z")),  // day 28 -> Week 4
                (TransactionKind::Income, dec!(99), at("2026-01-31T12:00:00Z")),  // other month
            ],
        );

        assert_eq!(buckets.len(), 4);
        assert_eq!(buckets[0].label, "Week 1");
        assert_eq!(buckets[0].expense, dec!(30));
        assert_eq!(buckets[1].income, dec!(30));
        assert_eq!(buckets[3].income, dec!(40));
    }

    #[test]
    fn test_month_with_31_days_has_five_buckets() {
        let now = at("2026-08-25T12:00:00Z");
        let labels = bucket_labels(ChartRange::Month, now);
        assert_eq!(labels.len(), 5);
        assert_eq!(labels[4], "Week 5");

        // Days 29..31 land in the fifth bucket
        assert_eq!(
            bucket_index(ChartRange::Month, now, at("2026-08-31T10:00:00Z")),
            Some(4)
        );
    }

    #[test]
    fn test_year_series_buckets_by_month() {
        let now = at("2026-08-25T12:00:00Z");
        let buckets = bucket_series(
            ChartRange::Year,
            now,
            vec![
                (TransactionKind::Income, dec!(500), at("2026-01-15T12:00:00Z")),
                (TransactionKind::Expense, dec!(75), at("2026-12-31T23:59:59Z")),
                (TransactionKind::Income, dec!(999), at("2025-12-31T23:59:59Z")), // other year
            ],
        );

        assert_eq!(buckets.len(), 12);
        assert_eq!(buckets[0].label, "Jan");
        assert_eq!(buckets[0].income, dec!(500));
        assert_eq!(buckets[11].expense, dec!(75));
        assert_eq!(buckets[11].income, Decimal::ZERO);
    }

    #[test]
    fn test_transfers_are_excluded() {
        let now = at("2026-08-25T12:00:00Z");
        let buckets = bucket_series(
            ChartRange::Year,
            now,
            vec![(TransactionKind::Transfer, dec!(1000), at("2026-08-01T12:00:00Z"))],
        );

        for bucket in &buckets {
            assert_eq!(bucket.income, Decimal::ZERO);
            assert_eq!(bucket.expense, Decimal::ZERO);
        }
    }

    proptest! {
        /// Every day of the anchor month maps to a valid week bucket.
        #[test]
        fn prop_month_day_always_in_range(day in 1u32..=31) {
            let now = at("2026-08-25T12:00:00Z"); // August: 31 days, 5 buckets
            if let Some(date) = NaiveDate::from_ymd_opt(2026, 8, day) {
                let tx_at = date
                    .and_hms_opt(12, 0, 0)
                    .map(|dt| DateTime::from_naive_utc_and_offset(dt, Utc));
                if let Some(tx_at) = tx_at {
                    let index = bucket_index(ChartRange::Month, now, tx_at);
                    let labels = bucket_labels(ChartRange::Month, now);
                    prop_assert!(index.is_some());
                    prop_assert!(index.unwrap_or(0) < labels.len());
                }
            }
        }

        /// Week bucketing accepts exactly the seven days of the anchor week.
        #[test]
        fn prop_week_window_is_seven_days(offset in -14i64..14) {
            let now = at("2026-01-06T12:00:00Z"); // Tuesday; week = Jan 4 .. Jan 10
            let tx_at = now + Duration::days(offset);
            let index = bucket_index(ChartRange::Week, now, tx_at);

            let in_week = (at("2026-01-04T00:00:00Z").date_naive()
                ..=at("2026-01-10T00:00:00Z").date_naive())
                .contains(&tx_at.date_naive());
            prop_assert_eq!(index.is_some(), in_week);
        }
    }
}
