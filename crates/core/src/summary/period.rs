//! Rolling-period windows and totals for the dashboard.

use chrono::{DateTime, Duration, Months, Utc};
use rust_decimal::Decimal;

use crate::ledger::TransactionKind;

/// Rolling window for dashboard totals, ending at "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    /// The last 7 days.
    Week,
    /// The last calendar month.
    Month,
    /// The last calendar year.
    Year,
}

impl Period {
    /// Start of the rolling window ending at `now`.
    ///
    /// Month and year subtract calendar units (chrono clamps day-of-month,
    /// so e.g. Mar 31 minus one month is Feb 28).
    #[must_use]
    pub fn window_start(self, now: DateTime<Utc>) -> DateTime<Utc> {
        match self {
            Self::Week => now - Duration::days(7),
            Self::Month => now
                .checked_sub_months(Months::new(1))
                .unwrap_or_else(|| now - Duration::days(30)),
            Self::Year => now
                .checked_sub_months(Months::new(12))
                .unwrap_or_else(|| now - Duration::days(365)),
        }
    }
}

/// Income/expense totals over a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodTotals {
    /// Sum of income amounts.
    pub income: Decimal,
    /// Sum of expense amounts.
    pub expense: Decimal,
    /// `income - expense`.
    pub balance: Decimal,
}

/// Sums income and expense amounts; transfers count toward neither.
#[must_use]
pub fn period_totals<I>(transactions: I) -> PeriodTotals
where
    I: IntoIterator<Item = (TransactionKind, Decimal)>,
{
    let mut income = Decimal::ZERO;
    let mut expense = Decimal::ZERO;

    for (kind, amount) in transactions {
        match kind {
            TransactionKind::Income => income += amount,
            TransactionKind::Expense => expense += amount,
            TransactionKind::Transfer => {}
        }
    }

    PeriodTotals {
        income,
        expense,
        balance: income - expense,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn at(rfc3339: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(rfc3339)
            .unwrap()
            .with_timezone(&Utc)
    }

    #[rstest]
    #[case::week(Period::Week, "2026-08-25T10:00:00Z", "2026-08-18T10:00:00Z")]
    #[case::month(Period::Month, "2026-08-25T10:00:00Z", "2026-07-25T10:00:00Z")]
    #[case::month_clamps(Period::Month, "2026-03-31T10:00:00Z", "2026-02-28T10:00:00Z")]
    #[case::year(Period::Year, "2026-08-25T10:00:00Z", "2025-08-25T10:00:00Z")]
    #[case::year_from_leap_day(Period::Year, "2024-02-29T10:00:00Z", "2023-02-28T10:00:00Z")]
    fn test_window_start(#[case] period: Period, #[case] now: &str, #[case] expected: &str) {
        assert_eq!(period.window_start(at(now)), at(expected));
    }

    #[test]
    fn test_totals_ignore_transfers() {
        let totals = period_totals(vec![
            (TransactionKind::Income, dec!(3000)),
            (TransactionKind::Expense, dec!(1200)),
            (TransactionKind::Transfer, dec!(9999)),
            (TransactionKind::Expense, dec!(300)),
        ]);

        assert_eq!(totals.income, dec!(3000));
        assert_eq!(totals.expense, dec!(1500));
        assert_eq!(totals.balance, dec!(1500));
    }

    #[test]
    fn test_empty_window() {
        let totals = period_totals(Vec::new());
        assert_eq!(totals.income, Decimal::ZERO);
        assert_eq!(totals.expense, Decimal::ZERO);
        assert_eq!(totals.balance, Decimal::ZERO);
    }

    proptest! {
        /// Balance is always exactly income minus expense.
        #[test]
        fn prop_balance_is_income_minus_expense(
            entries in prop::collection::vec(
                (
                    prop_oneof![
                        Just(TransactionKind::Income),
                        Just(TransactionKind::Expense),
                        Just(TransactionKind::Transfer),
                    ],
                    (0i64..10_000_000).prop_map(|n| Decimal::new(n, 2)),
                ),
                0..60,
            )
        ) {
            let totals = period_totals(entries);
            prop_assert_eq!(totals.balance, totals.income - totals.expense);
        }
    }
}
