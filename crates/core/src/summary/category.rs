//! Per-category expense breakdown.

use std::collections::HashMap;

use rust_decimal::Decimal;

/// One row of the category breakdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTotal {
    /// Category name.
    pub category: String,
    /// Total spent in this category.
    pub amount: Decimal,
    /// Share of the grand total, in percent rounded to 2 decimal places.
    pub percentage: Decimal,
}

/// Groups expense amounts by category.
///
/// Returns rows sorted by total descending (name ascending on ties). Each
/// row's percentage is its share of the grand total; when the grand total is
/// zero every percentage is zero.
#[must_use]
pub fn category_breakdown<I>(expenses: I) -> Vec<CategoryTotal>
where
    I: IntoIterator<Item = (String, Decimal)>,
{
    let mut totals: HashMap<String, Decimal> = HashMap::new();
    for (category, amount) in expenses {
        *totals.entry(category).or_insert(Decimal::ZERO) += amount;
    }

    let grand_total: Decimal = totals.values().copied().sum();

    let mut rows: Vec<CategoryTotal> = totals
        .into_iter()
        .map(|(category, amount)| {
            let percentage = if grand_total > Decimal::ZERO {
                (amount / grand_total * Decimal::from(100)).round_dp(2)
            } else {
                Decimal::ZERO
            };
            CategoryTotal {
                category,
                amount,
                percentage,
            }
        })
        .collect();

    rows.sort_by(|a, b| b.amount.cmp(&a.amount).then_with(|| a.category.cmp(&b.category)));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_groups_and_sorts_descending() {
        let rows = category_breakdown(vec![
            ("Food".to_string(), dec!(30)),
            ("Transport".to_string(), dec!(50)),
            ("Food".to_string(), dec!(20)),
        ]);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].category, "Food");
        assert_eq!(rows[0].amount, dec!(50));
        assert_eq!(rows[0].percentage, dec!(50));
        assert_eq!(rows[1].category, "Transport");
        assert_eq!(rows[1].amount, dec!(50));
        assert_eq!(rows[1].percentage, dec!(50));
    }

    #[test]
    fn test_zero_total_gives_zero_percentages() {
        let rows = category_breakdown(vec![
            ("Food".to_string(), dec!(0)),
            ("Bills".to_string(), dec!(0)),
        ]);

        for row in &rows {
            assert_eq!(row.percentage, Decimal::ZERO);
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(category_breakdown(Vec::new()).is_empty());
    }

    #[test]
    fn test_single_category_is_whole() {
        let rows = category_breakdown(vec![("Rent".to_string(), dec!(1234.56))]);
        assert_eq!(rows[0].percentage, dec!(100));
    }

    fn expenses_strategy() -> impl Strategy<Value = Vec<(String, Decimal)>> {
        prop::collection::vec(
            (
                prop::sample::select(vec!["Food", "Bills", "Transport", "Shopping", "Other"])
                    .prop_map(str::to_string),
                (0i64..1_000_000).prop_map(|n| Decimal::new(n, 2)),
            ),
            0..40,
        )
    }

    proptest! {
        /// Percentages of a non-zero total sum to 100, within the rounding
        /// slack of 2-decimal rows.
        #[test]
        fn prop_percentages_sum_to_100(expenses in expenses_strategy()) {
            let rows = category_breakdown(expenses);
            let total: Decimal = rows.iter().map(|r| r.amount).sum();
            let percentage_sum: Decimal = rows.iter().map(|r| r.percentage).sum();

            if total > Decimal::ZERO {
                let slack = Decimal::new(1, 2) * Decimal::from(rows.len());
                prop_assert!((percentage_sum - Decimal::from(100)).abs() <= slack);
            } else {
                prop_assert_eq!(percentage_sum, Decimal::ZERO);
            }
        }

        /// Row totals preserve the input sum regardless of grouping.
        #[test]
        fn prop_amounts_conserved(expenses in expenses_strategy()) {
            let input_sum: Decimal = expenses.iter().map(|(_, a)| *a).sum();
            let rows = category_breakdown(expenses);
            let row_sum: Decimal = rows.iter().map(|r| r.amount).sum();
            prop_assert_eq!(input_sum, row_sum);
        }
    }
}
