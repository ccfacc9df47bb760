//! Signed balance effects.
//!
//! Every income or expense transaction carries a signed effect on the balance
//! of its linked account. An account's balance is always the sum of its
//! starting balance and the effects applied to it (and not yet reversed), so
//! apply/reverse must be exact inverses.

use rust_decimal::Decimal;

use super::types::TransactionKind;

/// The signed effect of a transaction on its linked account's balance.
///
/// Income adds, expense subtracts. A transfer contributes nothing here: its
/// two-sided effect (debit one account, credit another) is applied by the
/// transfer path against both accounts directly.
#[must_use]
pub fn balance_effect(kind: TransactionKind, amount: Decimal) -> Decimal {
    match kind {
        TransactionKind::Income => amount,
        TransactionKind::Expense => -amount,
        TransactionKind::Transfer => Decimal::ZERO,
    }
}

/// The exact inverse of [`balance_effect`], used when a transaction is
/// deleted or its old state is backed out during an edit.
#[must_use]
pub fn reversal_effect(kind: TransactionKind, amount: Decimal) -> Decimal {
    -balance_effect(kind, amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_income_adds() {
        assert_eq!(balance_effect(TransactionKind::Income, dec!(500)), dec!(500));
    }

    #[test]
    fn test_expense_subtracts() {
        assert_eq!(balance_effect(TransactionKind::Expense, dec!(100)), dec!(-100));
    }

    #[test]
    fn test_transfer_has_no_single_account_effect() {
        assert_eq!(balance_effect(TransactionKind::Transfer, dec!(200)), Decimal::ZERO);
        assert_eq!(reversal_effect(TransactionKind::Transfer, dec!(200)), Decimal::ZERO);
    }

    #[test]
    fn test_delete_after_create_restores_balance() {
        let start = dec!(1000);
        let after_create = start + balance_effect(TransactionKind::Expense, dec!(75.50));
        let after_delete = after_create + reversal_effect(TransactionKind::Expense, dec!(75.50));
        assert_eq!(after_delete, start);
    }

    fn kind_strategy() -> impl Strategy<Value = TransactionKind> {
        prop_oneof![
            Just(TransactionKind::Income),
            Just(TransactionKind::Expense),
            Just(TransactionKind::Transfer),
        ]
    }

    fn amount_strategy() -> impl Strategy<Value = Decimal> {
        // Non-negative amounts with 2 decimal places, like wire input
        (0i64..10_000_000).prop_map(|n| Decimal::new(n, 2))
    }

    proptest! {
        /// Reversal is the exact additive inverse of application.
        #[test]
        fn prop_reversal_cancels_effect(
            kind in kind_strategy(),
            amount in amount_strategy(),
        ) {
            prop_assert_eq!(
                balance_effect(kind, amount) + reversal_effect(kind, amount),
                Decimal::ZERO
            );
        }

        /// Replaying a ledger: final balance minus initial balance equals the
        /// sum of all applied effects.
        #[test]
        fn prop_balance_reconstructible_from_effects(
            initial in -1_000_000i64..1_000_000i64,
            entries in prop::collection::vec((kind_strategy(), amount_strategy()), 0..50),
        ) {
            let initial = Decimal::new(initial, 2);
            let mut balance = initial;
            let mut effect_sum = Decimal::ZERO;
            for (kind, amount) in &entries {
                let effect = balance_effect(*kind, *amount);
                balance += effect;
                effect_sum += effect;
            }
            prop_assert_eq!(balance - initial, effect_sum);
        }

        /// Editing a transaction (reverse old, apply new) lands on the same
        /// balance as if the new version had been created in the first place.
        #[test]
        fn prop_edit_equals_fresh_create(
            initial in -1_000_000i64..1_000_000i64,
            old_kind in kind_strategy(),
            old_amount in amount_strategy(),
            new_kind in kind_strategy(),
            new_amount in amount_strategy(),
        ) {
            let initial = Decimal::new(initial, 2);

            let edited = initial
                + balance_effect(old_kind, old_amount)
                + reversal_effect(old_kind, old_amount)
                + balance_effect(new_kind, new_amount);

            let fresh = initial + balance_effect(new_kind, new_amount);

            prop_assert_eq!(edited, fresh);
        }
    }
}
