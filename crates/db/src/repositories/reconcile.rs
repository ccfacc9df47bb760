//! Balance reconciliation primitives shared by the write paths.
//!
//! Every balance change goes through [`apply_balance_delta`], a single
//! atomic UPDATE. Matching zero rows is not an error at this level:
//! callers decide whether a vanished account is a failure or a recorded
//! no-op.

use moneta_core::ledger::{self, balance_effect, reversal_effect};
use rust_decimal::Decimal;
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, sea_query::Expr};
use uuid::Uuid;

use crate::entities::{accounts, sea_orm_active_enums::TransactionKind};

/// Maps the persisted kind to the pure ledger kind.
pub(crate) fn ledger_kind(kind: &TransactionKind) -> ledger::TransactionKind {
    match kind {
        TransactionKind::Income => ledger::TransactionKind::Income,
        TransactionKind::Expense => ledger::TransactionKind::Expense,
        TransactionKind::Transfer => ledger::TransactionKind::Transfer,
    }
}

/// Signed balance effect a transaction row has on its linked account.
pub(crate) fn signed_effect(kind: &TransactionKind, amount: Decimal) -> Decimal {
    balance_effect(ledger_kind(kind), amount)
}

/// Effect that undoes a previously applied transaction row.
pub(crate) fn undo_effect(kind: &TransactionKind, amount: Decimal) -> Decimal {
    reversal_effect(ledger_kind(kind), amount)
}

/// Adds `delta` to an account balance as one atomic UPDATE, scoped to
/// the owning user.
///
/// Returns the number of matched rows; zero means the account does not
/// exist (or is owned by someone else) and nothing was changed.
pub(crate) async fn apply_balance_delta<C: ConnectionTrait>(
    conn: &C,
    user_id: Uuid,
    account_id: Uuid,
    delta: Decimal,
) -> Result<u64, DbErr> {
    let result = accounts::Entity::update_many()
        .col_expr(
            accounts::Column::Balance,
            Expr::col(accounts::Column::Balance).add(delta),
        )
        .col_expr(
            accounts::Column::UpdatedAt,
            Expr::current_timestamp().into(),
        )
        .filter(accounts::Column::Id.eq(account_id))
        .filter(accounts::Column::UserId.eq(user_id))
        .exec(conn)
        .await?;

    Ok(result.rows_affected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_signed_effect_by_kind() {
        assert_eq!(signed_effect(&TransactionKind::Income, dec!(42)), dec!(42));
        assert_eq!(
            signed_effect(&TransactionKind::Expense, dec!(42)),
            dec!(-42)
        );
        assert_eq!(signed_effect(&TransactionKind::Transfer, dec!(42)), dec!(0));
    }

    #[test]
    fn test_undo_cancels_signed_effect() {
        for kind in [
            TransactionKind::Income,
            TransactionKind::Expense,
            TransactionKind::Transfer,
        ] {
            let applied = signed_effect(&kind, dec!(19.95));
            let undone = undo_effect(&kind, dec!(19.95));
            assert_eq!(applied + undone, dec!(0));
        }
    }
}
