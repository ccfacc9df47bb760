//! Transaction repository for ledger lifecycle operations.
//!
//! Create, update, and delete all run inside one database transaction
//! and reconcile the linked account balance through atomic increments:
//! create applies the signed effect, delete reverses it, update reverses
//! the old effect and applies the new one.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use tracing::warn;
use uuid::Uuid;

use moneta_core::ledger::{EDIT_WINDOW_HOURS, is_within_edit_window};

use super::reconcile::{apply_balance_delta, signed_effect, undo_effect};
use crate::entities::{accounts, sea_orm_active_enums::TransactionKind, transactions};

/// Error types for transaction operations.
#[derive(Debug, thiserror::Error)]
pub enum TransactionError {
    /// Transaction not found or not owned by the caller.
    #[error("Transaction not found: {0}")]
    NotFound(Uuid),

    /// The edit window has closed for this transaction.
    #[error(
        "Transactions can only be edited within {} hours of creation",
        EDIT_WINDOW_HOURS
    )]
    EditWindowExpired,

    /// Transfer records only accept description and date edits.
    #[error("Transfer records accept only description and date edits")]
    TransferImmutable,

    /// Kind changes to or from transfer are not allowed.
    #[error("Transaction kind cannot change to or from transfer")]
    InvalidKindChange,

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating an income or expense transaction.
///
/// Transfers are shaped by the transfer orchestration instead and never
/// come through here.
#[derive(Debug, Clone)]
pub struct CreateTransactionInput {
    /// Transaction kind (income or expense).
    pub kind: TransactionKind,
    /// Amount (non-negative).
    pub amount: Decimal,
    /// Free-text description.
    pub description: String,
    /// Category name.
    pub category: String,
    /// Division tag.
    pub division: String,
    /// Linked account.
    pub account_id: Uuid,
    /// Event timestamp; defaults to now.
    pub date_time: Option<chrono::DateTime<chrono::FixedOffset>>,
}

/// A created transaction plus whether its balance effect landed.
///
/// `balance_applied` is false only when the linked account did not
/// exist: the row is still persisted, the balance is untouched.
#[derive(Debug, Clone)]
pub struct CreatedTransaction {
    /// The persisted transaction.
    pub transaction: transactions::Model,
    /// Whether the signed effect was applied to an account.
    pub balance_applied: bool,
}

/// Filter options for listing transactions.
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    /// Filter by category name.
    pub category: Option<String>,
    /// Filter by division tag.
    pub division: Option<String>,
    /// Filter by transaction kind.
    pub kind: Option<TransactionKind>,
    /// Filter by linked account.
    pub account_id: Option<Uuid>,
    /// Inclusive lower bound on `date_time`.
    pub start_date: Option<chrono::DateTime<chrono::FixedOffset>>,
    /// Inclusive upper bound on `date_time`.
    pub end_date: Option<chrono::DateTime<chrono::FixedOffset>>,
}

/// Input for updating a transaction. Absent fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateTransactionInput {
    /// New kind (income or expense; transfer is rejected).
    pub kind: Option<TransactionKind>,
    /// New amount (non-negative).
    pub amount: Option<Decimal>,
    /// New description.
    pub description: Option<String>,
    /// New category name.
    pub category: Option<String>,
    /// New division tag.
    pub division: Option<String>,
    /// New linked account.
    pub account_id: Option<Uuid>,
    /// New event timestamp.
    pub date_time: Option<chrono::DateTime<chrono::FixedOffset>>,
}

/// Transaction repository for lifecycle operations.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    db: DatabaseConnection,
}

impl TransactionRepository {
    /// Creates a new transaction repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Persists a transaction and applies its signed effect to the
    /// linked account, in one database transaction.
    ///
    /// A missing account is not a failure: the row is stored anyway and
    /// the result flags that no balance changed.
    ///
    /// # Errors
    ///
    /// Returns an error if a database operation fails.
    pub async fn create(
        &self,
        user_id: Uuid,
        input: CreateTransactionInput,
    ) -> Result<CreatedTransaction, TransactionError> {
        let txn = self.db.begin().await?;
        let now = Utc::now().into();

        let account = accounts::Entity::find_by_id(input.account_id)
            .filter(accounts::Column::UserId.eq(user_id))
            .one(&txn)
            .await?;

        if account.is_none() {
            warn!(
                account_id = %input.account_id,
                "account missing; transaction stored without balance effect"
            );
        }

        let transaction = transactions::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            kind: Set(input.kind.clone()),
            amount: Set(input.amount),
            description: Set(input.description),
            category: Set(Some(input.category)),
            division: Set(Some(input.division)),
            account_id: Set(Some(input.account_id)),
            account_name: Set(account.as_ref().map(|a| a.name.clone())),
            from_account_id: Set(None),
            from_account_name: Set(None),
            to_account_id: Set(None),
            to_account_name: Set(None),
            date_time: Set(input.date_time.unwrap_or(now)),
            created_at: Set(now),
        }
        .insert(&txn)
        .await?;

        let balance_applied = if account.is_some() {
            let effect = signed_effect(&input.kind, input.amount);
            apply_balance_delta(&txn, user_id, input.account_id, effect).await? > 0
        } else {
            false
        };

        txn.commit().await?;

        Ok(CreatedTransaction {
            transaction,
            balance_applied,
        })
    }

    /// Lists the user's transactions, newest `date_time` first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        user_id: Uuid,
        filter: TransactionFilter,
    ) -> Result<Vec<transactions::Model>, TransactionError> {
        let mut query =
            transactions::Entity::find().filter(transactions::Column::UserId.eq(user_id));

        if let Some(category) = filter.category {
            query = query.filter(transactions::Column::Category.eq(category));
        }
        if let Some(division) = filter.division {
            query = query.filter(transactions::Column::Division.eq(division));
        }
        if let Some(kind) = filter.kind {
            query = query.filter(transactions::Column::Kind.eq(kind));
        }
        if let Some(account_id) = filter.account_id {
            query = query.filter(transactions::Column::AccountId.eq(account_id));
        }
        if let Some(start) = filter.start_date {
            query = query.filter(transactions::Column::DateTime.gte(start));
        }
        if let Some(end) = filter.end_date {
            query = query.filter(transactions::Column::DateTime.lte(end));
        }

        let transactions = query
            .order_by_desc(transactions::Column::DateTime)
            .all(&self.db)
            .await?;

        Ok(transactions)
    }

    /// Updates a transaction and reconciles balances: the old signed
    /// effect is reversed and the new one applied, atomically with the
    /// row update.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The transaction is not found for this user
    /// - The edit window has closed
    /// - A transfer record receives more than description/date edits
    /// - The kind would change to or from transfer
    pub async fn update(
        &self,
        user_id: Uuid,
        transaction_id: Uuid,
        input: UpdateTransactionInput,
    ) -> Result<transactions::Model, TransactionError> {
        let txn = self.db.begin().await?;

        let existing = transactions::Entity::find_by_id(transaction_id)
            .filter(transactions::Column::UserId.eq(user_id))
            .one(&txn)
            .await?
            .ok_or(TransactionError::NotFound(transaction_id))?;

        if !is_within_edit_window(existing.created_at.to_utc(), Utc::now()) {
            return Err(TransactionError::EditWindowExpired);
        }

        if existing.kind == TransactionKind::Transfer {
            if input.kind.is_some()
                || input.amount.is_some()
                || input.category.is_some()
                || input.division.is_some()
                || input.account_id.is_some()
            {
                return Err(TransactionError::TransferImmutable);
            }

            let mut active: transactions::ActiveModel = existing.into();
            if let Some(description) = input.description {
                active.description = Set(description);
            }
            if let Some(date_time) = input.date_time {
                active.date_time = Set(date_time);
            }
            let updated = active.update(&txn).await?;
            txn.commit().await?;
            return Ok(updated);
        }

        if input.kind == Some(TransactionKind::Transfer) {
            return Err(TransactionError::InvalidKindChange);
        }

        let new_kind = input.kind.clone().unwrap_or_else(|| existing.kind.clone());
        let new_amount = input.amount.unwrap_or(existing.amount);
        let new_account_id = input.account_id.or(existing.account_id);
        let moves_account = input.account_id.is_some() && input.account_id != existing.account_id;

        // Reverse the old effect, then apply the new one. Each increment
        // matches zero rows when the target account no longer exists.
        if let Some(old_account_id) = existing.account_id {
            let reversal = undo_effect(&existing.kind, existing.amount);
            if reversal != Decimal::ZERO {
                apply_balance_delta(&txn, user_id, old_account_id, reversal).await?;
            }
        }
        if let Some(account_id) = new_account_id {
            let effect = signed_effect(&new_kind, new_amount);
            if effect != Decimal::ZERO {
                apply_balance_delta(&txn, user_id, account_id, effect).await?;
            }
        }

        // The name cache follows the linkage, not the account: it is
        // refreshed only when the transaction moves to another account.
        let moved_account_name = if moves_account {
            match new_account_id {
                Some(account_id) => accounts::Entity::find_by_id(account_id)
                    .filter(accounts::Column::UserId.eq(user_id))
                    .one(&txn)
                    .await?
                    .map(|a| a.name),
                None => None,
            }
        } else {
            None
        };

        let mut active: transactions::ActiveModel = existing.into();
        if let Some(kind) = input.kind {
            active.kind = Set(kind);
        }
        if let Some(amount) = input.amount {
            active.amount = Set(amount);
        }
        if let Some(description) = input.description {
            active.description = Set(description);
        }
        if let Some(category) = input.category {
            active.category = Set(Some(category));
        }
        if let Some(division) = input.division {
            active.division = Set(Some(division));
        }
        if moves_account {
            active.account_id = Set(new_account_id);
            active.account_name = Set(moved_account_name);
        }
        if let Some(date_time) = input.date_time {
            active.date_time = Set(date_time);
        }

        let updated = active.update(&txn).await?;
        txn.commit().await?;

        Ok(updated)
    }

    /// Deletes a transaction and reverses its signed effect on the
    /// linked account, in one database transaction.
    ///
    /// Transfer records carry a zero signed effect, so deleting one
    /// changes no balance.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the transaction does not exist for this
    /// user.
    pub async fn delete(
        &self,
        user_id: Uuid,
        transaction_id: Uuid,
    ) -> Result<(), TransactionError> {
        let txn = self.db.begin().await?;

        let existing = transactions::Entity::find_by_id(transaction_id)
            .filter(transactions::Column::UserId.eq(user_id))
            .one(&txn)
            .await?
            .ok_or(TransactionError::NotFound(transaction_id))?;

        if let Some(account_id) = existing.account_id {
            let reversal = undo_effect(&existing.kind, existing.amount);
            if reversal != Decimal::ZERO {
                apply_balance_delta(&txn, user_id, account_id, reversal).await?;
            }
        }

        transactions::Entity::delete_by_id(existing.id)
            .exec(&txn)
            .await?;

        txn.commit().await?;
        Ok(())
    }
}
