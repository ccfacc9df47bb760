//! Account repository and the transfer orchestration.
//!
//! Transfers are the one two-account operation in the system: debit one
//! account, credit another, and materialize a transfer transaction for
//! history, all inside a single database transaction.

use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use super::reconcile::apply_balance_delta;
use crate::entities::{
    accounts,
    sea_orm_active_enums::{AccountKind, TransactionKind},
    transactions,
};

/// Error types for account operations.
#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    /// Account not found or not owned by the caller.
    #[error("Account not found: {0}")]
    NotFound(Uuid),

    /// Account name already used by this user.
    #[error("Account name '{0}' already in use")]
    DuplicateName(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating an account.
#[derive(Debug, Clone)]
pub struct CreateAccountInput {
    /// Display name (unique per user).
    pub name: String,
    /// Account kind.
    pub kind: AccountKind,
    /// Starting balance.
    pub balance: Decimal,
    /// Display color.
    pub color: String,
    /// Display icon.
    pub icon: String,
}

/// Input for updating account metadata.
///
/// The balance is deliberately absent: it is only ever changed by the
/// reconciliation paths.
#[derive(Debug, Clone, Default)]
pub struct UpdateAccountInput {
    /// New display name.
    pub name: Option<String>,
    /// New account kind.
    pub kind: Option<AccountKind>,
    /// New display color.
    pub color: Option<String>,
    /// New display icon.
    pub icon: Option<String>,
}

/// Input for a transfer between two accounts.
#[derive(Debug, Clone)]
pub struct TransferInput {
    /// Account to debit.
    pub from_account_id: Uuid,
    /// Account to credit.
    pub to_account_id: Uuid,
    /// Amount to move (non-negative).
    pub amount: Decimal,
    /// Optional description; empty or absent falls back to
    /// `"Transfer from {from} to {to}"`.
    pub description: Option<String>,
}

/// Result of a completed transfer.
#[derive(Debug, Clone)]
pub struct TransferOutcome {
    /// Debited account with its updated balance.
    pub from: accounts::Model,
    /// Credited account with its updated balance.
    pub to: accounts::Model,
    /// The materialized transfer transaction.
    pub transaction: transactions::Model,
}

/// Account repository for CRUD operations and transfers.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    db: DatabaseConnection,
}

impl AccountRepository {
    /// Creates a new account repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists all accounts owned by the user, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self, user_id: Uuid) -> Result<Vec<accounts::Model>, AccountError> {
        let accounts = accounts::Entity::find()
            .filter(accounts::Column::UserId.eq(user_id))
            .order_by_asc(accounts::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(accounts)
    }

    /// Creates a new account.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateName` if the user already has an account with
    /// the same name.
    pub async fn create(
        &self,
        user_id: Uuid,
        input: CreateAccountInput,
    ) -> Result<accounts::Model, AccountError> {
        if self.name_taken(user_id, &input.name, None).await? {
            return Err(AccountError::DuplicateName(input.name));
        }

        let now = chrono::Utc::now().into();
        let account = accounts::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            name: Set(input.name),
            kind: Set(input.kind),
            balance: Set(input.balance),
            color: Set(input.color),
            icon: Set(input.icon),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await?;

        Ok(account)
    }

    /// Updates account metadata (name, kind, color, icon).
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the account does not exist for this user,
    /// or `DuplicateName` if the new name collides with another account.
    pub async fn update(
        &self,
        user_id: Uuid,
        account_id: Uuid,
        input: UpdateAccountInput,
    ) -> Result<accounts::Model, AccountError> {
        let account = find_scoped(&self.db, user_id, account_id)
            .await?
            .ok_or(AccountError::NotFound(account_id))?;

        if let Some(new_name) = &input.name
            && *new_name != account.name
            && self.name_taken(user_id, new_name, Some(account_id)).await?
        {
            return Err(AccountError::DuplicateName(new_name.clone()));
        }

        let mut active: accounts::ActiveModel = account.into();
        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(kind) = input.kind {
            active.kind = Set(kind);
        }
        if let Some(color) = input.color {
            active.color = Set(color);
        }
        if let Some(icon) = input.icon {
            active.icon = Set(icon);
        }
        active.updated_at = Set(chrono::Utc::now().into());

        let updated = active.update(&self.db).await?;
        Ok(updated)
    }

    /// Deletes an account.
    ///
    /// Historical transactions referencing it are left untouched: their
    /// cached account names keep them readable, and their balance
    /// effects are not reversed.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the account does not exist for this user.
    pub async fn delete(&self, user_id: Uuid, account_id: Uuid) -> Result<(), AccountError> {
        let result = accounts::Entity::delete_many()
            .filter(accounts::Column::Id.eq(account_id))
            .filter(accounts::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(AccountError::NotFound(account_id));
        }

        Ok(())
    }

    /// Moves `amount` between two accounts and records a transfer
    /// transaction, all-or-nothing.
    ///
    /// Balances are unconstrained signed decimals, so overdrafts are
    /// permitted. `from == to` is allowed and nets to zero.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if either account does not exist for this
    /// user.
    pub async fn transfer(
        &self,
        user_id: Uuid,
        input: TransferInput,
    ) -> Result<TransferOutcome, AccountError> {
        let txn = self.db.begin().await?;

        let from = find_scoped(&txn, user_id, input.from_account_id)
            .await?
            .ok_or(AccountError::NotFound(input.from_account_id))?;
        let to = find_scoped(&txn, user_id, input.to_account_id)
            .await?
            .ok_or(AccountError::NotFound(input.to_account_id))?;

        let debited = apply_balance_delta(&txn, user_id, from.id, -input.amount).await?;
        if debited == 0 {
            return Err(AccountError::NotFound(from.id));
        }
        let credited = apply_balance_delta(&txn, user_id, to.id, input.amount).await?;
        if credited == 0 {
            return Err(AccountError::NotFound(to.id));
        }

        let description = match input.description {
            Some(d) if !d.is_empty() => d,
            _ => format!("Transfer from {} to {}", from.name, to.name),
        };

        let now = chrono::Utc::now().into();
        let transaction = transactions::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            kind: Set(TransactionKind::Transfer),
            amount: Set(input.amount),
            description: Set(description),
            category: Set(None),
            division: Set(None),
            account_id: Set(Some(from.id)),
            account_name: Set(Some(from.name.clone())),
            from_account_id: Set(Some(from.id)),
            from_account_name: Set(Some(from.name.clone())),
            to_account_id: Set(Some(to.id)),
            to_account_name: Set(Some(to.name.clone())),
            date_time: Set(now),
            created_at: Set(now),
        }
        .insert(&txn)
        .await?;

        let from = find_scoped(&txn, user_id, from.id)
            .await?
            .ok_or(AccountError::NotFound(input.from_account_id))?;
        let to = find_scoped(&txn, user_id, to.id)
            .await?
            .ok_or(AccountError::NotFound(input.to_account_id))?;

        txn.commit().await?;

        Ok(TransferOutcome {
            from,
            to,
            transaction,
        })
    }

    /// Checks whether the user already has an account with this name,
    /// optionally excluding one account id.
    async fn name_taken(
        &self,
        user_id: Uuid,
        name: &str,
        exclude: Option<Uuid>,
    ) -> Result<bool, AccountError> {
        let mut query = accounts::Entity::find()
            .filter(accounts::Column::UserId.eq(user_id))
            .filter(accounts::Column::Name.eq(name));

        if let Some(id) = exclude {
            query = query.filter(accounts::Column::Id.ne(id));
        }

        Ok(query.count(&self.db).await? > 0)
    }
}

/// Fetches an account scoped to its owner.
async fn find_scoped<C: ConnectionTrait>(
    conn: &C,
    user_id: Uuid,
    account_id: Uuid,
) -> Result<Option<accounts::Model>, DbErr> {
    accounts::Entity::find_by_id(account_id)
        .filter(accounts::Column::UserId.eq(user_id))
        .one(conn)
        .await
}
