//! `SeaORM` active enums mirroring the Postgres enum types.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Kind of an account (`account_kind` in Postgres).
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "account_kind")]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    /// Physical cash.
    #[sea_orm(string_value = "cash")]
    Cash,
    /// Bank account.
    #[sea_orm(string_value = "bank")]
    Bank,
    /// Credit card or line of credit.
    #[sea_orm(string_value = "credit")]
    Credit,
    /// Investment account.
    #[sea_orm(string_value = "investment")]
    Investment,
}

/// Kind of a transaction (`transaction_kind` in Postgres).
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "transaction_kind")]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money flowing into an account.
    #[sea_orm(string_value = "income")]
    Income,
    /// Money flowing out of an account.
    #[sea_orm(string_value = "expense")]
    Expense,
    /// Money moved between two accounts.
    #[sea_orm(string_value = "transfer")]
    Transfer,
}

/// Kind of a category (`category_kind` in Postgres).
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "category_kind")]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    /// Category for income transactions.
    #[sea_orm(string_value = "income")]
    Income,
    /// Category for expense transactions.
    #[sea_orm(string_value = "expense")]
    Expense,
}
