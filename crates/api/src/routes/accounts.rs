//! Account management routes, including the transfer endpoint.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::str::FromStr;
use tracing::{error, info};
use uuid::Uuid;

use crate::{AppState, middleware::AuthUser};
use moneta_db::entities::{accounts, sea_orm_active_enums::AccountKind};
use moneta_db::repositories::{
    AccountError, AccountRepository, CreateAccountInput, TransferInput, UpdateAccountInput,
};

use super::transactions::TransactionResponse;

const DEFAULT_ACCOUNT_COLOR: &str = "hsl(200, 75%, 50%)";
const DEFAULT_ACCOUNT_ICON: &str = "Wallet";

/// Creates the account routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/accounts", get(list_accounts))
        .route("/accounts", post(create_account))
        .route("/accounts/transfer", post(transfer))
        .route("/accounts/{account_id}", put(update_account))
        .route("/accounts/{account_id}", delete(delete_account))
}

/// Request body for creating an account.
#[derive(Debug, Deserialize)]
pub struct CreateAccountRequest {
    /// Display name (unique per user).
    pub name: String,
    /// Account kind: cash, bank, credit, or investment.
    pub kind: String,
    /// Starting balance as a decimal string; defaults to 0.
    pub balance: Option<String>,
    /// Display color; defaults to the standard blue.
    pub color: Option<String>,
    /// Icon identifier; defaults to Wallet.
    pub icon: Option<String>,
}

/// Request body for updating account metadata. The balance is absent on
/// purpose: it only moves through ledger operations.
#[derive(Debug, Deserialize)]
pub struct UpdateAccountRequest {
    /// New display name.
    pub name: Option<String>,
    /// New account kind.
    pub kind: Option<String>,
    /// New display color.
    pub color: Option<String>,
    /// New icon identifier.
    pub icon: Option<String>,
}

/// Request body for a transfer between two accounts.
#[derive(Debug, Deserialize)]
pub struct TransferRequest {
    /// Source account.
    pub from_account_id: Uuid,
    /// Destination account.
    pub to_account_id: Uuid,
    /// Amount as a decimal string (non-negative).
    pub amount: String,
    /// Optional description; defaults to "Transfer from {from} to {to}".
    pub description: Option<String>,
}

/// Response for a single account.
#[derive(Debug, Serialize)]
pub struct AccountResponse {
    /// Account ID.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Account kind.
    pub kind: String,
    /// Current balance as a decimal string.
    pub balance: String,
    /// Display color.
    pub color: String,
    /// Icon identifier.
    pub icon: String,
    /// Created at timestamp.
    pub created_at: String,
    /// Updated at timestamp.
    pub updated_at: String,
}

impl From<accounts::Model> for AccountResponse {
    fn from(account: accounts::Model) -> Self {
        Self {
            id: account.id,
            name: account.name,
            kind: account_kind_to_string(&account.kind),
            balance: account.balance.to_string(),
            color: account.color,
            icon: account.icon,
            created_at: account.created_at.to_rfc3339(),
            updated_at: account.updated_at.to_rfc3339(),
        }
    }
}

/// Response for a completed transfer.
#[derive(Debug, Serialize)]
pub struct TransferResponse {
    /// Source account after the debit.
    pub from_account: AccountResponse,
    /// Destination account after the credit.
    pub to_account: AccountResponse,
    /// The recorded transfer transaction.
    pub transaction: TransactionResponse,
}

/// GET /accounts - List the user's accounts.
async fn list_accounts(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    let repo = AccountRepository::new((*state.db).clone());

    match repo.list(auth.user_id()).await {
        Ok(accounts) => {
            let items: Vec<AccountResponse> =
                accounts.into_iter().map(AccountResponse::from).collect();
            (StatusCode::OK, Json(json!({ "accounts": items }))).into_response()
        }
        Err(e) => account_error_response(e, "Failed to list accounts"),
    }
}

/// POST /accounts - Create an account.
async fn create_account(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateAccountRequest>,
) -> impl IntoResponse {
    if payload.name.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "invalid_name",
                "message": "Account name is required"
            })),
        )
            .into_response();
    }

    let Some(kind) = string_to_account_kind(&payload.kind) else {
        return invalid_account_kind();
    };

    let balance = match payload.balance.as_deref() {
        Some(raw) => match Decimal::from_str(raw) {
            Ok(b) => b,
            Err(_) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(json!({
                        "error": "invalid_amount",
                        "message": "Invalid balance format"
                    })),
                )
                    .into_response();
            }
        },
        None => Decimal::ZERO,
    };

    let repo = AccountRepository::new((*state.db).clone());
    let input = CreateAccountInput {
        name: payload.name,
        kind,
        balance,
        color: payload
            .color
            .unwrap_or_else(|| DEFAULT_ACCOUNT_COLOR.to_string()),
        icon: payload
            .icon
            .unwrap_or_else(|| DEFAULT_ACCOUNT_ICON.to_string()),
    };

    match repo.create(auth.user_id(), input).await {
        Ok(account) => {
            info!(user_id = %auth.user_id(), account_id = %account.id, "Account created");
            (StatusCode::CREATED, Json(AccountResponse::from(account))).into_response()
        }
        Err(e) => account_error_response(e, "Failed to create account"),
    }
}

/// PUT /accounts/{account_id} - Update account metadata.
async fn update_account(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(account_id): Path<Uuid>,
    Json(payload): Json<UpdateAccountRequest>,
) -> impl IntoResponse {
    if let Some(name) = &payload.name
        && name.trim().is_empty()
    {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "invalid_name",
                "message": "Account name cannot be empty"
            })),
        )
            .into_response();
    }

    let kind = match payload.kind.as_deref() {
        Some(raw) => match string_to_account_kind(raw) {
            Some(k) => Some(k),
            None => return invalid_account_kind(),
        },
        None => None,
    };

    let repo = AccountRepository::new((*state.db).clone());
    let input = UpdateAccountInput {
        name: payload.name,
        kind,
        color: payload.color,
        icon: payload.icon,
    };

    match repo.update(auth.user_id(), account_id, input).await {
        Ok(account) => (StatusCode::OK, Json(AccountResponse::from(account))).into_response(),
        Err(e) => account_error_response(e, "Failed to update account"),
    }
}

/// DELETE /accounts/{account_id} - Delete an account.
///
/// Historical transactions keep their cached account names and dangling
/// ids; no balance effects are reversed.
async fn delete_account(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(account_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = AccountRepository::new((*state.db).clone());

    match repo.delete(auth.user_id(), account_id).await {
        Ok(()) => {
            info!(user_id = %auth.user_id(), account_id = %account_id, "Account deleted");
            (
                StatusCode::OK,
                Json(json!({ "message": "Account deleted" })),
            )
                .into_response()
        }
        Err(e) => account_error_response(e, "Failed to delete account"),
    }
}

/// POST /accounts/transfer - Move funds between two accounts.
async fn transfer(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<TransferRequest>,
) -> impl IntoResponse {
    let amount = match Decimal::from_str(&payload.amount) {
        Ok(a) => a,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "invalid_amount",
                    "message": "Invalid amount format"
                })),
            )
                .into_response();
        }
    };
    if amount < Decimal::ZERO {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "invalid_amount",
                "message": "Transfer amount cannot be negative"
            })),
        )
            .into_response();
    }

    let repo = AccountRepository::new((*state.db).clone());
    let input = TransferInput {
        from_account_id: payload.from_account_id,
        to_account_id: payload.to_account_id,
        amount,
        description: payload.description,
    };

    match repo.transfer(auth.user_id(), input).await {
        Ok(outcome) => {
            info!(
                user_id = %auth.user_id(),
                from = %outcome.from.id,
                to = %outcome.to.id,
                amount = %amount,
                "Transfer completed"
            );
            (
                StatusCode::CREATED,
                Json(TransferResponse {
                    from_account: AccountResponse::from(outcome.from),
                    to_account: AccountResponse::from(outcome.to),
                    transaction: TransactionResponse::from(outcome.transaction),
                }),
            )
                .into_response()
        }
        Err(e) => account_error_response(e, "Failed to transfer"),
    }
}

fn account_error_response(e: AccountError, context: &str) -> axum::response::Response {
    match e {
        AccountError::NotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "account_not_found",
                "message": format!("Account not found: {id}")
            })),
        )
            .into_response(),
        AccountError::DuplicateName(name) => (
            StatusCode::CONFLICT,
            Json(json!({
                "error": "duplicate_account_name",
                "message": format!("Account name '{name}' is already in use")
            })),
        )
            .into_response(),
        AccountError::Database(e) => {
            error!(error = %e, "{context}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "internal_error",
                    "message": "An error occurred"
                })),
            )
                .into_response()
        }
    }
}

fn invalid_account_kind() -> axum::response::Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({
            "error": "invalid_account_kind",
            "message": "Account kind must be one of: cash, bank, credit, investment"
        })),
    )
        .into_response()
}

fn account_kind_to_string(kind: &AccountKind) -> String {
    match kind {
        AccountKind::Cash => "cash".to_string(),
        AccountKind::Bank => "bank".to_string(),
        AccountKind::Credit => "credit".to_string(),
        AccountKind::Investment => "investment".to_string(),
    }
}

fn string_to_account_kind(s: &str) -> Option<AccountKind> {
    match s.to_lowercase().as_str() {
        "cash" => Some(AccountKind::Cash),
        "bank" => Some(AccountKind::Bank),
        "credit" => Some(AccountKind::Credit),
        "investment" => Some(AccountKind::Investment),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("cash", Some(AccountKind::Cash))]
    #[case("BANK", Some(AccountKind::Bank))]
    #[case("Credit", Some(AccountKind::Credit))]
    #[case("investment", Some(AccountKind::Investment))]
    #[case("checking", None)]
    fn test_string_to_account_kind(#[case] input: &str, #[case] expected: Option<AccountKind>) {
        assert_eq!(string_to_account_kind(input), expected);
    }

    #[test]
    fn test_kind_round_trip() {
        for kind in [
            AccountKind::Cash,
            AccountKind::Bank,
            AccountKind::Credit,
            AccountKind::Investment,
        ] {
            let s = account_kind_to_string(&kind);
            assert_eq!(string_to_account_kind(&s), Some(kind));
        }
    }
}
