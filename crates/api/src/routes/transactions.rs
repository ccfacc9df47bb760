//! Transaction routes: listing, creation, edits, and deletion.
//!
//! Transfers are not created here; they go through the account transfer
//! endpoint, which debits and credits both sides atomically.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::str::FromStr;
use tracing::{error, info};
use uuid::Uuid;

use crate::{AppState, middleware::AuthUser};
use moneta_db::entities::{sea_orm_active_enums::TransactionKind, transactions};
use moneta_db::repositories::{
    CreateTransactionInput, TransactionError, TransactionFilter, TransactionRepository,
    UpdateTransactionInput,
};

const DEFAULT_DIVISION: &str = "Personal";

/// Creates the transaction routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/transactions", get(list_transactions))
        .route("/transactions", post(create_transaction))
        .route("/transactions/{transaction_id}", put(update_transaction))
        .route(
            "/transactions/{transaction_id}",
            delete(delete_transaction),
        )
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Query parameters for listing transactions. All filters are optional
/// and combine with AND semantics.
#[derive(Debug, Deserialize)]
pub struct ListTransactionsQuery {
    /// Filter by kind: income, expense, or transfer.
    pub kind: Option<String>,
    /// Filter by exact category name.
    pub category: Option<String>,
    /// Filter by exact division name.
    pub division: Option<String>,
    /// Filter by linked account.
    pub account_id: Option<Uuid>,
    /// Inclusive lower bound on the transaction date.
    pub start_date: Option<DateTime<FixedOffset>>,
    /// Inclusive upper bound on the transaction date.
    pub end_date: Option<DateTime<FixedOffset>>,
}

/// Request body for creating an income or expense transaction.
#[derive(Debug, Deserialize)]
pub struct CreateTransactionRequest {
    /// Transaction kind: income or expense.
    pub kind: String,
    /// Amount as a decimal string (non-negative).
    pub amount: String,
    /// Free-form description; defaults to empty.
    pub description: Option<String>,
    /// Category name.
    pub category: String,
    /// Division name; defaults to Personal.
    pub division: Option<String>,
    /// Account to apply the amount to.
    pub account_id: Uuid,
    /// When the transaction happened; defaults to now.
    pub date_time: Option<DateTime<FixedOffset>>,
}

/// Request body for updating a transaction. Unknown fields are rejected
/// so that a typo like `ammount` fails loudly instead of silently doing
/// nothing.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateTransactionRequest {
    /// New kind: income or expense.
    pub kind: Option<String>,
    /// New amount as a decimal string (non-negative).
    pub amount: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New category name.
    pub category: Option<String>,
    /// New division name.
    pub division: Option<String>,
    /// New linked account.
    pub account_id: Option<Uuid>,
    /// New transaction date.
    pub date_time: Option<DateTime<FixedOffset>>,
}

/// Response for a single transaction.
#[derive(Debug, Serialize)]
pub struct TransactionResponse {
    /// Transaction ID.
    pub id: Uuid,
    /// Transaction kind.
    pub kind: String,
    /// Amount as a decimal string.
    pub amount: String,
    /// Description.
    pub description: String,
    /// Category name, if any.
    pub category: Option<String>,
    /// Division name, if any.
    pub division: Option<String>,
    /// Linked account ID, if the account still exists.
    pub account_id: Option<Uuid>,
    /// Account name as cached at write time.
    pub account_name: Option<String>,
    /// Transfer source account ID.
    pub from_account_id: Option<Uuid>,
    /// Transfer source account name as cached at write time.
    pub from_account_name: Option<String>,
    /// Transfer destination account ID.
    pub to_account_id: Option<Uuid>,
    /// Transfer destination account name as cached at write time.
    pub to_account_name: Option<String>,
    /// When the transaction happened.
    pub date_time: String,
    /// When the record was created.
    pub created_at: String,
}

impl From<transactions::Model> for TransactionResponse {
    fn from(t: transactions::Model) -> Self {
        Self {
            id: t.id,
            kind: transaction_kind_to_string(&t.kind),
            amount: t.amount.to_string(),
            description: t.description,
            category: t.category,
            division: t.division,
            account_id: t.account_id,
            account_name: t.account_name,
            from_account_id: t.from_account_id,
            from_account_name: t.from_account_name,
            to_account_id: t.to_account_id,
            to_account_name: t.to_account_name,
            date_time: t.date_time.to_rfc3339(),
            created_at: t.created_at.to_rfc3339(),
        }
    }
}

/// Response for a created transaction.
#[derive(Debug, Serialize)]
pub struct CreateTransactionResponse {
    /// The stored transaction.
    pub transaction: TransactionResponse,
    /// Whether an account balance was adjusted. False when the named
    /// account no longer exists; the record is still kept.
    pub balance_applied: bool,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /transactions - List transactions, newest first.
async fn list_transactions(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListTransactionsQuery>,
) -> impl IntoResponse {
    let kind = match query.kind.as_deref() {
        Some(raw) => match string_to_transaction_kind(raw) {
            Some(k) => Some(k),
            None => return invalid_transaction_kind(),
        },
        None => None,
    };

    let filter = TransactionFilter {
        kind,
        category: query.category,
        division: query.division,
        account_id: query.account_id,
        start_date: query.start_date,
        end_date: query.end_date,
    };

    let repo = TransactionRepository::new((*state.db).clone());
    match repo.list(auth.user_id(), filter).await {
        Ok(transactions) => {
            let items: Vec<TransactionResponse> = transactions
                .into_iter()
                .map(TransactionResponse::from)
                .collect();
            (StatusCode::OK, Json(json!({ "transactions": items }))).into_response()
        }
        Err(e) => transaction_error_response(e, "Failed to list transactions"),
    }
}

/// POST /transactions - Record an income or expense.
async fn create_transaction(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateTransactionRequest>,
) -> impl IntoResponse {
    let Some(kind) = string_to_transaction_kind(&payload.kind) else {
        return invalid_transaction_kind();
    };
    if kind == TransactionKind::Transfer {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "invalid_transaction_kind",
                "message": "Transfers are created through POST /api/v1/accounts/transfer"
            })),
        )
            .into_response();
    }

    let amount = match parse_amount(&payload.amount) {
        Ok(a) => a,
        Err(response) => return response,
    };

    if payload.category.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "invalid_category",
                "message": "Category is required"
            })),
        )
            .into_response();
    }

    let input = CreateTransactionInput {
        kind,
        amount,
        description: payload.description.unwrap_or_default(),
        category: payload.category,
        division: payload
            .division
            .unwrap_or_else(|| DEFAULT_DIVISION.to_string()),
        account_id: payload.account_id,
        date_time: payload.date_time,
    };

    let repo = TransactionRepository::new((*state.db).clone());
    match repo.create(auth.user_id(), input).await {
        Ok(created) => {
            info!(
                user_id = %auth.user_id(),
                transaction_id = %created.transaction.id,
                balance_applied = created.balance_applied,
                "Transaction created"
            );
            (
                StatusCode::CREATED,
                Json(CreateTransactionResponse {
                    transaction: TransactionResponse::from(created.transaction),
                    balance_applied: created.balance_applied,
                }),
            )
                .into_response()
        }
        Err(e) => transaction_error_response(e, "Failed to create transaction"),
    }
}

/// PUT /transactions/{transaction_id} - Edit a transaction within the
/// edit window, reconciling any affected balances.
async fn update_transaction(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(transaction_id): Path<Uuid>,
    Json(payload): Json<serde_json::Value>,
) -> impl IntoResponse {
    // Deserialize by hand so unknown fields come back as a JSON 400
    // instead of axum's plain-text rejection.
    let request: UpdateTransactionRequest = match serde_json::from_value(payload) {
        Ok(r) => r,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "invalid_payload",
                    "message": format!("Invalid request body: {e}")
                })),
            )
                .into_response();
        }
    };

    let kind = match request.kind.as_deref() {
        Some(raw) => match string_to_transaction_kind(raw) {
            Some(k) => Some(k),
            None => return invalid_transaction_kind(),
        },
        None => None,
    };

    let amount = match request.amount.as_deref() {
        Some(raw) => match parse_amount(raw) {
            Ok(a) => Some(a),
            Err(response) => return response,
        },
        None => None,
    };

    let input = UpdateTransactionInput {
        kind,
        amount,
        description: request.description,
        category: request.category,
        division: request.division,
        account_id: request.account_id,
        date_time: request.date_time,
    };

    let repo = TransactionRepository::new((*state.db).clone());
    match repo.update(auth.user_id(), transaction_id, input).await {
        Ok(transaction) => {
            info!(
                user_id = %auth.user_id(),
                transaction_id = %transaction.id,
                "Transaction updated"
            );
            (StatusCode::OK, Json(TransactionResponse::from(transaction))).into_response()
        }
        Err(e) => transaction_error_response(e, "Failed to update transaction"),
    }
}

/// DELETE /transactions/{transaction_id} - Delete a transaction and
/// reverse its balance effect. Deletion is allowed at any age.
async fn delete_transaction(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(transaction_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = TransactionRepository::new((*state.db).clone());

    match repo.delete(auth.user_id(), transaction_id).await {
        Ok(()) => {
            info!(
                user_id = %auth.user_id(),
                transaction_id = %transaction_id,
                "Transaction deleted"
            );
            (
                StatusCode::OK,
                Json(json!({ "message": "Transaction deleted" })),
            )
                .into_response()
        }
        Err(e) => transaction_error_response(e, "Failed to delete transaction"),
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn transaction_error_response(e: TransactionError, context: &str) -> axum::response::Response {
    match e {
        TransactionError::NotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "transaction_not_found",
                "message": format!("Transaction not found: {id}")
            })),
        )
            .into_response(),
        TransactionError::EditWindowExpired => (
            StatusCode::FORBIDDEN,
            Json(json!({
                "error": "edit_window_expired",
                "message": e.to_string()
            })),
        )
            .into_response(),
        TransactionError::TransferImmutable => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "transfer_immutable",
                "message": "Only the description and date of a transfer can be edited"
            })),
        )
            .into_response(),
        TransactionError::InvalidKindChange => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "invalid_kind_change",
                "message": "A transaction cannot be changed into a transfer"
            })),
        )
            .into_response(),
        TransactionError::Database(e) => {
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

fn parse_amount(raw: &str) -> Result<Decimal, axum::response::Response> {
    let amount = Decimal::from_str(raw).map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "invalid_amount",
                "message": "Invalid amount format"
            })),
        )
            .into_response()
    })?;

    if amount < Decimal::ZERO {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "invalid_amount",
                "message": "Amount cannot be negative"
            })),
        )
            .into_response());
    }

    Ok(amount)
}

fn invalid_transaction_kind() -> axum::response::Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({
            "error": "invalid_transaction_kind",
            "message": "Transaction kind must be one of: income, expense, transfer"
        })),
    )
        .into_response()
}

fn transaction_kind_to_string(kind: &TransactionKind) -> String {
    match kind {
        TransactionKind::Income => "income".to_string(),
        TransactionKind::Expense => "expense".to_string(),
        TransactionKind::Transfer => "transfer".to_string(),
    }
}

fn string_to_transaction_kind(s: &str) -> Option<TransactionKind> {
    match s.to_lowercase().as_str() {
        "income" => Some(TransactionKind::Income),
        "expense" => Some(TransactionKind::Expense),
        "transfer" => Some(TransactionKind::Transfer),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("income", Some(TransactionKind::Income))]
    #[case("EXPENSE", Some(TransactionKind::Expense))]
    #[case("Transfer", Some(TransactionKind::Transfer))]
    #[case("withdrawal", None)]
    #[case("", None)]
    fn test_string_to_transaction_kind(
        #[case] input: &str,
        #[case] expected: Option<TransactionKind>,
    ) {
        assert_eq!(string_to_transaction_kind(input), expected);
    }

    #[test]
    fn test_update_request_rejects_unknown_fields() {
        let payload = serde_json::json!({ "ammount": "50.00" });
        let result: Result<UpdateTransactionRequest, _> = serde_json::from_value(payload);
        assert!(result.is_err());
    }

    #[test]
    fn test_update_request_accepts_partial_payload() {
        let payload = serde_json::json!({ "description": "Lunch" });
        let request: UpdateTransactionRequest =
            serde_json::from_value(payload).expect("Valid payload");
        assert_eq!(request.description.as_deref(), Some("Lunch"));
        assert!(request.amount.is_none());
    }
}
