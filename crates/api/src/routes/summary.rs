//! Summary routes: category breakdown, dashboard totals, chart series.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use sea_orm::DbErr;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;

use crate::{AppState, middleware::AuthUser};
use moneta_core::summary::{CategoryTotal, ChartBucket, ChartRange, Period};
use moneta_db::repositories::SummaryRepository;

/// Creates the summary routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/summary/categories", get(category_summary))
        .route("/summary/dashboard", get(dashboard))
        .route("/summary/chart", get(chart))
}

/// Query parameters for the dashboard endpoint.
#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    /// Rolling window: week, month, or year. Defaults to month.
    pub period: Option<String>,
}

/// Query parameters for the chart endpoint.
#[derive(Debug, Deserialize)]
pub struct ChartQuery {
    /// Bucketing granularity: week, month, or year. Defaults to month.
    pub range: Option<String>,
}

/// One row of the category breakdown.
#[derive(Debug, Serialize)]
pub struct CategorySummaryResponse {
    /// Category name.
    pub category: String,
    /// Total spent as a decimal string.
    pub amount: String,
    /// Share of total expenses, in percent.
    pub percentage: String,
}

impl From<CategoryTotal> for CategorySummaryResponse {
    fn from(total: CategoryTotal) -> Self {
        Self {
            category: total.category,
            amount: total.amount.to_string(),
            percentage: total.percentage.to_string(),
        }
    }
}

/// One bucket of a chart series.
#[derive(Debug, Serialize)]
pub struct ChartBucketResponse {
    /// Bucket label ("Tue", "Week 2", "Aug", ...).
    pub label: String,
    /// Income total as a decimal string.
    pub income: String,
    /// Expense total as a decimal string.
    pub expense: String,
}

impl From<ChartBucket> for ChartBucketResponse {
    fn from(bucket: ChartBucket) -> Self {
        Self {
            label: bucket.label,
            income: bucket.income.to_string(),
            expense: bucket.expense.to_string(),
        }
    }
}

/// GET /summary/categories - Expense totals per category with
/// percentage shares, largest first.
async fn category_summary(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    let repo = SummaryRepository::new((*state.db).clone());

    match repo.category_summary(auth.user_id()).await {
        Ok(totals) => {
            let items: Vec<CategorySummaryResponse> = totals
                .into_iter()
                .map(CategorySummaryResponse::from)
                .collect();
            (StatusCode::OK, Json(json!({ "categories": items }))).into_response()
        }
        Err(e) => db_error_response(&e, "Failed to compute category summary"),
    }
}

/// GET /summary/dashboard - Income/expense/balance totals over a
/// rolling window ending now.
async fn dashboard(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<DashboardQuery>,
) -> impl IntoResponse {
    let period = parse_period(query.period.as_deref());
    let repo = SummaryRepository::new((*state.db).clone());

    match repo.dashboard(auth.user_id(), period).await {
        Ok(totals) => (
            StatusCode::OK,
            Json(json!({
                "income": totals.income.to_string(),
                "expense": totals.expense.to_string(),
                "balance": totals.balance.to_string(),
            })),
        )
            .into_response(),
        Err(e) => db_error_response(&e, "Failed to compute dashboard totals"),
    }
}

/// GET /summary/chart - Bucketed income/expense series over the
/// calendar unit containing now.
async fn chart(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ChartQuery>,
) -> impl IntoResponse {
    let range = parse_range(query.range.as_deref());
    let repo = SummaryRepository::new((*state.db).clone());

    match repo.chart_series(auth.user_id(), range).await {
        Ok(buckets) => {
            let items: Vec<ChartBucketResponse> =
                buckets.into_iter().map(ChartBucketResponse::from).collect();
            (StatusCode::OK, Json(json!({ "buckets": items }))).into_response()
        }
        Err(e) => db_error_response(&e, "Failed to compute chart series"),
    }
}

fn db_error_response(e: &DbErr, context: &str) -> axum::response::Response {
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

/// Unrecognized period strings fall back to month rather than erroring,
/// so stale frontend params degrade gracefully.
fn parse_period(s: Option<&str>) -> Period {
    match s.map(str::to_lowercase).as_deref() {
        Some("week") => Period::Week,
        Some("year") => Period::Year,
        _ => Period::Month,
    }
}

fn parse_range(s: Option<&str>) -> ChartRange {
    match s.map(str::to_lowercase).as_deref() {
        Some("week") => ChartRange::Week,
        Some("year") => ChartRange::Year,
        _ => ChartRange::Month,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Some("week"), Period::Week)]
    #[case(Some("month"), Period::Month)]
    #[case(Some("YEAR"), Period::Year)]
    #[case(Some("fortnight"), Period::Month)]
    #[case(None, Period::Month)]
    fn test_parse_period(#[case] input: Option<&str>, #[case] expected: Period) {
        assert_eq!(parse_period(input), expected);
    }

    #[rstest]
    #[case(Some("week"), ChartRange::Week)]
    #[case(Some("year"), ChartRange::Year)]
    #[case(Some("quarter"), ChartRange::Month)]
    #[case(None, ChartRange::Month)]
    fn test_parse_range(#[case] input: Option<&str>, #[case] expected: ChartRange) {
        assert_eq!(parse_range(input), expected);
    }
}
