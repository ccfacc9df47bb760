//! Read-only summary queries.
//!
//! Each method loads the relevant scoped slice of the ledger and hands
//! the rows to the pure aggregation functions in `moneta_core::summary`.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc};
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter};
use uuid::Uuid;

use moneta_core::summary::{
    CategoryTotal, ChartBucket, ChartRange, Period, PeriodTotals, bucket_series,
    category_breakdown, period_totals,
};

use super::reconcile::ledger_kind;
use crate::entities::{sea_orm_active_enums::TransactionKind, transactions};

/// Summary repository.
#[derive(Debug, Clone)]
pub struct SummaryRepository {
    db: DatabaseConnection,
}

impl SummaryRepository {
    /// Creates a new summary repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Per-category expense totals with percentage shares, largest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn category_summary(&self, user_id: Uuid) -> Result<Vec<CategoryTotal>, DbErr> {
        let rows = transactions::Entity::find()
            .filter(transactions::Column::UserId.eq(user_id))
            .filter(transactions::Column::Kind.eq(TransactionKind::Expense))
            .all(&self.db)
            .await?;

        Ok(category_breakdown(
            rows.into_iter()
                .filter_map(|t| t.category.map(|category| (category, t.amount))),
        ))
    }

    /// Income/expense/balance totals over a rolling window ending now.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn dashboard(&self, user_id: Uuid, period: Period) -> Result<PeriodTotals, DbErr> {
        let start = period.window_start(Utc::now());

        let rows = transactions::Entity::find()
            .filter(transactions::Column::UserId.eq(user_id))
            .filter(transactions::Column::DateTime.gte(start))
            .all(&self.db)
            .await?;

        Ok(period_totals(
            rows.into_iter().map(|t| (ledger_kind(&t.kind), t.amount)),
        ))
    }

    /// Bucketed income/expense series over the calendar unit containing
    /// now.
    ///
    /// The query fetches from the start of the anchor unit; the bucketing
    /// itself drops anything that still falls outside it.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn chart_series(
        &self,
        user_id: Uuid,
        range: ChartRange,
    ) -> Result<Vec<ChartBucket>, DbErr> {
        let now = Utc::now();
        let start = range_start(range, now);

        let rows = transactions::Entity::find()
            .filter(transactions::Column::UserId.eq(user_id))
            .filter(transactions::Column::DateTime.gte(start))
            .all(&self.db)
            .await?;

        Ok(bucket_series(
            range,
            now,
            rows.into_iter()
                .map(|t| (ledger_kind(&t.kind), t.amount, t.date_time.to_utc())),
        ))
    }
}

/// Midnight UTC at the start of the calendar unit containing `now`.
fn range_start(range: ChartRange, now: DateTime<Utc>) -> DateTime<Utc> {
    let today = now.date_naive();
    let start = match range {
        ChartRange::Week => {
            today - Duration::days(i64::from(now.weekday().num_days_from_sunday()))
        }
        ChartRange::Month => NaiveDate::from_ymd_opt(now.year(), now.month(), 1).unwrap_or(today),
        ChartRange::Year => NaiveDate::from_ymd_opt(now.year(), 1, 1).unwrap_or(today),
    };
    start.and_time(NaiveTime::MIN).and_utc()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(rfc3339: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(rfc3339)
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_range_start_week_is_sunday() {
        // 2026-08-25 is a Tuesday.
        let start = range_start(ChartRange::Week, at("2026-08-25T15:30:00Z"));
        assert_eq!(start, at("2026-08-23T00:00:00Z"));
    }

    #[test]
    fn test_range_start_month_is_first() {
        let start = range_start(ChartRange::Month, at("2026-08-25T15:30:00Z"));
        assert_eq!(start, at("2026-08-01T00:00:00Z"));
    }

    #[test]
    fn test_range_start_year_is_january_first() {
        let start = range_start(ChartRange::Year, at("2026-08-25T15:30:00Z"));
        assert_eq!(start, at("2026-01-01T00:00:00Z"));
    }
}
