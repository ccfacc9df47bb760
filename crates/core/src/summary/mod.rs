//! Read-side aggregation math.
//!
//! Pure derivations over ledger rows, used by the summary endpoints:
//! - Per-category expense breakdown with percentages
//! - Rolling-period income/expense totals for the dashboard
//! - Calendar bucketing for chart series

pub mod category;
pub mod chart;
pub mod period;

pub use category::{CategoryTotal, category_breakdown};
pub use chart::{ChartBucket, ChartRange, bucket_index, bucket_labels, bucket_series};
pub use period::{Period, PeriodTotals, period_totals};
