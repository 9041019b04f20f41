pub mod costs;
pub mod metrics;
pub mod period;
pub mod series;

pub use costs::{cost_breakdown, CostBreakdown};
pub use metrics::{average_rating_for_pet, growth, is_paid, resolved_charge, Metrics};
pub use period::{Granularity, Period};
pub use series::SeriesPoint;

use chrono::NaiveDate;

use crate::records::{Booking, CostRecord, ServiceDirectory};
use crate::storage::config::ShopConfig;

/// A full reporting result: the enclosing period's metrics, the immediately
/// preceding comparable period's metrics for growth badges, and the
/// chart-ready sub-period series.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub period: Period,
    pub period_label: String,
    pub current: Metrics,
    pub previous: Metrics,
    pub series: Vec<SeriesPoint>,
}

/// Buckets bookings and costs into the period enclosing `reference` at the
/// requested granularity and derives the dashboard metrics. Pure over its
/// inputs; nothing is cached between calls.
pub fn analyze(
    reference: NaiveDate,
    granularity: Granularity,
    bookings: &[Booking],
    services: &ServiceDirectory,
    costs: &[CostRecord],
    config: &ShopConfig,
) -> Report {
    let period = Period::containing(reference, granularity);
    let previous_period = period.previous();

    let current = metrics::metrics_for_period(&period, bookings, services, costs, config);
    let previous = metrics::metrics_for_period(&previous_period, bookings, services, costs, config);
    let series = series::series_for_period(&period, bookings, services, config);

    Report {
        period,
        period_label: period.label(),
        current,
        previous,
        series,
    }
}
