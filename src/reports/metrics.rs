use crate::records::{Booking, BookingStatus, CostRecord, ServiceDirectory};
use crate::storage::config::ShopConfig;

use super::period::Period;

/// Aggregate figures for one period. Built over bookings whose status is not
/// canceled; no-shows count toward pet totals but resolve their charge to
/// zero.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Metrics {
    pub total_pets: usize,
    pub total_haircuts: usize,
    pub gross_revenue: f64,
    pub paid_revenue: f64,
    pub pending_revenue: f64,
    pub average_ticket: f64,
    pub daily_average_revenue: f64,
    pub daily_average_pets: f64,
    pub daily_cost: f64,
}

/// The amount a booking contributes to revenue: the recorded paid amount
/// when present and positive, else the list prices of its services. Canceled
/// and no-show visits contribute nothing. Service ids that no longer resolve
/// contribute zero rather than erroring; historical bookings outlive deleted
/// services.
pub fn resolved_charge(booking: &Booking, services: &ServiceDirectory) -> f64 {
    match booking.status {
        BookingStatus::Canceled | BookingStatus::NoShow => return 0.0,
        BookingStatus::Scheduled | BookingStatus::Completed => {}
    }

    if let Some(paid) = booking.paid_amount {
        if paid > 0.0 {
            return paid;
        }
    }

    booking
        .service_ids()
        .iter()
        .filter_map(|id| services.get(id))
        .map(|s| s.price)
        .sum()
}

/// A booking's charge counts as paid only when a payment method was recorded
/// AND either a positive amount was taken or the visit completed. A method
/// label alone is not enough.
pub fn is_paid(booking: &Booking) -> bool {
    let has_method = booking
        .payment_method
        .as_deref()
        .is_some_and(|m| !m.trim().is_empty());
    let amount_taken = booking.paid_amount.is_some_and(|a| a > 0.0);
    has_method && (amount_taken || booking.status == BookingStatus::Completed)
}

/// Whether the booking includes a haircut, on its primary or any addon.
pub fn includes_haircut(booking: &Booking, services: &ServiceDirectory) -> bool {
    booking
        .service_ids()
        .iter()
        .filter_map(|id| services.get(id))
        .any(|s| s.is_haircut)
}

/// Period-over-period growth in percent. A zero baseline reports 100 for any
/// activity and 0 for none, rather than dividing by zero.
pub fn growth(current: f64, previous: f64) -> f64 {
    if previous == 0.0 {
        if current > 0.0 { 100.0 } else { 0.0 }
    } else {
        (current - previous) / previous * 100.0
    }
}

/// Mean satisfaction rating over a pet's rated visits, across all time.
pub fn average_rating_for_pet(pet_id: &str, bookings: &[Booking]) -> Option<f64> {
    let ratings: Vec<f64> = bookings
        .iter()
        .filter(|b| b.pet_id == pet_id)
        .filter_map(|b| b.rating)
        .map(f64::from)
        .collect();
    if ratings.is_empty() {
        None
    } else {
        Some(ratings.iter().sum::<f64>() / ratings.len() as f64)
    }
}

pub(super) fn metrics_for_period(
    period: &Period,
    bookings: &[Booking],
    services: &ServiceDirectory,
    costs: &[CostRecord],
    config: &ShopConfig,
) -> Metrics {
    let mut metrics = Metrics::default();

    for booking in bookings {
        if booking.is_canceled() || !period.contains(booking.start.date()) {
            continue;
        }
        metrics.total_pets += 1;
        if includes_haircut(booking, services) {
            metrics.total_haircuts += 1;
        }
        let charge = resolved_charge(booking, services);
        if is_paid(booking) {
            metrics.paid_revenue += charge;
        } else {
            metrics.pending_revenue += charge;
        }
    }
    metrics.gross_revenue = metrics.paid_revenue + metrics.pending_revenue;
    metrics.average_ticket = if metrics.total_pets > 0 {
        metrics.gross_revenue / metrics.total_pets as f64
    } else {
        0.0
    };

    let business_days = period.business_day_count(config);
    if business_days > 0 {
        metrics.daily_average_revenue = metrics.gross_revenue / business_days as f64;
        metrics.daily_average_pets = metrics.total_pets as f64 / business_days as f64;
        metrics.daily_cost = operational_cost(period, costs, config) / business_days as f64;
    }

    metrics
}

fn operational_cost(period: &Period, costs: &[CostRecord], config: &ShopConfig) -> f64 {
    let mut total = 0.0;
    for cost in costs {
        let Some(date) = cost.parsed_date() else {
            tracing::warn!(category = %cost.category, raw = %cost.date, "skipping cost with unparseable date");
            continue;
        };
        if period.contains(date) && config.is_operational_cost(&cost.category) {
            total += cost.amount;
        }
    }
    total
}
