use chrono::Datelike;

use crate::records::{Booking, ServiceDirectory};
use crate::storage::config::ShopConfig;

use super::metrics::{growth, resolved_charge};
use super::period::{iso_week_of, iso_weeks_in_month, Granularity, Period};

/// One bar of the chart the reporting view renders alongside the aggregate
/// metrics: daily points within a week, ISO-weekly points within a month,
/// monthly points within a year.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesPoint {
    pub label: String,
    pub revenue: f64,
    pub pets: usize,
    /// Growth versus the preceding point of the same series, in percent.
    pub growth: f64,
}

pub(super) fn series_for_period(
    period: &Period,
    bookings: &[Booking],
    services: &ServiceDirectory,
    config: &ShopConfig,
) -> Vec<SeriesPoint> {
    match period.granularity {
        Granularity::Day => Vec::new(),
        Granularity::Week => week_series(period, bookings, services, config),
        Granularity::Month => month_series(period, bookings, services),
        Granularity::Year => year_series(period, bookings, services),
    }
}

fn week_series(
    period: &Period,
    bookings: &[Booking],
    services: &ServiceDirectory,
    config: &ShopConfig,
) -> Vec<SeriesPoint> {
    let mut points = Vec::new();
    for day in period.days() {
        if !config.is_business_day(day.weekday()) {
            continue;
        }
        let day_bookings: Vec<&Booking> = bookings
            .iter()
            .filter(|b| !b.is_canceled() && b.start.date() == day)
            .collect();
        let revenue: f64 = day_bookings
            .iter()
            .map(|b| resolved_charge(b, services))
            .sum();
        push_point(
            &mut points,
            day.format("%a %d/%m").to_string(),
            revenue,
            day_bookings.len(),
        );
    }
    points
}

fn month_series(
    period: &Period,
    bookings: &[Booking],
    services: &ServiceDirectory,
) -> Vec<SeriesPoint> {
    let weeks = iso_weeks_in_month(period.start.year(), period.start.month());
    let mut points = Vec::new();
    for (index, week) in weeks.iter().enumerate() {
        let week_bookings: Vec<&Booking> = bookings
            .iter()
            .filter(|b| !b.is_canceled() && iso_week_of(b.start.date()) == *week)
            .collect();
        let revenue: f64 = week_bookings
            .iter()
            .map(|b| resolved_charge(b, services))
            .sum();
        push_point(
            &mut points,
            format!("W{}", index + 1),
            revenue,
            week_bookings.len(),
        );
    }
    points
}

fn year_series(
    period: &Period,
    bookings: &[Booking],
    services: &ServiceDirectory,
) -> Vec<SeriesPoint> {
    let year = period.start.year();
    let mut points = Vec::new();
    for month in 1..=12u32 {
        let month_bookings: Vec<&Booking> = bookings
            .iter()
            .filter(|b| {
                !b.is_canceled()
                    && b.start.date().year() == year
                    && b.start.date().month() == month
            })
            .collect();
        let revenue: f64 = month_bookings
            .iter()
            .map(|b| resolved_charge(b, services))
            .sum();
        let label = chrono::NaiveDate::from_ymd_opt(year, month, 1)
            .map(|d| d.format("%b").to_string())
            .unwrap_or_default();
        push_point(&mut points, label, revenue, month_bookings.len());
    }
    points
}

fn push_point(points: &mut Vec<SeriesPoint>, label: String, revenue: f64, pets: usize) {
    let previous = points.last().map(|p| p.revenue).unwrap_or(0.0);
    let growth_pct = if points.is_empty() {
        0.0
    } else {
        growth(revenue, previous)
    };
    points.push(SeriesPoint {
        label,
        revenue,
        pets,
        growth: growth_pct,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{Booking, BookingStatus};
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(y: i32, m: u32, d: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn paid_booking(id: &str, start: NaiveDateTime, amount: f64) -> Booking {
        Booking {
            id: id.to_string(),
            client_id: "c1".to_string(),
            pet_id: "p1".to_string(),
            service_id: "svc1".to_string(),
            additional_service_ids: vec![],
            start,
            duration_minutes: None,
            status: BookingStatus::Completed,
            notes: None,
            paid_amount: Some(amount),
            payment_method: Some("cash".to_string()),
            rating: None,
            rating_tags: vec![],
        }
    }

    fn series(reference: NaiveDate, granularity: Granularity, bookings: &[Booking]) -> Vec<SeriesPoint> {
        let period = Period::containing(reference, granularity);
        series_for_period(
            &period,
            bookings,
            &ServiceDirectory::default(),
            &ShopConfig::default(),
        )
    }

    #[test]
    fn day_granularity_has_no_series() {
        assert!(series(
            NaiveDate::from_ymd_opt(2025, 3, 11).unwrap(),
            Granularity::Day,
            &[]
        )
        .is_empty());
    }

    #[test]
    fn week_series_covers_only_operating_days() {
        let points = series(
            NaiveDate::from_ymd_opt(2025, 3, 11).unwrap(),
            Granularity::Week,
            &[],
        );
        assert_eq!(points.len(), 5);
        assert_eq!(points[0].label, "Tue 11/03");
        assert_eq!(points[4].label, "Sat 15/03");
    }

    #[test]
    fn week_series_buckets_revenue_per_day() {
        let bookings = vec![
            paid_booking("b1", at(2025, 3, 11, 9), 100.0),
            paid_booking("b2", at(2025, 3, 11, 14), 50.0),
            paid_booking("b3", at(2025, 3, 12, 9), 300.0),
        ];
        let points = series(
            NaiveDate::from_ymd_opt(2025, 3, 11).unwrap(),
            Granularity::Week,
            &bookings,
        );
        assert_eq!(points[0].revenue, 150.0);
        assert_eq!(points[0].pets, 2);
        assert_eq!(points[1].revenue, 300.0);
        assert_eq!(points[1].growth, 100.0);
    }

    #[test]
    fn canceled_bookings_never_chart() {
        let mut canceled = paid_booking("b1", at(2025, 3, 11, 9), 100.0);
        canceled.status = BookingStatus::Canceled;
        let points = series(
            NaiveDate::from_ymd_opt(2025, 3, 11).unwrap(),
            Granularity::Week,
            &[canceled],
        );
        assert_eq!(points[0].revenue, 0.0);
        assert_eq!(points[0].pets, 0);
    }

    #[test]
    fn month_series_has_one_point_per_iso_week() {
        let points = series(
            NaiveDate::from_ymd_opt(2025, 3, 15).unwrap(),
            Granularity::Month,
            &[],
        );
        // March 2025 touches ISO weeks 9 through 14.
        assert_eq!(points.len(), 6);
        assert_eq!(points[0].label, "W1");
        assert_eq!(points[5].label, "W6");
    }

    #[test]
    fn month_series_buckets_by_iso_week_not_sunday_week() {
        // Sunday 2025-03-09 belongs to ISO week 10 together with Saturday
        // 2025-03-08, not with the following Monday.
        let bookings = vec![
            paid_booking("b1", at(2025, 3, 8, 9), 40.0),
            paid_booking("b2", at(2025, 3, 9, 9), 60.0),
        ];
        let points = series(
            NaiveDate::from_ymd_opt(2025, 3, 15).unwrap(),
            Granularity::Month,
            &bookings,
        );
        let week10 = &points[1];
        assert_eq!(week10.revenue, 100.0);
        assert_eq!(week10.pets, 2);
    }

    #[test]
    fn year_series_has_twelve_months() {
        let bookings = vec![
            paid_booking("b1", at(2025, 1, 10, 9), 100.0),
            paid_booking("b2", at(2025, 2, 10, 9), 150.0),
        ];
        let points = series(
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            Granularity::Year,
            &bookings,
        );
        assert_eq!(points.len(), 12);
        assert_eq!(points[0].label, "Jan");
        assert_eq!(points[0].revenue, 100.0);
        assert_eq!(points[1].revenue, 150.0);
        assert_eq!(points[1].growth, 50.0);
        assert_eq!(points[11].revenue, 0.0);
    }
}
