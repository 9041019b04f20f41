use chrono::Duration;
use uuid::Uuid;

use crate::records::{Booking, BookingStatus, Cadence};

/// Day offsets of the follow-up visits a package generates, relative to the
/// first visit. A monthly package is sold as four weekly visits; a biweekly
/// package as two visits a fortnight apart.
fn follow_up_offsets(cadence: Cadence) -> &'static [i64] {
    match cadence {
        Cadence::None => &[],
        Cadence::Biweekly => &[14],
        Cadence::Monthly => &[7, 14, 21],
    }
}

/// Expands one user-submitted booking into the full series to persist.
///
/// Only newly created bookings expand; editing an existing booking always
/// yields the candidate unchanged, whatever its service. Generated
/// occurrences keep the client, pet, service selection and time of day, get
/// a fresh id, start out `Scheduled`, and carry no payment or rating data —
/// payment is recorded per visit, later. The function is single-pet: a
/// multi-pet entry form calls it once per selected pet.
pub fn expand(candidate: Booking, cadence: Cadence, editing: bool) -> Vec<Booking> {
    if editing {
        return vec![candidate];
    }

    let offsets = follow_up_offsets(cadence);
    let mut series = Vec::with_capacity(1 + offsets.len());
    for &days in offsets {
        let mut occurrence = candidate.clone();
        occurrence.id = Uuid::new_v4().to_string();
        occurrence.start = candidate.start + Duration::days(days);
        occurrence.status = BookingStatus::Scheduled;
        occurrence.paid_amount = None;
        occurrence.payment_method = None;
        occurrence.rating = None;
        occurrence.rating_tags = Vec::new();
        series.push(occurrence);
    }

    if !series.is_empty() {
        tracing::info!(
            booking_id = %candidate.id,
            occurrences = series.len() + 1,
            "expanded package booking into series"
        );
    }

    let mut result = vec![candidate];
    result.append(&mut series);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};
    use std::collections::HashSet;

    fn start(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn candidate() -> Booking {
        Booking {
            id: "orig".to_string(),
            client_id: "c1".to_string(),
            pet_id: "p1".to_string(),
            service_id: "svc_pkg".to_string(),
            additional_service_ids: vec!["svc_nails".to_string()],
            start: start(2025, 1, 30),
            duration_minutes: Some(60),
            status: BookingStatus::Scheduled,
            notes: Some("gentle dryer".to_string()),
            paid_amount: Some(120.0),
            payment_method: Some("pix".to_string()),
            rating: None,
            rating_tags: vec![],
        }
    }

    #[test]
    fn monthly_package_spawns_three_weekly_follow_ups() {
        let series = expand(candidate(), Cadence::Monthly, false);
        let dates: Vec<NaiveDate> = series.iter().map(|b| b.start.date()).collect();
        assert_eq!(
            dates,
            vec![
                NaiveDate::from_ymd_opt(2025, 1, 30).unwrap(),
                NaiveDate::from_ymd_opt(2025, 2, 6).unwrap(),
                NaiveDate::from_ymd_opt(2025, 2, 13).unwrap(),
                NaiveDate::from_ymd_opt(2025, 2, 20).unwrap(),
            ]
        );
        assert!(series.iter().all(|b| b.start.time() == start(2025, 1, 30).time()));
    }

    #[test]
    fn biweekly_package_spawns_one_follow_up() {
        let series = expand(candidate(), Cadence::Biweekly, false);
        assert_eq!(series.len(), 2);
        assert_eq!(series[1].start, start(2025, 2, 13));
    }

    #[test]
    fn non_package_booking_passes_through() {
        let original = candidate();
        let series = expand(original.clone(), Cadence::None, false);
        assert_eq!(series, vec![original]);
    }

    #[test]
    fn editing_never_expands() {
        let original = candidate();
        let series = expand(original.clone(), Cadence::Monthly, true);
        assert_eq!(series, vec![original]);
    }

    #[test]
    fn follow_ups_get_fresh_ids_and_no_payment_data() {
        let series = expand(candidate(), Cadence::Monthly, false);
        let ids: HashSet<&str> = series.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids.len(), 4);

        for follow_up in &series[1..] {
            assert_ne!(follow_up.id, "orig");
            assert_eq!(follow_up.status, BookingStatus::Scheduled);
            assert_eq!(follow_up.paid_amount, None);
            assert_eq!(follow_up.payment_method, None);
            assert_eq!(follow_up.client_id, "c1");
            assert_eq!(follow_up.pet_id, "p1");
            assert_eq!(follow_up.service_id, "svc_pkg");
            assert_eq!(follow_up.additional_service_ids, vec!["svc_nails".to_string()]);
        }
    }

    #[test]
    fn month_end_start_rolls_over_correctly() {
        let mut booking = candidate();
        booking.start = start(2025, 2, 27);
        let series = expand(booking, Cadence::Biweekly, false);
        assert_eq!(series[1].start.date(), NaiveDate::from_ymd_opt(2025, 3, 13).unwrap());
    }
}
