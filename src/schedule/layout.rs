use thiserror::Error;

use super::interval::TimeInterval;
use crate::records::{Booking, ServiceDirectory};

#[derive(Debug, Error, PartialEq)]
pub enum LayoutError {
    #[error("booking {booking_id} has an empty occupied interval")]
    InvalidInterval { booking_id: String },
}

/// Column geometry for one booking within its overlap cluster.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutItem {
    pub booking_id: String,
    pub interval: TimeInterval,
    pub cluster_index: usize,
    pub column_index: usize,
    pub column_count: usize,
}

impl LayoutItem {
    /// Horizontal share of the day column, in `0.0..=1.0`.
    pub fn width_fraction(&self) -> f64 {
        1.0 / self.column_count as f64
    }

    /// Left offset as a fraction of the day column. Single-member clusters
    /// render at full width with no offset.
    pub fn left_fraction(&self) -> f64 {
        self.column_index as f64 * self.width_fraction()
    }
}

/// Assigns collision-free column geometry to one rendering scope's bookings
/// (a single day, or one day within a week). The caller has already dropped
/// canceled bookings; this function does not filter by status.
///
/// Bookings are sorted by start, longer duration first on ties, then swept
/// once: a booking joins the current cluster while its start lies before the
/// cluster's rolling maximum end. Clusters are therefore connected overlap
/// components, so two bookings that do not touch each other still share a
/// cluster when a third spans both.
pub fn layout(
    bookings: &[Booking],
    services: &ServiceDirectory,
) -> Result<Vec<LayoutItem>, LayoutError> {
    let mut nodes: Vec<(&Booking, TimeInterval)> = Vec::with_capacity(bookings.len());
    for booking in bookings {
        let interval = booking.occupied_interval(
            services.get(&booking.service_id),
            services.default_duration_minutes(),
        );
        if !interval.is_valid() {
            return Err(LayoutError::InvalidInterval {
                booking_id: booking.id.clone(),
            });
        }
        nodes.push((booking, interval));
    }

    nodes.sort_by(|(_, a), (_, b)| {
        a.start
            .cmp(&b.start)
            .then(b.duration_minutes().cmp(&a.duration_minutes()))
    });

    let mut items = Vec::with_capacity(nodes.len());
    let mut cluster: Vec<(&Booking, TimeInterval)> = Vec::new();
    let mut cluster_index = 0;
    let mut cluster_end = None;

    for (booking, interval) in nodes {
        match cluster_end {
            Some(end) if interval.start < end => {
                cluster.push((booking, interval));
                cluster_end = Some(end.max(interval.end));
            }
            _ => {
                flush_cluster(&mut items, &cluster, cluster_index);
                if !cluster.is_empty() {
                    cluster_index += 1;
                }
                cluster = vec![(booking, interval)];
                cluster_end = Some(interval.end);
            }
        }
    }
    flush_cluster(&mut items, &cluster, cluster_index);

    Ok(items)
}

fn flush_cluster(
    items: &mut Vec<LayoutItem>,
    cluster: &[(&Booking, TimeInterval)],
    cluster_index: usize,
) {
    let column_count = cluster.len();
    for (column_index, (booking, interval)) in cluster.iter().enumerate() {
        items.push(LayoutItem {
            booking_id: booking.id.clone(),
            interval: *interval,
            cluster_index,
            column_index,
            column_count,
        });
    }
}
