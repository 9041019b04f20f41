use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::service::Service;
use crate::schedule::interval::TimeInterval;

/// Fallback duration used when no configured value is in play, and the
/// shipped `ShopConfig` default.
pub const DEFAULT_DURATION_MINUTES: u32 = 60;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: String,
    pub client_id: String,
    pub pet_id: String,
    pub service_id: String,
    #[serde(default)]
    pub additional_service_ids: Vec<String>,
    pub start: NaiveDateTime,
    /// Manual override. When unset, the primary service's nominal duration
    /// applies, falling back to the configured default.
    #[serde(default)]
    pub duration_minutes: Option<u32>,
    pub status: BookingStatus,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub paid_amount: Option<f64>,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub rating: Option<u8>,
    #[serde(default)]
    pub rating_tags: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Scheduled,
    Completed,
    Canceled,
    NoShow,
}

impl Booking {
    /// Manual override wins, then the primary service's nominal duration,
    /// then `default_minutes` (the shop's configured default).
    pub fn resolved_duration(&self, primary: Option<&Service>, default_minutes: u32) -> u32 {
        self.duration_minutes
            .filter(|&m| m > 0)
            .or_else(|| primary.map(|s| s.duration_minutes).filter(|&m| m > 0))
            .unwrap_or(default_minutes)
    }

    /// The half-open time range `[start, start + duration)` this booking
    /// reserves.
    pub fn occupied_interval(&self, primary: Option<&Service>, default_minutes: u32) -> TimeInterval {
        TimeInterval::starting_at(self.start, self.resolved_duration(primary, default_minutes))
    }

    /// All service ids on the booking, primary first, duplicates removed.
    pub fn service_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = vec![self.service_id.as_str()];
        for id in &self.additional_service_ids {
            if !ids.contains(&id.as_str()) {
                ids.push(id);
            }
        }
        ids
    }

    pub fn is_canceled(&self) -> bool {
        self.status == BookingStatus::Canceled
    }
}
