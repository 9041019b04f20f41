use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

use crate::records::DEFAULT_DURATION_MINUTES;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),
}

/// Shop-level settings consumed by the reports engine and the CLI. The
/// operational-cost exclusion list is the single place deciding which cost
/// categories count toward daily-cost amortization.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShopConfig {
    /// Operating days, lowercase English weekday names. These divide period
    /// totals into daily averages.
    pub business_days: Vec<String>,
    /// Bookings starting before this hour get flagged in the log when the
    /// agenda prints.
    pub opening_hour: u32,
    /// Fallback duration for bookings whose service resolves no duration.
    pub default_duration_minutes: u32,
    /// Cost categories excluded from operating-cost amortization (owner
    /// draws, one-off items). Matched case-insensitively as substrings.
    pub excluded_cost_categories: Vec<String>,
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            business_days: ["tuesday", "wednesday", "thursday", "friday", "saturday"]
                .map(String::from)
                .to_vec(),
            opening_hour: 8,
            default_duration_minutes: DEFAULT_DURATION_MINUTES,
            excluded_cost_categories: vec!["partner".to_string(), "extraordinary".to_string()],
        }
    }
}

impl ShopConfig {
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }

    pub fn load_or_create() -> Result<Self, ConfigError> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Self::from_toml(&content)
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("groomsched")
            .join("config.toml")
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn is_business_day(&self, weekday: Weekday) -> bool {
        let name = weekday_name(weekday);
        self.business_days.iter().any(|d| d.eq_ignore_ascii_case(name))
    }

    /// The centralized operational-cost predicate: a category counts toward
    /// daily-cost amortization unless it contains an excluded token.
    pub fn is_operational_cost(&self, category: &str) -> bool {
        let cat = category.to_lowercase();
        !self
            .excluded_cost_categories
            .iter()
            .any(|excluded| cat.contains(&excluded.to_lowercase()))
    }
}

fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
        Weekday::Sun => "sunday",
    }
}
