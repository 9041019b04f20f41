use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: String,
    pub name: String,
    pub category: ServiceCategory,
    /// Target pet size filter; `None` means the service applies to any size.
    #[serde(default)]
    pub target_size: Option<String>,
    /// Target coat length filter; `None` means any coat.
    #[serde(default)]
    pub target_coat: Option<String>,
    pub price: f64,
    pub duration_minutes: u32,
    #[serde(default)]
    pub cadence: Cadence,
    #[serde(default)]
    pub is_haircut: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceCategory {
    Primary,
    Addon,
}

/// Recurrence cadence of a package service. Stored explicitly on the record;
/// legacy name-substring detection only runs once, at snapshot migration
/// (see `migrate`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cadence {
    #[default]
    None,
    Biweekly,
    Monthly,
}

impl Service {
    /// Whether this service can be offered to a pet of the given size and
    /// coat. An unset filter matches anything, as does the literal "any".
    pub fn applies_to(&self, pet_size: Option<&str>, pet_coat: Option<&str>) -> bool {
        filter_matches(self.target_size.as_deref(), pet_size)
            && filter_matches(self.target_coat.as_deref(), pet_coat)
    }
}

fn filter_matches(filter: Option<&str>, value: Option<&str>) -> bool {
    match filter {
        None => true,
        Some(f) if f.eq_ignore_ascii_case("any") => true,
        Some(f) => match value {
            Some(v) => f.to_lowercase().contains(&v.to_lowercase()),
            None => false,
        },
    }
}

/// Id-indexed view over the service catalog. Lookups of ids that no longer
/// exist resolve to `None`; historical bookings may outlive their services.
/// Also carries the shop's configured fallback duration so interval
/// resolution sees one consistent value.
#[derive(Debug, Clone)]
pub struct ServiceDirectory {
    by_id: HashMap<String, Service>,
    default_duration_minutes: u32,
}

impl Default for ServiceDirectory {
    fn default() -> Self {
        Self {
            by_id: HashMap::new(),
            default_duration_minutes: super::booking::DEFAULT_DURATION_MINUTES,
        }
    }
}

impl ServiceDirectory {
    pub fn new(services: impl IntoIterator<Item = Service>) -> Self {
        Self {
            by_id: services.into_iter().map(|s| (s.id.clone(), s)).collect(),
            ..Self::default()
        }
    }

    /// Overrides the fallback duration with the shop's configured value.
    pub fn with_default_duration(mut self, minutes: u32) -> Self {
        self.default_duration_minutes = minutes;
        self
    }

    pub fn default_duration_minutes(&self) -> u32 {
        self.default_duration_minutes
    }

    pub fn get(&self, id: &str) -> Option<&Service> {
        self.by_id.get(id)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// List price of a primary service plus a set of addons, for quoting a
    /// draft booking. Unknown ids contribute nothing.
    pub fn quote(&self, primary_id: &str, addon_ids: &[String]) -> f64 {
        let mut total = self.get(primary_id).map(|s| s.price).unwrap_or(0.0);
        for id in addon_ids {
            if let Some(s) = self.get(id) {
                total += s.price;
            }
        }
        total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(size: Option<&str>, coat: Option<&str>) -> Service {
        Service {
            id: "svc1".to_string(),
            name: "Full Groom".to_string(),
            category: ServiceCategory::Primary,
            target_size: size.map(String::from),
            target_coat: coat.map(String::from),
            price: 80.0,
            duration_minutes: 90,
            cadence: Cadence::None,
            is_haircut: true,
        }
    }

    #[test]
    fn unset_filters_match_any_pet() {
        let s = service(None, None);
        assert!(s.applies_to(Some("large"), Some("long")));
        assert!(s.applies_to(None, None));
    }

    #[test]
    fn any_keyword_matches_everything() {
        let s = service(Some("Any"), None);
        assert!(s.applies_to(Some("small"), None));
    }

    #[test]
    fn size_filter_rejects_mismatched_pet() {
        let s = service(Some("small/medium"), None);
        assert!(s.applies_to(Some("small"), None));
        assert!(!s.applies_to(Some("large"), None));
    }

    #[test]
    fn filter_without_pet_attribute_rejects() {
        let s = service(Some("small"), None);
        assert!(!s.applies_to(None, None));
    }

    #[test]
    fn quote_sums_primary_and_addons() {
        let mut addon = service(None, None);
        addon.id = "svc2".to_string();
        addon.category = ServiceCategory::Addon;
        addon.price = 15.0;
        let dir = ServiceDirectory::new([service(None, None), addon]);

        assert_eq!(dir.quote("svc1", &["svc2".to_string()]), 95.0);
    }

    #[test]
    fn quote_ignores_unknown_ids() {
        let dir = ServiceDirectory::new([service(None, None)]);
        assert_eq!(dir.quote("missing", &["also_missing".to_string()]), 0.0);
    }

    #[test]
    fn cadence_defaults_to_none_when_absent_from_json() {
        let json = r#"{
            "id": "svc9",
            "name": "Bath",
            "category": "primary",
            "price": 40.0,
            "duration_minutes": 45
        }"#;
        let s: Service = serde_json::from_str(json).unwrap();
        assert_eq!(s.cadence, Cadence::None);
        assert!(!s.is_haircut);
    }
}
