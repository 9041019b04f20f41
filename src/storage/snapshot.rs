use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::migrate;
use crate::records::{Booking, CostRecord, Service};

/// Version at which services carry explicit `cadence` and `is_haircut`
/// fields. Older snapshots get the name-heuristic backfill on load.
pub const CURRENT_SCHEMA_VERSION: u32 = 2;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Failed to read snapshot file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Failed to parse snapshot: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// The full data set the persistence layer hands to this core: bookings,
/// the service catalog, and imported cost records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    #[serde(default)]
    pub bookings: Vec<Booking>,
    #[serde(default)]
    pub services: Vec<Service>,
    #[serde(default)]
    pub costs: Vec<CostRecord>,
}

fn default_schema_version() -> u32 {
    1
}

impl Snapshot {
    pub fn from_json(content: &str) -> Result<Self, SnapshotError> {
        let mut snapshot: Snapshot = serde_json::from_str(content)?;
        snapshot.migrate();
        Ok(snapshot)
    }

    pub fn load(path: &Path) -> Result<Self, SnapshotError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn save(&self, path: &Path) -> Result<(), SnapshotError> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    fn migrate(&mut self) {
        if self.schema_version >= CURRENT_SCHEMA_VERSION {
            return;
        }
        let changed = migrate::backfill_services(&mut self.services);
        tracing::info!(
            from = self.schema_version,
            to = CURRENT_SCHEMA_VERSION,
            services_backfilled = changed,
            "migrated snapshot schema"
        );
        self.schema_version = CURRENT_SCHEMA_VERSION;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::Cadence;
    use pretty_assertions::assert_eq;

    const LEGACY_SNAPSHOT: &str = r#"{
        "bookings": [],
        "services": [
            {
                "id": "svc1",
                "name": "Pacote Mensal",
                "category": "primary",
                "price": 220.0,
                "duration_minutes": 90
            }
        ],
        "costs": []
    }"#;

    #[test]
    fn legacy_snapshot_gets_backfilled_on_load() {
        let snapshot = Snapshot::from_json(LEGACY_SNAPSHOT).unwrap();
        assert_eq!(snapshot.schema_version, CURRENT_SCHEMA_VERSION);
        assert_eq!(snapshot.services[0].cadence, Cadence::Monthly);
    }

    #[test]
    fn current_snapshot_trusts_stored_fields() {
        let content = r#"{
            "schema_version": 2,
            "services": [
                {
                    "id": "svc1",
                    "name": "Pacote Mensal",
                    "category": "primary",
                    "price": 220.0,
                    "duration_minutes": 90,
                    "cadence": "none",
                    "is_haircut": false
                }
            ]
        }"#;
        let snapshot = Snapshot::from_json(content).unwrap();
        assert_eq!(snapshot.services[0].cadence, Cadence::None);
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let result = Snapshot::from_json("not json");
        assert!(matches!(result, Err(SnapshotError::ParseError(_))));
    }

    #[test]
    fn snapshot_round_trips_through_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshot.json");

        let snapshot = Snapshot::from_json(LEGACY_SNAPSHOT).unwrap();
        snapshot.save(&path).unwrap();
        let reloaded = Snapshot::load(&path).unwrap();

        assert_eq!(reloaded, snapshot);
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let result = Snapshot::load(Path::new("/nonexistent/snapshot.json"));
        assert!(matches!(result, Err(SnapshotError::ReadError(_))));
    }
}
