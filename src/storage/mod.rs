pub mod config;
pub mod snapshot;

pub use config::{ConfigError, ShopConfig};
pub use snapshot::{Snapshot, SnapshotError, CURRENT_SCHEMA_VERSION};
