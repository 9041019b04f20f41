pub mod migrate;
pub mod records;
pub mod reports;
pub mod schedule;
pub mod storage;

pub use records::{Booking, BookingStatus, Cadence, CostRecord, Service, ServiceDirectory};
pub use reports::{analyze, Granularity, Metrics, Report};
pub use schedule::{expand, layout, LayoutItem, TimeInterval};
