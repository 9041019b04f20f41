pub mod booking;
pub mod cost;
pub mod service;

pub use booking::{Booking, BookingStatus, DEFAULT_DURATION_MINUTES};
pub use cost::CostRecord;
pub use service::{Cadence, Service, ServiceCategory, ServiceDirectory};
