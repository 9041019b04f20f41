pub mod interval;
pub mod layout;
pub mod recurrence;

pub use interval::TimeInterval;
pub use layout::{layout, LayoutError, LayoutItem};
pub use recurrence::expand;
