pub mod location;
pub mod metric;
pub mod reading;
pub mod snapshot;
