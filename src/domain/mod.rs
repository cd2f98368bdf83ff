pub mod analytics;
pub mod availability;
pub mod cancellation;
pub mod code;
pub mod schedule;
