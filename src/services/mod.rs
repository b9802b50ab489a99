pub mod generator;
pub mod metrics;
pub mod reschedule;
