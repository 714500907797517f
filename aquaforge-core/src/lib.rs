pub mod batches;
pub mod comparison;
pub mod error;
pub mod logger;
pub mod planner;
pub mod resources;
pub mod schedule;
pub mod validation;
