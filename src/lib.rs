//! Harvestable Vehicles - turn hits on vehicles into harvested materials

pub mod config;
pub mod core;
pub mod handler;
pub mod harvest;
pub mod host;

pub use config::HarvestConfig;
pub use handler::{HarvestHandler, HarvestOutcome, SkipReason};
