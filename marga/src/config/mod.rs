//! Unified configuration loading for Marga.
//!
//! Loads planner and smoothing settings from a single YAML file.

mod defaults;
mod error;
mod marga;
mod planner;
mod smoothing;

// Re-export main types
pub use error::ConfigLoadError;
pub use marga::MargaConfig;

// Re-export section types
pub use planner::PlannerSection;
pub use smoothing::SmoothingSection;
