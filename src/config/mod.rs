//! Configuration module for the progress engines
//!
//! This module provides the `ProgressConfig` struct and its builder for
//! configuring the stage model, status rotator and renderer with validation
//! and sensible defaults.

// Sub-modules
pub mod builder;
pub mod getters;
pub mod methods;
pub mod types;

// Re-exports for public API
pub use builder::ProgressConfigBuilder;
pub use types::{ProgressConfig, SummaryStyle, Theme};
