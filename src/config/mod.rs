//! Configuration management for the gala-scoreboard service
//!
//! Loads configuration from TOML or environment variables, with validation
//! and default values.

pub mod app;
pub mod scoring;

// Re-export commonly used types
pub use app::{validate_config, AppConfig, ServiceSettings, StoreSettings};
pub use scoring::{parse_points_table, ScoringSettings};
