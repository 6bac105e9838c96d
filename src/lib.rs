//! Gala Scoreboard - results scoring and house standings for swimming galas
//!
//! This crate turns per-event race outcomes into positions and points, and
//! derives house totals, leaderboards and event summaries from the stored
//! results.

pub mod config;
pub mod error;
pub mod metrics;
pub mod scoring;
pub mod service;
pub mod standings;
pub mod store;
pub mod types;
pub mod utils;

// Re-export commonly used types and traits
pub use error::{Result, ScoringError};
pub use types::*;

// Re-export key components
pub use scoring::{resolve, PointsTable, Resolver};
pub use service::ScoringService;
pub use standings::{Standings, StandingsAggregator};
pub use store::{InMemoryResultStore, MeetSnapshot, ResultStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
