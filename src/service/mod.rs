//! Service layer for the gala-scoreboard
//!
//! Ties the result store to the scoring core for the submission and
//! standings read paths.

pub mod scoring;

pub use scoring::ScoringService;
