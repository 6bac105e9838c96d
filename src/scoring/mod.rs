//! Results scoring for a single event
//!
//! Converts raw participant outcomes into positions and points, and decodes
//! raw submissions into outcomes.

pub mod points;
pub mod resolver;
pub mod submission;

// Re-export commonly used types
pub use points::PointsTable;
pub use resolver::{resolve, Resolver};
pub use submission::{parse_outcomes, parse_submission, ResultsSubmission};
