//! Error types for the scoring service
//!
//! Domain failures are modelled with thiserror; everything is propagated as
//! anyhow errors so storage failures reach the caller unchanged.

use crate::types::{EventId, ParticipantId};

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Custom error types for specific scoring scenarios
#[derive(Debug, thiserror::Error)]
pub enum ScoringError {
    #[error("Invalid results submission: {reason}")]
    InvalidSubmission { reason: String },

    #[error("Event not found: {event_id}")]
    EventNotFound { event_id: EventId },

    #[error("Participant not found: {participant_id}")]
    ParticipantNotFound { participant_id: ParticipantId },

    #[error("Storage error: {message}")]
    StorageError { message: String },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },

    #[error("Internal service error: {message}")]
    InternalError { message: String },
}
