//! Decoding of raw results submissions
//!
//! Shape problems (missing status, unknown status, missing participant id)
//! are rejected here rather than defaulted, since a defaulted status would
//! silently change the scoring.

use crate::error::ScoringError;
use crate::types::{EventId, ParticipantOutcome};
use serde::{Deserialize, Serialize};

/// A full-replace submission of outcomes for one event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultsSubmission {
    pub event_id: EventId,
    pub results: Vec<ParticipantOutcome>,
}

/// Parse a JSON array of participant outcomes
pub fn parse_outcomes(json: &str) -> crate::error::Result<Vec<ParticipantOutcome>> {
    serde_json::from_str(json).map_err(|e| {
        ScoringError::InvalidSubmission {
            reason: e.to_string(),
        }
        .into()
    })
}

/// Parse a `{ "event_id": .., "results": [..] }` submission body
pub fn parse_submission(json: &str) -> crate::error::Result<ResultsSubmission> {
    serde_json::from_str(json).map_err(|e| {
        ScoringError::InvalidSubmission {
            reason: e.to_string(),
        }
        .into()
    })
}
