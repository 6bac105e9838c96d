//! Common types used throughout the scoring service

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier for houses (teams)
pub type HouseId = u64;

/// Unique identifier for participants
pub type ParticipantId = u64;

/// Unique identifier for events
pub type EventId = u64;

/// How a participant's race ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultStatus {
    Completed,
    Disqualified,
    DidNotStart,
    DidNotFinish,
}

impl ResultStatus {
    pub const ALL: [ResultStatus; 4] = [
        ResultStatus::Completed,
        ResultStatus::Disqualified,
        ResultStatus::DidNotStart,
        ResultStatus::DidNotFinish,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResultStatus::Completed => "completed",
            ResultStatus::Disqualified => "disqualified",
            ResultStatus::DidNotStart => "did_not_start",
            ResultStatus::DidNotFinish => "did_not_finish",
        }
    }
}

impl std::fmt::Display for ResultStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Mixed,
}

/// Raw outcome for one participant in one event, as entered by an official
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticipantOutcome {
    #[serde(alias = "swimmer_id")]
    pub participant_id: ParticipantId,
    /// Elapsed time in seconds; only meaningful for completed swims
    #[serde(default, alias = "time_seconds")]
    pub elapsed_time: Option<f64>,
    pub status: ResultStatus,
}

impl ParticipantOutcome {
    pub fn completed(participant_id: ParticipantId, elapsed_time: f64) -> Self {
        Self {
            participant_id,
            elapsed_time: Some(elapsed_time),
            status: ResultStatus::Completed,
        }
    }

    pub fn not_finished(participant_id: ParticipantId, status: ResultStatus) -> Self {
        Self {
            participant_id,
            elapsed_time: None,
            status,
        }
    }

    /// Time that counts for ranking, if this outcome is a finisher
    pub fn finishing_time(&self) -> Option<f64> {
        match self.status {
            ResultStatus::Completed => self.elapsed_time,
            _ => None,
        }
    }
}

/// Outcome extended with the rank and points awarded for it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedResult {
    #[serde(alias = "swimmer_id")]
    pub participant_id: ParticipantId,
    #[serde(default, alias = "time_seconds")]
    pub elapsed_time: Option<f64>,
    pub status: ResultStatus,
    #[serde(default)]
    pub position: Option<u32>,
    #[serde(default)]
    pub points: u32,
}

impl RankedResult {
    /// Strip position and points back off
    pub fn outcome(&self) -> ParticipantOutcome {
        ParticipantOutcome {
            participant_id: self.participant_id,
            elapsed_time: self.elapsed_time,
            status: self.status,
        }
    }

    pub fn is_finisher(&self) -> bool {
        self.position.is_some()
    }
}

/// A ranked result as persisted against an event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredResult {
    pub event_id: EventId,
    #[serde(flatten)]
    pub result: RankedResult,
    pub recorded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct House {
    pub id: HouseId,
    pub name: String,
    #[serde(default)]
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub name: String,
    pub house_id: HouseId,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub gender: Option<Gender>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub distance: String,
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub age_group: String,
    #[serde(default)]
    pub max_participants_per_house: Option<u32>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub event_order: u32,
}

fn default_true() -> bool {
    true
}
