//! Standings derived from the stored result set
//!
//! Every view here is a pure projection over the full list of stored results.
//! Nothing is kept between calls, so standings always match the stored rows
//! after edits or deletions.

pub mod events;
pub mod houses;
pub mod leaderboard;
pub mod results;

pub use events::{event_summaries, performance_trends, EventSummary, TrendPoint};
pub use houses::{
    house_performance, house_totals, house_wins, HousePerformance, HouseTotal, HouseWins,
};
pub use leaderboard::{top_performers, TopPerformer};
pub use results::{participant_results, ParticipantResult, ResultsFilter};

use crate::types::{House, HouseId, Participant, ParticipantId, StoredResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// Default number of entries on the top performers leaderboard
pub const DEFAULT_TOP_PERFORMERS_LIMIT: usize = 10;

/// House and participant views over all stored results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Standings {
    pub house_totals: Vec<HouseTotal>,
    pub house_performance: Vec<HousePerformance>,
    pub house_wins: Vec<HouseWins>,
    pub top_performers: Vec<TopPerformer>,
}

/// Builds standings views from stored results
#[derive(Debug, Clone)]
pub struct StandingsAggregator {
    top_performers_limit: usize,
}

impl Default for StandingsAggregator {
    fn default() -> Self {
        Self::new(DEFAULT_TOP_PERFORMERS_LIMIT)
    }
}

impl StandingsAggregator {
    pub fn new(top_performers_limit: usize) -> Self {
        Self {
            top_performers_limit,
        }
    }

    pub fn top_performers_limit(&self) -> usize {
        self.top_performers_limit
    }

    /// Aggregate house totals, house performance, win counts and the leaderboard
    pub fn aggregate(
        &self,
        results: &[StoredResult],
        houses: &[House],
        participants: &[Participant],
    ) -> Standings {
        Standings {
            house_totals: house_totals(results, houses, participants),
            house_performance: house_performance(results, houses, participants),
            house_wins: house_wins(results, houses, participants),
            top_performers: top_performers(
                results,
                houses,
                participants,
                self.top_performers_limit,
            ),
        }
    }

    pub fn event_summaries(
        &self,
        results: &[StoredResult],
        events: &[crate::types::Event],
    ) -> Vec<EventSummary> {
        event_summaries(results, events)
    }

    pub fn performance_trends(
        &self,
        results: &[StoredResult],
        houses: &[House],
        participants: &[Participant],
        events: &[crate::types::Event],
    ) -> Vec<TrendPoint> {
        performance_trends(results, houses, participants, events)
    }

    pub fn participant_results(
        &self,
        results: &[StoredResult],
        houses: &[House],
        participants: &[Participant],
        events: &[crate::types::Event],
        filter: &ResultsFilter,
    ) -> Vec<ParticipantResult> {
        participant_results(results, houses, participants, events, filter)
    }
}

/// Lookup from participant to owning house
pub(crate) struct HouseIndex<'a> {
    houses: HashMap<HouseId, &'a House>,
    participants: HashMap<ParticipantId, &'a Participant>,
}

impl<'a> HouseIndex<'a> {
    pub(crate) fn new(houses: &'a [House], participants: &'a [Participant]) -> Self {
        Self {
            houses: houses.iter().map(|h| (h.id, h)).collect(),
            participants: participants.iter().map(|p| (p.id, p)).collect(),
        }
    }

    pub(crate) fn house(&self, house_id: HouseId) -> Option<&'a House> {
        self.houses.get(&house_id).copied()
    }

    pub(crate) fn participant(&self, participant_id: ParticipantId) -> Option<&'a Participant> {
        self.participants.get(&participant_id).copied()
    }

    /// House owning a result, if both the participant and the house are known
    pub(crate) fn house_of(&self, result: &StoredResult) -> Option<HouseId> {
        let participant_id = result.result.participant_id;
        let Some(participant) = self.participant(participant_id) else {
            debug!(
                "Skipping result for unknown participant {} in event {}",
                participant_id, result.event_id
            );
            return None;
        };
        if !self.houses.contains_key(&participant.house_id) {
            debug!(
                "Skipping result for participant {} in unknown house {}",
                participant_id, participant.house_id
            );
            return None;
        }
        Some(participant.house_id)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::types::{House, Participant, RankedResult, ResultStatus, StoredResult};
    use crate::utils::current_timestamp;

    pub fn house(id: u64, name: &str) -> House {
        House {
            id,
            name: name.to_string(),
            color: String::new(),
        }
    }

    pub fn participant(id: u64, name: &str, house_id: u64) -> Participant {
        Participant {
            id,
            name: name.to_string(),
            house_id,
            age: None,
            gender: None,
        }
    }

    pub fn finished(event_id: u64, participant_id: u64, time: f64, position: u32, points: u32) -> StoredResult {
        StoredResult {
            event_id,
            result: RankedResult {
                participant_id,
                elapsed_time: Some(time),
                status: ResultStatus::Completed,
                position: Some(position),
                points,
            },
            recorded_at: current_timestamp(),
        }
    }

    pub fn not_finished(event_id: u64, participant_id: u64, status: ResultStatus) -> StoredResult {
        StoredResult {
            event_id,
            result: RankedResult {
                participant_id,
                elapsed_time: None,
                status,
                position: None,
                points: 0,
            },
            recorded_at: current_timestamp(),
        }
    }
}
