//! Individual leaderboard

use super::HouseIndex;
use crate::types::{House, HouseId, Participant, ParticipantId, StoredResult};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopPerformer {
    pub participant_id: ParticipantId,
    pub participant_name: String,
    pub house_id: HouseId,
    pub house_name: Option<String>,
    pub total_points: u64,
    pub event_count: usize,
    /// Lowest position achieved in any event, if the participant ever finished
    pub best_position: Option<u32>,
}

/// Lower position wins; never having a position ranks last
fn compare_best(a: Option<u32>, b: Option<u32>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Top `limit` participants by summed points.
///
/// Only participants with at least one stored result are listed. Ties on
/// points go to the better best position, then to name.
pub fn top_performers(
    results: &[StoredResult],
    houses: &[House],
    participants: &[Participant],
    limit: usize,
) -> Vec<TopPerformer> {
    let index = HouseIndex::new(houses, participants);
    let mut by_participant: HashMap<ParticipantId, TopPerformer> = HashMap::new();

    for stored in results {
        let result = &stored.result;
        let Some(participant) = index.participant(result.participant_id) else {
            continue;
        };

        let entry = by_participant
            .entry(participant.id)
            .or_insert_with(|| TopPerformer {
                participant_id: participant.id,
                participant_name: participant.name.clone(),
                house_id: participant.house_id,
                house_name: index.house(participant.house_id).map(|h| h.name.clone()),
                total_points: 0,
                event_count: 0,
                best_position: None,
            });

        entry.total_points += u64::from(result.points);
        entry.event_count += 1;
        if compare_best(result.position, entry.best_position) == Ordering::Less {
            entry.best_position = result.position;
        }
    }

    let mut leaderboard: Vec<TopPerformer> = by_participant.into_values().collect();
    leaderboard.sort_by(|a, b| {
        b.total_points
            .cmp(&a.total_points)
            .then_with(|| compare_best(a.best_position, b.best_position))
            .then_with(|| a.participant_name.cmp(&b.participant_name))
            .then_with(|| a.participant_id.cmp(&b.participant_id))
    });
    leaderboard.truncate(limit);
    leaderboard
}
