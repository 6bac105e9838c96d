//! House totals, performance and win counts

use super::HouseIndex;
use crate::types::{EventId, House, HouseId, Participant, StoredResult};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

/// Cumulative points for one house across all events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseTotal {
    pub house_id: HouseId,
    pub house_name: String,
    pub total_points: u64,
}

/// Per-house breakdown shown on the analytics view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HousePerformance {
    pub house_id: HouseId,
    pub house_name: String,
    pub house_color: String,
    pub total_points: u64,
    /// Events with at least one first place from this house
    pub event_wins: u32,
    pub participant_count: usize,
    pub average_points_per_participant: f64,
}

/// Number of first places per house
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseWins {
    pub house_id: HouseId,
    pub house_name: String,
    pub wins: u32,
}

#[derive(Default)]
struct Tally {
    points: u64,
    wins: u32,
    events_won: HashSet<EventId>,
}

/// Sum points and wins per house; every known house gets an entry
fn tally(
    results: &[StoredResult],
    houses: &[House],
    participants: &[Participant],
) -> HashMap<HouseId, Tally> {
    let index = HouseIndex::new(houses, participants);
    let mut tallies: HashMap<HouseId, Tally> =
        houses.iter().map(|h| (h.id, Tally::default())).collect();

    for stored in results {
        if let Some(house_id) = index.house_of(stored) {
            let entry = tallies.entry(house_id).or_default();
            entry.points += u64::from(stored.result.points);
            if stored.result.position == Some(1) {
                entry.wins += 1;
                entry.events_won.insert(stored.event_id);
            }
        }
    }

    tallies
}

/// Highest value first, then house name, then id
fn rank_by<'a>(a: (u64, &'a House), b: (u64, &'a House)) -> Ordering {
    b.0.cmp(&a.0)
        .then_with(|| a.1.name.cmp(&b.1.name))
        .then_with(|| a.1.id.cmp(&b.1.id))
}

/// House totals sorted by points descending, ties by house name
pub fn house_totals(
    results: &[StoredResult],
    houses: &[House],
    participants: &[Participant],
) -> Vec<HouseTotal> {
    let tallies = tally(results, houses, participants);

    let mut ordered: Vec<(u64, &House)> = houses
        .iter()
        .map(|h| (tallies.get(&h.id).map(|t| t.points).unwrap_or(0), h))
        .collect();
    ordered.sort_by(|a, b| rank_by(*a, *b));

    ordered
        .into_iter()
        .map(|(total_points, house)| HouseTotal {
            house_id: house.id,
            house_name: house.name.clone(),
            total_points,
        })
        .collect()
}

/// First-place counts sorted by wins descending, ties by house name
pub fn house_wins(
    results: &[StoredResult],
    houses: &[House],
    participants: &[Participant],
) -> Vec<HouseWins> {
    let tallies = tally(results, houses, participants);

    let mut ordered: Vec<(u64, &House)> = houses
        .iter()
        .map(|h| (tallies.get(&h.id).map(|t| u64::from(t.wins)).unwrap_or(0), h))
        .collect();
    ordered.sort_by(|a, b| rank_by(*a, *b));

    ordered
        .into_iter()
        .map(|(wins, house)| HouseWins {
            house_id: house.id,
            house_name: house.name.clone(),
            wins: wins as u32,
        })
        .collect()
}

/// Points, wins and squad size per house, in the same order as the totals
pub fn house_performance(
    results: &[StoredResult],
    houses: &[House],
    participants: &[Participant],
) -> Vec<HousePerformance> {
    let tallies = tally(results, houses, participants);

    let mut squad_sizes: HashMap<HouseId, usize> = HashMap::new();
    for participant in participants {
        *squad_sizes.entry(participant.house_id).or_default() += 1;
    }

    let mut ordered: Vec<(u64, &House)> = houses
        .iter()
        .map(|h| (tallies.get(&h.id).map(|t| t.points).unwrap_or(0), h))
        .collect();
    ordered.sort_by(|a, b| rank_by(*a, *b));

    ordered
        .into_iter()
        .map(|(total_points, house)| {
            let participant_count = squad_sizes.get(&house.id).copied().unwrap_or(0);
            let event_wins = tallies
                .get(&house.id)
                .map(|t| t.events_won.len() as u32)
                .unwrap_or(0);
            let average_points_per_participant = if participant_count > 0 {
                total_points as f64 / participant_count as f64
            } else {
                0.0
            };

            HousePerformance {
                house_id: house.id,
                house_name: house.name.clone(),
                house_color: house.color.clone(),
                total_points,
                event_wins,
                participant_count,
                average_points_per_participant,
            }
        })
        .collect()
}
