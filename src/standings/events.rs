//! Per-event summaries and cumulative house trends

use super::HouseIndex;
use crate::types::{Event, EventId, House, HouseId, Participant, StoredResult};
use crate::utils::{format_time, mean};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventSummary {
    pub event_id: EventId,
    pub event_name: String,
    pub event_order: u32,
    pub participant_count: usize,
    pub completed_count: usize,
    pub has_results: bool,
    /// Mean finishing time in seconds across finishers
    pub average_time: Option<f64>,
    pub average_time_display: Option<String>,
}

/// A house's running total after one event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub event_id: EventId,
    pub event_name: String,
    pub event_order: u32,
    pub house_id: HouseId,
    pub house_name: String,
    pub cumulative_points: u64,
}

fn programme_order(events: &[Event]) -> Vec<&Event> {
    let mut ordered: Vec<&Event> = events.iter().collect();
    ordered.sort_by(|a, b| {
        a.event_order
            .cmp(&b.event_order)
            .then_with(|| a.name.cmp(&b.name))
            .then_with(|| a.id.cmp(&b.id))
    });
    ordered
}

/// Participation and completion counts for every known event, in programme order
pub fn event_summaries(results: &[StoredResult], events: &[Event]) -> Vec<EventSummary> {
    let mut by_event: HashMap<EventId, Vec<&StoredResult>> = HashMap::new();
    for stored in results {
        by_event.entry(stored.event_id).or_default().push(stored);
    }

    programme_order(events)
        .into_iter()
        .map(|event| {
            let rows = by_event.get(&event.id).map(Vec::as_slice).unwrap_or(&[]);
            let times: Vec<f64> = rows
                .iter()
                .filter(|r| r.result.is_finisher())
                .filter_map(|r| r.result.outcome().finishing_time())
                .collect();
            let average_time = mean(&times);

            EventSummary {
                event_id: event.id,
                event_name: event.name.clone(),
                event_order: event.event_order,
                participant_count: rows.len(),
                completed_count: rows.iter().filter(|r| r.result.is_finisher()).count(),
                has_results: !rows.is_empty(),
                average_time,
                average_time_display: average_time.map(format_time),
            }
        })
        .collect()
}

/// Cumulative points per house after each event that has results
pub fn performance_trends(
    results: &[StoredResult],
    houses: &[House],
    participants: &[Participant],
    events: &[Event],
) -> Vec<TrendPoint> {
    let index = HouseIndex::new(houses, participants);

    let mut per_event: HashMap<EventId, HashMap<HouseId, u64>> = HashMap::new();
    for stored in results {
        if let Some(house_id) = index.house_of(stored) {
            *per_event
                .entry(stored.event_id)
                .or_default()
                .entry(house_id)
                .or_default() += u64::from(stored.result.points);
        }
    }

    let mut houses_by_name: Vec<&House> = houses.iter().collect();
    houses_by_name.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));

    let mut running: HashMap<HouseId, u64> = HashMap::new();
    let mut trends = Vec::new();

    for event in programme_order(events) {
        let Some(event_points) = per_event.get(&event.id) else {
            continue;
        };

        for house in &houses_by_name {
            let total = running.entry(house.id).or_default();
            *total += event_points.get(&house.id).copied().unwrap_or(0);

            trends.push(TrendPoint {
                event_id: event.id,
                event_name: event.name.clone(),
                event_order: event.event_order,
                house_id: house.id,
                house_name: house.name.clone(),
                cumulative_points: *total,
            });
        }
    }

    trends
}
