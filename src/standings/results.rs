//! Cross-event results feed with participant, house and event names

use super::HouseIndex;
use crate::types::{
    Event, EventId, House, HouseId, Participant, ParticipantId, ResultStatus, StoredResult,
};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

/// One stored result joined with the names shown on the results board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticipantResult {
    pub event_id: EventId,
    pub event_name: String,
    pub event_distance: String,
    pub event_category: String,
    pub event_order: u32,
    pub participant_id: ParticipantId,
    pub participant_name: String,
    pub house_id: HouseId,
    pub house_name: String,
    pub house_color: String,
    pub position: Option<u32>,
    pub elapsed_time: Option<f64>,
    pub points: u32,
    pub status: ResultStatus,
}

/// Narrows the feed; unset fields match everything
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResultsFilter {
    pub event_id: Option<EventId>,
    pub house_id: Option<HouseId>,
    /// Case-insensitive match against participant, event or house name
    pub search: Option<String>,
}

impl ResultsFilter {
    pub fn for_event(event_id: EventId) -> Self {
        Self {
            event_id: Some(event_id),
            ..Self::default()
        }
    }

    pub fn for_house(house_id: HouseId) -> Self {
        Self {
            house_id: Some(house_id),
            ..Self::default()
        }
    }

    fn matches(&self, row: &ParticipantResult) -> bool {
        if self.event_id.is_some_and(|id| id != row.event_id) {
            return false;
        }
        if self.house_id.is_some_and(|id| id != row.house_id) {
            return false;
        }
        match self.search.as_deref().map(str::trim) {
            Some(term) if !term.is_empty() => {
                let term = term.to_lowercase();
                [&row.participant_name, &row.event_name, &row.house_name]
                    .iter()
                    .any(|name| name.to_lowercase().contains(&term))
            }
            _ => true,
        }
    }
}

/// Every attributable result, in programme order then finishing order.
///
/// Rows whose participant, house or event is unknown are left out. Within an
/// event, placed rows come first by position, unplaced rows last.
pub fn participant_results(
    results: &[StoredResult],
    houses: &[House],
    participants: &[Participant],
    events: &[Event],
    filter: &ResultsFilter,
) -> Vec<ParticipantResult> {
    let index = HouseIndex::new(houses, participants);
    let events: HashMap<EventId, &Event> = events.iter().map(|e| (e.id, e)).collect();

    let mut rows: Vec<ParticipantResult> = results
        .iter()
        .filter_map(|stored| {
            let event = events.get(&stored.event_id)?;
            let house_id = index.house_of(stored)?;
            let participant = index.participant(stored.result.participant_id)?;
            let house = index.house(house_id)?;
            let result = &stored.result;

            Some(ParticipantResult {
                event_id: event.id,
                event_name: event.name.clone(),
                event_distance: event.distance.clone(),
                event_category: event.category.clone(),
                event_order: event.event_order,
                participant_id: participant.id,
                participant_name: participant.name.clone(),
                house_id,
                house_name: house.name.clone(),
                house_color: house.color.clone(),
                position: result.position,
                elapsed_time: result.elapsed_time,
                points: result.points,
                status: result.status,
            })
        })
        .filter(|row| filter.matches(row))
        .collect();

    rows.sort_by(|a, b| {
        a.event_order
            .cmp(&b.event_order)
            .then_with(|| a.event_name.cmp(&b.event_name))
            .then_with(|| a.event_id.cmp(&b.event_id))
            .then_with(|| position_order(a.position, b.position))
            .then_with(|| a.participant_name.cmp(&b.participant_name))
            .then_with(|| a.participant_id.cmp(&b.participant_id))
    });
    rows
}

fn position_order(a: Option<u32>, b: Option<u32>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
