//! In-memory result store
//!
//! Holds the whole meet behind a single lock so an event replace is one
//! critical section. Can be loaded from and dumped to a JSON snapshot.

use crate::error::ScoringError;
use crate::store::ResultStore;
use crate::types::{
    Event, EventId, House, HouseId, Participant, ParticipantId, RankedResult, StoredResult,
};
use crate::utils::current_timestamp;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info};

/// Serializable picture of everything a meet has recorded
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeetSnapshot {
    #[serde(default)]
    pub houses: Vec<House>,
    #[serde(default)]
    pub participants: Vec<Participant>,
    #[serde(default)]
    pub events: Vec<Event>,
    #[serde(default)]
    pub results: Vec<StoredResult>,
}

#[derive(Debug, Default)]
struct MeetState {
    houses: BTreeMap<HouseId, House>,
    participants: BTreeMap<ParticipantId, Participant>,
    events: BTreeMap<EventId, Event>,
    results: BTreeMap<EventId, Vec<StoredResult>>,
}

#[derive(Debug, Default)]
pub struct InMemoryResultStore {
    state: RwLock<MeetState>,
}

impl InMemoryResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_snapshot(snapshot: MeetSnapshot) -> Self {
        let mut state = MeetState {
            houses: snapshot.houses.into_iter().map(|h| (h.id, h)).collect(),
            participants: snapshot
                .participants
                .into_iter()
                .map(|p| (p.id, p))
                .collect(),
            events: snapshot.events.into_iter().map(|e| (e.id, e)).collect(),
            results: BTreeMap::new(),
        };
        for result in snapshot.results {
            state.results.entry(result.event_id).or_default().push(result);
        }

        info!(
            "Loaded meet snapshot: {} houses, {} participants, {} events, {} events with results",
            state.houses.len(),
            state.participants.len(),
            state.events.len(),
            state.results.len()
        );

        Self {
            state: RwLock::new(state),
        }
    }

    pub fn snapshot(&self) -> crate::error::Result<MeetSnapshot> {
        let state = self.read()?;
        Ok(MeetSnapshot {
            houses: state.houses.values().cloned().collect(),
            participants: state.participants.values().cloned().collect(),
            events: state.events.values().cloned().collect(),
            results: state.results.values().flatten().cloned().collect(),
        })
    }

    pub fn insert_house(&self, house: House) -> crate::error::Result<()> {
        self.write()?.houses.insert(house.id, house);
        Ok(())
    }

    pub fn insert_participant(&self, participant: Participant) -> crate::error::Result<()> {
        self.write()?
            .participants
            .insert(participant.id, participant);
        Ok(())
    }

    pub fn insert_event(&self, event: Event) -> crate::error::Result<()> {
        self.write()?.events.insert(event.id, event);
        Ok(())
    }

    fn read(&self) -> crate::error::Result<RwLockReadGuard<'_, MeetState>> {
        self.state.read().map_err(|_| {
            ScoringError::InternalError {
                message: "Failed to acquire meet read lock".to_string(),
            }
            .into()
        })
    }

    fn write(&self) -> crate::error::Result<RwLockWriteGuard<'_, MeetState>> {
        self.state.write().map_err(|_| {
            ScoringError::InternalError {
                message: "Failed to acquire meet write lock".to_string(),
            }
            .into()
        })
    }
}

#[async_trait]
impl ResultStore for InMemoryResultStore {
    async fn houses(&self) -> crate::error::Result<Vec<House>> {
        Ok(self.read()?.houses.values().cloned().collect())
    }

    async fn participants(&self) -> crate::error::Result<Vec<Participant>> {
        Ok(self.read()?.participants.values().cloned().collect())
    }

    async fn events(&self) -> crate::error::Result<Vec<Event>> {
        Ok(self.read()?.events.values().cloned().collect())
    }

    async fn all_results(&self) -> crate::error::Result<Vec<StoredResult>> {
        Ok(self.read()?.results.values().flatten().cloned().collect())
    }

    async fn event_results(&self, event_id: EventId) -> crate::error::Result<Vec<StoredResult>> {
        Ok(self
            .read()?
            .results
            .get(&event_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn replace_event_results(
        &self,
        event_id: EventId,
        results: Vec<RankedResult>,
    ) -> crate::error::Result<()> {
        let recorded_at = current_timestamp();
        let rows: Vec<StoredResult> = results
            .into_iter()
            .map(|result| StoredResult {
                event_id,
                result,
                recorded_at,
            })
            .collect();
        let count = rows.len();

        let mut state = self.write()?;
        let previous = if rows.is_empty() {
            state.results.remove(&event_id)
        } else {
            state.results.insert(event_id, rows)
        };
        drop(state);

        debug!(
            "Replaced results for event {}: {} rows removed, {} rows stored",
            event_id,
            previous.map(|p| p.len()).unwrap_or(0),
            count
        );
        Ok(())
    }
}
