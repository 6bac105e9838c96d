//! Test fixtures and store implementations for integration testing

#![allow(dead_code)]

use async_trait::async_trait;
use gala_scoreboard::error::Result;
use gala_scoreboard::store::{InMemoryResultStore, ResultStore};
use gala_scoreboard::types::{
    Event, EventId, House, Participant, RankedResult, StoredResult,
};
use std::sync::atomic::{AtomicU32, Ordering};

pub const RED: u64 = 1;
pub const BLUE: u64 = 2;
pub const GREEN: u64 = 3;

pub const FREESTYLE_50: u64 = 100;
pub const BACKSTROKE_50: u64 = 101;
pub const MEDLEY_200: u64 = 102;

pub fn house(id: u64, name: &str, color: &str) -> House {
    House {
        id,
        name: name.to_string(),
        color: color.to_string(),
    }
}

pub fn participant(id: u64, name: &str, house_id: u64) -> Participant {
    Participant {
        id,
        name: name.to_string(),
        house_id,
        age: Some(12),
        gender: None,
    }
}

pub fn event(id: u64, name: &str, event_order: u32) -> Event {
    Event {
        id,
        name: name.to_string(),
        category: "Freestyle".to_string(),
        distance: "50m".to_string(),
        gender: None,
        age_group: "U13".to_string(),
        max_participants_per_house: Some(2),
        is_active: true,
        event_order,
    }
}

/// Three houses, two swimmers each in Red and Blue, nobody in Green yet
pub fn sample_meet() -> InMemoryResultStore {
    let store = InMemoryResultStore::new();

    for h in [
        house(RED, "Red", "#d32f2f"),
        house(BLUE, "Blue", "#1976d2"),
        house(GREEN, "Green", "#388e3c"),
    ] {
        store.insert_house(h).unwrap();
    }

    for p in [
        participant(1, "Ava", RED),
        participant(2, "Ben", RED),
        participant(3, "Cleo", BLUE),
        participant(4, "Dev", BLUE),
    ] {
        store.insert_participant(p).unwrap();
    }

    for e in [
        event(FREESTYLE_50, "50m Freestyle", 1),
        event(BACKSTROKE_50, "50m Backstroke", 2),
        event(MEDLEY_200, "200m Medley", 3),
    ] {
        store.insert_event(e).unwrap();
    }

    store
}

/// Store whose reads fail a set number of times before succeeding
pub struct FlakyStore {
    inner: InMemoryResultStore,
    failures_remaining: AtomicU32,
    reads: AtomicU32,
}

impl FlakyStore {
    pub fn new(inner: InMemoryResultStore, failures: u32) -> Self {
        Self {
            inner,
            failures_remaining: AtomicU32::new(failures),
            reads: AtomicU32::new(0),
        }
    }

    pub fn reads(&self) -> u32 {
        self.reads.load(Ordering::SeqCst)
    }

    fn maybe_fail(&self) -> Result<()> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        let remaining = self.failures_remaining.load(Ordering::SeqCst);
        if remaining > 0 {
            self.failures_remaining.store(remaining - 1, Ordering::SeqCst);
            anyhow::bail!("transient store failure");
        }
        Ok(())
    }
}

#[async_trait]
impl ResultStore for FlakyStore {
    async fn houses(&self) -> Result<Vec<House>> {
        self.maybe_fail()?;
        self.inner.houses().await
    }

    async fn participants(&self) -> Result<Vec<Participant>> {
        self.maybe_fail()?;
        self.inner.participants().await
    }

    async fn events(&self) -> Result<Vec<Event>> {
        self.maybe_fail()?;
        self.inner.events().await
    }

    async fn all_results(&self) -> Result<Vec<StoredResult>> {
        self.maybe_fail()?;
        self.inner.all_results().await
    }

    async fn event_results(&self, event_id: EventId) -> Result<Vec<StoredResult>> {
        self.maybe_fail()?;
        self.inner.event_results(event_id).await
    }

    async fn replace_event_results(
        &self,
        event_id: EventId,
        results: Vec<RankedResult>,
    ) -> Result<()> {
        self.inner.replace_event_results(event_id, results).await
    }
}
