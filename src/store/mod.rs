//! Result storage interface
//!
//! The scoring core never talks to storage itself; the service reads the
//! authoritative rows through this trait and writes each event's resolved
//! results back as a single atomic replace.

pub mod memory;
pub mod retry;

pub use memory::{InMemoryResultStore, MeetSnapshot};
pub use retry::RetryPolicy;

use crate::types::{Event, EventId, House, Participant, RankedResult, StoredResult};
use async_trait::async_trait;

/// Record store holding houses, participants, events and results
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ResultStore: Send + Sync {
    async fn houses(&self) -> crate::error::Result<Vec<House>>;

    async fn participants(&self) -> crate::error::Result<Vec<Participant>>;

    async fn events(&self) -> crate::error::Result<Vec<Event>>;

    /// Every stored result across all events
    async fn all_results(&self) -> crate::error::Result<Vec<StoredResult>>;

    async fn event_results(&self, event_id: EventId) -> crate::error::Result<Vec<StoredResult>>;

    /// Discard all rows for `event_id` and store `results` in their place.
    ///
    /// Implementations must make this atomic: readers and concurrent
    /// replaces for the same event never observe a mix of old and new rows.
    async fn replace_event_results(
        &self,
        event_id: EventId,
        results: Vec<RankedResult>,
    ) -> crate::error::Result<()>;
}
