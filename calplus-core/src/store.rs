//! In-memory event collection owned by a single controller.

use crate::error::PlannerResult;
use crate::event::{Event, EventId, Record};
use crate::storage::EventStorage;

#[derive(Debug, Clone, Default)]
pub struct EventStore {
    records: Vec<Record>,
}

impl EventStore {
    pub fn new(records: Vec<Record>) -> Self {
        EventStore { records }
    }

    pub async fn load<S: EventStorage>(storage: &S) -> PlannerResult<Self> {
        let records = storage.load().await?;
        tracing::debug!(count = records.len(), "Loaded event collection");
        Ok(Self::new(records))
    }

    /// Snapshot for read paths (resolver, rendering).
    pub fn current(&self) -> &[Record] {
        &self.records
    }

    pub fn get(&self, id: EventId) -> Option<&Event> {
        self.records
            .iter()
            .filter_map(Record::as_event)
            .find(|e| e.id == id)
    }

    pub fn mutate<R>(&mut self, f: impl FnOnce(&mut Vec<Record>) -> R) -> R {
        f(&mut self.records)
    }

    /// Write the whole collection. On failure the in-memory state is kept as is.
    pub async fn persist<S: EventStorage>(&self, storage: &S) -> PlannerResult<()> {
        storage.save(&self.records).await
    }

    /// A fresh id from the current millisecond clock, bumped past every existing
    /// numeric id, malformed records included.
    pub fn next_id(&self, now_millis: u64) -> EventId {
        let floor = self
            .records
            .iter()
            .filter_map(|r| r.raw_id().as_u64())
            .map(|id| id.saturating_add(1))
            .max()
            .unwrap_or(0);
        EventId(now_millis.max(floor))
    }
}
