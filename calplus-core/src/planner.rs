//! Planner: the one controller that owns the event collection.
//!
//! Every mutation goes through an explicit command handler that edits the
//! in-memory store and then writes the full collection back. If the write
//! fails the error is returned and the in-memory collection stays as the
//! source of truth until the next successful write.

use std::collections::BTreeMap;

use chrono::Utc;
use tokio::sync::broadcast;

use crate::bus::{DateBus, UiMessage};
use crate::date::CalendarDate;
use crate::draft::EventDraft;
use crate::error::{PlannerError, PlannerResult};
use crate::event::{Event, EventId, Record};
use crate::month::MonthView;
use crate::storage::EventStorage;
use crate::store::EventStore;
use crate::visibility::{self, DayView, LevelFilter};

pub struct Planner<S> {
    storage: S,
    store: EventStore,
    selected: CalendarDate,
    bus: DateBus,
}

impl<S: EventStorage> Planner<S> {
    /// Load the collection and select today.
    pub async fn load(storage: S) -> PlannerResult<Self> {
        let store = EventStore::load(&storage).await?;
        Ok(Planner {
            storage,
            store,
            selected: CalendarDate::today(),
            bus: DateBus::new(),
        })
    }

    pub async fn reload(&mut self) -> PlannerResult<()> {
        self.store = EventStore::load(&self.storage).await?;
        Ok(())
    }

    pub fn events(&self) -> &[Record] {
        self.store.current()
    }

    pub fn get(&self, id: EventId) -> Option<&Event> {
        self.store.get(id)
    }

    pub fn selected_date(&self) -> CalendarDate {
        self.selected
    }

    pub fn subscribe(&self) -> broadcast::Receiver<UiMessage> {
        self.bus.subscribe()
    }

    /// Change the selected day and notify subscribers.
    pub fn select_date(&mut self, date: CalendarDate) {
        self.selected = date;
        self.bus.publish(date);
    }

    pub fn day_view(&self, filter: LevelFilter) -> DayView<'_> {
        visibility::resolve_day(self.store.current(), self.selected, filter)
    }

    pub fn month_markers(&self, month: MonthView) -> BTreeMap<CalendarDate, Vec<&'static str>> {
        visibility::month_markers(self.store.current(), month)
    }

    /// Validate the draft, append it and persist. Invalid drafts never enter the collection.
    pub async fn add(&mut self, draft: EventDraft) -> PlannerResult<EventId> {
        let now_millis = u64::try_from(Utc::now().timestamp_millis()).unwrap_or_default();
        let id = self.store.next_id(now_millis);
        let event = draft.into_event(id)?;

        tracing::info!(%id, title = %event.title, "Adding event");
        self.store.mutate(|records| records.push(event.into()));
        self.store.persist(&self.storage).await?;
        Ok(id)
    }

    /// Flip the completed flag. Returns the new value.
    pub async fn toggle_completed(&mut self, id: EventId) -> PlannerResult<bool> {
        let completed = self
            .store
            .mutate(|records| {
                records
                    .iter_mut()
                    .filter_map(Record::as_event_mut)
                    .find(|e| e.id == id)
                    .map(|e| {
                        e.completed = !e.completed;
                        e.completed
                    })
            })
            .ok_or(PlannerError::EventNotFound(id))?;

        tracing::info!(%id, completed, "Toggled event");
        self.store.persist(&self.storage).await?;
        Ok(completed)
    }

    /// Delete an event by id. Returns the removed event.
    pub async fn remove(&mut self, id: EventId) -> PlannerResult<Event> {
        let removed = self
            .store
            .mutate(|records| {
                let index = records
                    .iter()
                    .position(|r| r.as_event().is_some_and(|e| e.id == id))?;
                match records.remove(index) {
                    Record::Event(event) => Some(event),
                    Record::Malformed(_) => None,
                }
            })
            .ok_or(PlannerError::EventNotFound(id))?;

        tracing::info!(%id, "Removed event");
        self.store.persist(&self.storage).await?;
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::priority::Level;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[derive(Default)]
    struct MemoryStorage {
        saved: Mutex<Vec<Record>>,
        fail_saves: AtomicBool,
    }

    impl EventStorage for MemoryStorage {
        async fn load(&self) -> PlannerResult<Vec<Record>> {
            Ok(self.saved.lock().unwrap().clone())
        }

        async fn save(&self, records: &[Record]) -> PlannerResult<()> {
            if self.fail_saves.load(Ordering::SeqCst) {
                return Err(PlannerError::Storage("server unreachable".into()));
            }
            *self.saved.lock().unwrap() = records.to_vec();
            Ok(())
        }
    }

    fn day(s: &str) -> CalendarDate {
        s.parse().unwrap()
    }

    async fn planner_on(date: &str) -> Planner<MemoryStorage> {
        let mut planner = Planner::load(MemoryStorage::default()).await.unwrap();
        planner.select_date(day(date));
        planner
    }

    #[tokio::test]
    async fn add_persists_the_whole_collection() {
        let mut planner = planner_on("2026-01-10").await;
        let first = planner
            .add(EventDraft::for_date("One", day("2026-01-10")))
            .await
            .unwrap();
        let second = planner
            .add(EventDraft::for_date("Two", day("2026-01-11")))
            .await
            .unwrap();

        assert!(second > first);
        assert_eq!(planner.storage.saved.lock().unwrap().len(), 2);
        let view = planner.day_view(LevelFilter::All);
        assert_eq!(view.active.len(), 1);
        assert_eq!(view.active[0].title, "One");
    }

    #[tokio::test]
    async fn invalid_draft_never_enters_the_collection() {
        let mut planner = planner_on("2026-01-10").await;
        let result = planner
            .add(EventDraft::for_date("", day("2026-01-10")))
            .await;
        assert!(matches!(result, Err(PlannerError::EmptyTitle)));
        assert!(planner.events().is_empty());
        assert!(planner.storage.saved.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn toggle_moves_event_between_partitions() {
        let mut planner = planner_on("2026-01-10").await;
        let mut draft = EventDraft::for_date("Ship", day("2026-01-10"));
        draft.level = Level::EMERGENCY;
        let id = planner.add(draft).await.unwrap();

        assert!(planner.toggle_completed(id).await.unwrap());
        let view = planner.day_view(LevelFilter::All);
        assert!(view.active.is_empty());
        assert_eq!(view.completed.len(), 1);
        assert!(view.colors.is_empty());
        assert!(
            planner.storage.saved.lock().unwrap()[0]
                .as_event()
                .unwrap()
                .completed
        );

        assert!(!planner.toggle_completed(id).await.unwrap());
    }

    #[tokio::test]
    async fn remove_and_unknown_ids() {
        let mut planner = planner_on("2026-01-10").await;
        let id = planner
            .add(EventDraft::for_date("Gone", day("2026-01-10")))
            .await
            .unwrap();

        assert_eq!(planner.remove(id).await.unwrap().title, "Gone");
        assert!(planner.storage.saved.lock().unwrap().is_empty());
        assert!(matches!(
            planner.remove(id).await,
            Err(PlannerError::EventNotFound(_))
        ));
        assert!(matches!(
            planner.toggle_completed(id).await,
            Err(PlannerError::EventNotFound(_))
        ));
    }

    #[tokio::test]
    async fn failed_save_keeps_in_memory_state() {
        let mut planner = planner_on("2026-01-10").await;
        planner.storage.fail_saves.store(true, Ordering::SeqCst);

        let result = planner
            .add(EventDraft::for_date("Offline", day("2026-01-10")))
            .await;
        assert!(matches!(result, Err(PlannerError::Storage(_))));
        assert_eq!(planner.events().len(), 1);
        assert!(planner.storage.saved.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn malformed_records_ride_along_unchanged() {
        let broken = Record::Malformed(serde_json::json!({"id": "abc", "start": null}));
        let storage = MemoryStorage {
            saved: Mutex::new(vec![broken.clone()]),
            fail_saves: AtomicBool::new(false),
        };
        let mut planner = Planner::load(storage).await.unwrap();
        planner.select_date(day("2026-01-10"));

        let id = planner
            .add(EventDraft::for_date("Fresh", day("2026-01-10")))
            .await
            .unwrap();
        planner.toggle_completed(id).await.unwrap();

        let saved = planner.storage.saved.lock().unwrap().clone();
        assert_eq!(saved.len(), 2);
        assert_eq!(saved[0], broken);
        let view = planner.day_view(LevelFilter::All);
        assert_eq!(view.completed.len(), 1);
        assert_eq!(view.skipped, vec![serde_json::json!("abc")]);
    }

    #[tokio::test]
    async fn selecting_a_date_notifies_subscribers() {
        let mut planner = planner_on("2026-01-10").await;
        let mut panel = planner.subscribe();
        planner.select_date(day("2026-02-14"));
        assert_eq!(
            panel.try_recv().unwrap(),
            UiMessage::DateSelected(day("2026-02-14"))
        );
        assert_eq!(planner.selected_date(), day("2026-02-14"));
    }
}
