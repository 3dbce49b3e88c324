//! SOS event journal.
//!
//! One record per SOS occurrence, appended to the durable history the
//! instant dispatch begins and updated in place once fan-out finishes.
//! A crash mid-dispatch therefore still leaves an auditable
//! "triggered" entry. The history is append-only; nothing in the
//! dispatch path ever deletes an event. `clear` is the explicit
//! bulk-clear operation and the only way entries go away.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::StorageError;
use crate::location::Coordinates;
use crate::storage::{Store, HISTORY_KEY};

/// How the SOS was triggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SosMethod {
    Manual,
    Watch,
    Voice,
    Ai,
}

impl SosMethod {
    pub fn label(self) -> &'static str {
        match self {
            SosMethod::Manual => "manual",
            SosMethod::Watch => "watch",
            SosMethod::Voice => "voice",
            SosMethod::Ai => "ai",
        }
    }
}

/// Lifecycle status of an SOS event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SosStatus {
    Triggered,
    Cancelled,
    Completed,
}

/// One SOS occurrence.
///
/// `id`, `timestamp`, and `method` are fixed at creation; only
/// `status` and `location` mutate afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SosEvent {
    pub id: String,
    /// Epoch milliseconds at the instant dispatch began.
    pub timestamp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Coordinates>,
    pub status: SosStatus,
    pub method: SosMethod,
}

impl SosEvent {
    /// Open a fresh event in the `triggered` state.
    pub fn open(method: SosMethod) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now().timestamp_millis(),
            location: None,
            status: SosStatus::Triggered,
            method,
        }
    }

    /// Attach the acquired position.
    pub fn attach_location(&mut self, coords: Coordinates) {
        self.location = Some(coords);
    }

    /// Mark the event completed after fan-out.
    pub fn close(&mut self) {
        self.status = SosStatus::Completed;
    }
}

/// Append-or-update view over the durable SOS history.
pub struct Journal<'a> {
    store: &'a dyn Store,
}

impl<'a> Journal<'a> {
    pub fn new(store: &'a dyn Store) -> Self {
        Self { store }
    }

    /// Write `event` into the history.
    ///
    /// Idempotent by id: a known id updates the stored entry in place,
    /// an unknown id appends. Writes are synchronous.
    pub fn record(&self, event: &SosEvent) -> Result<(), StorageError> {
        let mut history = self.history()?;
        match history.iter_mut().find(|e| e.id == event.id) {
            Some(existing) => *existing = event.clone(),
            None => history.push(event.clone()),
        }
        let json = serde_json::to_string(&history).map_err(|e| StorageError::CorruptRecord {
            key: HISTORY_KEY.to_string(),
            message: e.to_string(),
        })?;
        self.store.set(HISTORY_KEY, &json)
    }

    /// All recorded events in append order.
    pub fn history(&self) -> Result<Vec<SosEvent>, StorageError> {
        match self.store.get(HISTORY_KEY)? {
            Some(json) => {
                serde_json::from_str(&json).map_err(|e| StorageError::CorruptRecord {
                    key: HISTORY_KEY.to_string(),
                    message: e.to_string(),
                })
            }
            None => Ok(Vec::new()),
        }
    }

    /// Drop the entire history. The only deletion path.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.store.remove(HISTORY_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn open_starts_triggered_with_fresh_id() {
        let a = SosEvent::open(SosMethod::Manual);
        let b = SosEvent::open(SosMethod::Manual);
        assert_eq!(a.status, SosStatus::Triggered);
        assert!(a.location.is_none());
        assert_ne!(a.id, b.id);
        assert!(a.timestamp > 0);
    }

    #[test]
    fn record_appends_then_updates_in_place() {
        let store = MemoryStore::new();
        let journal = Journal::new(&store);

        let mut event = SosEvent::open(SosMethod::Manual);
        journal.record(&event).unwrap();
        assert_eq!(journal.history().unwrap().len(), 1);

        event.attach_location(Coordinates::new(37.77, -122.41));
        event.close();
        journal.record(&event).unwrap();

        let history = journal.history().unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].status, SosStatus::Completed);
        assert_eq!(history[0].location.unwrap().latitude, 37.77);
    }

    #[test]
    fn history_preserves_append_order() {
        let store = MemoryStore::new();
        let journal = Journal::new(&store);

        let first = SosEvent::open(SosMethod::Manual);
        let second = SosEvent::open(SosMethod::Watch);
        journal.record(&first).unwrap();
        journal.record(&second).unwrap();

        let history = journal.history().unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].id, first.id);
        assert_eq!(history[1].id, second.id);
        assert_eq!(history[1].method, SosMethod::Watch);
    }

    #[test]
    fn clear_empties_history() {
        let store = MemoryStore::new();
        let journal = Journal::new(&store);
        journal.record(&SosEvent::open(SosMethod::Manual)).unwrap();
        journal.clear().unwrap();
        assert!(journal.history().unwrap().is_empty());
    }

    #[test]
    fn event_serializes_without_empty_location() {
        let event = SosEvent::open(SosMethod::Ai);
        let json = serde_json::to_string(&event).unwrap();
        assert!(!json.contains("location"));
        assert!(json.contains("\"status\":\"triggered\""));
        assert!(json.contains("\"method\":\"ai\""));
    }
}
