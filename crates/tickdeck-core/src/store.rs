//! The state store: owns the application state, applies commands, and
//! publishes each new snapshot to subscribers.

use std::sync::{Arc, Mutex};

use serde::de::DeserializeOwned;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::command::Command;
use crate::error::CoreError;
use crate::reducer::reduce;
use crate::state::{AppState, CategoryMap, HistoryEntry};
use crate::storage::Storage;

/// Storage key for the category map.
pub const TIMERS_KEY: &str = "timers";
/// Storage key for the completion history.
pub const HISTORY_KEY: &str = "history";

/// Handle shared between the command sources (UI and ticker). The
/// mutex serializes command processing: one command at a time, never
/// concurrently.
pub type SharedStore = Arc<Mutex<Store>>;

/// Explicit state container with a single mutation entry point.
///
/// Every command -- user-issued or the ticker's `Tick` -- goes through
/// [`Store::dispatch`], which applies the reducer, writes the durable
/// parts of the new state through the storage layer, and publishes the
/// state on a watch channel.
pub struct Store {
    state: AppState,
    storage: Box<dyn Storage + Send>,
    publisher: watch::Sender<AppState>,
}

impl Store {
    /// Open a store over `storage`, loading whatever state was
    /// persisted. A failed read or parse is treated as absence of
    /// prior state, never as a fatal error. The single `LoadState`
    /// dispatch happens here, before any ticker starts.
    pub fn open(storage: Box<dyn Storage + Send>) -> Self {
        let (publisher, _) = watch::channel(AppState::default());
        let mut store = Self {
            state: AppState::default(),
            storage,
            publisher,
        };
        let timers: CategoryMap = store.load_json(TIMERS_KEY).unwrap_or_default();
        let history: Vec<HistoryEntry> = store.load_json(HISTORY_KEY).unwrap_or_default();
        store.dispatch(Command::LoadState { timers, history });
        store
    }

    /// Apply a command and return a snapshot of the resulting state.
    pub fn dispatch(&mut self, command: Command) -> AppState {
        debug!(?command, "dispatch");
        self.state = reduce(&self.state, &command);
        self.persist();
        self.publisher.send_replace(self.state.clone());
        self.state.clone()
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn snapshot(&self) -> AppState {
        self.state.clone()
    }

    /// Receiver observing every state published by `dispatch`.
    pub fn subscribe(&self) -> watch::Receiver<AppState> {
        self.publisher.subscribe()
    }

    pub fn into_shared(self) -> SharedStore {
        Arc::new(Mutex::new(self))
    }

    fn load_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.storage.load(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!(key, error = %e, "failed to read persisted state, starting empty");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key, error = %e, "failed to parse persisted state, starting empty");
                None
            }
        }
    }

    /// Write the durable parts of the state under separate keys. The
    /// transient event fields are never persisted. A failed write is
    /// logged and dropped; the next state change writes the full value
    /// again.
    fn persist(&mut self) {
        if let Err(e) = self.try_persist() {
            warn!(error = %e, "failed to persist state");
        }
    }

    fn try_persist(&mut self) -> Result<(), CoreError> {
        let timers = serde_json::to_string(&self.state.timers_by_category)?;
        let history = serde_json::to_string(&self.state.history)?;
        self.storage.save(TIMERS_KEY, &timers)?;
        self.storage.save(HISTORY_KEY, &history)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use crate::timer::Timer;

    #[test]
    fn open_on_empty_storage_yields_default_state() {
        let store = Store::open(Box::new(MemoryStore::new()));
        assert!(store.state().timers_by_category.is_empty());
        assert!(store.state().history.is_empty());
    }

    #[test]
    fn dispatch_writes_through_to_storage() {
        let mut storage = MemoryStore::new();
        // Pre-seed so we can tell the write happened.
        storage.save(TIMERS_KEY, "{}").unwrap();
        let mut store = Store::open(Box::new(storage));
        store.dispatch(Command::AddTimer {
            category: "Work".into(),
            timer: Timer::new("t", 60).unwrap(),
        });
        let raw = store.storage.load(TIMERS_KEY).unwrap().unwrap();
        assert!(raw.contains("\"Work\""));
        assert!(store.storage.load(HISTORY_KEY).unwrap().is_some());
    }

    #[test]
    fn corrupt_persisted_state_loads_as_empty_defaults() {
        let mut storage = MemoryStore::new();
        storage.save(TIMERS_KEY, "not json at all").unwrap();
        storage.save(HISTORY_KEY, "[{\"broken\": ").unwrap();
        let store = Store::open(Box::new(storage));
        assert!(store.state().timers_by_category.is_empty());
        assert!(store.state().history.is_empty());
    }

    #[test]
    fn subscribers_see_each_dispatched_state() {
        let mut store = Store::open(Box::new(MemoryStore::new()));
        let rx = store.subscribe();
        store.dispatch(Command::AddTimer {
            category: "Work".into(),
            timer: Timer::new("t", 60).unwrap(),
        });
        assert_eq!(*rx.borrow(), store.snapshot());
    }
}
