//! Application state: the category map, completion history, and the
//! transient event slots surfaced to the UI.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

use crate::timer::Timer;

/// Insertion-ordered mapping of category name to its timers.
///
/// Categories are created on first insert and never removed, even when
/// they hold no timers. Iteration order is insertion order, which also
/// fixes the order in which a tick walks the timers.
///
/// Serializes as a plain JSON object (`{"Work": [...], ...}`),
/// preserving insertion order, to stay compatible with previously
/// persisted data.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryMap {
    entries: Vec<(String, Vec<Timer>)>,
}

impl CategoryMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, category: &str) -> Option<&[Timer]> {
        self.entries
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, timers)| timers.as_slice())
    }

    pub(crate) fn get_mut(&mut self, category: &str) -> Option<&mut Vec<Timer>> {
        self.entries
            .iter_mut()
            .find(|(name, _)| name == category)
            .map(|(_, timers)| timers)
    }

    /// Timers for `category`, creating the category at the end of the
    /// map if it does not exist yet.
    pub(crate) fn entry(&mut self, category: &str) -> &mut Vec<Timer> {
        let pos = match self.entries.iter().position(|(name, _)| name == category) {
            Some(pos) => pos,
            None => {
                self.entries.push((category.to_string(), Vec::new()));
                self.entries.len() - 1
            }
        };
        &mut self.entries[pos].1
    }

    /// Categories and their timers, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Timer])> {
        self.entries
            .iter()
            .map(|(name, timers)| (name.as_str(), timers.as_slice()))
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut Vec<Timer>)> {
        self.entries
            .iter_mut()
            .map(|(name, timers)| (name.as_str(), timers))
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Every timer across all categories, in tick order.
    pub fn timers(&self) -> impl Iterator<Item = &Timer> {
        self.entries.iter().flat_map(|(_, timers)| timers.iter())
    }

    pub fn find(&self, category: &str, id: Uuid) -> Option<&Timer> {
        self.get(category)?.iter().find(|t| t.id == id)
    }

    /// Number of categories, including empty ones.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for CategoryMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, timers) in &self.entries {
            map.serialize_entry(name, timers)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for CategoryMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CategoryMapVisitor;

        impl<'de> Visitor<'de> for CategoryMapVisitor {
            type Value = CategoryMap;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("a map of category name to timer list")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((name, timers)) = access.next_entry::<String, Vec<Timer>>()? {
                    entries.push((name, timers));
                }
                Ok(CategoryMap { entries })
            }
        }

        deserializer.deserialize_map(CategoryMapVisitor)
    }
}

/// Snapshot of a timer at the moment it completed.
///
/// Append-only: entries are never mutated or removed by the core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub timer: Timer,
    /// Completion time, epoch milliseconds.
    pub completed_at: i64,
}

/// The whole application state.
///
/// Created once at startup (from persisted data or empty defaults) and
/// mutated exclusively through [`crate::reduce`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub timers_by_category: CategoryMap,
    pub history: Vec<HistoryEntry>,
    /// Last timer that completed during the most recent tick. Stays
    /// set until the UI acknowledges it with
    /// [`crate::Command::ClearCompletedEvent`]. Never persisted.
    #[serde(skip)]
    pub completed_timer: Option<Timer>,
    /// Last timer that crossed its halfway point during the most
    /// recent tick. Cleared by [`crate::Command::ClearHalfwayEvent`].
    /// Never persisted.
    #[serde(skip)]
    pub halfway_timer: Option<Timer>,
}

impl AppState {
    pub fn find_timer(&self, category: &str, id: Uuid) -> Option<&Timer> {
        self.timers_by_category.find(category, id)
    }

    /// Pretty-printed JSON of the completion history -- the stable
    /// representation handed off to the platform share/export facility.
    pub fn export_history(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.history)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timer(name: &str) -> Timer {
        Timer::new(name, 60).unwrap()
    }

    #[test]
    fn entry_creates_categories_in_insertion_order() {
        let mut map = CategoryMap::new();
        map.entry("Work").push(timer("a"));
        map.entry("Home").push(timer("b"));
        map.entry("Work").push(timer("c"));
        let categories: Vec<&str> = map.categories().collect();
        assert_eq!(categories, ["Work", "Home"]);
        assert_eq!(map.get("Work").unwrap().len(), 2);
    }

    #[test]
    fn empty_categories_are_kept() {
        let mut map = CategoryMap::new();
        map.entry("Work");
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("Work"), Some(&[][..]));
    }

    #[test]
    fn find_locates_a_timer_by_category_and_id() {
        let mut map = CategoryMap::new();
        let t = timer("a");
        let id = t.id;
        map.entry("Work").push(t);
        assert!(map.find("Work", id).is_some());
        assert!(map.find("Home", id).is_none());
        assert!(map.find("Work", Uuid::new_v4()).is_none());
    }

    #[test]
    fn serializes_as_an_object_preserving_order() {
        let mut map = CategoryMap::new();
        map.entry("Zebra").push(timer("z"));
        map.entry("Alpha").push(timer("a"));
        let json = serde_json::to_string(&map).unwrap();
        // Insertion order, not alphabetical.
        assert!(json.find("Zebra").unwrap() < json.find("Alpha").unwrap());

        let parsed: CategoryMap = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, map);
        let categories: Vec<&str> = parsed.categories().collect();
        assert_eq!(categories, ["Zebra", "Alpha"]);
    }

    #[test]
    fn app_state_never_serializes_transient_events() {
        let mut state = AppState::default();
        state.completed_timer = Some(timer("done"));
        state.halfway_timer = Some(timer("half"));
        let value = serde_json::to_value(&state).unwrap();
        assert!(value.get("completedTimer").is_none());
        assert!(value.get("halfwayTimer").is_none());
        assert!(value.get("timersByCategory").is_some());
    }

    #[test]
    fn export_history_is_pretty_printed_and_stable() {
        let mut state = AppState::default();
        let mut done = timer("Workout");
        done.remaining = 0;
        done.status = crate::timer::TimerStatus::Completed;
        state.history.push(HistoryEntry {
            timer: done,
            completed_at: 1_700_000_000_000,
        });

        let first = state.export_history().unwrap();
        let second = state.export_history().unwrap();
        assert_eq!(first, second);
        assert!(first.contains("\"completedAt\": 1700000000000"));
        assert!(first.starts_with("[\n"));
    }
}
