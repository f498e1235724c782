//! Commands accepted by the state transition function.

use uuid::Uuid;

use crate::state::{CategoryMap, HistoryEntry};
use crate::timer::Timer;

/// Every mutation of [`crate::AppState`] is expressed as one of these
/// commands and applied through [`crate::reduce`].
///
/// Commands carry fully-formed payloads: id generation, timestamping
/// and validation all happen before a command is constructed, so the
/// transition function never performs I/O and never fails. Lookups
/// that miss (unknown category or id) are silent no-ops -- commands
/// originate from the trusted UI layer, which cannot normally
/// reference a nonexistent timer.
#[derive(Debug, Clone)]
pub enum Command {
    /// Replace timers and history wholesale. Issued exactly once at
    /// startup with whatever the storage layer read back.
    LoadState {
        timers: CategoryMap,
        history: Vec<HistoryEntry>,
    },
    /// Append a pre-built timer to a category, creating the category
    /// on first use. A blank category falls back to
    /// [`crate::DEFAULT_CATEGORY`].
    AddTimer { category: String, timer: Timer },
    /// Set a timer running. No-op if it is already completed.
    StartTimer { category: String, id: Uuid },
    /// Pause a timer. No-op if it is already completed.
    PauseTimer { category: String, id: Uuid },
    /// Restore a timer to its full duration, paused, halfway flag
    /// cleared -- regardless of its current state.
    ResetTimer { category: String, id: Uuid },
    /// Start every non-completed timer in a category.
    StartAllInCategory { category: String },
    /// Pause every non-completed timer in a category.
    PauseAllInCategory { category: String },
    /// Reset every timer in a category, completed ones included.
    ResetAllInCategory { category: String },
    /// Advance every running timer by one second.
    Tick,
    /// Acknowledge the surfaced completion event.
    ClearCompletedEvent,
    /// Acknowledge the surfaced halfway event.
    ClearHalfwayEvent,
}
