//! The timer data model.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

/// Fallback label applied when a timer is created with a blank category.
pub const DEFAULT_CATEGORY: &str = "Uncategorized";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerStatus {
    Idle,
    Paused,
    Running,
    Completed,
}

/// A single countdown timer.
///
/// Serialized field names are camelCase and timestamps are epoch
/// milliseconds, matching data persisted by earlier versions of the
/// app.
///
/// Invariants maintained by the reducer: `remaining` only decreases
/// while the timer is running and stays within `[0, duration]`;
/// `remaining == 0` implies the timer is completed; `halfway_triggered`
/// implies the countdown has reached `duration / 2` at least once
/// since the last reset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timer {
    pub id: Uuid,
    pub name: String,
    /// Total duration in seconds. Always positive.
    pub duration: u64,
    /// Seconds left on the countdown.
    pub remaining: u64,
    pub status: TimerStatus,
    /// Older persisted data predates this field, hence the default.
    #[serde(default)]
    pub halfway_triggered: bool,
    /// Creation time, epoch milliseconds.
    pub created_at: i64,
}

impl Timer {
    /// Build a new paused timer with its full duration remaining.
    ///
    /// This is the validation boundary: the reducer trusts its input,
    /// so blank names and zero durations are rejected here, before a
    /// command is ever constructed. Id generation and timestamping
    /// also happen here, keeping the transition function free of I/O.
    pub fn new(name: &str, duration: u64) -> Result<Self, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if duration == 0 {
            return Err(ValidationError::InvalidDuration { value: duration });
        }
        Ok(Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            duration,
            remaining: duration,
            status: TimerStatus::Paused,
            halfway_triggered: false,
            created_at: Utc::now().timestamp_millis(),
        })
    }

    pub fn is_running(&self) -> bool {
        self.status == TimerStatus::Running
    }

    pub fn is_completed(&self) -> bool {
        self.status == TimerStatus::Completed
    }

    /// The `remaining` value at which the halfway event fires.
    pub fn halfway_point(&self) -> u64 {
        self.duration / 2
    }

    /// 0.0 .. 1.0 progress through the countdown.
    pub fn progress(&self) -> f64 {
        if self.duration == 0 {
            return 0.0;
        }
        (self.duration - self.remaining) as f64 / self.duration as f64
    }
}
