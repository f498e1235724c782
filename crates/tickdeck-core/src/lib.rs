//! # Tickdeck Core Library
//!
//! Core logic for Tickdeck, a categorized countdown timer tracker:
//! users create named timers grouped into categories, start/pause/reset
//! them individually or in bulk, and review a history of completions.
//! State is written through to local storage after every change and
//! survives restarts.
//!
//! ## Architecture
//!
//! - [`reduce`]: the pure state transition function -- every state
//!   change in the system flows through it, one command at a time
//! - [`Store`]: the state container; applies commands, writes the
//!   durable parts of the state through [`Storage`], and publishes
//!   each new snapshot to watch subscribers
//! - [`Ticker`]: the 1-second cadence driving the countdown, with an
//!   explicit spawn/stop lifecycle owned by whoever builds the store
//! - [`FileStore`] / [`MemoryStore`]: storage backends behind the
//!   [`Storage`] seam
//!
//! The UI (here, the CLI crate) is a thin collaborator: it validates
//! input, constructs commands, and renders state snapshots.

pub mod command;
pub mod config;
pub mod error;
pub mod reducer;
pub mod state;
pub mod storage;
pub mod store;
pub mod ticker;
pub mod timer;

pub use command::Command;
pub use config::Config;
pub use error::{ConfigError, CoreError, StorageError, ValidationError};
pub use reducer::reduce;
pub use state::{AppState, CategoryMap, HistoryEntry};
pub use storage::{data_dir, FileStore, MemoryStore, Storage};
pub use store::{SharedStore, Store};
pub use ticker::Ticker;
pub use timer::{Timer, TimerStatus, DEFAULT_CATEGORY};
