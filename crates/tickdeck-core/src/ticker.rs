//! The tick driver: a fixed 1-second cadence issuing `Command::Tick`.
//!
//! The cadence is nominal -- no correction for scheduling jitter,
//! since durations are whole seconds and exactness is not required.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{info, warn};

use crate::command::Command;
use crate::store::SharedStore;

pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Periodic trigger with an explicit lifecycle: [`Ticker::spawn`]
/// paired with [`Ticker::stop`], owned by whoever constructs the
/// store rather than tied to any UI lifetime.
///
/// Its only job is to dispatch [`Command::Tick`] once per interval.
/// The store mutex serializes each tick with user-issued commands, so
/// ticks never overlap: if persistence momentarily blocks, the next
/// tick queues behind it.
pub struct Ticker {
    shutdown: watch::Sender<bool>,
    handle: Option<JoinHandle<()>>,
}

impl Ticker {
    /// Spawn the tick task. Must be called within a tokio runtime.
    pub fn spawn(store: SharedStore) -> Self {
        let (shutdown, mut shutdown_rx) = watch::channel(false);
        let handle = tokio::spawn(async move {
            info!("ticker started");
            let mut interval = interval(TICK_INTERVAL);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // An interval's first tick completes immediately; consume
            // it so the first real tick lands one full second out.
            interval.tick().await;
            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        match store.lock() {
                            Ok(mut store) => {
                                store.dispatch(Command::Tick);
                            }
                            Err(e) => {
                                warn!(error = %e, "store lock poisoned, skipping tick");
                            }
                        }
                    }
                    _ = shutdown_rx.changed() => {
                        info!("ticker stopping");
                        break;
                    }
                }
            }
        });
        Self {
            shutdown,
            handle: Some(handle),
        }
    }

    /// Signal the task to stop and wait for it to finish.
    pub async fn stop(mut self) {
        let _ = self.shutdown.send(true);
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        // Teardown is guaranteed even when `stop` was never awaited.
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}
