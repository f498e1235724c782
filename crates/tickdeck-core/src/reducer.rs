//! The state transition function.
//!
//! `reduce` is the only place application state changes. It is pure:
//! it never mutates its input, performs no I/O, and always returns a
//! new state -- the unchanged input's clone when a command has no
//! effect.

use chrono::Utc;
use uuid::Uuid;

use crate::command::Command;
use crate::state::{AppState, HistoryEntry};
use crate::timer::{Timer, TimerStatus, DEFAULT_CATEGORY};

/// Apply `command` to `state` and return the resulting state.
pub fn reduce(state: &AppState, command: &Command) -> AppState {
    let mut next = state.clone();
    match command {
        Command::LoadState { timers, history } => {
            let mut timers = timers.clone();
            // Earlier versions could persist a running timer stranded
            // at zero; restore the completed marker on load so that
            // remaining == 0 always means completed.
            for (_, list) in timers.iter_mut() {
                for timer in list.iter_mut() {
                    if timer.remaining == 0 && !timer.is_completed() {
                        timer.status = TimerStatus::Completed;
                    }
                }
            }
            next.timers_by_category = timers;
            next.history = history.clone();
        }
        Command::AddTimer { category, timer } => {
            let category = match category.trim() {
                "" => DEFAULT_CATEGORY,
                trimmed => trimmed,
            };
            next.timers_by_category.entry(category).push(timer.clone());
        }
        Command::StartTimer { category, id } => {
            update_timer(&mut next, category, *id, |timer| {
                if !timer.is_completed() {
                    timer.status = TimerStatus::Running;
                }
            });
        }
        Command::PauseTimer { category, id } => {
            update_timer(&mut next, category, *id, |timer| {
                if !timer.is_completed() {
                    timer.status = TimerStatus::Paused;
                }
            });
        }
        Command::ResetTimer { category, id } => {
            update_timer(&mut next, category, *id, reset);
        }
        Command::StartAllInCategory { category } => {
            update_category(&mut next, category, |timer| {
                if !timer.is_completed() {
                    timer.status = TimerStatus::Running;
                }
            });
        }
        Command::PauseAllInCategory { category } => {
            update_category(&mut next, category, |timer| {
                if !timer.is_completed() {
                    timer.status = TimerStatus::Paused;
                }
            });
        }
        Command::ResetAllInCategory { category } => {
            update_category(&mut next, category, reset);
        }
        Command::Tick => tick(&mut next),
        Command::ClearCompletedEvent => next.completed_timer = None,
        Command::ClearHalfwayEvent => next.halfway_timer = None,
    }
    next
}

/// Apply `f` to the matching timer. Unknown category or id leaves the
/// state untouched.
fn update_timer(state: &mut AppState, category: &str, id: Uuid, f: impl FnOnce(&mut Timer)) {
    if let Some(timers) = state.timers_by_category.get_mut(category) {
        if let Some(timer) = timers.iter_mut().find(|t| t.id == id) {
            f(timer);
        }
    }
}

fn update_category(state: &mut AppState, category: &str, f: impl Fn(&mut Timer)) {
    if let Some(timers) = state.timers_by_category.get_mut(category) {
        for timer in timers.iter_mut() {
            f(timer);
        }
    }
}

fn reset(timer: &mut Timer) {
    timer.remaining = timer.duration;
    timer.status = TimerStatus::Paused;
    timer.halfway_triggered = false;
}

/// Advance every running timer by one second, in category order then
/// sequence order.
///
/// Only the last timer to cross its halfway point or complete within a
/// single tick occupies the corresponding transient slot; earlier ones
/// in the same tick are overwritten (last-wins). Slots left over from
/// earlier ticks stay set until explicitly cleared.
fn tick(state: &mut AppState) {
    let mut halfway: Option<Timer> = None;
    let mut completed: Option<Timer> = None;
    let mut finished: Vec<Timer> = Vec::new();

    for (_, timers) in state.timers_by_category.iter_mut() {
        for timer in timers.iter_mut() {
            if !timer.is_running() {
                continue;
            }
            if timer.remaining > 0
                && !timer.halfway_triggered
                && timer.remaining == timer.halfway_point()
            {
                timer.halfway_triggered = true;
                timer.remaining -= 1;
                halfway = Some(timer.clone());
                // For durations of 2 and 3 the halfway point is also
                // the final second; the timer completes on the same
                // tick so that remaining == 0 always means completed.
                if timer.remaining == 0 {
                    timer.status = TimerStatus::Completed;
                    completed = Some(timer.clone());
                    finished.push(timer.clone());
                }
            } else if timer.remaining > 1 {
                timer.remaining -= 1;
            } else if timer.remaining == 1 {
                timer.remaining = 0;
                timer.status = TimerStatus::Completed;
                completed = Some(timer.clone());
                finished.push(timer.clone());
            }
            // remaining == 0: already completed, nothing to advance.
        }
    }

    let now = Utc::now().timestamp_millis();
    for timer in finished {
        state.history.push(HistoryEntry {
            timer,
            completed_at: now,
        });
    }
    if halfway.is_some() {
        state.halfway_timer = halfway;
    }
    if completed.is_some() {
        state.completed_timer = completed;
    }
}
