use clap::Subcommand;
use uuid::Uuid;

use tickdeck_core::{AppState, Command, Config, Timer, TimerStatus};

#[derive(Subcommand)]
pub enum TimerAction {
    /// Create a new timer (paused, at its full duration)
    Add {
        /// Timer name
        name: String,
        /// Duration in seconds
        #[arg(long)]
        duration: u64,
        /// Category (defaults to the configured fallback)
        #[arg(long)]
        category: Option<String>,
    },
    /// Start a timer
    Start {
        #[arg(long)]
        category: String,
        #[arg(long)]
        id: Uuid,
    },
    /// Pause a timer
    Pause {
        #[arg(long)]
        category: String,
        #[arg(long)]
        id: Uuid,
    },
    /// Reset a timer to its full duration
    Reset {
        #[arg(long)]
        category: String,
        #[arg(long)]
        id: Uuid,
    },
    /// Start every timer in a category
    StartAll { category: String },
    /// Pause every timer in a category
    PauseAll { category: String },
    /// Reset every timer in a category, completed ones included
    ResetAll { category: String },
    /// List timers grouped by category
    List {
        /// Only show this category
        #[arg(long)]
        category: Option<String>,
        /// Print raw JSON instead of the table
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let mut store = super::open_store(&config)?;

    match action {
        TimerAction::Add {
            name,
            duration,
            category,
        } => {
            // Validation happens here, before the command exists; the
            // reducer trusts its input.
            let timer = Timer::new(&name, duration)?;
            let category = match category {
                Some(c) if !c.trim().is_empty() => c,
                _ => config.default_category.clone(),
            };
            println!(
                "Created '{}' ({}s) in '{}': {}",
                timer.name, timer.duration, category, timer.id
            );
            store.dispatch(Command::AddTimer { category, timer });
        }
        TimerAction::Start { category, id } => {
            store.dispatch(Command::StartTimer { category, id });
        }
        TimerAction::Pause { category, id } => {
            store.dispatch(Command::PauseTimer { category, id });
        }
        TimerAction::Reset { category, id } => {
            store.dispatch(Command::ResetTimer { category, id });
        }
        TimerAction::StartAll { category } => {
            store.dispatch(Command::StartAllInCategory { category });
        }
        TimerAction::PauseAll { category } => {
            store.dispatch(Command::PauseAllInCategory { category });
        }
        TimerAction::ResetAll { category } => {
            store.dispatch(Command::ResetAllInCategory { category });
        }
        TimerAction::List { category, json } => {
            list(store.state(), category.as_deref(), json)?;
        }
    }
    Ok(())
}

fn list(
    state: &AppState,
    filter: Option<&str>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&state.timers_by_category)?
        );
        return Ok(());
    }

    if state.timers_by_category.is_empty() {
        println!("No timers yet. Create one with `tickdeck timer add`.");
        return Ok(());
    }

    for (category, timers) in state.timers_by_category.iter() {
        if filter.is_some_and(|f| f != category) {
            continue;
        }
        println!("{category}");
        for timer in timers {
            println!(
                "  {}  {:<24} {:>6}  {:>4.0}%  {}",
                timer.id,
                timer.name,
                format_remaining(timer.remaining),
                timer.progress() * 100.0,
                status_label(timer.status),
            );
        }
    }
    Ok(())
}

fn status_label(status: TimerStatus) -> &'static str {
    match status {
        TimerStatus::Running => "running",
        TimerStatus::Paused => "paused",
        TimerStatus::Completed => "completed",
        TimerStatus::Idle => "idle",
    }
}

fn format_remaining(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
