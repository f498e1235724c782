use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::Subcommand;

use tickdeck_core::Config;

#[derive(Subcommand)]
pub enum HistoryAction {
    /// List completed timers in chronological order
    List,
    /// Write the history as pretty-printed JSON for sharing
    Export {
        /// Output path
        #[arg(long, default_value = "timer_history.json")]
        out: PathBuf,
    },
}

pub fn run(action: HistoryAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let store = super::open_store(&config)?;
    let state = store.state();

    match action {
        HistoryAction::List => {
            if state.history.is_empty() {
                println!("No completed timers yet.");
                return Ok(());
            }
            for entry in &state.history {
                println!(
                    "{}  {}  ({}s)",
                    format_timestamp(entry.completed_at),
                    entry.timer.name,
                    entry.timer.duration,
                );
            }
        }
        HistoryAction::Export { out } => {
            let json = state.export_history()?;
            std::fs::write(&out, json)?;
            println!("History exported to {}", out.display());
        }
    }
    Ok(())
}

fn format_timestamp(epoch_ms: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(epoch_ms)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| epoch_ms.to_string())
}
