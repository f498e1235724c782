//! Foreground countdown mode: runs the ticker and announces surfaced
//! events until interrupted.

use tracing::info;

use tickdeck_core::{Command, Config, SharedStore, Ticker};

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(watch())
}

async fn watch() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let store = super::open_store(&config)?;
    let mut updates = store.subscribe();
    let shared = store.into_shared();

    let ticker = Ticker::spawn(shared.clone());
    info!("watching; press ctrl-c to stop");

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let (halfway, completed) = {
                    let state = updates.borrow_and_update();
                    (state.halfway_timer.clone(), state.completed_timer.clone())
                };
                // Announce each surfaced event once, then clear it so
                // it does not resurface on the next state change.
                if let Some(timer) = halfway {
                    println!(
                        "Halfway there: '{}' has {}s left",
                        timer.name, timer.remaining
                    );
                    dispatch(&shared, Command::ClearHalfwayEvent);
                }
                if let Some(timer) = completed {
                    println!("Great job! You completed '{}'", timer.name);
                    dispatch(&shared, Command::ClearCompletedEvent);
                }
            }
        }
    }

    // Structured teardown: the ticker never outlives the watch loop.
    ticker.stop().await;
    Ok(())
}

fn dispatch(store: &SharedStore, command: Command) {
    if let Ok(mut store) = store.lock() {
        store.dispatch(command);
    }
}
