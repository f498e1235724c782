pub mod config;
pub mod history;
pub mod timer;
pub mod watch;

use tickdeck_core::{Config, FileStore, Store};

/// Open the store over the configured data directory, loading
/// persisted state.
pub fn open_store(config: &Config) -> Result<Store, Box<dyn std::error::Error>> {
    let storage = FileStore::open(config.resolve_data_dir())?;
    Ok(Store::open(Box::new(storage)))
}
