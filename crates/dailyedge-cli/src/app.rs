//! Shared setup for every command: data directory, configuration, engine.

use std::error::Error;
use std::path::PathBuf;

use dailyedge_core::storage::{self, Config, Database, StateStore};
use dailyedge_core::{DailyEdge, SystemClock};
use serde::Serialize;

pub type CliResult<T = ()> = Result<T, Box<dyn Error>>;

pub struct App {
    pub dir: PathBuf,
    pub config: Config,
}

impl App {
    /// Resolve the data directory and read the configuration from it.
    pub fn load(data_dir: Option<PathBuf>) -> CliResult<Self> {
        let dir = match data_dir {
            Some(dir) => {
                std::fs::create_dir_all(&dir)?;
                dir
            }
            None => storage::data_dir()?,
        };
        let config = Config::load_or_default(&dir);
        Ok(Self { dir, config })
    }

    /// Open the engine on the SQLite store with the configured key and timezone.
    pub fn open_engine(&self) -> CliResult<DailyEdge<Database, SystemClock>> {
        let db = Database::open_in(&self.dir)?;
        let clock = self.config.clock()?;
        let store = StateStore::with_key(db, self.config.storage.key.clone());
        Ok(DailyEdge::open(store, clock))
    }
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> CliResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
