use clap::Subcommand;
use dailyedge_core::storage::Config;

use crate::app::{App, CliResult};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a config value
    Get {
        /// Config key (e.g. "timer.default_target_minutes", "clock.timezone")
        key: String,
    },
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// New value
        value: String,
    },
    /// List all config values
    List,
    /// Reset config to defaults
    Reset,
}

pub fn run(app: &App, action: ConfigAction) -> CliResult {
    match action {
        ConfigAction::Get { key } => match app.config.get(&key) {
            Some(value) => println!("{value}"),
            None => return Err(format!("unknown config key: {key}").into()),
        },
        ConfigAction::Set { key, value } => {
            let mut config = app.config.clone();
            config.set(&key, &value)?;
            config.save(&app.dir)?;
            println!("ok");
        }
        ConfigAction::List => {
            let json = serde_json::to_string_pretty(&app.config)?;
            println!("{json}");
        }
        ConfigAction::Reset => {
            Config::default().save(&app.dir)?;
            println!("config reset to defaults");
        }
    }
    Ok(())
}
