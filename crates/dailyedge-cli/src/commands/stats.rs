use clap::Subcommand;
use serde_json::json;

use crate::app::{print_json, App, CliResult};

#[derive(Subcommand)]
pub enum StatsAction {
    /// Today's study time, sessions and task counts
    Today,
}

pub fn run(app: &App, action: StatsAction) -> CliResult {
    let edge = app.open_engine()?;

    match action {
        StatsAction::Today => {
            let stats = edge.stats();
            print_json(&json!({
                "date": edge.state().date(),
                "study_seconds": edge.state().study_seconds(),
                "stats": stats,
                "labels": {
                    "study": stats.study_label(),
                    "sessions": stats.sessions_label(),
                    "completed": stats.completed_label(),
                },
            }))?;
        }
    }
    Ok(())
}
