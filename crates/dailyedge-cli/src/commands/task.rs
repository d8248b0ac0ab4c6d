//! Task list commands.

use clap::Subcommand;
use serde_json::json;

use crate::app::{print_json, App, CliResult};

#[derive(Subcommand)]
pub enum TaskAction {
    /// Add a task to the top of the list
    Add {
        /// Task text
        text: String,
    },
    /// List tasks, newest first
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Mark a task done, or open it again
    Toggle {
        /// Task ID
        id: String,
    },
    /// Delete a task
    Delete {
        /// Task ID
        id: String,
    },
}

pub fn run(app: &App, action: TaskAction) -> CliResult {
    let mut edge = app.open_engine()?;

    match action {
        TaskAction::Add { text } => {
            let event = edge.add_task(&text)?;
            print_json(&json!({ "event": event, "stats": edge.stats() }))?;
        }
        TaskAction::List { json } => {
            if json {
                print_json(edge.tasks())?;
            } else if edge.tasks().is_empty() {
                println!("No tasks.");
            } else {
                for task in edge.tasks() {
                    let mark = if task.done { "x" } else { " " };
                    println!("[{mark}] {}  ({})", task.text, task.id);
                }
                let stats = edge.stats();
                println!("{} active, {}", stats.active_tasks, stats.completed_label());
            }
        }
        TaskAction::Toggle { id } => match edge.toggle_task(&id) {
            Some(event) => print_json(&json!({ "event": event, "stats": edge.stats() }))?,
            None => eprintln!("no task with id {id}"),
        },
        TaskAction::Delete { id } => match edge.delete_task(&id) {
            Some(event) => print_json(&json!({ "event": event, "stats": edge.stats() }))?,
            None => eprintln!("no task with id {id}"),
        },
    }
    Ok(())
}
