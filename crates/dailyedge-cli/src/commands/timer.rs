use std::io::Write;
use std::time::Duration;

use clap::Subcommand;
use dailyedge_core::storage::{KvStore, TimerConfig};
use dailyedge_core::{Clock, DailyEdge, Event, TimerView};
use serde_json::json;
use tokio::time::MissedTickBehavior;
use tracing::info;

use crate::app::{print_json, App, CliResult};

#[derive(Subcommand)]
pub enum TimerAction {
    /// Run a study session in the foreground; Ctrl-C ends it early
    Run {
        /// Target in minutes, 1-600 (default: timer.default_target_minutes)
        #[arg(long, conflicts_with = "no_target")]
        minutes: Option<u32>,
        /// Count up with no target
        #[arg(long)]
        no_target: bool,
    },
    /// Add study time measured elsewhere
    Log {
        /// Seconds studied
        seconds: u64,
    },
}

pub fn run(app: &App, action: TimerAction) -> CliResult {
    let mut edge = app.open_engine()?;

    match action {
        TimerAction::Run { minutes, no_target } => {
            if no_target {
                edge.set_target(0);
            } else {
                let minutes = minutes.unwrap_or(app.config.timer.default_target_minutes);
                edge.set_target_minutes(i64::from(TimerConfig::clamp_minutes(minutes)));
            }
            let every = Duration::from_millis(app.config.timer.tick_interval_ms.max(1));

            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;
            let event = runtime.block_on(run_session(&mut edge, every))?;
            info!(?event, "study session ended");
            print_json(&json!({ "event": event, "stats": edge.stats() }))?;
        }
        TimerAction::Log { seconds } => {
            let event = edge.log_study(seconds);
            print_json(&json!({ "event": event, "stats": edge.stats() }))?;
        }
    }
    Ok(())
}

/// Tick until the target is reached or the user interrupts.
async fn run_session<S: KvStore, C: Clock>(
    edge: &mut DailyEdge<S, C>,
    every: Duration,
) -> std::io::Result<Event> {
    edge.start_timer();
    eprintln!("{}", edge.timer_view().target_label);

    let mut ticker = tokio::time::interval(every);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if let Some(event) = edge.tick() {
                    eprintln!();
                    return Ok(event);
                }
                render(&edge.timer_view());
            }
            result = &mut ctrl_c => {
                result?;
                eprintln!();
                return Ok(edge.stop_timer());
            }
        }
    }
}

fn render(view: &TimerView) {
    let mut stderr = std::io::stderr();
    let _ = write!(stderr, "\r{}  {:5.1}%", view.clock, view.progress_percent);
    let _ = stderr.flush();
}
