//! Read-side projection of the timer for the view.

use serde::Serialize;

use super::engine::{TimerEngine, TimerState};

/// Everything a view needs to draw the timer panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimerView {
    pub state: TimerState,
    pub elapsed_secs: f64,
    pub target_secs: u64,
    pub remaining_secs: f64,
    pub progress_percent: f64,
    /// `HH:MM:SS` of `remaining_secs`.
    pub clock: String,
    pub target_label: String,
}

impl From<&TimerEngine> for TimerView {
    fn from(engine: &TimerEngine) -> Self {
        let remaining_secs = engine.remaining_secs();
        Self {
            state: engine.state(),
            elapsed_secs: engine.elapsed_secs(),
            target_secs: engine.target_secs(),
            remaining_secs,
            progress_percent: engine.progress_percent(),
            clock: format_clock(remaining_secs),
            target_label: target_label(engine.target_secs()),
        }
    }
}

/// Format floored seconds as `HH:MM:SS`. Hours are not wrapped.
pub fn format_clock(secs: f64) -> String {
    let total = if secs.is_finite() && secs > 0.0 {
        secs.floor() as u64
    } else {
        0
    };
    format!(
        "{:02}:{:02}:{:02}",
        total / 3600,
        (total % 3600) / 60,
        total % 60
    )
}

pub fn target_label(target_secs: u64) -> String {
    if target_secs == 0 {
        "No target set".to_string()
    } else {
        let minutes = (target_secs as f64 / 60.0).round() as u64;
        format!("Target set: {minutes} min")
    }
}
