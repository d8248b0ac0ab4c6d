use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::day::DayKey;

/// Every state change in the engine produces an Event.
///
/// Events are returned from the mutating calls; the view reads them (and the
/// derived fields) after each call instead of subscribing to anything.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    TargetSet {
        target_secs: u64,
        at: DateTime<Utc>,
    },
    TimerStarted {
        target_secs: u64,
        elapsed_secs: f64,
        at: DateTime<Utc>,
    },
    TimerPaused {
        elapsed_secs: f64,
        at: DateTime<Utc>,
    },
    TimerReset {
        at: DateTime<Utc>,
    },
    /// Elapsed time was folded into today's totals.
    SessionCommitted {
        seconds: u64,
        finished: bool,
        at: DateTime<Utc>,
    },
    TaskAdded {
        id: String,
        text: String,
        at: DateTime<Utc>,
    },
    TaskToggled {
        id: String,
        done: bool,
        at: DateTime<Utc>,
    },
    TaskDeleted {
        id: String,
        at: DateTime<Utc>,
    },
    DayRolledOver {
        from: DayKey,
        to: DayKey,
        at: DateTime<Utc>,
    },
}
