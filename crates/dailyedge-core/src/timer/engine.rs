//! Study timer engine.
//!
//! The timer engine is a wall-clock-delta state machine. It does not use
//! internal threads - the caller schedules `tick()` and supplies the current
//! monotonic instant to every command.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running -> (Paused -> Running | stop) -> Idle
//! ```
//!
//! `stop` folds the elapsed time into the [`DailyState`] and returns to `Idle`.
//! `reset` returns to `Idle` without committing anything.
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = TimerEngine::new();
//! engine.set_target(25 * 60);
//! engine.start(clock.now());
//! // On every scheduled tick:
//! if let Some(event) = engine.tick(clock.now(), &mut state) {
//!     // target reached, session committed
//! }
//! ```

use std::time::Instant;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::events::Event;
use crate::state::DailyState;

/// Upper bound for a target, one full day.
pub const MAX_TARGET_SECS: u64 = 24 * 60 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    Idle,
    Running,
    Paused,
}

/// Transient study session.
///
/// Nothing here is persisted; only the effect of `stop` reaches the daily state.
#[derive(Debug, Clone)]
pub struct TimerEngine {
    state: TimerState,
    elapsed_secs: f64,
    /// 0 means count up with no target.
    target_secs: u64,
    /// Instant of the last flush while running.
    last_tick: Option<Instant>,
}

impl Default for TimerEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TimerEngine {
    /// Idle timer with no target.
    pub fn new() -> Self {
        Self {
            state: TimerState::Idle,
            elapsed_secs: 0.0,
            target_secs: 0,
            last_tick: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed_secs
    }

    pub fn target_secs(&self) -> u64 {
        self.target_secs
    }

    /// Seconds left to the target, or the elapsed time when counting up.
    pub fn remaining_secs(&self) -> f64 {
        if self.target_secs > 0 {
            (self.target_secs as f64 - self.elapsed_secs).max(0.0)
        } else {
            self.elapsed_secs
        }
    }

    /// 0.0 .. 100.0 progress towards the target; 0 when counting up.
    pub fn progress_percent(&self) -> f64 {
        if self.target_secs == 0 {
            return 0.0;
        }
        (self.elapsed_secs / self.target_secs as f64 * 100.0).clamp(0.0, 100.0)
    }

    fn target_reached(&self) -> bool {
        self.target_secs > 0 && self.elapsed_secs >= self.target_secs as f64
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Set the target in seconds, clamped to `0..=86400`.
    pub fn set_target(&mut self, secs: i64) -> Event {
        self.target_secs = secs.clamp(0, MAX_TARGET_SECS as i64) as u64;
        debug!(target_secs = self.target_secs, "timer target set");
        Event::TargetSet {
            target_secs: self.target_secs,
            at: Utc::now(),
        }
    }

    /// Set the target in minutes, clamped like [`set_target`](Self::set_target).
    pub fn set_target_minutes(&mut self, minutes: i64) -> Event {
        self.set_target(minutes.saturating_mul(60))
    }

    pub fn start(&mut self, now: Instant) -> Option<Event> {
        match self.state {
            TimerState::Running => None,
            TimerState::Idle | TimerState::Paused => {
                self.state = TimerState::Running;
                self.last_tick = Some(now);
                debug!(elapsed_secs = self.elapsed_secs, "timer started");
                Some(Event::TimerStarted {
                    target_secs: self.target_secs,
                    elapsed_secs: self.elapsed_secs,
                    at: Utc::now(),
                })
            }
        }
    }

    pub fn pause(&mut self, now: Instant) -> Option<Event> {
        match self.state {
            TimerState::Running => {
                // Flush elapsed time first.
                self.flush_elapsed(now);
                self.state = TimerState::Paused;
                self.last_tick = None;
                debug!(elapsed_secs = self.elapsed_secs, "timer paused");
                Some(Event::TimerPaused {
                    elapsed_secs: self.elapsed_secs,
                    at: Utc::now(),
                })
            }
            _ => None,
        }
    }

    /// Discard the current run without committing it.
    pub fn reset(&mut self) -> Event {
        self.state = TimerState::Idle;
        self.elapsed_secs = 0.0;
        self.last_tick = None;
        debug!("timer reset");
        Event::TimerReset { at: Utc::now() }
    }

    /// End the run and commit its rounded elapsed seconds into `daily`.
    ///
    /// Counts as a finished session only if a target was set and reached.
    pub fn stop(&mut self, now: Instant, daily: &mut DailyState) -> Event {
        if self.is_running() {
            self.flush_elapsed(now);
        }
        let finished = self.target_reached();
        let seconds = self.elapsed_secs.round() as u64;
        daily.record_study(seconds, finished);

        self.state = TimerState::Idle;
        self.elapsed_secs = 0.0;
        self.last_tick = None;
        debug!(seconds, finished, "timer session committed");
        Event::SessionCommitted {
            seconds,
            finished,
            at: Utc::now(),
        }
    }

    /// Call on every scheduled tick while running.
    ///
    /// Returns `Some(Event::SessionCommitted)` when the target was reached and
    /// the session was stopped.
    pub fn tick(&mut self, now: Instant, daily: &mut DailyState) -> Option<Event> {
        if !self.is_running() {
            return None;
        }
        self.flush_elapsed(now);
        if self.target_reached() {
            return Some(self.stop(now, daily));
        }
        None
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn flush_elapsed(&mut self, now: Instant) {
        if let Some(last) = self.last_tick {
            // saturating: an earlier `now` contributes nothing
            let delta = now.saturating_duration_since(last);
            self.elapsed_secs += delta.as_secs_f64();
            self.last_tick = Some(now.max(last));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn state() -> DailyState {
        DailyState::new("2024-01-15".parse().unwrap())
    }

    #[test]
    fn start_pause_resume() {
        let t0 = Instant::now();
        let mut engine = TimerEngine::new();
        assert_eq!(engine.state(), TimerState::Idle);

        assert!(engine.start(t0).is_some());
        assert_eq!(engine.state(), TimerState::Running);
        assert!(engine.start(t0).is_none());

        assert!(engine.pause(t0 + Duration::from_secs(10)).is_some());
        assert_eq!(engine.state(), TimerState::Paused);
        assert_eq!(engine.elapsed_secs(), 10.0);

        assert!(engine.start(t0 + Duration::from_secs(100)).is_some());
        assert_eq!(engine.state(), TimerState::Running);
        let mut daily = state();
        engine.tick(t0 + Duration::from_secs(105), &mut daily);
        assert_eq!(engine.elapsed_secs(), 15.0);
    }

    #[test]
    fn double_pause_is_a_noop() {
        let t0 = Instant::now();
        let mut engine = TimerEngine::new();
        engine.start(t0);
        assert!(engine.pause(t0 + Duration::from_secs(4)).is_some());
        assert!(engine.pause(t0 + Duration::from_secs(9)).is_none());
        assert_eq!(engine.elapsed_secs(), 4.0);
        assert_eq!(engine.state(), TimerState::Paused);
    }

    #[test]
    fn target_is_clamped() {
        let mut engine = TimerEngine::new();
        engine.set_target(-5);
        assert_eq!(engine.target_secs(), 0);
        engine.set_target(100_000);
        assert_eq!(engine.target_secs(), MAX_TARGET_SECS);
        engine.set_target_minutes(25);
        assert_eq!(engine.target_secs(), 1500);
        engine.set_target_minutes(i64::MAX);
        assert_eq!(engine.target_secs(), MAX_TARGET_SECS);
    }

    #[test]
    fn set_target_keeps_elapsed() {
        let t0 = Instant::now();
        let mut engine = TimerEngine::new();
        engine.start(t0);
        engine.pause(t0 + Duration::from_secs(30));
        engine.set_target(600);
        assert_eq!(engine.elapsed_secs(), 30.0);
    }

    #[test]
    fn reset_discards_without_commit() {
        let t0 = Instant::now();
        let mut daily = state();
        let mut engine = TimerEngine::new();
        engine.start(t0);
        engine.tick(t0 + Duration::from_secs(40), &mut daily);
        engine.reset();
        assert_eq!(engine.state(), TimerState::Idle);
        assert_eq!(engine.elapsed_secs(), 0.0);
        assert_eq!(daily.study_seconds(), 0);
    }

    #[test]
    fn stop_without_target_is_unfinished() {
        let t0 = Instant::now();
        let mut daily = state();
        let mut engine = TimerEngine::new();
        engine.start(t0);
        let event = engine.stop(t0 + Duration::from_millis(90_400), &mut daily);
        assert!(matches!(
            event,
            Event::SessionCommitted { seconds: 90, finished: false, .. }
        ));
        assert_eq!(daily.study_seconds(), 90);
        assert_eq!(daily.sessions(), 0);
        assert_eq!(engine.elapsed_secs(), 0.0);
        assert_eq!(engine.state(), TimerState::Idle);
    }

    #[test]
    fn stop_before_target_is_unfinished() {
        let t0 = Instant::now();
        let mut daily = state();
        let mut engine = TimerEngine::new();
        engine.set_target(60);
        engine.start(t0);
        engine.stop(t0 + Duration::from_secs(59), &mut daily);
        assert_eq!(daily.study_seconds(), 59);
        assert_eq!(daily.sessions(), 0);
    }

    #[test]
    fn tick_auto_stops_at_target() {
        let t0 = Instant::now();
        let mut daily = state();
        let mut engine = TimerEngine::new();
        engine.set_target(60);
        engine.start(t0);
        assert!(engine.tick(t0 + Duration::from_secs(30), &mut daily).is_none());
        let event = engine.tick(t0 + Duration::from_millis(61_200), &mut daily);
        assert!(matches!(
            event,
            Some(Event::SessionCommitted { seconds: 61, finished: true, .. })
        ));
        assert_eq!(daily.sessions(), 1);
        assert_eq!(engine.state(), TimerState::Idle);
        assert!(engine.tick(t0 + Duration::from_secs(70), &mut daily).is_none());
        assert_eq!(daily.sessions(), 1);
    }

    #[test]
    fn backwards_clock_adds_nothing() {
        let t0 = Instant::now() + Duration::from_secs(60);
        let mut daily = state();
        let mut engine = TimerEngine::new();
        engine.start(t0);
        engine.tick(t0 - Duration::from_secs(20), &mut daily);
        assert_eq!(engine.elapsed_secs(), 0.0);
        engine.tick(t0 + Duration::from_secs(5), &mut daily);
        assert_eq!(engine.elapsed_secs(), 5.0);
    }

    #[test]
    fn derived_display_values() {
        let t0 = Instant::now();
        let mut daily = state();
        let mut engine = TimerEngine::new();
        engine.start(t0);
        engine.tick(t0 + Duration::from_secs(45), &mut daily);
        assert_eq!(engine.remaining_secs(), 45.0);
        assert_eq!(engine.progress_percent(), 0.0);

        engine.set_target(180);
        assert_eq!(engine.remaining_secs(), 135.0);
        assert_eq!(engine.progress_percent(), 25.0);
    }
}
