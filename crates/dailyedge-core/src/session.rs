//! The engine the view talks to.
//!
//! [`DailyEdge`] owns the daily state, the transient timer, the snapshot
//! store and the clock. Every mutating call runs the same sequence: roll the
//! day over if the calendar moved, apply the change, recount, persist. The
//! view then pulls [`stats`](DailyEdge::stats), [`tasks`](DailyEdge::tasks)
//! or [`timer_view`](DailyEdge::timer_view) to redraw.

use chrono::Utc;
use tracing::info;

use crate::day::Clock;
use crate::error::ValidationError;
use crate::events::Event;
use crate::planner::Planner;
use crate::state::{DailyState, Task};
use crate::stats::HomeStats;
use crate::storage::{KvStore, StateStore};
use crate::timer::{TimerEngine, TimerView};

pub struct DailyEdge<S: KvStore, C: Clock> {
    store: StateStore<S>,
    clock: C,
    state: DailyState,
    timer: TimerEngine,
}

impl<S: KvStore, C: Clock> DailyEdge<S, C> {
    /// Load today's state and settle it.
    ///
    /// The completed counter is recomputed from the loaded tasks and the
    /// result is written back, so a hand-edited or stale record is repaired
    /// on first open.
    pub fn open(store: StateStore<S>, clock: C) -> Self {
        let mut state = store.load(clock.today());
        state.recount();
        store.save(&state);
        Self {
            store,
            clock,
            state,
            timer: TimerEngine::new(),
        }
    }

    // ── Reads ────────────────────────────────────────────────────────

    pub fn state(&self) -> &DailyState {
        &self.state
    }

    pub fn tasks(&self) -> &[Task] {
        self.state.tasks()
    }

    pub fn stats(&self) -> HomeStats {
        HomeStats::project(&self.state)
    }

    pub fn timer(&self) -> &TimerEngine {
        &self.timer
    }

    pub fn timer_view(&self) -> TimerView {
        TimerView::from(&self.timer)
    }

    pub fn store(&self) -> &StateStore<S> {
        &self.store
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    // ── Timer ────────────────────────────────────────────────────────

    pub fn set_target(&mut self, secs: i64) -> Event {
        self.timer.set_target(secs)
    }

    pub fn set_target_minutes(&mut self, minutes: i64) -> Event {
        self.timer.set_target_minutes(minutes)
    }

    pub fn start_timer(&mut self) -> Option<Event> {
        self.timer.start(self.clock.now())
    }

    pub fn pause_timer(&mut self) -> Option<Event> {
        self.timer.pause(self.clock.now())
    }

    /// Discard the running session. Nothing is committed or persisted.
    pub fn reset_timer(&mut self) -> Event {
        self.timer.reset()
    }

    /// End the session and commit its elapsed time.
    pub fn stop_timer(&mut self) -> Event {
        self.refresh_day();
        let event = self.timer.stop(self.clock.now(), &mut self.state);
        self.commit();
        event
    }

    /// Advance the running session. Returns the commit event when the
    /// target was reached and the session stopped itself.
    pub fn tick(&mut self) -> Option<Event> {
        if !self.timer.is_running() {
            return None;
        }
        self.refresh_day();
        let event = self.timer.tick(self.clock.now(), &mut self.state)?;
        self.commit();
        Some(event)
    }

    /// Commit study time measured outside the timer. Never counts as a session.
    pub fn log_study(&mut self, seconds: u64) -> Event {
        self.refresh_day();
        self.state.record_study(seconds, false);
        self.commit();
        Event::SessionCommitted {
            seconds,
            finished: false,
            at: Utc::now(),
        }
    }

    // ── Tasks ────────────────────────────────────────────────────────

    /// # Errors
    /// Returns [`ValidationError::EmptyTaskText`] for blank text.
    pub fn add_task(&mut self, text: &str) -> Result<Event, ValidationError> {
        self.refresh_day();
        let event = Planner::new(&mut self.state).add(text)?;
        self.commit();
        Ok(event)
    }

    pub fn toggle_task(&mut self, id: &str) -> Option<Event> {
        self.refresh_day();
        let event = Planner::new(&mut self.state).toggle(id)?;
        self.commit();
        Some(event)
    }

    pub fn delete_task(&mut self, id: &str) -> Option<Event> {
        self.refresh_day();
        let event = Planner::new(&mut self.state).delete(id)?;
        self.commit();
        Some(event)
    }

    // ── Day boundary ─────────────────────────────────────────────────

    /// Apply a rollover when the calendar moved while the engine was open.
    ///
    /// Mutating calls do this on their own; a view that stays open across
    /// midnight can call it before redrawing.
    pub fn refresh_day(&mut self) -> Option<Event> {
        let from = self.state.date();
        let today = self.clock.today();
        if !self.state.roll_over(today) {
            return None;
        }
        info!(%from, to = %today, "rolled over daily counters");
        self.store.save(&self.state);
        Some(Event::DayRolledOver {
            from,
            to: today,
            at: Utc::now(),
        })
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn commit(&mut self) {
        self.state.recount();
        self.store.save(&self.state);
    }
}
