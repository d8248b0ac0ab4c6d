//! The persisted daily record.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::day::DayKey;

/// A single planner entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub done: bool,
}

impl Task {
    /// New open task with a freshly generated id. `text` is stored as given.
    pub(crate) fn new(text: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text: text.to_string(),
            done: false,
        }
    }
}

/// Day-scoped counters plus the task list.
///
/// Fields are only mutated through the engines in this crate so that
/// `completed` always matches the number of done tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyState {
    pub(crate) date: DayKey,
    pub(crate) study_seconds: u64,
    pub(crate) sessions: u64,
    pub(crate) tasks: Vec<Task>,
    pub(crate) completed: u64,
}

impl DailyState {
    /// Empty state stamped with `date`.
    pub fn new(date: DayKey) -> Self {
        Self {
            date,
            study_seconds: 0,
            sessions: 0,
            tasks: Vec::new(),
            completed: 0,
        }
    }

    pub fn date(&self) -> DayKey {
        self.date
    }

    pub fn study_seconds(&self) -> u64 {
        self.study_seconds
    }

    pub fn sessions(&self) -> u64 {
        self.sessions
    }

    /// Tasks in display order, newest first.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Stored completed counter. Equal to [`completed_count`](Self::completed_count)
    /// once any task mutation has settled.
    pub fn completed(&self) -> u64 {
        self.completed
    }

    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn active_count(&self) -> usize {
        self.tasks.iter().filter(|t| !t.done).count()
    }

    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.done).count()
    }

    /// Reset day-scoped counters if `today` is a different day.
    ///
    /// Tasks and the completed counter carry over. Returns `true` when a
    /// rollover happened.
    pub(crate) fn roll_over(&mut self, today: DayKey) -> bool {
        if self.date == today {
            return false;
        }
        self.date = today;
        self.clear_counters();
        true
    }

    pub(crate) fn clear_counters(&mut self) {
        self.study_seconds = 0;
        self.sessions = 0;
    }

    /// Fold a finished or abandoned timer run into today's totals.
    pub(crate) fn record_study(&mut self, seconds: u64, finished: bool) {
        self.study_seconds = self.study_seconds.saturating_add(seconds);
        if finished {
            self.sessions = self.sessions.saturating_add(1);
        }
    }

    /// Overwrite the stored counter from the task list.
    pub(crate) fn recount(&mut self) {
        self.completed = self.completed_count() as u64;
    }
}
