//! Home-screen summary derived from the daily state.

use serde::Serialize;

use crate::state::DailyState;

/// Summary fields shown on the home screen. Recomputed after every mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HomeStats {
    pub study_minutes: u64,
    pub sessions: u64,
    pub active_tasks: usize,
    pub completed_tasks: u64,
}

impl HomeStats {
    pub fn project(state: &DailyState) -> Self {
        Self {
            study_minutes: state.study_seconds() / 60,
            sessions: state.sessions(),
            active_tasks: state.active_count(),
            completed_tasks: state.completed(),
        }
    }

    /// e.g. `42m`
    pub fn study_label(&self) -> String {
        format!("{}m", self.study_minutes)
    }

    /// e.g. `1 session`, `3 sessions`
    pub fn sessions_label(&self) -> String {
        let plural = if self.sessions == 1 { "" } else { "s" };
        format!("{} session{plural}", self.sessions)
    }

    /// e.g. `2 completed`
    pub fn completed_label(&self) -> String {
        format!("{} completed", self.completed_tasks)
    }
}
