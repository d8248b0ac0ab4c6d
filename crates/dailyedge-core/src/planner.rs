//! Task list operations over the daily state.
//!
//! Every mutation ends by recounting `completed` from the task list, so the
//! stored counter can never drift from the tasks themselves.

use chrono::Utc;
use tracing::debug;

use crate::error::ValidationError;
use crate::events::Event;
use crate::state::{DailyState, Task};

/// Borrowing view of the task list that enforces the completed-count invariant.
pub struct Planner<'a> {
    state: &'a mut DailyState,
}

impl<'a> Planner<'a> {
    pub fn new(state: &'a mut DailyState) -> Self {
        Self { state }
    }

    /// Prepend a new open task.
    ///
    /// # Errors
    /// Returns [`ValidationError::EmptyTaskText`] if `text` is blank; the list
    /// is left untouched.
    pub fn add(&mut self, text: &str) -> Result<Event, ValidationError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ValidationError::EmptyTaskText);
        }
        let task = Task::new(text);
        let event = Event::TaskAdded {
            id: task.id.clone(),
            text: task.text.clone(),
            at: Utc::now(),
        };
        debug!(id = %task.id, "task added");
        self.state.tasks.insert(0, task);
        self.state.recount();
        Ok(event)
    }

    /// Flip `done` on the task with `id`. `None` if there is no such task.
    pub fn toggle(&mut self, id: &str) -> Option<Event> {
        let task = self.state.tasks.iter_mut().find(|t| t.id == id)?;
        task.done = !task.done;
        let event = Event::TaskToggled {
            id: task.id.clone(),
            done: task.done,
            at: Utc::now(),
        };
        debug!(id, "task toggled");
        self.state.recount();
        Some(event)
    }

    /// Remove the task with `id`. `None` if there is no such task.
    pub fn delete(&mut self, id: &str) -> Option<Event> {
        let index = self.state.tasks.iter().position(|t| t.id == id)?;
        let task = self.state.tasks.remove(index);
        debug!(id, "task deleted");
        self.state.recount();
        Some(Event::TaskDeleted {
            id: task.id,
            at: Utc::now(),
        })
    }

    pub fn active_count(&self) -> usize {
        self.state.active_count()
    }

    pub fn completed_count(&self) -> usize {
        self.state.completed_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> DailyState {
        DailyState::new("2024-02-01".parse().unwrap())
    }

    fn added_id(event: &Event) -> String {
        match event {
            Event::TaskAdded { id, .. } => id.clone(),
            other => panic!("expected TaskAdded, got {other:?}"),
        }
    }

    #[test]
    fn add_trims_and_prepends() {
        let mut daily = state();
        let mut planner = Planner::new(&mut daily);
        planner.add("first").unwrap();
        planner.add("  second  ").unwrap();
        let texts: Vec<_> = daily.tasks().iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, ["second", "first"]);
    }

    #[test]
    fn blank_text_is_rejected() {
        let mut daily = state();
        let mut planner = Planner::new(&mut daily);
        assert_eq!(planner.add("   \t"), Err(ValidationError::EmptyTaskText));
        assert_eq!(planner.add(""), Err(ValidationError::EmptyTaskText));
        assert!(daily.tasks().is_empty());
    }

    #[test]
    fn toggle_updates_counts() {
        let mut daily = state();
        let mut planner = Planner::new(&mut daily);
        let a = added_id(&planner.add("a").unwrap());
        planner.add("b").unwrap();

        assert!(matches!(planner.toggle(&a), Some(Event::TaskToggled { done: true, .. })));
        assert_eq!(planner.active_count(), 1);
        assert_eq!(planner.completed_count(), 1);
        assert_eq!(daily.completed(), 1);

        let mut planner = Planner::new(&mut daily);
        assert!(matches!(planner.toggle(&a), Some(Event::TaskToggled { done: false, .. })));
        assert_eq!(daily.completed(), 0);
    }

    #[test]
    fn unknown_ids_are_noops() {
        let mut daily = state();
        let mut planner = Planner::new(&mut daily);
        planner.add("keep").unwrap();
        assert!(planner.toggle("missing").is_none());
        assert!(planner.delete("missing").is_none());
        assert_eq!(daily.tasks().len(), 1);
    }

    #[test]
    fn add_toggle_delete_leaves_nothing() {
        let mut daily = state();
        let mut planner = Planner::new(&mut daily);
        let id = added_id(&planner.add("x").unwrap());
        planner.toggle(&id).unwrap();
        planner.delete(&id).unwrap();
        assert!(daily.tasks().is_empty());
        assert_eq!(daily.completed(), 0);
    }

    #[test]
    fn deleting_a_done_task_recounts() {
        let mut daily = state();
        let mut planner = Planner::new(&mut daily);
        let a = added_id(&planner.add("a").unwrap());
        let b = added_id(&planner.add("b").unwrap());
        planner.toggle(&a);
        planner.toggle(&b);
        planner.delete(&a);
        assert_eq!(daily.completed(), 1);
        assert_eq!(daily.tasks()[0].id, b);
    }
}
