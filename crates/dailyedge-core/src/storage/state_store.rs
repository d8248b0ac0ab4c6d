//! Loading and saving the daily snapshot.
//!
//! Loading never fails: a missing or corrupt record yields a fresh state,
//! a partial record is merged field by field over the defaults, and a record
//! from an earlier day is rolled over. Saving is best effort.

use std::collections::HashSet;

use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use super::KvStore;
use crate::day::DayKey;
use crate::error::Result;
use crate::state::{DailyState, Task};

/// Storage key of the snapshot.
pub const DEFAULT_STORAGE_KEY: &str = "dailyedge:v1";

/// Sole reader and writer of the persisted [`DailyState`].
pub struct StateStore<S> {
    backend: S,
    key: String,
}

impl<S: KvStore> StateStore<S> {
    pub fn new(backend: S) -> Self {
        Self::with_key(backend, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(backend: S, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read the snapshot, falling back to defaults and rolling over to `today`.
    pub fn load(&self, today: DayKey) -> DailyState {
        let raw = match self.backend.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(key = %self.key, "no stored snapshot, starting fresh");
                return DailyState::new(today);
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "snapshot unreadable, starting fresh");
                return DailyState::new(today);
            }
        };

        let Some(fields) = parse_object(&raw) else {
            warn!(key = %self.key, "snapshot is not a JSON object, starting fresh");
            return DailyState::new(today);
        };

        let mut state = merge_with_defaults(&fields, today);
        let stored_date = fields
            .get("date")
            .and_then(Value::as_str)
            .and_then(|s| s.parse::<DayKey>().ok());
        if stored_date != Some(today) {
            state.clear_counters();
            info!(
                from = stored_date.map(|d| d.to_string()).unwrap_or_default(),
                to = %today,
                "rolled over daily counters"
            );
        }
        state
    }

    /// Persist the snapshot.
    ///
    /// # Errors
    /// Returns an error if serialization or the backend write fails.
    pub fn try_save(&self, state: &DailyState) -> Result<()> {
        let json = serde_json::to_string(state)?;
        self.backend.set(&self.key, &json)?;
        Ok(())
    }

    /// Persist the snapshot, logging and swallowing any failure.
    ///
    /// Returns whether the write went through.
    pub fn save(&self, state: &DailyState) -> bool {
        match self.try_save(state) {
            Ok(()) => true,
            Err(e) => {
                warn!(key = %self.key, error = %e, "failed to persist snapshot");
                false
            }
        }
    }
}

fn parse_object(raw: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str::<Value>(raw).ok()? {
        Value::Object(map) => Some(map),
        _ => None,
    }
}

/// Build a state from whatever fields of the record are usable.
fn merge_with_defaults(fields: &Map<String, Value>, today: DayKey) -> DailyState {
    let mut state = DailyState::new(today);
    if let Some(n) = fields.get("studySeconds").and_then(non_negative) {
        state.study_seconds = n;
    }
    if let Some(n) = fields.get("sessions").and_then(non_negative) {
        state.sessions = n;
    }
    if let Some(Value::Array(items)) = fields.get("tasks") {
        // first occurrence of an id wins
        let mut seen = HashSet::new();
        state.tasks = items
            .iter()
            .filter_map(|item| serde_json::from_value::<Task>(item.clone()).ok())
            .filter(|t| !t.id.is_empty() && !t.text.trim().is_empty())
            .filter(|t| seen.insert(t.id.clone()))
            .collect();
    }
    if let Some(n) = fields.get("completed").and_then(non_negative) {
        state.completed = n;
    }
    state
}

fn non_negative(value: &Value) -> Option<u64> {
    value.as_u64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.is_finite() && *f >= 0.0)
            .map(|f| f.round() as u64)
    })
}
