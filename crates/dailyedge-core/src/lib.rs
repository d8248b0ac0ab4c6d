//! # DailyEdge Core Library
//!
//! This library provides the session engine behind the DailyEdge study
//! widget: a daily study timer, a task list and a grade calculator sharing
//! one persisted record per day. Views (the CLI, or any GUI) are thin layers
//! that call into [`DailyEdge`] and re-read its derived fields to render.
//!
//! ## Architecture
//!
//! - **Day boundary**: [`Clock`] supplies today's [`DayKey`] and monotonic instants
//! - **Storage**: the [`DailyState`] snapshot as JSON in a SQLite kv table,
//!   with rollover and merge-with-defaults on load; TOML configuration
//! - **Timer Engine**: a wall-clock-delta state machine; the caller drives `tick()`
//! - **Planner**: task CRUD that keeps the completed counter in sync
//! - **Grades**: pure simple and weighted grade computation
//! - **Stats**: home-screen projection of the daily state
//!
//! ## Key Components
//!
//! - [`DailyEdge`]: the engine facade
//! - [`TimerEngine`]: study timer state machine
//! - [`StateStore`]: snapshot persistence
//! - [`Config`]: application configuration management

pub mod day;
pub mod error;
pub mod events;
pub mod grade;
pub mod planner;
pub mod session;
pub mod state;
pub mod stats;
pub mod storage;
pub mod timer;

pub use day::{Clock, DayKey, ManualClock, SystemClock};
pub use error::{ConfigError, CoreError, StorageError, ValidationError};
pub use events::Event;
pub use grade::{Category, CategoryBreakdown, SimpleGrade, WeightedGrade};
pub use planner::Planner;
pub use session::DailyEdge;
pub use state::{DailyState, Task};
pub use stats::HomeStats;
pub use storage::{Config, Database, KvStore, MemoryStore, StateStore};
pub use timer::{TimerEngine, TimerState, TimerView};
