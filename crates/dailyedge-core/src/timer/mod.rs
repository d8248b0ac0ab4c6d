mod display;
mod engine;

pub use display::{format_clock, target_label, TimerView};
pub use engine::{TimerEngine, TimerState, MAX_TARGET_SECS};
