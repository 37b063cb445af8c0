//! Pure stopwatch logic with no I/O or threads.
//! The host drives time by calling `tick` from its own periodic source.

pub mod engine;
pub mod format;
pub mod laps;
pub mod session;
pub mod stopwatch;

pub use engine::{TimerEngine, TimerSnapshot, TimerState, TICK_MS};
pub use format::{format_hms_cs, format_mm_ss_cs};
pub use laps::{best_and_worst_lap, intervals, lap_rows, Lap, LapExtremes, LapLog, LapMark, LapRow};
pub use session::{Session, SessionId, SessionStore, ValidationError};
pub use stopwatch::Stopwatch;
