//! Mode scheduler
//!
//! Polls interval timers from the board's main loop and decides which
//! producer writes the target grid.

pub mod button;
pub mod context;
pub mod timers;

pub use button::{ButtonAction, ButtonTracker};
pub use context::{SchedulerContext, Status, TickReport};
pub use timers::{SchedulerTimers, Timer};
