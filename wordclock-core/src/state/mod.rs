//! Display mode state machine
//!
//! Exactly one mode owns the grid at a time. The state machine is explicit,
//! finite, and has no terminal state.

pub mod events;
pub mod machine;

pub use events::Event;
pub use machine::{ModeState, NUM_STATES};
