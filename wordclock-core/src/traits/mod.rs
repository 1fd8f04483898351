//! Collaborator traits
//!
//! These traits define the interface between the rendering core and the
//! board: where the time comes from, where frames go, and the game
//! submodes the scheduler multiplexes onto the grid.

pub mod display;
pub mod submode;
pub mod time;

pub use display::{DisplayError, DisplaySink};
pub use submode::{Control, PlayStyle, Submode, SubmodeBank, SubmodeKind, Submodes};
pub use time::TimeSource;
