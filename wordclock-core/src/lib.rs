//! Board-agnostic core logic for the word clock
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Vocabulary grid and the idiom that turns a time into a phrase
//! - Grid mapping of phrase words onto the letter grid
//! - Smoothed pixel compositor
//! - Mode state machine and the periodic scheduler that drives it
//! - Collaborator traits (time source, display sink, submodes)
//! - Configuration type definitions

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

// This must go first so the log macros are visible to every module.
#[macro_use]
mod fmt;

pub mod config;
pub mod error;
pub mod grid;
pub mod modes;
pub mod phrase;
pub mod render;
pub mod scheduler;
pub mod state;
pub mod traits;

pub use error::Error;
pub use grid::{Grid, Rgb, GRID_HEIGHT, GRID_WIDTH};
pub use phrase::{ClockTime, Idiom, Phrase, SwissGerman};
pub use scheduler::{SchedulerContext, TickReport};
pub use state::ModeState;
