//! Mode state definition
//!
//! Which producer may write the target grid is a function of the current
//! mode alone.

use super::events::Event;
use crate::traits::SubmodeKind;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of display modes
pub const NUM_STATES: usize = 6;

/// Display modes, in button cycling order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ModeState {
    /// Time as a sentence
    #[default]
    Clock,
    /// Time as digits
    DigitalClock,
    /// Spiral animation
    Spiral,
    Tetris,
    Snake,
    PingPong,
}

impl ModeState {
    /// All modes in cycling order
    pub const ALL: [ModeState; NUM_STATES] = [
        ModeState::Clock,
        ModeState::DigitalClock,
        ModeState::Spiral,
        ModeState::Tetris,
        ModeState::Snake,
        ModeState::PingPong,
    ];

    /// Numeric id, as reported to clients
    pub fn id(self) -> u8 {
        self as u8
    }

    /// Human-readable name used in logs and status replies
    pub fn name(self) -> &'static str {
        match self {
            ModeState::Clock => "Clock",
            ModeState::DigitalClock => "DiClock",
            ModeState::Spiral => "Spiral",
            ModeState::Tetris => "Tetris",
            ModeState::Snake => "Snake",
            ModeState::PingPong => "PingPong",
        }
    }

    /// Name used by the command surface
    pub fn command_name(self) -> &'static str {
        match self {
            ModeState::Clock => "clock",
            ModeState::DigitalClock => "diclock",
            ModeState::Spiral => "spiral",
            ModeState::Tetris => "tetris",
            ModeState::Snake => "snake",
            ModeState::PingPong => "pingpong",
        }
    }

    pub fn from_command_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|s| s.command_name() == name)
    }

    /// Next mode in cycling order, wrapping back to `Clock`
    pub fn next(self) -> Self {
        Self::ALL[(usize::from(self.id()) + 1) % NUM_STATES]
    }

    /// Submode that renders this mode, `None` for the clock faces
    pub fn submode(self) -> Option<SubmodeKind> {
        match self {
            ModeState::Clock | ModeState::DigitalClock => None,
            ModeState::Spiral => Some(SubmodeKind::Spiral),
            ModeState::Tetris => Some(SubmodeKind::Tetris),
            ModeState::Snake => Some(SubmodeKind::Snake),
            ModeState::PingPong => Some(SubmodeKind::PingPong),
        }
    }

    /// Process an event and return the next mode
    pub fn transition(self, event: Event) -> Self {
        match event {
            Event::Select(target) => target,
            Event::ShortPress | Event::AutoAdvance => self.next(),
        }
    }
}
