//! Animated submodes (spiral, tetris, snake, ping pong)
//!
//! A submode is a self-contained producer for the target grid. The
//! scheduler owns every submode and is the only caller, so at most one of
//! them writes the grid during a tick. A state change discards whatever a
//! submode was doing by calling [`Submode::init`] again; there is no other
//! cancellation path.

use crate::grid::Grid;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which flavour of a submode to start
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PlayStyle {
    /// Non-interactive demo, used while auto-change cycles the modes
    SelfPlaying,
    /// Game driven by user controls
    Interactive,
}

impl PlayStyle {
    /// Style matching the scheduler's auto-change flag
    pub fn for_auto_change(auto_change: bool) -> Self {
        if auto_change {
            PlayStyle::SelfPlaying
        } else {
            PlayStyle::Interactive
        }
    }
}

/// User controls forwarded to a submode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Control {
    Up,
    Down,
    Left,
    Right,
    /// Start (or restart) a game
    Start,
    /// Toggle pause
    PlayPause,
    /// Throw away the current game and begin a new one
    NewGame,
}

/// Identifies one of the submodes owned by a [`SubmodeBank`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SubmodeKind {
    Spiral,
    Tetris,
    Snake,
    PingPong,
}

/// Uniform capability set of an animated mode
pub trait Submode {
    /// Reset all internal state and start over in the given style
    fn init(&mut self, style: PlayStyle);

    /// Advance one step and draw into `grid`
    ///
    /// Called once per period of the owning mode. The grid keeps its
    /// contents between calls, so incremental drawing is allowed.
    fn loop_cycle(&mut self, grid: &mut Grid);

    /// Apply a user control
    fn control(&mut self, control: Control);
}

/// Lookup of submodes by kind
pub trait SubmodeBank {
    fn submode(&mut self, kind: SubmodeKind) -> &mut dyn Submode;
}

/// Fixed set of the four submodes
#[derive(Debug, Clone, Default)]
pub struct Submodes<Sp, Te, Sn, Pp> {
    pub spiral: Sp,
    pub tetris: Te,
    pub snake: Sn,
    pub pingpong: Pp,
}

impl<Sp, Te, Sn, Pp> Submodes<Sp, Te, Sn, Pp> {
    pub fn new(spiral: Sp, tetris: Te, snake: Sn, pingpong: Pp) -> Self {
        Self {
            spiral,
            tetris,
            snake,
            pingpong,
        }
    }
}

impl<Sp, Te, Sn, Pp> SubmodeBank for Submodes<Sp, Te, Sn, Pp>
where
    Sp: Submode,
    Te: Submode,
    Sn: Submode,
    Pp: Submode,
{
    fn submode(&mut self, kind: SubmodeKind) -> &mut dyn Submode {
        match kind {
            SubmodeKind::Spiral => &mut self.spiral,
            SubmodeKind::Tetris => &mut self.tetris,
            SubmodeKind::Snake => &mut self.snake,
            SubmodeKind::PingPong => &mut self.pingpong,
        }
    }
}
