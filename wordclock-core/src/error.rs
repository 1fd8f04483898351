//! Error types for the rendering core

use core::fmt;

use crate::traits::DisplayError;

/// Errors produced while turning a time into pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// A phrase word has no forward occurrence left in the vocabulary grid
    ///
    /// This is a vocabulary/idiom mismatch, never an environmental fault.
    UnmappableWord {
        /// The word that could not be placed
        word: &'static str,
    },
    /// Hour or minute outside the 24-hour clock
    InvalidTimeInput { hour: u8, minute: u8 },
    /// The display sink rejected a frame
    Display(DisplayError),
}

impl From<DisplayError> for Error {
    fn from(err: DisplayError) -> Self {
        Error::Display(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnmappableWord { word } => {
                write!(f, "word is not possible to show on clock: {}", word)
            }
            Error::InvalidTimeInput { hour, minute } => {
                write!(f, "invalid time {:02}:{:02}", hour, minute)
            }
            Error::Display(err) => write!(f, "display error: {:?}", err),
        }
    }
}
