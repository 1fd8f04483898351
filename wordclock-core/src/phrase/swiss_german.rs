//! Bernese Swiss German face
//!
//! Face layout (11×10):
//!
//! ```text
//! ESKISCHUFUF
//! VIERTUNFZAA
//! ZWANZGSEVOR
//! ABCHAUBIECM
//! EISZWOISDRU
//! VIERIFUFIST
//! SACHSISIBNI
//! ACHTINUNIEL
//! ZANIECHEUFI
//! ZWOUFIENGSI
//! ```

use super::{ClockTime, Idiom, Phrase};
use crate::grid::{Orientation, VocabularyGrid};

/// Letters of the face, row by row
pub const LETTERS: &str = concat!(
    "ESKISCHUFUF",
    "VIERTUNFZAA",
    "ZWANZGSEVOR",
    "ABCHAUBIECM",
    "EISZWOISDRU",
    "VIERIFUFIST",
    "SACHSISIBNI",
    "ACHTINUNIEL",
    "ZANIECHEUFI",
    "ZWOUFIENGSI",
);

/// "It is"
pub const LEAD_IN: [&str; 2] = ["ES", "ISCH"];

/// Sentence-final particle for the full hour
pub const FULL_HOUR: &str = "GSI";

/// From this minute on, the sentence names the coming hour
pub const NEXT_HOUR_FROM_MINUTE: u8 = 25;

/// Minute buckets `[start, end)` and their words
///
/// The boundaries follow the spoken dialect, not a half-hour split:
/// 35..40 is "twenty to" while 40..45 is "ten past half".
const MINUTE_WORDS: [(u8, u8, &[&str]); 12] = [
    (0, 5, &[]),
    (5, 10, &["FUF", "AB"]),
    (10, 15, &["ZAA", "AB"]),
    (15, 20, &["VIERTU", "AB"]),
    (20, 25, &["ZWANZG", "AB"]),
    (25, 30, &["FUF", "VOR", "HAUBI"]),
    (30, 35, &["HAUBI"]),
    (35, 40, &["ZWANZG", "VOR"]),
    (40, 45, &["ZAA", "AB", "HAUBI"]),
    (45, 50, &["VIERTU", "VOR"]),
    (50, 55, &["ZAA", "VOR"]),
    (55, 60, &["FUF", "VOR"]),
];

/// Hour names, index 0 is twelve o'clock
const HOUR_WORDS: [&str; 12] = [
    "ZWOUFI", "EIS", "ZWOI", "DRU", "VIERI", "FUFI", "SACHSI", "SIBNI", "ACHTI", "NUNI", "ZANI",
    "EUFI",
];

static VOCABULARY: VocabularyGrid = VocabularyGrid::new(LETTERS, Orientation::RowMajor);

/// Bernese Swiss German idiom on the shipped face
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SwissGerman;

impl SwissGerman {
    fn minute_words(minute: u8) -> &'static [&'static str] {
        MINUTE_WORDS
            .iter()
            .find(|(start, end, _)| (*start..*end).contains(&minute))
            .map(|(_, _, words)| *words)
            .unwrap_or(&[])
    }

    fn hour_word(time: ClockTime) -> &'static str {
        let mut hour = time.hour12();
        if time.minute() >= NEXT_HOUR_FROM_MINUTE {
            hour += 1;
        }
        HOUR_WORDS[usize::from(hour % 12)]
    }
}

impl Idiom for SwissGerman {
    fn vocabulary(&self) -> &VocabularyGrid {
        &VOCABULARY
    }

    fn phrase(&self, time: ClockTime) -> Phrase {
        let mut phrase = Phrase::new();

        // Longest sentence is 2 + 3 + 1 words, well within capacity
        let _ = phrase.extend_from_slice(&LEAD_IN);
        let _ = phrase.extend_from_slice(Self::minute_words(time.minute()));
        let _ = phrase.push(Self::hour_word(time));
        if time.minute() < 5 {
            let _ = phrase.push(FULL_HOUR);
        }

        phrase
    }
}
