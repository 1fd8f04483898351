//! Vocabulary grid
//!
//! The face letters are stored as one linear string. The orientation decides
//! how a linear offset lands on the 2D grid, so the same matcher works for
//! panels wired row-first or column-first.

use heapless::String;

use super::{Grid, GRID_CELLS, GRID_HEIGHT, GRID_WIDTH};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Capacity of a text dump: one line per row plus newlines
pub const DUMP_LEN: usize = (GRID_WIDTH + 1) * GRID_HEIGHT;

/// How linear letter offsets map onto grid cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Orientation {
    /// Offsets run left to right, then top to bottom
    #[default]
    RowMajor,
    /// Offsets run top to bottom, then left to right
    ColumnMajor,
}

impl Orientation {
    /// Cell `(x, y)` for a linear offset, `None` past the last cell
    pub fn cell(self, offset: usize) -> Option<(usize, usize)> {
        if offset >= GRID_CELLS {
            return None;
        }
        Some(match self {
            Orientation::RowMajor => (offset % GRID_WIDTH, offset / GRID_WIDTH),
            Orientation::ColumnMajor => (offset / GRID_HEIGHT, offset % GRID_HEIGHT),
        })
    }

    /// Linear offset of cell `(x, y)`, `None` when out of bounds
    pub fn offset(self, x: usize, y: usize) -> Option<usize> {
        if x >= GRID_WIDTH || y >= GRID_HEIGHT {
            return None;
        }
        Some(match self {
            Orientation::RowMajor => y * GRID_WIDTH + x,
            Orientation::ColumnMajor => x * GRID_HEIGHT + y,
        })
    }
}

/// Fixed letter soup shown on the clock face
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct VocabularyGrid {
    letters: &'static str,
    orientation: Orientation,
}

impl VocabularyGrid {
    /// Create a grid from `GRID_CELLS` ASCII letters
    pub const fn new(letters: &'static str, orientation: Orientation) -> Self {
        Self {
            letters,
            orientation,
        }
    }

    /// Same letters laid out with another orientation
    pub const fn with_orientation(self, orientation: Orientation) -> Self {
        Self {
            letters: self.letters,
            orientation,
        }
    }

    pub fn letters(&self) -> &'static str {
        self.letters
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Check the letter count and character set
    pub fn is_well_formed(&self) -> bool {
        self.letters.len() == GRID_CELLS && self.letters.bytes().all(|b| b.is_ascii_uppercase())
    }

    /// First offset `>= from` where `word` starts
    pub fn find(&self, word: &str, from: usize) -> Option<usize> {
        let tail = self.letters.get(from..)?;
        tail.find(word).map(|pos| pos + from)
    }

    /// Letter shown at cell `(x, y)`
    pub fn letter_at(&self, x: usize, y: usize) -> Option<char> {
        let offset = self.orientation.offset(x, y)?;
        self.letters.as_bytes().get(offset).map(|&b| b as char)
    }

    /// Text dump of a grid: lit cells show their letter, dark cells a dot
    pub fn dump(&self, grid: &Grid) -> String<DUMP_LEN> {
        let mut out = String::new();
        for (y, row) in grid.rows().iter().enumerate() {
            for (x, color) in row.iter().enumerate() {
                let ch = match self.letter_at(x, y) {
                    Some(letter) if !color.is_off() => letter,
                    _ => '.',
                };
                // Capacity covers every cell plus one newline per row
                let _ = out.push(ch);
            }
            let _ = out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::colors;

    const LETTERS: &str = "ESKISCHUFUFVIERTUNFZAAZWANZGSEVORABCHAUBIECMEISZWOISDRUVIERIFUFISTSACHSISIBNIACHTINUNIELZANIECHEUFIZWOUFIENGSI";

    #[test]
    fn test_row_major_cells() {
        let o = Orientation::RowMajor;
        assert_eq!(o.cell(0), Some((0, 0)));
        assert_eq!(o.cell(10), Some((10, 0)));
        assert_eq!(o.cell(11), Some((0, 1)));
        assert_eq!(o.cell(GRID_CELLS - 1), Some((10, 9)));
        assert_eq!(o.cell(GRID_CELLS), None);
    }

    #[test]
    fn test_column_major_cells() {
        let o = Orientation::ColumnMajor;
        assert_eq!(o.cell(0), Some((0, 0)));
        assert_eq!(o.cell(9), Some((0, 9)));
        assert_eq!(o.cell(10), Some((1, 0)));
        assert_eq!(o.cell(GRID_CELLS - 1), Some((10, 9)));
    }

    #[test]
    fn test_offset_inverts_cell() {
        for o in [Orientation::RowMajor, Orientation::ColumnMajor] {
            for offset in 0..GRID_CELLS {
                let (x, y) = o.cell(offset).unwrap();
                assert_eq!(o.offset(x, y), Some(offset));
            }
        }
    }

    #[test]
    fn test_find_is_forward_only() {
        let grid = VocabularyGrid::new(LETTERS, Orientation::RowMajor);
        assert!(grid.is_well_formed());
        assert_eq!(grid.find("ES", 0), Some(0));
        assert_eq!(grid.find("FUF", 0), Some(8));
        assert_eq!(grid.find("FUF", 9), Some(60));
        assert_eq!(grid.find("ES", 1), None);
        assert_eq!(grid.find("GSI", GRID_CELLS), None);
        assert_eq!(grid.find("GSI", GRID_CELLS + 5), None);
    }

    #[test]
    fn test_dump() {
        let vocab = VocabularyGrid::new(LETTERS, Orientation::RowMajor);
        let mut grid = Grid::new();
        grid.set(0, 0, colors::RED);
        grid.set(1, 0, colors::RED);
        let dump = vocab.dump(&grid);
        let first = dump.lines().next().unwrap();
        assert_eq!(first, "ES.........");
        assert_eq!(dump.lines().count(), GRID_HEIGHT);
    }
}
