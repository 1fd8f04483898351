//! Letter grid geometry and pixel buffers
//!
//! The face is a fixed 11×10 matrix of letters. Every buffer in the crate
//! (target grid, displayed grid, submode output) uses the same geometry:
//! `x` is the column from the left, `y` the row from the top.

pub mod mapper;
pub mod vocabulary;

pub use mapper::{map_phrase, MinuteIndicator};
pub use vocabulary::{Orientation, VocabularyGrid};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Width of the letter grid in characters
pub const GRID_WIDTH: usize = 11;

/// Height of the letter grid in characters
pub const GRID_HEIGHT: usize = 10;

/// Number of cells in the letter grid
pub const GRID_CELLS: usize = GRID_WIDTH * GRID_HEIGHT;

/// 24-bit colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Unlit cell
    pub const OFF: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Unpack a `0xRRGGBB` value
    pub const fn from_u32(packed: u32) -> Self {
        Self {
            r: (packed >> 16) as u8,
            g: (packed >> 8) as u8,
            b: packed as u8,
        }
    }

    /// Pack into `0xRRGGBB`
    pub const fn to_u32(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// Channel-wise complement
    pub const fn inverse(self) -> Self {
        Self::new(255 - self.r, 255 - self.g, 255 - self.b)
    }

    /// Check if all channels are zero
    pub const fn is_off(self) -> bool {
        self.r == 0 && self.g == 0 && self.b == 0
    }

    /// Largest per-channel distance to `other`
    pub fn distance(self, other: Rgb) -> u8 {
        self.r
            .abs_diff(other.r)
            .max(self.g.abs_diff(other.g))
            .max(self.b.abs_diff(other.b))
    }
}

/// Predefined colours
pub mod colors {
    use super::Rgb;

    pub const GREEN: Rgb = Rgb::new(0, 255, 0);
    pub const RED: Rgb = Rgb::new(255, 0, 0);
    pub const YELLOW: Rgb = Rgb::new(200, 200, 0);
    pub const PURPLE: Rgb = Rgb::new(255, 0, 200);
    pub const ORANGE: Rgb = Rgb::new(255, 128, 0);
    pub const DARK_GREEN: Rgb = Rgb::new(0, 128, 0);
    pub const BLUE: Rgb = Rgb::new(0, 0, 255);

    /// All predefined colours, in wheel order
    pub const WHEEL: [Rgb; 7] = [GREEN, RED, YELLOW, PURPLE, ORANGE, DARK_GREEN, BLUE];
}

/// A full frame of cell colours
///
/// Cells set to [`Rgb::OFF`] are dark.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: [[Rgb; GRID_WIDTH]; GRID_HEIGHT],
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl Grid {
    /// Create an all-dark grid
    pub const fn new() -> Self {
        Self {
            cells: [[Rgb::OFF; GRID_WIDTH]; GRID_HEIGHT],
        }
    }

    /// Clear every cell
    pub fn flush(&mut self) {
        self.cells = [[Rgb::OFF; GRID_WIDTH]; GRID_HEIGHT];
    }

    /// Colour of a cell, `None` when out of bounds
    pub fn get(&self, x: usize, y: usize) -> Option<Rgb> {
        self.cells.get(y).and_then(|row| row.get(x)).copied()
    }

    /// Set a cell
    ///
    /// Returns false (and changes nothing) when the cell is out of bounds.
    pub fn set(&mut self, x: usize, y: usize, color: Rgb) -> bool {
        match self.cells.get_mut(y).and_then(|row| row.get_mut(x)) {
            Some(cell) => {
                *cell = color;
                true
            }
            None => false,
        }
    }

    /// Row-major view of the cells
    pub fn rows(&self) -> &[[Rgb; GRID_WIDTH]; GRID_HEIGHT] {
        &self.cells
    }

    /// Mutable row-major view of the cells
    pub fn rows_mut(&mut self) -> &mut [[Rgb; GRID_WIDTH]; GRID_HEIGHT] {
        &mut self.cells
    }

    /// Iterate `(x, y, colour)` over every cell, row by row
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, Rgb)> + '_ {
        self.cells.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .map(move |(x, &color)| (x, y, color))
        })
    }

    /// Number of lit cells
    pub fn lit_count(&self) -> usize {
        self.iter().filter(|(_, _, c)| !c.is_off()).count()
    }

    /// Check if no cell is lit
    pub fn is_blank(&self) -> bool {
        self.lit_count() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_packing() {
        let c = Rgb::from_u32(0x12_34_56);
        assert_eq!(c, Rgb::new(0x12, 0x34, 0x56));
        assert_eq!(c.to_u32(), 0x12_34_56);
    }

    #[test]
    fn test_rgb_inverse() {
        assert_eq!(Rgb::new(255, 0, 10).inverse(), Rgb::new(0, 255, 245));
        assert!(Rgb::new(255, 255, 255).inverse().is_off());
    }

    #[test]
    fn test_grid_bounds() {
        let mut grid = Grid::new();
        assert!(grid.set(10, 9, colors::RED));
        assert!(!grid.set(11, 0, colors::RED));
        assert!(!grid.set(0, 10, colors::RED));
        assert_eq!(grid.get(10, 9), Some(colors::RED));
        assert_eq!(grid.get(11, 9), None);
        assert_eq!(grid.lit_count(), 1);
    }

    #[test]
    fn test_grid_flush() {
        let mut grid = Grid::new();
        grid.set(3, 4, colors::BLUE);
        grid.set(0, 0, colors::GREEN);
        assert!(!grid.is_blank());

        grid.flush();
        assert!(grid.is_blank());
    }

    #[test]
    fn test_grid_iter_order() {
        let grid = Grid::new();
        let mut iter = grid.iter();
        assert_eq!(iter.next(), Some((0, 0, Rgb::OFF)));
        assert_eq!(iter.next(), Some((1, 0, Rgb::OFF)));
        assert_eq!(grid.iter().nth(GRID_WIDTH), Some((0, 1, Rgb::OFF)));
        assert_eq!(grid.iter().count(), GRID_CELLS);
    }
}
