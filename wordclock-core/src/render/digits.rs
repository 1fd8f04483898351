//! Digital clock face
//!
//! Hours are drawn over minutes, two 3×5 digits per line:
//!
//! ```text
//!   ..HHH.HHH..   rows 0-4
//!   ..MMM.MMM..   rows 5-9
//! ```

use crate::grid::{Grid, Rgb};
use crate::phrase::ClockTime;

pub const DIGIT_WIDTH: usize = 3;
pub const DIGIT_HEIGHT: usize = 5;

/// Left column of the tens and ones digit
pub const DIGIT_COLUMNS: [usize; 2] = [2, 6];

/// Top row of the hour and minute line
pub const HOUR_ROW: usize = 0;
pub const MINUTE_ROW: usize = 5;

/// 3×5 font, one byte per row, bit 2 is the leftmost column
const FONT: [[u8; DIGIT_HEIGHT]; 10] = [
    [0b111, 0b101, 0b101, 0b101, 0b111],
    [0b010, 0b110, 0b010, 0b010, 0b111],
    [0b111, 0b001, 0b111, 0b100, 0b111],
    [0b111, 0b001, 0b111, 0b001, 0b111],
    [0b101, 0b101, 0b111, 0b001, 0b001],
    [0b111, 0b100, 0b111, 0b001, 0b111],
    [0b111, 0b100, 0b111, 0b101, 0b111],
    [0b111, 0b001, 0b001, 0b001, 0b001],
    [0b111, 0b101, 0b111, 0b101, 0b111],
    [0b111, 0b101, 0b111, 0b001, 0b111],
];

/// Draw one digit with its top-left corner at `(x, y)`
pub fn draw_digit(grid: &mut Grid, digit: u8, x: usize, y: usize, color: Rgb) {
    let Some(glyph) = FONT.get(usize::from(digit)) else {
        return;
    };
    for (dy, bits) in glyph.iter().enumerate() {
        for dx in 0..DIGIT_WIDTH {
            if bits & (0b100 >> dx) != 0 {
                grid.set(x + dx, y + dy, color);
            }
        }
    }
}

fn draw_two_digits(grid: &mut Grid, value: u8, y: usize, color: Rgb) {
    draw_digit(grid, value / 10, DIGIT_COLUMNS[0], y, color);
    draw_digit(grid, value % 10, DIGIT_COLUMNS[1], y, color);
}

/// Flush `grid` and draw `time` as HH over MM
pub fn draw_digital_clock(grid: &mut Grid, time: ClockTime, hours: Rgb, minutes: Rgb) {
    grid.flush();
    draw_two_digits(grid, time.hour(), HOUR_ROW, hours);
    draw_two_digits(grid, time.minute(), MINUTE_ROW, minutes);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::colors;

    fn render(hour: u8, minute: u8) -> Grid {
        let mut grid = Grid::new();
        draw_digital_clock(
            &mut grid,
            ClockTime::new(hour, minute).unwrap(),
            colors::RED,
            colors::BLUE,
        );
        grid
    }

    #[test]
    fn test_eight_fills_box_but_center() {
        let mut grid = Grid::new();
        draw_digit(&mut grid, 8, 0, 0, colors::GREEN);
        assert_eq!(grid.lit_count(), 13);
        assert_eq!(grid.get(1, 1), Some(Rgb::OFF));
        assert_eq!(grid.get(1, 3), Some(Rgb::OFF));
        assert_eq!(grid.get(1, 2), Some(colors::GREEN));
    }

    #[test]
    fn test_hours_and_minutes_colors() {
        let grid = render(18, 8);
        for (x, y, color) in grid.iter() {
            if color.is_off() {
                continue;
            }
            if y < MINUTE_ROW {
                assert_eq!(color, colors::RED);
            } else {
                assert_eq!(color, colors::BLUE);
            }
            assert!((2..5).contains(&x) || (6..9).contains(&x), "column {}", x);
        }
    }

    #[test]
    fn test_leading_zero() {
        let grid = render(7, 5);
        // Tens digit of the hour is a zero: top bar lit, centre dark
        assert_eq!(grid.get(2, 0), Some(colors::RED));
        assert_eq!(grid.get(3, 2), Some(Rgb::OFF));
    }

    #[test]
    fn test_redraw_clears_previous() {
        let mut grid = render(8, 8);
        draw_digital_clock(&mut grid, ClockTime::new(1, 1).unwrap(), colors::RED, colors::RED);
        let mut fresh = Grid::new();
        draw_digital_clock(&mut fresh, ClockTime::new(1, 1).unwrap(), colors::RED, colors::RED);
        assert_eq!(grid, fresh);
    }
}
