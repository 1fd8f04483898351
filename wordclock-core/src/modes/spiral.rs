//! Spiral animation
//!
//! Lights the grid one cell per cycle along a square spiral that starts in
//! the centre, then erases it again from the outside in.

use crate::grid::{colors, Grid, Rgb, GRID_CELLS, GRID_HEIGHT, GRID_WIDTH};
use crate::traits::{Control, PlayStyle, Submode};

/// Centre cell the spiral starts from
pub const SPIRAL_CENTER: (usize, usize) = (GRID_WIDTH / 2, (GRID_HEIGHT - 1) / 2);

/// Cells lit with one wheel colour before moving to the next
const CELLS_PER_COLOR: usize = GRID_WIDTH;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
enum Pass {
    Draw,
    Erase,
}

/// Every grid cell in spiral order
fn spiral_path() -> [(u8, u8); GRID_CELLS] {
    let mut path = [(0u8, 0u8); GRID_CELLS];
    let mut len = 0;

    let (mut x, mut y) = (SPIRAL_CENTER.0 as i32, SPIRAL_CENTER.1 as i32);
    // right, down, left, up
    const DIRS: [(i32, i32); 4] = [(1, 0), (0, 1), (-1, 0), (0, -1)];
    let mut dir = 0;
    let mut run = 1;

    // Runs past the grid edge are walked but not recorded
    let max_side = GRID_WIDTH.max(GRID_HEIGHT) as i32 + 1;
    while len < GRID_CELLS && run <= max_side {
        for _ in 0..2 {
            for _ in 0..run {
                let inside = (0..GRID_WIDTH as i32).contains(&x)
                    && (0..GRID_HEIGHT as i32).contains(&y);
                if inside && len < GRID_CELLS {
                    path[len] = (x as u8, y as u8);
                    len += 1;
                }
                x += DIRS[dir].0;
                y += DIRS[dir].1;
            }
            dir = (dir + 1) % DIRS.len();
        }
        run += 1;
    }

    path
}

/// Spiral submode
///
/// Runs the same in both play styles and ignores controls.
#[derive(Debug, Clone)]
pub struct Spiral {
    path: [(u8, u8); GRID_CELLS],
    pass: Pass,
    step: usize,
    /// Wheel offset, advanced every round so consecutive spirals differ
    round: usize,
}

impl Default for Spiral {
    fn default() -> Self {
        Self::new()
    }
}

impl Spiral {
    pub fn new() -> Self {
        Self {
            path: spiral_path(),
            pass: Pass::Draw,
            step: 0,
            round: 0,
        }
    }

    fn color(&self, step: usize) -> Rgb {
        let wheel = &colors::WHEEL;
        wheel[(self.round + step / CELLS_PER_COLOR) % wheel.len()]
    }
}

impl Submode for Spiral {
    fn init(&mut self, _style: PlayStyle) {
        self.pass = Pass::Draw;
        self.step = 0;
        self.round = 0;
    }

    fn loop_cycle(&mut self, grid: &mut Grid) {
        match self.pass {
            Pass::Draw => {
                let (x, y) = self.path[self.step];
                grid.set(usize::from(x), usize::from(y), self.color(self.step));
                self.step += 1;
                if self.step == GRID_CELLS {
                    trace!("spiral: erase pass");
                    self.pass = Pass::Erase;
                    self.step = 0;
                }
            }
            Pass::Erase => {
                let (x, y) = self.path[GRID_CELLS - 1 - self.step];
                grid.set(usize::from(x), usize::from(y), Rgb::OFF);
                self.step += 1;
                if self.step == GRID_CELLS {
                    trace!("spiral: draw pass");
                    self.pass = Pass::Draw;
                    self.step = 0;
                    self.round += 1;
                }
            }
        }
    }

    fn control(&mut self, _control: Control) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_covers_every_cell_once() {
        let path = spiral_path();
        let mut seen = [[false; GRID_WIDTH]; GRID_HEIGHT];
        for (x, y) in path {
            let cell = &mut seen[usize::from(y)][usize::from(x)];
            assert!(!*cell, "cell ({}, {}) visited twice", x, y);
            *cell = true;
        }
        assert!(seen.iter().flatten().all(|&s| s));
    }

    #[test]
    fn test_path_starts_in_center_without_jumps() {
        let path = spiral_path();
        assert_eq!(
            (usize::from(path[0].0), usize::from(path[0].1)),
            SPIRAL_CENTER
        );
        for pair in path.windows(2) {
            let dx = pair[0].0.abs_diff(pair[1].0);
            let dy = pair[0].1.abs_diff(pair[1].1);
            assert_eq!(dx + dy, 1);
        }
    }

    #[test]
    fn test_draw_then_erase() {
        let mut spiral = Spiral::new();
        spiral.init(PlayStyle::SelfPlaying);
        let mut grid = Grid::new();

        spiral.loop_cycle(&mut grid);
        assert_eq!(grid.lit_count(), 1);
        assert!(!grid.get(SPIRAL_CENTER.0, SPIRAL_CENTER.1).unwrap().is_off());

        for _ in 1..GRID_CELLS {
            spiral.loop_cycle(&mut grid);
        }
        assert_eq!(grid.lit_count(), GRID_CELLS);

        spiral.loop_cycle(&mut grid);
        assert_eq!(grid.lit_count(), GRID_CELLS - 1);
        // Erasing starts at the outer end, the centre stays lit longest
        assert!(!grid.get(SPIRAL_CENTER.0, SPIRAL_CENTER.1).unwrap().is_off());

        for _ in 1..GRID_CELLS {
            spiral.loop_cycle(&mut grid);
        }
        assert!(grid.is_blank());
    }

    #[test]
    fn test_init_restarts() {
        let mut spiral = Spiral::new();
        let mut grid = Grid::new();
        for _ in 0..GRID_CELLS + 5 {
            spiral.loop_cycle(&mut grid);
        }
        spiral.init(PlayStyle::Interactive);

        let mut fresh = Grid::new();
        spiral.loop_cycle(&mut fresh);
        assert_eq!(fresh.lit_count(), 1);
        assert!(!fresh.get(SPIRAL_CENTER.0, SPIRAL_CENTER.1).unwrap().is_off());
    }

    #[test]
    fn test_rounds_shift_colors() {
        let mut spiral = Spiral::new();
        let mut grid = Grid::new();
        spiral.loop_cycle(&mut grid);
        let first = grid.get(SPIRAL_CENTER.0, SPIRAL_CENTER.1);

        for _ in 1..2 * GRID_CELLS {
            spiral.loop_cycle(&mut grid);
        }
        spiral.loop_cycle(&mut grid);
        assert_ne!(grid.get(SPIRAL_CENTER.0, SPIRAL_CENTER.1), first);
    }
}
