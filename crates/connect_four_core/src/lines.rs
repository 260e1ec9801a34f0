//! Every four-cell line on the board, computed once and shared by the
//! exhaustive win scan and the positional evaluator.

use once_cell::sync::Lazy;

use crate::board::{Board, Cell, COLS, ROWS};
use crate::Position;

/// Number of same-player cells needed to win.
pub const CONNECT: usize = 4;

pub type Window = [Position; CONNECT];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Horizontal,
    Vertical,
    /// Row and column both increase (`\` on screen).
    DiagonalDown,
    /// Row increases while column decreases (`/` on screen).
    DiagonalUp,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Horizontal,
        Direction::Vertical,
        Direction::DiagonalDown,
        Direction::DiagonalUp,
    ];

    /// Step between consecutive cells of a line, as (row, col).
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Horizontal => (0, 1),
            Direction::Vertical => (1, 0),
            Direction::DiagonalDown => (1, 1),
            Direction::DiagonalUp => (1, -1),
        }
    }
}

static WINDOWS: Lazy<Vec<Window>> = Lazy::new(generate_windows);

fn generate_windows() -> Vec<Window> {
    let mut windows = Vec::new();
    for direction in Direction::ALL {
        let (dr, dc) = direction.delta();
        for row in 0..ROWS {
            for col in 0..COLS {
                let Some(start) = Position::new(row, col) else {
                    continue;
                };
                let mut window = [start; CONNECT];
                let mut complete = true;
                for (i, slot) in window.iter_mut().enumerate().skip(1) {
                    match start.offset(dr * i as isize, dc * i as isize) {
                        Some(pos) => *slot = pos,
                        None => {
                            complete = false;
                            break;
                        }
                    }
                }
                if complete {
                    windows.push(window);
                }
            }
        }
    }
    windows
}

/// All 69 windows: horizontal first, then vertical, then both diagonals.
pub fn all_windows() -> &'static [Window] {
    &WINDOWS
}

pub fn window_cells(board: &Board, window: &Window) -> [Cell; CONNECT] {
    window.map(|pos| board.at(pos))
}
