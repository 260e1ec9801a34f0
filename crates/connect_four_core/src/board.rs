use std::fmt;

use crate::{BoardError, Player, Position};

pub const ROWS: usize = 6;
pub const COLS: usize = 7;
pub const CENTER_COL: usize = COLS / 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    One,
    Two,
}

impl Cell {
    pub fn player(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::One => Some(Player::One),
            Cell::Two => Some(Player::Two),
        }
    }

    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::One => 'X',
            Cell::Two => 'O',
        }
    }

    fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '.' => Some(Cell::Empty),
            'X' | 'x' => Some(Cell::One),
            'O' | 'o' => Some(Cell::Two),
            _ => None,
        }
    }
}

impl From<Player> for Cell {
    fn from(player: Player) -> Self {
        player.to_cell()
    }
}

/// A 6x7 grid of cells. Boards are small `Copy` values, so search branches
/// each work on their own copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board {
    cells: [[Cell; COLS]; ROWS],
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: [[Cell::Empty; COLS]; ROWS],
        }
    }

    /// Parses a board from its six text rows, top row first.
    /// `.` is empty, `X` is Player One and `O` is Player Two.
    pub fn from_rows(rows: [&str; ROWS]) -> Result<Self, BoardError> {
        let mut board = Self::new();
        for (row, line) in rows.iter().enumerate() {
            let symbols: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
            if symbols.len() != COLS {
                return Err(BoardError::WrongRowLength { row, len: symbols.len() });
            }
            for (col, &symbol) in symbols.iter().enumerate() {
                board.cells[row][col] =
                    Cell::from_symbol(symbol).ok_or(BoardError::UnknownCell { row, col, symbol })?;
            }
        }

        if let Some(pos) = board.first_floating_piece() {
            return Err(BoardError::FloatingPiece { row: pos.row, col: pos.col });
        }
        Ok(board)
    }

    /// Row 0 is the top, row 5 is the bottom
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row][col]
    }

    pub fn at(&self, pos: Position) -> Cell {
        self.cells[pos.row][pos.col]
    }

    pub(crate) fn set(&mut self, pos: Position, cell: Cell) {
        self.cells[pos.row][pos.col] = cell;
    }

    pub fn column(&self, col: usize) -> [Cell; ROWS] {
        let mut column = [Cell::Empty; ROWS];
        for (row, cell) in column.iter_mut().enumerate() {
            *cell = self.cells[row][col];
        }
        column
    }

    /// A column accepts another piece while its top cell is empty.
    pub fn is_column_open(&self, col: usize) -> bool {
        col < COLS && self.cells[0][col].is_empty()
    }

    /// The lowest empty row in `col`, scanning from the bottom upward.
    pub fn next_open_row(&self, col: usize) -> Option<usize> {
        if col >= COLS {
            return None;
        }
        (0..ROWS).rev().find(|&row| self.cells[row][col].is_empty())
    }

    /// The board is full once every top cell is occupied.
    pub fn is_full(&self) -> bool {
        (0..COLS).all(|col| !self.is_column_open(col))
    }

    pub fn piece_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| !cell.is_empty())
            .count()
    }

    pub fn count(&self, player: Player) -> usize {
        let target = player.to_cell();
        self.cells.iter().flatten().filter(|&&cell| cell == target).count()
    }

    /// Checks that no piece hangs above an empty cell.
    pub fn satisfies_gravity(&self) -> bool {
        self.first_floating_piece().is_none()
    }

    fn first_floating_piece(&self) -> Option<Position> {
        for col in 0..COLS {
            for row in 0..ROWS - 1 {
                if !self.cells[row][col].is_empty() && self.cells[row + 1][col].is_empty() {
                    return Some(Position { row, col });
                }
            }
        }
        None
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.iter().enumerate() {
            let line: String = row.iter().map(|cell| cell.symbol()).collect();
            if i + 1 < ROWS {
                writeln!(f, "{}", line)?;
            } else {
                write!(f, "{}", line)?;
            }
        }
        Ok(())
    }
}
