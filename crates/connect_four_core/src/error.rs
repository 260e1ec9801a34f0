use thiserror::Error;

use crate::board::COLS;

/// Reasons a move is rejected. The board is left untouched in every case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("column {0} is out of range (0-{max})", max = COLS - 1)]
    InvalidColumn(usize),
    #[error("column {0} is full")]
    ColumnFull(usize),
    #[error("game is already over")]
    GameAlreadyOver,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("row {row} has {len} cells, expected {expected}", expected = COLS)]
    WrongRowLength { row: usize, len: usize },
    #[error("unknown cell symbol {symbol:?} at row {row}, column {col}")]
    UnknownCell { row: usize, col: usize, symbol: char },
    #[error("piece at row {row}, column {col} has an empty cell below it")]
    FloatingPiece { row: usize, col: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_error_display() {
        assert_eq!(
            MoveError::InvalidColumn(9).to_string(),
            "column 9 is out of range (0-6)"
        );
        assert_eq!(MoveError::ColumnFull(0).to_string(), "column 0 is full");
        assert_eq!(MoveError::GameAlreadyOver.to_string(), "game is already over");
    }

    #[test]
    fn test_board_error_display() {
        let err = BoardError::FloatingPiece { row: 2, col: 4 };
        assert_eq!(
            err.to_string(),
            "piece at row 2, column 4 has an empty cell below it"
        );
    }
}
