//! Move legality, gravity drops and four-in-a-row detection.

use crate::board::{Board, Cell, COLS};
use crate::lines::{all_windows, window_cells, Direction, CONNECT};
use crate::{MoveError, Player, Position};

/// Columns whose top cell is empty, in ascending order.
pub fn legal_columns(board: &Board) -> Vec<usize> {
    (0..COLS).filter(|&col| board.is_column_open(col)).collect()
}

/// Drops `player`'s piece into the lowest empty row of `column` and returns
/// the row it landed on.
pub fn drop_piece(board: &mut Board, column: usize, player: Player) -> Result<usize, MoveError> {
    if column >= COLS {
        return Err(MoveError::InvalidColumn(column));
    }

    let row = board
        .next_open_row(column)
        .ok_or(MoveError::ColumnFull(column))?;
    board.set(Position { row, col: column }, player.to_cell());
    Ok(row)
}

/// Returns a copy of `board` with the piece dropped, leaving `board` as is.
pub fn dropped(board: &Board, column: usize, player: Player) -> Result<(Board, usize), MoveError> {
    let mut next = *board;
    let row = drop_piece(&mut next, column, player)?;
    Ok((next, row))
}

/// Checks whether the piece at `(row, col)` is part of four in a row.
///
/// Only the four lines through that cell are examined, so this is the check
/// to run right after a real move.
pub fn check_win(board: &Board, row: usize, col: usize) -> bool {
    let Some(origin) = Position::new(row, col) else {
        return false;
    };
    let cell = board.at(origin);
    if cell == Cell::Empty {
        return false;
    }

    Direction::ALL.iter().any(|&direction| {
        let (dr, dc) = direction.delta();
        let count = 1 + run_length(board, origin, dr, dc, cell) + run_length(board, origin, -dr, -dc, cell);
        count >= CONNECT
    })
}

// Contiguous cells equal to `cell` stepping away from `origin`, excluding it.
fn run_length(board: &Board, origin: Position, dr: isize, dc: isize, cell: Cell) -> usize {
    let mut count = 0;
    let mut current = origin.offset(dr, dc);
    while let Some(pos) = current {
        if board.at(pos) != cell {
            break;
        }
        count += 1;
        current = pos.offset(dr, dc);
    }
    count
}

/// Full-board scan for any four in a row belonging to `player`.
///
/// The search does not track where the last piece landed, so it relies on
/// this rather than [`check_win`].
pub fn has_won(board: &Board, player: Player) -> bool {
    let target = player.to_cell();
    all_windows()
        .iter()
        .any(|window| window_cells(board, window).iter().all(|&cell| cell == target))
}

/// The side with four in a row, if any.
pub fn winner(board: &Board) -> Option<Player> {
    [Player::One, Player::Two]
        .into_iter()
        .find(|&player| has_won(board, player))
}

pub fn is_terminal(board: &Board) -> bool {
    has_won(board, Player::One) || has_won(board, Player::Two) || board.is_full()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::ROWS;

    #[test]
    fn test_drop_piece_stacks() {
        let mut board = Board::new();
        assert_eq!(drop_piece(&mut board, 3, Player::One), Ok(5));
        assert_eq!(drop_piece(&mut board, 3, Player::Two), Ok(4));
        assert_eq!(board.get(5, 3), Cell::One);
        assert_eq!(board.get(4, 3), Cell::Two);
    }

    #[test]
    fn test_seventh_drop_is_rejected() {
        let mut board = Board::new();
        for i in 0..ROWS {
            let player = if i % 2 == 0 { Player::One } else { Player::Two };
            drop_piece(&mut board, 0, player).unwrap();
        }
        let before = board;
        assert_eq!(drop_piece(&mut board, 0, Player::One), Err(MoveError::ColumnFull(0)));
        assert_eq!(board, before);
        assert!(!legal_columns(&board).contains(&0));
    }

    #[test]
    fn test_out_of_range_column() {
        let mut board = Board::new();
        assert_eq!(drop_piece(&mut board, 7, Player::One), Err(MoveError::InvalidColumn(7)));
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_dropped_leaves_original() {
        let board = Board::new();
        let (next, row) = dropped(&board, 2, Player::Two).unwrap();
        assert_eq!(row, 5);
        assert_eq!(next.get(5, 2), Cell::Two);
        assert_eq!(board.piece_count(), 0);
    }

    #[test]
    fn test_legal_columns_ascending() {
        let board = Board::from_rows([
            "..X.O..",
            "..O.X..",
            "..X.O..",
            "..O.X..",
            "..X.O..",
            "..O.X..",
        ])
        .unwrap();
        assert_eq!(legal_columns(&board), vec![0, 1, 3, 5, 6]);
    }

    #[test]
    fn test_horizontal_win() {
        let board = Board::from_rows([
            ".......",
            ".......",
            ".......",
            ".......",
            ".OOO...",
            ".XXXX..",
        ])
        .unwrap();
        assert!(check_win(&board, 5, 2));
        assert!(check_win(&board, 5, 4));
        assert!(!check_win(&board, 4, 2));
        assert!(has_won(&board, Player::One));
        assert!(!has_won(&board, Player::Two));
        assert_eq!(winner(&board), Some(Player::One));
    }

    #[test]
    fn test_vertical_win() {
        let board = Board::from_rows([
            ".......",
            ".......",
            "......O",
            "X.....O",
            "X.....O",
            "X.....O",
        ])
        .unwrap();
        assert!(check_win(&board, 2, 6));
        assert!(has_won(&board, Player::Two));
        assert!(!check_win(&board, 3, 0));
    }

    #[test]
    fn test_diagonal_wins() {
        // `/` through (5,0) (4,1) (3,2) (2,3)
        let rising = Board::from_rows([
            ".......",
            ".......",
            "...X...",
            "..XO...",
            ".XOO...",
            "XOOX...",
        ])
        .unwrap();
        assert!(check_win(&rising, 3, 2));
        assert!(has_won(&rising, Player::One));

        // `\` through (2,3) (3,4) (4,5) (5,6)
        let falling = Board::from_rows([
            ".......",
            ".......",
            "...O...",
            "...XO..",
            "...XXO.",
            "...XXXO",
        ])
        .unwrap();
        assert!(check_win(&falling, 5, 6));
        assert!(has_won(&falling, Player::Two));
    }

    #[test]
    fn test_check_win_on_empty_cell() {
        assert!(!check_win(&Board::new(), 5, 3));
        assert!(!check_win(&Board::new(), 9, 9));
    }

    #[test]
    fn test_three_is_not_a_win() {
        let board = Board::from_rows([
            ".......",
            ".......",
            ".......",
            ".......",
            ".......",
            "XXX.OOO",
        ])
        .unwrap();
        assert!(!is_terminal(&board));
        assert_eq!(winner(&board), None);
    }

    #[test]
    fn test_full_board_is_terminal() {
        let board = Board::from_rows([
            "XXOOXXO",
            "OOXXOOX",
            "XXOOXXO",
            "OOXXOOX",
            "XXOOXXO",
            "OOXXOOX",
        ])
        .unwrap();
        assert_eq!(winner(&board), None);
        assert!(legal_columns(&board).is_empty());
        assert!(is_terminal(&board));
    }
}
