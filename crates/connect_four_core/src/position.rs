use crate::board::{COLS, ROWS};

/// A cell coordinate. Row 0 is the top of the board, row 5 the bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Option<Self> {
        if row < ROWS && col < COLS {
            Some(Self { row, col })
        } else {
            None
        }
    }

    /// Steps by `(dr, dc)`, returning `None` when the result leaves the board.
    pub fn offset(self, dr: isize, dc: isize) -> Option<Self> {
        let row = self.row.checked_add_signed(dr)?;
        let col = self.col.checked_add_signed(dc)?;
        Self::new(row, col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_out_of_range() {
        assert!(Position::new(5, 6).is_some());
        assert!(Position::new(6, 0).is_none());
        assert!(Position::new(0, 7).is_none());
    }

    #[test]
    fn test_offset_stays_on_board() {
        let corner = Position { row: 0, col: 0 };
        assert_eq!(corner.offset(-1, 0), None);
        assert_eq!(corner.offset(0, -1), None);
        assert_eq!(corner.offset(1, 1), Some(Position { row: 1, col: 1 }));
        assert_eq!(Position { row: 5, col: 6 }.offset(1, 0), None);
    }
}
