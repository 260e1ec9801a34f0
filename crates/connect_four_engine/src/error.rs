use connect_four_core::{MoveError, Player};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("it is {}'s turn, not the computer's", .0.name())]
    NotComputerTurn(Player),
    #[error("game is already over")]
    GameOver,
    #[error("no legal columns remain")]
    NoLegalMoves,
    #[error(transparent)]
    Move(#[from] MoveError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_error_display() {
        assert_eq!(
            EngineError::NotComputerTurn(Player::One).to_string(),
            "it is Player One's turn, not the computer's"
        );
        assert_eq!(
            EngineError::from(MoveError::ColumnFull(2)).to_string(),
            "column 2 is full"
        );
    }
}
