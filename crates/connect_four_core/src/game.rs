use log::{info, warn};

use crate::{rules, Board, MoveError, Player};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Outcome {
    #[default]
    InProgress,
    Won(Player),
    Draw,
}

impl Outcome {
    pub fn is_over(self) -> bool {
        self != Outcome::InProgress
    }
}

/// Snapshot of everything a front end needs to draw the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameState {
    pub board: Board,
    pub current_player: Player,
    pub outcome: Outcome,
}

/// The authoritative game: one board, whose turn it is, and how it ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    board: Board,
    current_player: Player,
    outcome: Outcome,
}

impl Game {
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            current_player: Player::One,
            outcome: Outcome::InProgress,
        }
    }

    /// Clears the board and hands the first move to Player One.
    pub fn reset(&mut self) {
        *self = Self::new();
        info!("New game started");
    }

    /// Overrides whose turn it is; used right after [`Game::reset`] to pick
    /// who starts.
    pub fn set_current_player(&mut self, player: Player) {
        self.current_player = player;
        info!("{} moves first", player.name());
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_over()
    }

    /// Columns the current player may drop into. Empty once the game is over.
    pub fn legal_columns(&self) -> Vec<usize> {
        if self.is_over() {
            return Vec::new();
        }
        rules::legal_columns(&self.board)
    }

    pub fn state(&self) -> GameState {
        GameState {
            board: self.board,
            current_player: self.current_player,
            outcome: self.outcome,
        }
    }

    /// Drops the current player's piece into `column`.
    ///
    /// A win is checked before a draw, so a winning drop that also fills the
    /// board counts as a win. On a win or draw the turn does not advance.
    pub fn apply_move(&mut self, column: usize) -> Result<GameState, MoveError> {
        if self.is_over() {
            warn!("Rejected move in column {}: game is over", column);
            return Err(MoveError::GameAlreadyOver);
        }

        let mover = self.current_player;
        let row = rules::drop_piece(&mut self.board, column, mover).map_err(|e| {
            warn!("Rejected move by {}: {}", mover.name(), e);
            e
        })?;

        if rules::check_win(&self.board, row, column) {
            self.outcome = Outcome::Won(mover);
            info!("{} wins with a drop in column {}", mover.name(), column);
        } else if self.board.is_full() {
            self.outcome = Outcome::Draw;
            info!("Board full, game drawn");
        } else {
            self.current_player = mover.other();
        }

        Ok(self.state())
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Cell;

    // A full 42-move game with no four in a row, Player One moving first.
    const DRAW_SEQUENCE: [usize; 42] = [
        3, 3, 0, 2, 5, 4, 5, 6, 4, 2, 2, 3, 3, 5, 5, 2, 2, 4, 3, 3, 1, 1, 2, 1, 5, 5, 0, 4, 0, 4,
        4, 6, 6, 6, 6, 0, 1, 0, 6, 0, 1, 1,
    ];

    // Player Two completes four in a row with the 42nd drop.
    const LAST_DROP_WIN_SEQUENCE: [usize; 42] = [
        6, 2, 2, 5, 4, 0, 4, 6, 4, 4, 0, 0, 6, 1, 1, 5, 4, 5, 4, 2, 3, 1, 5, 5, 2, 1, 6, 2, 0, 6,
        2, 1, 1, 6, 0, 5, 0, 3, 3, 3, 3, 3,
    ];

    #[test]
    fn test_initial_state() {
        let game = Game::new();
        assert_eq!(game.current_player(), Player::One);
        assert_eq!(game.outcome(), Outcome::InProgress);
        assert_eq!(game.legal_columns().len(), 7);
    }

    #[test]
    fn test_apply_move_switches_player() {
        let mut game = Game::new();
        let state = game.apply_move(3).unwrap();
        assert_eq!(state.current_player, Player::Two);
        assert_eq!(state.board.get(5, 3), Cell::One);
        assert_eq!(state.outcome, Outcome::InProgress);
    }

    #[test]
    fn test_set_current_player_after_reset() {
        let mut game = Game::new();
        game.apply_move(0).unwrap();
        game.reset();
        game.set_current_player(Player::Two);
        let state = game.apply_move(4).unwrap();
        assert_eq!(state.board.get(5, 4), Cell::Two);
        assert_eq!(state.current_player, Player::One);
    }

    #[test]
    fn test_win_detection() {
        let mut game = Game::new();
        for col in 0..3 {
            game.apply_move(col).unwrap(); // One
            game.apply_move(col).unwrap(); // Two, stacked on top
        }
        let state = game.apply_move(3).unwrap();
        assert_eq!(state.outcome, Outcome::Won(Player::One));
        assert_eq!(state.current_player, Player::One);
        assert!(game.legal_columns().is_empty());
    }

    #[test]
    fn test_move_after_game_over_is_rejected() {
        let mut game = Game::new();
        for col in 0..3 {
            game.apply_move(col).unwrap();
            game.apply_move(col).unwrap();
        }
        game.apply_move(3).unwrap();
        let before = game.clone();

        assert_eq!(game.apply_move(4), Err(MoveError::GameAlreadyOver));
        assert_eq!(game, before);
    }

    #[test]
    fn test_full_column_leaves_state_unchanged() {
        let mut game = Game::new();
        for _ in 0..6 {
            game.apply_move(0).unwrap();
        }
        let before = game.clone();
        assert_eq!(game.apply_move(0), Err(MoveError::ColumnFull(0)));
        assert_eq!(game, before);
        assert_eq!(game.apply_move(9), Err(MoveError::InvalidColumn(9)));
        assert_eq!(game, before);
    }

    #[test]
    fn test_draw_on_final_drop() {
        let mut game = Game::new();
        let (last, rest) = DRAW_SEQUENCE.split_last().unwrap();
        for &col in rest {
            let state = game.apply_move(col).unwrap();
            assert_eq!(state.outcome, Outcome::InProgress);
        }
        let state = game.apply_move(*last).unwrap();
        assert_eq!(state.outcome, Outcome::Draw);
        assert!(state.board.is_full());
    }

    #[test]
    fn test_win_on_final_drop_is_not_a_draw() {
        let mut game = Game::new();
        for &col in &LAST_DROP_WIN_SEQUENCE {
            game.apply_move(col).unwrap();
        }
        assert!(game.board().is_full());
        assert_eq!(game.outcome(), Outcome::Won(Player::Two));
    }
}
