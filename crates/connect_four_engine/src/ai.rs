use connect_four_core::Game;

use crate::analysis::{analyze_move, Analysis};
use crate::config::SearchConfig;
use crate::error::EngineError;
use crate::search::{search_best_move, search_best_move_parallel};

/// The computer opponent. It always plays Player Two and never mutates the
/// game it is asked about.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConnectFourAI {
    config: SearchConfig,
}

impl ConnectFourAI {
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Chooses Player Two's column. Fails if the game is over or it is not
    /// the computer's turn.
    pub fn get_move(&self, game: &Game) -> Result<usize, EngineError> {
        if game.is_over() {
            return Err(EngineError::GameOver);
        }
        let player = game.current_player();
        if !player.is_computer() {
            return Err(EngineError::NotComputerTurn(player));
        }

        let result = if self.config.parallel_root() {
            search_best_move_parallel(game.board(), self.config.ai_depth())
        } else {
            search_best_move(game.board(), self.config.ai_depth())
        };
        result.best_column.ok_or(EngineError::NoLegalMoves)
    }

    pub fn analyze(&self, game: &Game, column: usize) -> Option<Analysis> {
        analyze_move(game, column, self.config.analysis_depth())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use connect_four_core::Player;

    #[test]
    fn test_refuses_human_turn() {
        let ai = ConnectFourAI::default();
        let game = Game::new();
        assert_eq!(ai.get_move(&game), Err(EngineError::NotComputerTurn(Player::One)));
    }

    #[test]
    fn test_refuses_finished_game() {
        let ai = ConnectFourAI::default();
        let mut game = Game::new();
        for col in 0..3 {
            game.apply_move(col).unwrap();
            game.apply_move(col).unwrap();
        }
        game.apply_move(3).unwrap();
        assert_eq!(ai.get_move(&game), Err(EngineError::GameOver));
    }

    #[test]
    fn test_parallel_config_picks_same_opening() {
        let mut game = Game::new();
        game.set_current_player(Player::Two);
        let sequential = ConnectFourAI::default();
        let parallel = ConnectFourAI::new(SearchConfig::default().with_parallel_root(true));
        assert_eq!(sequential.get_move(&game), Ok(3));
        assert_eq!(parallel.get_move(&game), Ok(3));
    }
}
