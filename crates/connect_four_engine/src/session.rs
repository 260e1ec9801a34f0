use connect_four_core::{Game, GameState, MoveError, Player};
use log::info;

use crate::ai::ConnectFourAI;
use crate::analysis::Analysis;
use crate::config::SearchConfig;
use crate::error::EngineError;

/// One game plus the computer opponent that plays in it.
///
/// Every operation takes `&self` or `&mut self`, so whoever owns the session
/// decides how calls are serialized.
#[derive(Debug, Clone, Default)]
pub struct GameSession {
    game: Game,
    ai: ConnectFourAI,
}

impl GameSession {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            game: Game::new(),
            ai: ConnectFourAI::new(config),
        }
    }

    pub fn reset(&mut self) {
        self.game.reset();
    }

    pub fn set_current_player(&mut self, player: Player) {
        self.game.set_current_player(player);
    }

    /// Plays the current player's piece in `column`.
    pub fn apply_move(&mut self, column: usize) -> Result<GameState, MoveError> {
        self.game.apply_move(column)
    }

    /// Picks the computer's column without playing it.
    pub fn compute_ai_move(&self) -> Result<usize, EngineError> {
        self.ai.get_move(&self.game)
    }

    /// Picks the computer's column and plays it.
    pub fn play_ai_move(&mut self) -> Result<GameState, EngineError> {
        let column = self.compute_ai_move()?;
        info!("Computer plays column {}", column);
        Ok(self.game.apply_move(column)?)
    }

    pub fn analyze_move(&self, column: usize) -> Option<Analysis> {
        self.ai.analyze(&self.game, column)
    }

    pub fn state(&self) -> GameState {
        self.game.state()
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn config(&self) -> &SearchConfig {
        self.ai.config()
    }
}
