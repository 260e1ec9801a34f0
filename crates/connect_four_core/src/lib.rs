// Core Connect Four game logic modules
pub mod board;
pub mod error;
pub mod game;
pub mod lines;
pub mod player;
pub mod position;
pub mod rules;

// Re-export main types for convenience
pub use board::{Board, Cell, CENTER_COL, COLS, ROWS};
pub use error::{BoardError, MoveError};
pub use game::{Game, GameState, Outcome};
pub use player::Player;
pub use position::Position;
