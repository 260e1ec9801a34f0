// "What if" analysis: play a candidate move on a copy of the board, then
// search the best replies and report them from the mover's side.
use connect_four_core::{rules, Board, Game, Player};
use log::debug;

use crate::evaluation::score_position;
use crate::search::search;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisStep {
    pub column: usize,
    pub board: Board,
    /// Positive is good for the player whose move is being analyzed.
    pub score: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Analysis {
    pub column: usize,
    /// The side whose move was analyzed.
    pub player: Player,
    /// Search value of the move, from `player`'s side.
    pub score: i64,
    /// The analyzed move followed by the expected replies, in play order.
    pub steps: Vec<AnalysisStep>,
}

/// Converts a Player-Two value into `player`'s point of view.
pub fn from_perspective(score: i64, player: Player) -> i64 {
    match player {
        Player::Two => score,
        Player::One => -score,
    }
}

/// Analyzes the current player dropping into `column`, searching `depth`
/// plies of replies. Returns `None` when the game is over or the column
/// cannot take another piece. The game itself is never modified.
pub fn analyze_move(game: &Game, column: usize, depth: u8) -> Option<Analysis> {
    if game.is_over() || !game.board().is_column_open(column) {
        return None;
    }

    let mover = game.current_player();
    let (board, _) = rules::dropped(game.board(), column, mover).ok()?;

    // After the speculative move the other side is to play
    let result = search(&board, depth, mover == Player::One);

    let mut steps = Vec::with_capacity(result.principal_variation.len() + 1);
    steps.push(AnalysisStep {
        column,
        board,
        score: from_perspective(score_position(&board, Player::Two), mover),
    });
    steps.extend(result.principal_variation.iter().map(|step| AnalysisStep {
        column: step.column,
        board: step.board,
        score: from_perspective(step.score, mover),
    }));

    let score = from_perspective(result.value, mover);
    debug!(
        "Analysis of {} in column {}: score {}, {} steps",
        mover.name(),
        column,
        score,
        steps.len()
    );

    Some(Analysis {
        column,
        player: mover,
        score,
        steps,
    })
}
