// Depth-bounded minimax with alpha-beta pruning. Player Two maximizes and
// Player One minimizes; every value is from Player Two's point of view.
use connect_four_core::{rules, Board, Player};
use log::debug;
use rayon::prelude::*;

use crate::evaluation::score_position;

/// Value of a board on which Player Two has four in a row (negated for One).
/// Far above any heuristic sum, so forced wins always dominate.
pub const WIN_SCORE: i64 = 100_000_000_000_000;
pub const DRAW_SCORE: i64 = 0;

// Open search window
const NEG_INFINITY: i64 = i64::MIN;
const INFINITY: i64 = i64::MAX;

/// One ply of the line the search judged best.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PvStep {
    pub column: usize,
    /// Board after `column` was played
    pub board: Board,
    /// Search value of that board
    pub score: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// `None` at terminal boards and at the depth cutoff.
    pub best_column: Option<usize>,
    pub value: i64,
    /// Best line from this node, in play order.
    pub principal_variation: Vec<PvStep>,
}

impl SearchResult {
    fn leaf(value: i64) -> Self {
        Self {
            best_column: None,
            value,
            principal_variation: Vec::new(),
        }
    }
}

/// Exact value of a finished game, or `None` while moves remain.
pub fn terminal_value(board: &Board) -> Option<i64> {
    if rules::has_won(board, Player::Two) {
        Some(WIN_SCORE)
    } else if rules::has_won(board, Player::One) {
        Some(-WIN_SCORE)
    } else if board.is_full() {
        Some(DRAW_SCORE)
    } else {
        None
    }
}

/// Searches `board` to `depth` plies with an open window.
pub fn search(board: &Board, depth: u8, maximizing: bool) -> SearchResult {
    minimax(board, depth, NEG_INFINITY, INFINITY, maximizing)
}

/// Searches `board` to `depth` plies inside the `(alpha, beta)` window.
/// `maximizing` is true when Player Two is to move.
pub fn minimax(board: &Board, depth: u8, alpha: i64, beta: i64, maximizing: bool) -> SearchResult {
    let mut nodes = 0;
    let result = alpha_beta(board, depth, alpha, beta, maximizing, &mut nodes);
    debug!(
        "Searched {} nodes at depth {}: column {:?}, value {}",
        nodes, depth, result.best_column, result.value
    );
    result
}

/// Picks Player Two's move on `board`.
pub fn search_best_move(board: &Board, depth: u8) -> SearchResult {
    search(board, depth, true)
}

/// Like [`search_best_move`], but each root column is searched on its own
/// rayon task with an open window.
///
/// The chosen column and value match the sequential search. The principal
/// variation can differ where several replies tie.
pub fn search_best_move_parallel(board: &Board, depth: u8) -> SearchResult {
    if depth == 0 || terminal_value(board).is_some() {
        return search_best_move(board, depth);
    }

    let columns = rules::legal_columns(board);
    let children: Vec<Option<(usize, Board, SearchResult, u64)>> = columns
        .par_iter()
        .map(|&col| {
            let (child, _) = rules::dropped(board, col, Player::Two).ok()?;
            let mut nodes = 0;
            let result = alpha_beta(&child, depth - 1, NEG_INFINITY, INFINITY, false, &mut nodes);
            Some((col, child, result, nodes))
        })
        .collect();

    let mut best = SearchResult {
        best_column: columns.first().copied(),
        value: NEG_INFINITY,
        principal_variation: Vec::new(),
    };
    let mut nodes = 1;
    // Ascending column order, so the first column reaching the best value wins ties
    for (col, child, result, child_nodes) in children.into_iter().flatten() {
        nodes += child_nodes;
        if result.value > best.value {
            best.value = result.value;
            best.best_column = Some(col);
            best.principal_variation = extend_line(col, child, result);
        }
    }

    debug!(
        "Searched {} nodes across {} root tasks at depth {}: column {:?}, value {}",
        nodes,
        columns.len(),
        depth,
        best.best_column,
        best.value
    );
    best
}

fn alpha_beta(
    board: &Board,
    depth: u8,
    mut alpha: i64,
    mut beta: i64,
    maximizing: bool,
    nodes: &mut u64,
) -> SearchResult {
    *nodes += 1;

    if let Some(value) = terminal_value(board) {
        return SearchResult::leaf(value);
    }
    if depth == 0 {
        // Always Two's perspective, whoever is to move
        return SearchResult::leaf(score_position(board, Player::Two));
    }

    let columns = rules::legal_columns(board);
    let mover = if maximizing { Player::Two } else { Player::One };
    let mut best = SearchResult {
        // Fallback in case nothing improves on the initial bound
        best_column: columns.first().copied(),
        value: if maximizing { NEG_INFINITY } else { INFINITY },
        principal_variation: Vec::new(),
    };

    for col in columns {
        let Ok((child, _)) = rules::dropped(board, col, mover) else {
            continue;
        };
        let result = alpha_beta(&child, depth - 1, alpha, beta, !maximizing, nodes);

        // Strict comparison keeps the lowest column among equal values
        let improves = if maximizing {
            result.value > best.value
        } else {
            result.value < best.value
        };
        if improves {
            best.value = result.value;
            best.best_column = Some(col);
            best.principal_variation = extend_line(col, child, result);
        }

        if maximizing {
            alpha = alpha.max(best.value);
        } else {
            beta = beta.min(best.value);
        }
        if alpha >= beta {
            break;
        }
    }

    best
}

fn extend_line(column: usize, board: Board, child: SearchResult) -> Vec<PvStep> {
    let mut line = Vec::with_capacity(child.principal_variation.len() + 1);
    line.push(PvStep {
        column,
        board,
        score: child.value,
    });
    line.extend(child.principal_variation);
    line
}
