use connect_four_core::{
    lines::{all_windows, window_cells, CONNECT},
    Board, Cell, Player, CENTER_COL,
};

// Weights for the static evaluation. They are hand tuned and deliberately
// small compared to WIN_SCORE so a forced result always dominates.
const CENTER_PIECE_BONUS: i64 = 3;  // Per own piece in the middle column
const FOUR_SCORE: i64 = 100;        // Completed line
const THREE_SCORE: i64 = 5;         // Three own pieces plus one gap
const TWO_SCORE: i64 = 2;           // Two own pieces plus two gaps
const OPPONENT_THREE_PENALTY: i64 = 4; // Opponent three with one gap

/// Scores a position from `player`'s perspective; positive favours `player`.
///
/// This is a mid-game estimate only: it knows nothing about whether the game
/// has already ended. Own-piece terms and the opponent-threat term are not
/// mirror images, so `score_position(b, One)` is generally *not*
/// `-score_position(b, Two)`.
pub fn score_position(board: &Board, player: Player) -> i64 {
    let own = player.to_cell();

    // Central control keeps the most lines open
    let center_count = board
        .column(CENTER_COL)
        .iter()
        .filter(|&&cell| cell == own)
        .count() as i64;
    let mut score = center_count * CENTER_PIECE_BONUS;

    for window in all_windows() {
        score += evaluate_window(&window_cells(board, window), player);
    }

    score
}

/// Scores one four-cell window. The own-piece rules are exclusive of each
/// other; the opponent-threat penalty is checked independently.
pub fn evaluate_window(window: &[Cell; CONNECT], player: Player) -> i64 {
    let own = player.to_cell();
    let opponent = player.other().to_cell();
    let own_count = window.iter().filter(|&&c| c == own).count();
    let opponent_count = window.iter().filter(|&&c| c == opponent).count();
    let empty_count = window.iter().filter(|c| c.is_empty()).count();

    let mut score = 0;
    if own_count == 4 {
        score += FOUR_SCORE;
    } else if own_count == 3 && empty_count == 1 {
        score += THREE_SCORE;
    } else if own_count == 2 && empty_count == 2 {
        score += TWO_SCORE;
    }

    if opponent_count == 3 && empty_count == 1 {
        score -= OPPONENT_THREE_PENALTY;
    }

    score
}
