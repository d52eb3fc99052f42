//! Perft node counts for checking move generation.

use crate::movegen::generate_legal_moves;
use crate::position::Position;

/// Count leaf nodes `depth` plies below `position`.
///
/// Depth 0 returns 1. Depth 1 returns the legal move count without playing
/// the moves.
pub fn perft(position: &Position, depth: usize) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = generate_legal_moves(position);
    if depth == 1 {
        return moves.len() as u64;
    }

    moves
        .as_slice()
        .iter()
        .map(|mv| perft(&position.make_move(*mv), depth - 1))
        .sum()
}

/// Per-move perft breakdown as `(uci, nodes)`, sorted by move text.
pub fn divide(position: &Position, depth: usize) -> Vec<(String, u64)> {
    let moves = generate_legal_moves(position);
    let mut results: Vec<(String, u64)> = moves
        .as_slice()
        .iter()
        .map(|mv| {
            let count = perft(&position.make_move(*mv), depth.saturating_sub(1));
            (mv.to_uci(), count)
        })
        .collect();
    results.sort_by(|a, b| a.0.cmp(&b.0));
    results
}
