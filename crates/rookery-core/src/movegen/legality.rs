//! Self-check filter for pseudo-legal candidates.

use crate::color::Color;
use crate::position::Position;

use super::{MoveList, is_king_safe};

/// Keep only the candidates after which `side`'s king is not attacked.
///
/// Each candidate is played on a copy of the position with `side` to move,
/// so the filter also works when generating for the side not on move.
pub(super) fn retain_legal(position: &Position, side: Color, candidates: MoveList) -> MoveList {
    let mut base = *position;
    base.set_side_to_move(side);

    let mut legal = MoveList::new();
    for &mv in &candidates {
        let mut scratch = base;
        scratch.play_unchecked(mv);
        if is_king_safe(&scratch, side) {
            legal.push(mv);
        }
    }
    legal
}
