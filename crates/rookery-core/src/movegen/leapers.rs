//! Single-step pieces: knight jumps and king steps.

use crate::chess_move::Move;
use crate::color::Color;
use crate::position::Position;
use crate::square::Square;

use super::MoveList;

/// Emit a move to each on-board target not held by a friendly piece.
pub(super) fn gen_steps(
    position: &Position,
    from: Square,
    side: Color,
    deltas: &[(i8, i8)],
    list: &mut MoveList,
) {
    for &(df, dr) in deltas {
        let Some(to) = from.offset(df, dr) else {
            continue;
        };
        match position.piece_on(to) {
            Some(occupant) if occupant.color == side => {}
            _ => list.push(Move::new(from, to)),
        }
    }
}
