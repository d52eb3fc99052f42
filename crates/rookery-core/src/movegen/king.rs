//! Castling candidates.

use crate::castle_rights::{CastlePath, CastleSide};
use crate::chess_move::Move;
use crate::color::Color;
use crate::piece::{Piece, PieceKind};
use crate::position::Position;
use crate::square::Square;

use super::{GenMode, MoveList, generate_moves};

/// Emit each castle `side` may play from `from`.
///
/// A castle needs the right, the king and rook on their home squares, an
/// empty gap between them, and no attacked square from the king's origin to
/// its destination. The opponent's reach is computed at most once.
pub(super) fn gen_castles(position: &Position, from: Square, side: Color, list: &mut MoveList) {
    let mut enemy_reach: Option<MoveList> = None;
    let rook = Some(Piece::new(PieceKind::Rook, side));

    for castle in CastleSide::ALL {
        if !position.castling().has(side, castle) {
            continue;
        }
        let path = CastlePath::new(side, castle);
        if path.king_from != from || position.piece_on(path.rook_from) != rook {
            continue;
        }
        if path.between().any(|sq| position.is_occupied(sq)) {
            continue;
        }

        let reach = enemy_reach
            .get_or_insert_with(|| generate_moves(position, side.flip(), GenMode::Scratch));
        if path.king_walk().any(|sq| reach.targets(sq)) {
            continue;
        }

        list.push(Move::new(path.king_from, path.king_to));
    }
}
