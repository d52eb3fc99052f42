//! Copy-make move application on [`Position`].

use crate::castle_rights::{CastlePath, CastleRights, CastleSide};
use crate::chess_move::Move;
use crate::color::Color;
use crate::piece::{Piece, PieceKind};
use crate::position::Position;

/// What a played move did to the board, for notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveEffects {
    /// The piece that moved, before any promotion.
    pub moved: Piece,
    /// The piece removed from the board, if any.
    pub captured: Option<Piece>,
    /// Whether the capture was en passant.
    pub en_passant: bool,
    /// Set when the king castled; the rook has moved too.
    pub castle: Option<CastleSide>,
}

impl Position {
    /// Play `mv` in place without checking legality.
    ///
    /// Returns `None`, leaving the position unchanged, if the source square
    /// is empty.
    pub(crate) fn play_unchecked(&mut self, mv: Move) -> Option<MoveEffects> {
        let from = mv.source();
        let to = mv.dest();
        let moved = self.piece_on(from)?;
        let us = moved.color;

        let mut captured = self.piece_on(to);
        let mut en_passant = false;
        let mut castle = None;

        match moved.kind {
            PieceKind::Pawn if captured.is_none() && self.en_passant() == Some(to) => {
                if let Some(victim) = to.offset(0, -us.forward()) {
                    captured = self.put(victim, None);
                    en_passant = captured.is_some();
                }
            }
            PieceKind::King => {
                if let Some(side) = CastleSide::from_king_move(from, to) {
                    let path = CastlePath::new(us, side);
                    if path.king_from == from {
                        let rook = self.put(path.rook_from, None);
                        self.put(path.rook_to, rook);
                        castle = Some(side);
                    }
                }
            }
            _ => {}
        }

        if captured.is_some() || moved.kind == PieceKind::Pawn {
            self.set_halfmove_clock(0);
        } else {
            self.set_halfmove_clock(self.halfmove_clock().saturating_add(1));
        }
        if us == Color::Black {
            self.set_fullmove_number(self.fullmove_number().saturating_add(1));
        }

        let double_push = moved.kind == PieceKind::Pawn
            && from.file() == to.file()
            && from.rank().abs_diff(to.rank()) == 2;
        self.set_en_passant(if double_push {
            from.offset(0, us.forward())
        } else {
            None
        });

        let revoked = CastleRights::revoked_by(from).insert(CastleRights::revoked_by(to));
        self.set_castling(self.castling().remove(revoked));

        let placed = match mv.promotion() {
            Some(promo) => Piece::new(promo.piece_kind(), us),
            None => moved,
        };
        self.put(from, None);
        self.put(to, Some(placed));
        self.set_side_to_move(us.flip());

        Some(MoveEffects {
            moved,
            captured,
            en_passant,
            castle,
        })
    }

    /// Return the position after `mv`, leaving `self` untouched.
    ///
    /// The move is not checked for legality.
    pub fn make_move(&self, mv: Move) -> Position {
        let mut next = *self;
        next.play_unchecked(mv);
        next
    }
}

#[cfg(test)]
mod tests {
    use crate::castle_rights::{CastleRights, CastleSide};
    use crate::chess_move::{Move, PromotionPiece};
    use crate::color::Color;
    use crate::piece::{Piece, PieceKind};
    use crate::position::Position;
    use crate::square::Square;

    fn pos(fen: &str) -> Position {
        fen.parse().unwrap()
    }

    #[test]
    fn quiet_move_advances_clock() {
        let after =
            pos("4k3/8/8/8/8/8/8/4K1N1 w - - 3 10").make_move(Move::new(Square::G1, Square::F3));
        assert_eq!(after.halfmove_clock(), 4);
        assert_eq!(after.fullmove_number(), 10);
        assert_eq!(after.side_to_move(), Color::Black);
    }

    #[test]
    fn pawn_move_resets_clock_and_black_bumps_fullmove() {
        let after =
            pos("4k3/4p3/8/8/8/8/8/4K3 b - - 7 10").make_move(Move::new(Square::E7, Square::E6));
        assert_eq!(after.halfmove_clock(), 0);
        assert_eq!(after.fullmove_number(), 11);
    }

    #[test]
    fn double_push_sets_en_passant_target() {
        let start = Position::starting_position();
        let after = start.make_move(Move::new(Square::E2, Square::E4));
        assert_eq!(after.en_passant(), Some(Square::E3));
        let after = after.make_move(Move::new(Square::G8, Square::F6));
        assert_eq!(after.en_passant(), None);
    }

    #[test]
    fn en_passant_removes_pawn_behind() {
        let mut p = pos("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1");
        let effects = p.play_unchecked(Move::new(Square::E5, Square::D6)).unwrap();
        assert!(effects.en_passant);
        assert_eq!(effects.captured, Some(Piece::new(PieceKind::Pawn, Color::Black)));
        assert_eq!(p.piece_on(Square::D5), None);
        assert_eq!(p.piece_on(Square::D6), Some(Piece::new(PieceKind::Pawn, Color::White)));
        assert_eq!(p.to_string(), "4k3/8/3P4/8/8/8/8/4K3 b - - 0 1");
    }

    #[test]
    fn castling_moves_rook() {
        let mut p = pos("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        let effects = p.play_unchecked(Move::new(Square::E1, Square::G1)).unwrap();
        assert_eq!(effects.castle, Some(CastleSide::KingSide));
        assert_eq!(p.to_string(), "r3k2r/8/8/8/8/8/8/R4RK1 b kq - 1 1");

        let after = p.make_move(Move::new(Square::E8, Square::C8));
        assert_eq!(after.to_string(), "2kr3r/8/8/8/8/8/8/R4RK1 w - - 2 2");
    }

    #[test]
    fn rook_move_and_capture_revoke_rights() {
        let p = pos("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        let after = p.make_move(Move::new(Square::H1, Square::H8));
        assert_eq!(after.castling(), CastleRights::WHITE_QUEEN.insert(CastleRights::BLACK_QUEEN));
    }

    #[test]
    fn castling_invalidation_is_permanent() {
        let p = pos("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        let p = p.make_move(Move::new(Square::E1, Square::E2));
        let p = p.make_move(Move::new(Square::A8, Square::B8));
        let p = p.make_move(Move::new(Square::E2, Square::E1));
        let p = p.make_move(Move::new(Square::B8, Square::A8));
        assert_eq!(p.castling(), CastleRights::BLACK_KING);
        assert_eq!(p.to_string(), "r3k2r/8/8/8/8/8/8/R3K2R w k - 4 3");
    }

    #[test]
    fn promotion_substitutes_piece() {
        let mut p = pos("1r2k3/P7/8/8/8/8/8/4K3 w - - 0 1");
        let effects = p
            .play_unchecked(Move::new_promotion(Square::A7, Square::B8, PromotionPiece::Knight))
            .unwrap();
        assert_eq!(effects.moved.kind, PieceKind::Pawn);
        assert_eq!(effects.captured.map(|c| c.kind), Some(PieceKind::Rook));
        assert_eq!(p.piece_on(Square::B8), Some(Piece::new(PieceKind::Knight, Color::White)));
        assert_eq!(p.piece_on(Square::A7), None);
    }

    #[test]
    fn empty_source_is_a_no_op() {
        let mut p = Position::starting_position();
        assert!(p.play_unchecked(Move::new(Square::E4, Square::E5)).is_none());
        assert_eq!(p, Position::starting_position());
    }

    #[test]
    fn make_move_leaves_original() {
        let start = Position::starting_position();
        let _ = start.make_move(Move::new(Square::E2, Square::E4));
        assert_eq!(start, Position::starting_position());
    }
}
