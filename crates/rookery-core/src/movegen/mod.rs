//! Move generation in two modes: legal moves, and raw scratch reach for attack detection.

mod king;
mod leapers;
mod legality;
mod pawns;
mod sliders;
mod tables;

use crate::chess_move::Move;
use crate::color::Color;
use crate::piece::PieceKind;
use crate::position::Position;
use crate::square::Square;

use self::king::gen_castles;
use self::leapers::gen_steps;
use self::legality::retain_legal;
use self::pawns::gen_pawn;
use self::sliders::gen_slider;
use self::tables::{KING_DELTAS, KNIGHT_DELTAS};

/// How far generation goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenMode {
    /// Pseudo-legal candidates, castling included, filtered down to moves
    /// that leave the mover's king safe.
    Legal,
    /// Every square each piece bears on: no castling, no pushes, pawn
    /// diagonals regardless of occupancy, no self-check filter. Never recurses.
    Scratch,
}

/// Growable list of generated moves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveList {
    moves: Vec<Move>,
}

impl MoveList {
    /// Create an empty move list.
    pub fn new() -> MoveList {
        MoveList {
            moves: Vec::with_capacity(48),
        }
    }

    /// Push a move onto the list.
    #[inline]
    pub fn push(&mut self, mv: Move) {
        self.moves.push(mv);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves
    }

    /// Return `true` if any listed move lands on `sq`.
    pub fn targets(&self, sq: Square) -> bool {
        self.moves.iter().any(|mv| mv.dest() == sq)
    }
}

impl std::ops::Index<usize> for MoveList {
    type Output = Move;
    #[inline]
    fn index(&self, index: usize) -> &Move {
        &self.moves[index]
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;
    fn into_iter(self) -> Self::IntoIter {
        self.moves.iter()
    }
}

impl From<MoveList> for Vec<Move> {
    fn from(list: MoveList) -> Vec<Move> {
        list.moves
    }
}

/// Generate moves for `side` on `position`.
///
/// Pieces are visited in square order and each piece's moves are appended
/// in turn, so the output order is stable for a given position.
pub fn generate_moves(position: &Position, side: Color, mode: GenMode) -> MoveList {
    let mut list = MoveList::new();
    for (sq, piece) in position.pieces_of(side) {
        match piece.kind {
            PieceKind::Pawn => gen_pawn(position, sq, side, mode, &mut list),
            PieceKind::Knight => gen_steps(position, sq, side, &KNIGHT_DELTAS, &mut list),
            PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen => {
                gen_slider(position, sq, piece, &mut list)
            }
            PieceKind::King => {
                gen_steps(position, sq, side, &KING_DELTAS, &mut list);
                if mode == GenMode::Legal {
                    gen_castles(position, sq, side, &mut list);
                }
            }
        }
    }

    match mode {
        GenMode::Scratch => list,
        GenMode::Legal => retain_legal(position, side, list),
    }
}

/// Generate all legal moves for the side to move.
pub fn generate_legal_moves(position: &Position) -> MoveList {
    generate_moves(position, position.side_to_move(), GenMode::Legal)
}

/// Return `true` if any piece of `by` bears on `sq`.
pub fn is_square_attacked(position: &Position, sq: Square, by: Color) -> bool {
    generate_moves(position, by, GenMode::Scratch).targets(sq)
}

/// Return `true` if `color`'s king is not attacked. A side without a king is safe.
pub fn is_king_safe(position: &Position, color: Color) -> bool {
    match position.king_square(color) {
        Some(king) => !is_square_attacked(position, king, color.flip()),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess_move::PromotionPiece;

    fn legal(fen: &str) -> MoveList {
        let pos: Position = fen.parse().unwrap();
        generate_legal_moves(&pos)
    }

    #[test]
    fn starting_position_20_moves() {
        let moves = generate_legal_moves(&Position::starting_position());
        assert_eq!(moves.len(), 20);
    }

    #[test]
    fn scratch_reach_of_starting_position() {
        let pos = Position::starting_position();
        let reach = generate_moves(&pos, Color::White, GenMode::Scratch);
        // 14 pawn diagonals (edge pawns have one) + 4 knight jumps.
        assert_eq!(reach.len(), 18);
        assert!(reach.targets(Square::F3));
        assert!(!reach.targets(Square::E4));
    }

    #[test]
    fn pawn_attacks_but_does_not_push_in_scratch() {
        let pos: Position = "4k3/8/8/8/8/8/4P3/4K3 w - - 0 1".parse().unwrap();
        assert!(is_square_attacked(&pos, Square::D3, Color::White));
        assert!(is_square_attacked(&pos, Square::F3, Color::White));
        assert!(!is_square_attacked(&pos, Square::E3, Color::White));
    }

    #[test]
    fn attacked_through_empty_line_only() {
        let pos: Position = "4k3/8/8/8/8/8/8/R3K3 w - - 0 1".parse().unwrap();
        assert!(is_square_attacked(&pos, Square::A8, Color::White));
        let blocked: Position = "4k3/8/8/8/p7/8/8/R3K3 w - - 0 1".parse().unwrap();
        assert!(is_square_attacked(&blocked, Square::A4, Color::White));
        assert!(!is_square_attacked(&blocked, Square::A5, Color::White));
    }

    #[test]
    fn king_safety() {
        let pos: Position = "4k3/8/8/8/8/8/8/4R1K1 b - - 0 1".parse().unwrap();
        assert!(!is_king_safe(&pos, Color::Black));
        assert!(is_king_safe(&pos, Color::White));
        let kingless: Position = "8/8/8/8/8/8/8/4R3 b - - 0 1".parse().unwrap();
        assert!(is_king_safe(&kingless, Color::Black));
    }

    #[test]
    fn pinned_knight_zero_moves() {
        let moves = legal("4r2k/8/8/8/8/8/4N3/4K3 w - - 0 1");
        assert!(moves.as_slice().iter().all(|m| m.source() != Square::E2));
    }

    #[test]
    fn double_check_king_only() {
        let pos: Position = "4r1k1/8/8/8/8/5n2/8/4K3 w - - 0 1".parse().unwrap();
        let moves = generate_legal_moves(&pos);
        assert!(!moves.is_empty());
        for mv in &moves {
            assert_eq!(pos.piece_on(mv.source()).map(|p| p.kind), Some(PieceKind::King));
        }
    }

    #[test]
    fn king_cannot_step_along_checking_ray() {
        // Rook on a1 checks the king on e1; f1 stays on the rook's line.
        let moves = legal("4k3/8/8/8/8/8/8/r3K3 w - - 0 1");
        let dests: Vec<Square> = moves.as_slice().iter().map(|m| m.dest()).collect();
        assert!(!dests.contains(&Square::F1));
        assert!(!dests.contains(&Square::D1));
        assert!(dests.contains(&Square::E2));
    }

    #[test]
    fn castling_not_through_check() {
        // Bishop on a6 covers f1.
        let moves = legal("4k3/8/b7/8/8/8/8/R3K2R w KQ - 0 1");
        assert!(!moves.as_slice().contains(&Move::new(Square::E1, Square::G1)));
        assert!(moves.as_slice().contains(&Move::new(Square::E1, Square::C1)));
    }

    #[test]
    fn castling_not_out_of_check() {
        let moves = legal("4k3/8/8/8/8/8/8/R3K2r w Q - 0 1");
        assert!(!moves.as_slice().contains(&Move::new(Square::E1, Square::C1)));
    }

    #[test]
    fn castling_blocked_by_piece() {
        let moves = legal("4k3/8/8/8/8/8/8/RN2K2R w KQ - 0 1");
        assert!(moves.as_slice().contains(&Move::new(Square::E1, Square::G1)));
        assert!(!moves.as_slice().contains(&Move::new(Square::E1, Square::C1)));
    }

    #[test]
    fn queenside_castle_allowed_with_b_file_attacked() {
        // Only the king's own path matters; b8 under attack is fine.
        let moves = legal("r3k3/8/8/8/8/8/8/1R2K3 b q - 0 1");
        assert!(moves.as_slice().contains(&Move::new(Square::E8, Square::C8)));
    }

    #[test]
    fn castling_requires_rook_on_home_square() {
        let moves = legal("4k3/8/8/8/8/8/8/4K1R1 w K - 0 1");
        assert!(!moves.as_slice().contains(&Move::new(Square::E1, Square::G1)));
    }

    #[test]
    fn en_passant_legal() {
        let moves = legal("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1");
        assert!(moves.as_slice().contains(&Move::new(Square::E5, Square::D6)));
    }

    #[test]
    fn en_passant_discovered_check_illegal() {
        let moves = legal("4k3/8/8/KPp4r/8/8/8/8 w - c6 0 1");
        assert!(!moves.as_slice().contains(&Move::new(Square::B5, Square::C6)));
    }

    #[test]
    fn promotion_generates_4_moves() {
        let moves = legal("4k3/P7/8/8/8/8/8/4K3 w - - 0 1");
        let promos: Vec<_> = moves
            .as_slice()
            .iter()
            .filter(|m| m.source() == Square::A7)
            .collect();
        assert_eq!(promos.len(), 4);
        for (mv, expected) in promos.iter().zip(PromotionPiece::ALL) {
            assert_eq!(mv.dest(), Square::A8);
            assert_eq!(mv.promotion(), Some(expected));
        }
    }

    #[test]
    fn promotion_blocked_yields_nothing() {
        let moves = legal("n3k3/P7/8/8/8/8/8/4K3 w - - 0 1");
        assert!(moves.as_slice().iter().all(|m| m.source() != Square::A7));
    }

    #[test]
    fn black_pawns_move_down() {
        let moves = legal("4k3/3p4/8/8/8/8/8/4K3 b - - 0 1");
        assert!(moves.as_slice().contains(&Move::new(Square::D7, Square::D6)));
        assert!(moves.as_slice().contains(&Move::new(Square::D7, Square::D5)));
    }

    #[test]
    fn double_push_needs_both_squares_empty() {
        let moves = legal("4k3/8/8/8/8/4n3/4P3/K7 w - - 0 1");
        assert!(
            moves
                .as_slice()
                .iter()
                .all(|m| m.source() != Square::E2 || m.dest() != Square::E4)
        );
        let moves = legal("4k3/8/8/8/4n3/8/4P3/K7 w - - 0 1");
        assert!(moves.as_slice().contains(&Move::new(Square::E2, Square::E3)));
        assert!(!moves.as_slice().contains(&Move::new(Square::E2, Square::E4)));
    }

    #[test]
    fn every_legal_move_keeps_king_safe() {
        let fens = [
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
            "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
        ];
        for fen in fens {
            let pos: Position = fen.parse().unwrap();
            let us = pos.side_to_move();
            for mv in &generate_legal_moves(&pos) {
                let after = pos.make_move(*mv);
                assert!(is_king_safe(&after, us), "{mv:?} leaves king attacked in {fen}");
            }
        }
    }
}
