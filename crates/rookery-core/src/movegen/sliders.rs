//! Bishop, rook and queen rays.

use crate::chess_move::Move;
use crate::piece::{Piece, PieceKind};
use crate::position::Position;
use crate::square::Square;

use super::MoveList;
use super::tables::{ALL_DIRECTIONS, DIAGONAL, DIRECTION_OFFSETS, DISTANCE_TO_EDGE, ORTHOGONAL};

/// Walk each of the piece's rays until the edge or the first occupied square.
/// An enemy blocker is included as a capture; a friendly one is not.
pub(super) fn gen_slider(position: &Position, from: Square, piece: Piece, list: &mut MoveList) {
    let directions = match piece.kind {
        PieceKind::Bishop => DIAGONAL,
        PieceKind::Rook => ORTHOGONAL,
        _ => ALL_DIRECTIONS,
    };

    for dir in directions {
        let offset = DIRECTION_OFFSETS[dir];
        let mut index = from.index() as i8;
        for _ in 0..DISTANCE_TO_EDGE[from.index()][dir] {
            index += offset;
            let to = Square::from_index_unchecked(index as u8);
            match position.piece_on(to) {
                None => list.push(Move::new(from, to)),
                Some(blocker) => {
                    if blocker.color != piece.color {
                        list.push(Move::new(from, to));
                    }
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::gen_slider;
    use crate::color::Color;
    use crate::movegen::MoveList;
    use crate::piece::{Piece, PieceKind};
    use crate::position::Position;
    use crate::square::Square;

    fn slider_moves(fen: &str, from: Square) -> MoveList {
        let pos: Position = fen.parse().unwrap();
        let piece = pos.piece_on(from).unwrap();
        let mut list = MoveList::new();
        gen_slider(&pos, from, piece, &mut list);
        list
    }

    #[test]
    fn rook_on_empty_board() {
        let list = slider_moves("8/8/8/8/3R4/8/8/8 w - - 0 1", Square::D4);
        assert_eq!(list.len(), 14);
    }

    #[test]
    fn bishop_in_corner() {
        let list = slider_moves("8/8/8/8/8/8/8/B7 w - - 0 1", Square::A1);
        assert_eq!(list.len(), 7);
        assert!(list.targets(Square::H8));
    }

    #[test]
    fn queen_in_centre() {
        let list = slider_moves("8/8/8/8/3Q4/8/8/8 w - - 0 1", Square::D4);
        assert_eq!(list.len(), 27);
    }

    #[test]
    fn captures_enemy_stops_at_friend() {
        // Rook d4, black pawn d6, white pawn f4.
        let list = slider_moves("8/8/3p4/8/3R1P2/8/8/8 w - - 0 1", Square::D4);
        assert!(list.targets(Square::D5));
        assert!(list.targets(Square::D6));
        assert!(!list.targets(Square::D7));
        assert!(list.targets(Square::E4));
        assert!(!list.targets(Square::F4));
    }

    #[test]
    fn rook_does_not_wrap_ranks() {
        let list = slider_moves("8/8/8/8/8/8/8/7R w - - 0 1", Square::H1);
        assert!(!list.targets(Square::A2));
        assert_eq!(list.len(), 14);
    }

    #[test]
    fn piece_color_decides_captures() {
        let pos: Position = "8/8/8/8/3r4/8/3P4/8 w - - 0 1".parse().unwrap();
        let mut list = MoveList::new();
        gen_slider(&pos, Square::D4, Piece::new(PieceKind::Rook, Color::Black), &mut list);
        assert!(list.targets(Square::D2));
        assert!(!list.targets(Square::D1));
    }
}
