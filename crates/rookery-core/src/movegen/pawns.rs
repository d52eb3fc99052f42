//! Pawn pushes, captures, en passant and promotion.

use crate::chess_move::{Move, PromotionPiece};
use crate::color::Color;
use crate::position::Position;
use crate::square::Square;

use super::{GenMode, MoveList};

pub(super) fn gen_pawn(
    position: &Position,
    from: Square,
    side: Color,
    mode: GenMode,
    list: &mut MoveList,
) {
    let forward = side.forward();

    if mode == GenMode::Scratch {
        // Attack reach only: both diagonals, occupied or not.
        for df in [-1, 1] {
            if let Some(to) = from.offset(df, forward) {
                list.push(Move::new(from, to));
            }
        }
        return;
    }

    if let Some(one) = from.offset(0, forward)
        && !position.is_occupied(one)
    {
        push_pawn_move(from, one, side, list);
        if from.rank() == side.pawn_rank()
            && let Some(two) = one.offset(0, forward)
            && !position.is_occupied(two)
        {
            list.push(Move::new(from, two));
        }
    }

    for df in [-1, 1] {
        let Some(to) = from.offset(df, forward) else {
            continue;
        };
        let takes = match position.piece_on(to) {
            Some(p) => p.color != side,
            None => position.en_passant() == Some(to),
        };
        if takes {
            push_pawn_move(from, to, side, list);
        }
    }
}

/// Push a pawn move, expanded into the four promotions on the last rank.
fn push_pawn_move(from: Square, to: Square, side: Color, list: &mut MoveList) {
    if to.rank() == side.promotion_rank() {
        for promo in PromotionPiece::ALL {
            list.push(Move::new_promotion(from, to, promo));
        }
    } else {
        list.push(Move::new(from, to));
    }
}

#[cfg(test)]
mod tests {
    use super::gen_pawn;
    use crate::chess_move::Move;
    use crate::movegen::{GenMode, MoveList};
    use crate::position::Position;
    use crate::square::Square;

    fn pawn_moves(fen: &str, from: Square, mode: GenMode) -> MoveList {
        let pos: Position = fen.parse().unwrap();
        let side = pos.piece_on(from).unwrap().color;
        let mut list = MoveList::new();
        gen_pawn(&pos, from, side, mode, &mut list);
        list
    }

    #[test]
    fn single_and_double_push_from_home() {
        let list = pawn_moves("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1", Square::E2, GenMode::Legal);
        assert_eq!(
            list.as_slice(),
            &[Move::new(Square::E2, Square::E3), Move::new(Square::E2, Square::E4)]
        );
    }

    #[test]
    fn no_double_push_off_home_rank() {
        let list = pawn_moves("4k3/8/8/8/8/4P3/8/4K3 w - - 0 1", Square::E3, GenMode::Legal);
        assert_eq!(list.as_slice(), &[Move::new(Square::E3, Square::E4)]);
    }

    #[test]
    fn captures_only_enemies() {
        let list = pawn_moves("4k3/8/8/8/8/3p1N2/4P3/4K3 w - - 0 1", Square::E2, GenMode::Legal);
        assert!(list.as_slice().contains(&Move::new(Square::E2, Square::D3)));
        assert!(!list.targets(Square::F3));
    }

    #[test]
    fn en_passant_target_is_capturable() {
        let list = pawn_moves("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1", Square::E5, GenMode::Legal);
        assert!(list.as_slice().contains(&Move::new(Square::E5, Square::D6)));
        assert!(!list.targets(Square::F6));
    }

    #[test]
    fn black_en_passant() {
        let list = pawn_moves("4k3/8/8/8/3Pp3/8/8/4K3 b - d3 0 1", Square::E4, GenMode::Legal);
        assert!(list.as_slice().contains(&Move::new(Square::E4, Square::D3)));
        assert!(list.as_slice().contains(&Move::new(Square::E4, Square::E3)));
    }

    #[test]
    fn capture_promotions() {
        let list = pawn_moves("1r2k3/P7/8/8/8/8/8/4K3 w - - 0 1", Square::A7, GenMode::Legal);
        // 4 pushes + 4 captures on b8.
        assert_eq!(list.len(), 8);
        assert!(list.as_slice().iter().all(|m| m.promotion().is_some()));
    }

    #[test]
    fn scratch_emits_diagonals_only() {
        let list = pawn_moves("4k3/8/8/8/8/3P4/4P3/4K3 w - - 0 1", Square::E2, GenMode::Scratch);
        assert_eq!(
            list.as_slice(),
            &[Move::new(Square::E2, Square::D3), Move::new(Square::E2, Square::F3)]
        );
    }

    #[test]
    fn scratch_edge_pawn_has_one_diagonal() {
        let list = pawn_moves("4k3/p7/8/8/8/8/8/4K3 b - - 0 1", Square::A7, GenMode::Scratch);
        assert_eq!(list.as_slice(), &[Move::new(Square::A7, Square::B6)]);
    }
}
