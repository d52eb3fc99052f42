//! Move representation and UCI-style coordinate notation.

use std::fmt;

use crate::piece::PieceKind;
use crate::square::Square;

/// The piece a pawn promotes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PromotionPiece {
    Queen,
    Rook,
    Bishop,
    Knight,
}

impl PromotionPiece {
    /// All promotion choices, in generation order.
    pub const ALL: [PromotionPiece; 4] = [
        PromotionPiece::Queen,
        PromotionPiece::Rook,
        PromotionPiece::Bishop,
        PromotionPiece::Knight,
    ];

    /// Convert to the corresponding [`PieceKind`].
    pub const fn piece_kind(self) -> PieceKind {
        match self {
            PromotionPiece::Queen => PieceKind::Queen,
            PromotionPiece::Rook => PieceKind::Rook,
            PromotionPiece::Bishop => PieceKind::Bishop,
            PromotionPiece::Knight => PieceKind::Knight,
        }
    }

    /// Lowercase UCI suffix character.
    pub const fn uci_char(self) -> char {
        match self {
            PromotionPiece::Queen => 'q',
            PromotionPiece::Rook => 'r',
            PromotionPiece::Bishop => 'b',
            PromotionPiece::Knight => 'n',
        }
    }

    /// Parse a promotion letter in either case.
    pub fn from_char(c: char) -> Option<PromotionPiece> {
        match c.to_ascii_lowercase() {
            'q' => Some(PromotionPiece::Queen),
            'r' => Some(PromotionPiece::Rook),
            'b' => Some(PromotionPiece::Bishop),
            'n' => Some(PromotionPiece::Knight),
            _ => None,
        }
    }
}

/// A move from one square to another, with an optional promotion choice.
///
/// Equality includes the promotion piece: `e7e8q` and `e7e8n` are different
/// moves. Use [`Move::same_squares`] to compare start and end only.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    source: Square,
    dest: Square,
    promotion: Option<PromotionPiece>,
}

impl Move {
    /// Create a move without promotion.
    #[inline]
    pub const fn new(source: Square, dest: Square) -> Move {
        Move {
            source,
            dest,
            promotion: None,
        }
    }

    /// Create a promoting pawn move.
    #[inline]
    pub const fn new_promotion(source: Square, dest: Square, promo: PromotionPiece) -> Move {
        Move { source, dest, promotion: Some(promo) }
    }

    #[inline]
    pub const fn source(self) -> Square {
        self.source
    }

    #[inline]
    pub const fn dest(self) -> Square {
        self.dest
    }

    #[inline]
    pub const fn promotion(self) -> Option<PromotionPiece> {
        self.promotion
    }

    /// Return `true` if both moves share start and end squares, ignoring promotion.
    #[inline]
    pub fn same_squares(self, other: Move) -> bool {
        self.source == other.source && self.dest == other.dest
    }

    /// Parse coordinate notation such as `e2e4` or `e7e8q`.
    ///
    /// This only checks syntax; whether the move is legal is up to the board.
    pub fn from_uci(s: &str) -> Option<Move> {
        if !s.is_ascii() || !(4..=5).contains(&s.len()) {
            return None;
        }
        let source = Square::from_algebraic(&s[0..2])?;
        let dest = Square::from_algebraic(&s[2..4])?;
        match s[4..].chars().next() {
            None => Some(Move::new(source, dest)),
            Some(c) => Some(Move::new_promotion(source, dest, PromotionPiece::from_char(c)?)),
        }
    }

    /// Coordinate notation, e.g. `e7e8q`.
    pub fn to_uci(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.source, self.dest)?;
        if let Some(promo) = self.promotion {
            write!(f, "{}", promo.uci_char())?;
        }
        Ok(())
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({self})")
    }
}
