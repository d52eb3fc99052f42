//! Piece kinds and colored pieces.

use std::fmt;

use crate::color::Color;

/// The kind of a chess piece, without color information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PieceKind {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}

impl PieceKind {
    /// All piece kinds in index order.
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// Lowercase FEN letter.
    #[inline]
    pub const fn fen_char(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }

    /// Map a FEN placement letter to a kind, case-insensitively.
    ///
    /// `k`, `q`, `r`, `b` and `n` name their pieces; any other letter reads
    /// as a pawn. Non-letters are rejected.
    pub fn from_placement_char(c: char) -> Option<PieceKind> {
        if !c.is_ascii_alphabetic() {
            return None;
        }
        Some(match c.to_ascii_lowercase() {
            'k' => PieceKind::King,
            'q' => PieceKind::Queen,
            'r' => PieceKind::Rook,
            'b' => PieceKind::Bishop,
            'n' => PieceKind::Knight,
            _ => PieceKind::Pawn,
        })
    }

    /// Uppercase letter used in algebraic notation; pawns have none.
    #[inline]
    pub const fn san_char(self) -> Option<char> {
        match self {
            PieceKind::Pawn => None,
            PieceKind::Knight => Some('N'),
            PieceKind::Bishop => Some('B'),
            PieceKind::Rook => Some('R'),
            PieceKind::Queen => Some('Q'),
            PieceKind::King => Some('K'),
        }
    }

    /// Return `true` for bishops, rooks and queens.
    #[inline]
    pub const fn is_slider(self) -> bool {
        matches!(self, PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen)
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.fen_char())
    }
}

/// A colored piece standing on a square.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
}

impl Piece {
    /// Create a piece from a kind and a color.
    #[inline]
    pub const fn new(kind: PieceKind, color: Color) -> Piece {
        Piece { kind, color }
    }

    /// FEN letter: uppercase for White, lowercase for Black.
    pub fn fen_char(self) -> char {
        let c = self.kind.fen_char();
        match self.color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }

    /// Parse a FEN placement letter, uppercase meaning White.
    pub fn from_placement_char(c: char) -> Option<Piece> {
        let kind = PieceKind::from_placement_char(c)?;
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Some(Piece::new(kind, color))
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.fen_char())
    }
}

impl fmt::Debug for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match self.color {
            Color::White => 'W',
            Color::Black => 'B',
        };
        write!(f, "{}{}", prefix, self.kind.fen_char().to_ascii_uppercase())
    }
}

#[cfg(test)]
mod tests {
    use super::{Piece, PieceKind};
    use crate::color::Color;

    #[test]
    fn fen_char_roundtrip() {
        for color in Color::ALL {
            for kind in PieceKind::ALL {
                let piece = Piece::new(kind, color);
                assert_eq!(Piece::from_placement_char(piece.fen_char()), Some(piece));
            }
        }
    }

    #[test]
    fn unknown_letters_read_as_pawns() {
        assert_eq!(
            Piece::from_placement_char('X'),
            Some(Piece::new(PieceKind::Pawn, Color::White))
        );
        assert_eq!(
            Piece::from_placement_char('z'),
            Some(Piece::new(PieceKind::Pawn, Color::Black))
        );
        assert_eq!(Piece::from_placement_char('?'), None);
        assert_eq!(Piece::from_placement_char('3'), None);
    }

    #[test]
    fn san_letters() {
        assert_eq!(PieceKind::Pawn.san_char(), None);
        assert_eq!(PieceKind::Knight.san_char(), Some('N'));
        assert_eq!(PieceKind::King.san_char(), Some('K'));
    }

    #[test]
    fn sliders() {
        assert!(PieceKind::Queen.is_slider());
        assert!(PieceKind::Bishop.is_slider());
        assert!(!PieceKind::Knight.is_slider());
        assert!(!PieceKind::King.is_slider());
    }

    #[test]
    fn debug_format() {
        assert_eq!(format!("{:?}", Piece::new(PieceKind::Queen, Color::Black)), "BQ");
        assert_eq!(format!("{}", Piece::new(PieceKind::Knight, Color::White)), "N");
    }
}
