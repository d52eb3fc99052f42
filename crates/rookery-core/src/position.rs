//! Raw position state: piece placement, side to move, castling, en passant, and move counters.

use std::fmt;

use crate::castle_rights::CastleRights;
use crate::color::Color;
use crate::error::BoardError;
use crate::piece::{Piece, PieceKind};
use crate::square::Square;

/// A chess position with no cached move data.
///
/// `Position` is a small `Copy` value, so hypothetical moves are tried on a
/// copy ("scratch" position) and the copy is simply dropped afterwards.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Position {
    /// One slot per square, indexed by [`Square::index()`]; `None` is empty.
    squares: [Option<Piece>; Square::COUNT],
    /// Which side moves next.
    side_to_move: Color,
    /// Current castling rights.
    castling: CastleRights,
    /// Square skipped by the previous move's double pawn push, if any.
    en_passant: Option<Square>,
    /// Plies since the last capture or pawn move.
    halfmove_clock: u16,
    /// Starts at 1, incremented after Black moves.
    fullmove_number: u16,
}

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

impl Position {
    /// An empty board, White to move, no rights, counters at 0 and 1.
    pub const fn empty() -> Position {
        Position {
            squares: [None; Square::COUNT],
            side_to_move: Color::White,
            castling: CastleRights::NONE,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    /// Return the standard starting position.
    pub fn starting_position() -> Position {
        let mut pos = Position::empty();
        for color in Color::ALL {
            for (file, kind) in BACK_RANK.into_iter().enumerate() {
                let back = Square::from_index_unchecked(color.back_rank() * 8 + file as u8);
                let pawn = Square::from_index_unchecked(color.pawn_rank() * 8 + file as u8);
                pos.put(back, Some(Piece::new(kind, color)));
                pos.put(pawn, Some(Piece::new(PieceKind::Pawn, color)));
            }
        }
        pos.castling = CastleRights::ALL;
        pos
    }

    /// Return the piece on the given square, if any.
    #[inline]
    pub fn piece_on(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.index()]
    }

    /// Return `true` if the given square is occupied.
    #[inline]
    pub fn is_occupied(&self, sq: Square) -> bool {
        self.squares[sq.index()].is_some()
    }

    /// Iterate over every occupied square of `color`, in square order.
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| match self.piece_on(sq) {
            Some(piece) if piece.color == color => Some((sq, piece)),
            _ => None,
        })
    }

    /// Return the square of `color`'s king, or `None` if it has none.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces_of(color)
            .find(|(_, piece)| piece.kind == PieceKind::King)
            .map(|(sq, _)| sq)
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn castling(&self) -> CastleRights {
        self.castling
    }

    #[inline]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    #[inline]
    pub fn halfmove_clock(&self) -> u16 {
        self.halfmove_clock
    }

    #[inline]
    pub fn fullmove_number(&self) -> u16 {
        self.fullmove_number
    }

    /// Place or clear a square, returning what stood there.
    #[inline]
    pub(crate) fn put(&mut self, sq: Square, piece: Option<Piece>) -> Option<Piece> {
        std::mem::replace(&mut self.squares[sq.index()], piece)
    }

    #[inline]
    pub(crate) fn set_side_to_move(&mut self, color: Color) {
        self.side_to_move = color;
    }

    #[inline]
    pub(crate) fn set_castling(&mut self, rights: CastleRights) {
        self.castling = rights;
    }

    #[inline]
    pub(crate) fn set_en_passant(&mut self, sq: Option<Square>) {
        self.en_passant = sq;
    }

    #[inline]
    pub(crate) fn set_halfmove_clock(&mut self, clock: u16) {
        self.halfmove_clock = clock;
    }

    #[inline]
    pub(crate) fn set_fullmove_number(&mut self, number: u16) {
        self.fullmove_number = number;
    }

    /// Validate the structural integrity of the position.
    ///
    /// A side may have no king (synthetic boards), but never two.
    pub fn validate(&self) -> Result<(), BoardError> {
        for color in Color::ALL {
            let count = self
                .pieces_of(color)
                .filter(|(_, piece)| piece.kind == PieceKind::King)
                .count();
            if count > 1 {
                let color = match color {
                    Color::White => "white",
                    Color::Black => "black",
                };
                return Err(BoardError::TooManyKings { color, count });
            }
        }

        Ok(())
    }

    /// Return a pretty-printable wrapper for this position.
    pub fn pretty(&self) -> PrettyBoard<'_> {
        PrettyBoard(self)
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::starting_position()
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Position(\"{self}\")")
    }
}

/// Wrapper for pretty-printing a position as an 8x8 grid.
pub struct PrettyBoard<'a>(&'a Position);

impl fmt::Display for PrettyBoard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0u8..8).rev() {
            write!(f, "{}  ", rank + 1)?;
            let row: Vec<String> = (0u8..8)
                .map(|file| {
                    let sq = Square::from_index_unchecked(rank * 8 + file);
                    self.0.piece_on(sq).map_or('.', Piece::fen_char).to_string()
                })
                .collect();
            writeln!(f, "{}", row.join(" "))?;
        }
        write!(f, "   a b c d e f g h")
    }
}
