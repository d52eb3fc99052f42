//! A position together with its cached legal moves.

use std::fmt;
use std::str::FromStr;

use tracing::{debug, warn};

use crate::chess_move::Move;
use crate::color::Color;
use crate::error::{FenError, MoveError};
use crate::fen;
use crate::history::HistoryEntry;
use crate::movegen::{MoveList, generate_legal_moves, is_king_safe};
use crate::piece::Piece;
use crate::position::{Position, PrettyBoard};
use crate::square::Square;

/// Whether the side to move can still play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    Checkmate,
    Stalemate,
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GameStatus::Ongoing => "ongoing",
            GameStatus::Checkmate => "checkmate",
            GameStatus::Stalemate => "stalemate",
        })
    }
}

/// The playable board.
///
/// `legal_moves` is regenerated after every load and every applied move,
/// never edited in place.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    position: Position,
    legal_moves: MoveList,
}

impl Board {
    /// Return the standard starting position.
    pub fn starting_position() -> Board {
        Board::from_position(Position::starting_position())
    }

    /// Wrap `position` and generate its legal moves.
    pub fn from_position(position: Position) -> Board {
        let legal_moves = generate_legal_moves(&position);
        Board {
            position,
            legal_moves,
        }
    }

    /// Decode a FEN string into a new board.
    pub fn from_fen(fen: &str) -> Result<Board, FenError> {
        let parsed = fen::decode(fen)?;
        let board = Board::from_position(parsed.position);
        debug!(fen, moves = board.legal_moves.len(), "loaded position");
        Ok(board)
    }

    #[inline]
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// Legal moves for the side to move, in generation order.
    #[inline]
    pub fn legal_moves(&self) -> &[Move] {
        self.legal_moves.as_slice()
    }

    /// Legal moves starting on `sq`.
    pub fn moves_for_square(&self, sq: Square) -> Vec<Move> {
        self.legal_moves()
            .iter()
            .copied()
            .filter(|mv| mv.source() == sq)
            .collect()
    }

    /// Find a legal move by its squares alone.
    ///
    /// For promotions, where several legal moves share the squares, the
    /// first generated one (the queen) is returned.
    pub fn find_move(&self, source: Square, dest: Square) -> Option<Move> {
        let probe = Move::new(source, dest);
        self.legal_moves()
            .iter()
            .copied()
            .find(|mv| mv.same_squares(probe))
    }

    /// Return `true` if `mv`, promotion included, is legal here.
    pub fn is_legal(&self, mv: Move) -> bool {
        self.legal_moves().contains(&mv)
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.position.side_to_move()
    }

    #[inline]
    pub fn piece_on(&self, sq: Square) -> Option<Piece> {
        self.position.piece_on(sq)
    }

    /// Return `true` if the side to move is in check.
    pub fn is_check(&self) -> bool {
        !is_king_safe(&self.position, self.side_to_move())
    }

    pub fn status(&self) -> GameStatus {
        match (self.legal_moves.is_empty(), self.is_check()) {
            (false, _) => GameStatus::Ongoing,
            (true, true) => GameStatus::Checkmate,
            (true, false) => GameStatus::Stalemate,
        }
    }

    /// Play a legal move and describe it.
    ///
    /// A move that is not in [`legal_moves`](Self::legal_moves) is rejected
    /// and the board is left untouched.
    pub fn apply_move(&mut self, mv: Move) -> Result<HistoryEntry, MoveError> {
        if !self.is_legal(mv) {
            warn!(mv = %mv, fen = %self.position, "rejected illegal move");
            return Err(MoveError::Illegal { mv });
        }

        let (show_file, show_rank) = self.disambiguation(mv);

        let mut next = self.position;
        let effects = next.play_unchecked(mv).ok_or(MoveError::Illegal { mv })?;
        *self = Board::from_position(next);

        let is_check = self.is_check();
        let no_replies = self.legal_moves.is_empty();
        let entry = HistoryEntry {
            fen: self.position.to_string(),
            mv,
            piece: effects.moved,
            is_capture: effects.captured.is_some(),
            is_check,
            is_checkmate: is_check && no_replies,
            is_draw: !is_check && no_replies,
            is_castle: effects.castle.is_some(),
            show_file,
            show_rank,
        };
        debug!(mv = %mv, san = %entry.san(), fen = %entry.fen, "applied move");
        Ok(entry)
    }

    /// Which source coordinates `mv` needs in notation to be unambiguous.
    fn disambiguation(&self, mv: Move) -> (bool, bool) {
        let Some(piece) = self.position.piece_on(mv.source()) else {
            return (false, false);
        };
        let mut show_file = false;
        let mut show_rank = false;
        for other in self.legal_moves() {
            if other.dest() != mv.dest() || other.source() == mv.source() {
                continue;
            }
            if self.position.piece_on(other.source()).map(|p| p.kind) != Some(piece.kind) {
                continue;
            }
            if other.source().file() == mv.source().file() {
                show_rank = true;
            } else {
                show_file = true;
            }
        }
        (show_file, show_rank)
    }

    /// Return a pretty-printable wrapper for the position.
    pub fn pretty(&self) -> PrettyBoard<'_> {
        self.position.pretty()
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::starting_position()
    }
}

impl FromStr for Board {
    type Err = FenError;

    fn from_str(fen: &str) -> Result<Board, FenError> {
        Board::from_fen(fen)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.position, f)
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board(\"{}\", {} moves)", self.position, self.legal_moves.len())
    }
}
