//! Error types for FEN parsing, board validation and move application.

use std::fmt;

use crate::chess_move::Move;

/// Errors that occur when parsing a FEN string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    /// The FEN string has fewer than 4 or more than 6 space-separated fields.
    WrongFieldCount {
        /// Number of fields found.
        found: usize,
    },
    /// The piece placement section does not have exactly 8 ranks.
    WrongRankCount {
        /// Number of ranks found.
        found: usize,
    },
    /// A rank in the piece placement describes more or fewer than 8 squares.
    BadRankLength {
        /// Zero-based rank index as written (0 = rank 8).
        rank_index: usize,
        /// Number of squares described.
        length: usize,
    },
    /// A character that is neither a letter, a digit 1-8, nor `/`.
    InvalidPieceChar {
        /// The invalid character.
        character: char,
    },
    /// The active color field is not "w" or "b".
    InvalidColor {
        /// The invalid color string.
        found: String,
    },
    /// An unrecognized character appeared in the castling rights field.
    InvalidCastlingChar {
        /// The invalid character.
        character: char,
    },
    /// The en passant field is not "-" or a valid algebraic square.
    InvalidEnPassant {
        /// The invalid en passant string.
        found: String,
    },
    /// A move counter is not a number. Recoverable: the counter becomes 0.
    InvalidMoveCounter {
        /// The field name ("halfmove clock" or "fullmove number").
        field: &'static str,
        /// The invalid string.
        found: String,
    },
    /// The parsed board fails structural validation.
    InvalidBoard {
        /// The underlying board validation error.
        source: BoardError,
    },
}

impl FenError {
    /// Return `true` for errors that leave the decoded position usable.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, FenError::InvalidMoveCounter { .. })
    }
}

impl fmt::Display for FenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FenError::WrongFieldCount { found } => {
                write!(f, "expected 4 to 6 FEN fields, found {found}")
            }
            FenError::WrongRankCount { found } => {
                write!(f, "expected 8 ranks in piece placement, found {found}")
            }
            FenError::BadRankLength { rank_index, length } => {
                write!(f, "rank {rank_index} describes {length} squares, expected 8")
            }
            FenError::InvalidPieceChar { character } => {
                write!(f, "invalid piece character: '{character}'")
            }
            FenError::InvalidColor { found } => {
                write!(f, "invalid active color: \"{found}\"")
            }
            FenError::InvalidCastlingChar { character } => {
                write!(f, "invalid castling character: '{character}'")
            }
            FenError::InvalidEnPassant { found } => {
                write!(f, "invalid en passant square: \"{found}\"")
            }
            FenError::InvalidMoveCounter { field, found } => {
                write!(f, "invalid {field}: \"{found}\"")
            }
            FenError::InvalidBoard { source } => {
                write!(f, "invalid board: {source}")
            }
        }
    }
}

impl std::error::Error for FenError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FenError::InvalidBoard { source } => Some(source),
            _ => None,
        }
    }
}

impl From<BoardError> for FenError {
    fn from(source: BoardError) -> Self {
        FenError::InvalidBoard { source }
    }
}

/// Errors from structural validation of a position.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    /// A side has more than one king.
    #[error("expected at most 1 king for {color}, found {count}")]
    TooManyKings {
        /// Which side has the extra king.
        color: &'static str,
        /// Number of kings found.
        count: usize,
    },
}

/// Errors from applying a move to a board.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    /// The move is not in the current legal move set.
    #[error("illegal move: {mv}")]
    Illegal {
        /// The rejected move.
        mv: Move,
    },
}

#[cfg(test)]
mod tests {
    use super::{BoardError, FenError, MoveError};
    use crate::chess_move::Move;
    use crate::square::Square;

    #[test]
    fn fen_error_display() {
        let err = FenError::WrongFieldCount { found: 2 };
        assert_eq!(format!("{err}"), "expected 4 to 6 FEN fields, found 2");
    }

    #[test]
    fn fen_error_from_board_error() {
        let fen_err: FenError = BoardError::TooManyKings {
            color: "black",
            count: 2,
        }
        .into();
        assert!(matches!(fen_err, FenError::InvalidBoard { .. }));
        assert!(std::error::Error::source(&fen_err).is_some());
    }

    #[test]
    fn only_counters_are_recoverable() {
        let counter = FenError::InvalidMoveCounter {
            field: "halfmove clock",
            found: "x".to_string(),
        };
        assert!(counter.is_recoverable());
        assert!(!FenError::InvalidColor { found: "x".to_string() }.is_recoverable());
    }

    #[test]
    fn move_error_display() {
        let err = MoveError::Illegal {
            mv: Move::new(Square::E2, Square::E5),
        };
        assert_eq!(format!("{err}"), "illegal move: e2e5");
    }
}
