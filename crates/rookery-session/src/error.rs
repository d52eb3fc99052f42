//! Session protocol errors.

use std::path::PathBuf;

use rookery_core::{FenError, MoveError};

/// Errors that can occur while handling session commands.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// A command is missing an argument or has too many.
    #[error("malformed {command} command: {reason}")]
    MalformedCommand {
        /// The command keyword.
        command: String,
        /// What was wrong with the arguments.
        reason: &'static str,
    },

    /// A FEN string could not be loaded.
    #[error("invalid FEN \"{fen}\": {source}")]
    InvalidFen {
        /// The FEN string that failed to parse.
        fen: String,
        /// Why decoding failed.
        source: FenError,
    },

    /// A move string is not coordinate notation.
    #[error("invalid move: {uci_move}")]
    InvalidMove {
        /// The move string that failed to parse.
        uci_move: String,
    },

    /// A square argument is not algebraic notation.
    #[error("invalid square: {value}")]
    InvalidSquare {
        /// The square string that failed to parse.
        value: String,
    },

    /// A well-formed move that the position does not allow.
    #[error(transparent)]
    Illegal(#[from] MoveError),

    /// A perft depth could not be parsed.
    #[error("invalid depth: {value}")]
    InvalidDepth {
        /// The depth string that failed to parse.
        value: String,
    },

    /// Writing the game record failed.
    #[error("could not write {}: {source}", .path.display())]
    Export {
        /// The destination file.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Reading commands or writing replies failed.
    #[error("I/O error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },
}

impl SessionError {
    /// Return `true` if the session cannot continue after this error.
    pub fn is_fatal(&self) -> bool {
        matches!(self, SessionError::Io { .. })
    }
}
