//! A board and its move log, kept in step.

use std::path::Path;

use tracing::{debug, warn};

use crate::board::Board;
use crate::chess_move::Move;
use crate::error::{FenError, MoveError};
use crate::fen::STARTING_FEN;
use crate::history::{HistoryEntry, MoveLog};

/// A game in progress.
///
/// After every operation the board's FEN equals the log's active FEN.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    log: MoveLog,
}

impl Game {
    /// Start from the standard position.
    pub fn new() -> Game {
        Game {
            board: Board::starting_position(),
            log: MoveLog::new(STARTING_FEN),
        }
    }

    /// Start from `fen`.
    pub fn from_fen(fen: &str) -> Result<Game, FenError> {
        let board = Board::from_fen(fen)?;
        let log = MoveLog::new(board.to_string());
        Ok(Game { board, log })
    }

    /// Replace the position and clear the log. On error nothing changes.
    pub fn load_fen(&mut self, fen: &str) -> Result<(), FenError> {
        let board = Board::from_fen(fen)?;
        self.log.reset(board.to_string());
        self.board = board;
        Ok(())
    }

    /// Play `mv` and record it, dropping any undone moves.
    pub fn play(&mut self, mv: Move) -> Result<&HistoryEntry, MoveError> {
        let entry = self.board.apply_move(mv)?;
        Ok(self.log.commit(entry))
    }

    /// Step back one move. Returns `false` at the start of the log.
    pub fn undo(&mut self) -> bool {
        if !self.log.undo() {
            return false;
        }
        if !self.sync_board() {
            self.log.redo();
            return false;
        }
        true
    }

    /// Step forward one undone move. Returns `false` if there is none.
    pub fn redo(&mut self) -> bool {
        if !self.log.redo() {
            return false;
        }
        if !self.sync_board() {
            self.log.undo();
            return false;
        }
        true
    }

    fn sync_board(&mut self) -> bool {
        match Board::from_fen(self.log.active_fen()) {
            Ok(board) => {
                debug!(ply = self.log.ply_index(), "moved history cursor");
                self.board = board;
                true
            }
            Err(err) => {
                warn!(error = %err, "recorded FEN failed to load");
                false
            }
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn log(&self) -> &MoveLog {
        &self.log
    }

    pub fn to_pgn(&self) -> String {
        self.log.to_pgn()
    }

    pub fn export_pgn(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        self.log.export_pgn(path)
    }
}

impl Default for Game {
    fn default() -> Self {
        Game::new()
    }
}
