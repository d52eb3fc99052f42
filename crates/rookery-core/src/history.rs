//! Committed move records and the undo/redo log.

use std::path::Path;

use tracing::debug;

use crate::castle_rights::CastleSide;
use crate::chess_move::Move;
use crate::fen::STARTING_FEN;
use crate::piece::{Piece, PieceKind};
use crate::pgn;

/// One committed move, with everything needed to print it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    /// FEN of the position after the move.
    pub fen: String,
    pub mv: Move,
    /// The piece that moved, before any promotion.
    pub piece: Piece,
    pub is_capture: bool,
    pub is_check: bool,
    pub is_checkmate: bool,
    /// Stalemate: no legal replies and not in check.
    pub is_draw: bool,
    pub is_castle: bool,
    /// Another piece of the same kind could reach the destination from a
    /// different file.
    pub show_file: bool,
    /// Another piece of the same kind on the same file could reach the
    /// destination.
    pub show_rank: bool,
}

impl HistoryEntry {
    /// Standard algebraic notation, e.g. `Nbd7`, `exd6`, `e8=Q+`, `O-O-O#`.
    pub fn san(&self) -> String {
        let mut out = String::with_capacity(8);
        if self.is_castle {
            match CastleSide::from_king_move(self.mv.source(), self.mv.dest()) {
                Some(CastleSide::QueenSide) => out.push_str("O-O-O"),
                _ => out.push_str("O-O"),
            }
        } else {
            let pawn = self.piece.kind == PieceKind::Pawn;
            if let Some(letter) = self.piece.kind.san_char() {
                out.push(letter);
            }
            if self.show_file || (pawn && self.is_capture) {
                out.push(self.mv.source().file_char());
            }
            if self.show_rank {
                out.push(self.mv.source().rank_char());
            }
            if self.is_capture {
                out.push('x');
            }
            out.push_str(&self.mv.dest().to_string());
            if let Some(promo) = self.mv.promotion() {
                out.push('=');
                out.extend(promo.piece_kind().san_char());
            }
        }

        if self.is_checkmate {
            out.push('#');
        } else if self.is_check {
            out.push('+');
        }
        out
    }
}

/// Linear move history with a cursor for undo and redo.
///
/// `ply_index` is -1 at the starting position; otherwise it indexes the
/// entry whose FEN is current. Committing while undone drops the redo tail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveLog {
    starting_fen: String,
    entries: Vec<HistoryEntry>,
    ply_index: isize,
}

impl MoveLog {
    /// Start an empty log from `starting_fen`.
    pub fn new(starting_fen: impl Into<String>) -> MoveLog {
        MoveLog {
            starting_fen: starting_fen.into(),
            entries: Vec::new(),
            ply_index: -1,
        }
    }

    /// Clear every entry and start over from `starting_fen`.
    pub fn reset(&mut self, starting_fen: impl Into<String>) {
        self.starting_fen = starting_fen.into();
        self.entries.clear();
        self.ply_index = -1;
    }

    /// Append `entry` after the cursor, discarding any undone entries.
    pub fn commit(&mut self, entry: HistoryEntry) -> &HistoryEntry {
        self.entries.truncate((self.ply_index + 1) as usize);
        self.entries.push(entry);
        self.ply_index += 1;
        debug!(ply = self.ply_index, len = self.entries.len(), "committed entry");
        &self.entries[self.entries.len() - 1]
    }

    /// Step the cursor back one entry. Returns `false` at the start.
    pub fn undo(&mut self) -> bool {
        if self.ply_index < 0 {
            return false;
        }
        self.ply_index -= 1;
        true
    }

    /// Step the cursor forward one entry. Returns `false` at the last entry.
    pub fn redo(&mut self) -> bool {
        if self.ply_index + 1 >= self.entries.len() as isize {
            return false;
        }
        self.ply_index += 1;
        true
    }

    /// FEN at the cursor.
    pub fn active_fen(&self) -> &str {
        match self.current() {
            Some(entry) => &entry.fen,
            None => &self.starting_fen,
        }
    }

    /// Entry at the cursor, or `None` at the starting position.
    pub fn current(&self) -> Option<&HistoryEntry> {
        usize::try_from(self.ply_index)
            .ok()
            .and_then(|i| self.entries.get(i))
    }

    pub fn starting_fen(&self) -> &str {
        &self.starting_fen
    }

    /// Every recorded entry, including undone ones still available for redo.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn ply_index(&self) -> isize {
        self.ply_index
    }

    pub fn can_undo(&self) -> bool {
        self.ply_index >= 0
    }

    pub fn can_redo(&self) -> bool {
        self.ply_index + 1 < self.entries.len() as isize
    }

    /// Render the whole log as a PGN record.
    pub fn to_pgn(&self) -> String {
        pgn::write_pgn(&self.starting_fen, &self.entries)
    }

    /// Write [`to_pgn`](Self::to_pgn) to `path`, replacing any existing file.
    pub fn export_pgn(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        pgn::export(path.as_ref(), &self.to_pgn())
    }
}

impl Default for MoveLog {
    fn default() -> Self {
        MoveLog::new(STARTING_FEN)
    }
}
