//! PGN-style game record output.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tracing::debug;

use crate::color::Color;
use crate::fen::STARTING_FEN;
use crate::history::HistoryEntry;

/// Render `entries` as a game record starting from `starting_fen`.
///
/// A non-standard start gets `Variant` and `FEN` headers and a blank line.
/// Movetext numbering always begins at 1; if Black moves first the record
/// opens with `1...`.
pub fn write_pgn(starting_fen: &str, entries: &[HistoryEntry]) -> String {
    let mut out = String::new();
    if starting_fen != STARTING_FEN {
        out.push_str("[Variant \"From position\"]\n");
        out.push_str(&format!("[FEN \"{starting_fen}\"]\n"));
        out.push('\n');
    }

    let mut tokens: Vec<String> = Vec::with_capacity(entries.len() * 3 / 2 + 1);
    let mut number = 1u32;
    for (i, entry) in entries.iter().enumerate() {
        match entry.piece.color {
            Color::White => tokens.push(format!("{number}.")),
            Color::Black if i == 0 => tokens.push(format!("{number}...")),
            Color::Black => {}
        }
        tokens.push(entry.san());
        if entry.piece.color == Color::Black {
            number += 1;
        }
    }

    if !tokens.is_empty() {
        out.push_str(&tokens.join(" "));
        out.push('\n');
    }
    out
}

/// Write `text` to `path` through a temporary sibling file, then rename it
/// into place. A failed write leaves any existing file as it was.
pub(crate) fn export(path: &Path, text: &str) -> io::Result<()> {
    let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
    tmp_name.push(".tmp");
    let tmp = path.with_file_name(tmp_name);

    let written = fs::File::create(&tmp).and_then(|mut file| {
        file.write_all(text.as_bytes())?;
        file.sync_all()
    });
    if let Err(err) = written.and_then(|()| fs::rename(&tmp, path)) {
        let _ = fs::remove_file(&tmp);
        return Err(err);
    }

    debug!(path = %path.display(), bytes = text.len(), "exported game record");
    Ok(())
}
