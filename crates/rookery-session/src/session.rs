//! Line-oriented game session over any reader and writer.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use tracing::{debug, info, warn};

use rookery_core::perft::{divide, perft};
use rookery_core::{Game, STARTING_FEN};

use crate::command::{Command, parse_command};
use crate::error::SessionError;

/// Session settings, normally built from command-line flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Position the session starts from.
    pub starting_fen: String,
    /// Print the FEN after every committed move.
    pub log_fen: bool,
    /// Where `export` writes when given no path.
    pub pgn_path: PathBuf,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            starting_fen: STARTING_FEN.to_string(),
            log_fen: false,
            pgn_path: PathBuf::from("game.pgn"),
        }
    }
}

/// Whether the loop keeps reading after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// A game driven by text commands.
pub struct Session {
    game: Game,
    config: SessionConfig,
}

impl Session {
    /// Create a session at `config.starting_fen`.
    pub fn new(config: SessionConfig) -> Result<Self, SessionError> {
        let game = Game::from_fen(&config.starting_fen).map_err(|source| {
            SessionError::InvalidFen {
                fen: config.starting_fen.clone(),
                source,
            }
        })?;
        Ok(Self { game, config })
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Read commands from `input` until `quit` or end of input.
    ///
    /// Command errors are reported on `output` as `error: ...` and the loop
    /// goes on; only I/O failure on the streams ends it early.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        input: R,
        output: &mut W,
    ) -> Result<(), SessionError> {
        for line in input.lines() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            debug!(cmd = %trimmed, "received command");

            let result = parse_command(trimmed).and_then(|cmd| self.execute(cmd, output));
            match result {
                Ok(Flow::Continue) => {}
                Ok(Flow::Quit) => break,
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => {
                    warn!(error = %e, "command failed");
                    writeln!(output, "error: {e}")?;
                }
            }
            output.flush()?;
        }

        output.flush()?;
        info!(plies = self.game.log().entries().len(), "session finished");
        Ok(())
    }

    /// Carry out one command, writing its reply to `output`.
    pub fn execute<W: Write>(
        &mut self,
        cmd: Command,
        output: &mut W,
    ) -> Result<Flow, SessionError> {
        match cmd {
            Command::Fen(fen) => self.load(&fen, output)?,
            Command::Reset => self.load(STARTING_FEN, output)?,
            Command::Moves(square) => {
                let board = self.game.board();
                let moves = match square {
                    Some(sq) => board.moves_for_square(sq),
                    None => board.legal_moves().to_vec(),
                };
                let text: Vec<String> = moves.iter().map(|mv| mv.to_uci()).collect();
                writeln!(output, "{}", text.join(" "))?;
            }
            Command::Play(mv) => {
                let entry = self.game.play(mv)?;
                writeln!(output, "{}", entry.san())?;
                if self.config.log_fen {
                    writeln!(output, "{}", entry.fen)?;
                }
            }
            Command::Undo => {
                let moved = self.game.undo();
                self.report_cursor(moved, output)?;
            }
            Command::Redo => {
                let moved = self.game.redo();
                self.report_cursor(moved, output)?;
            }
            Command::ShowFen => writeln!(output, "{}", self.game.board())?,
            Command::Show => writeln!(output, "{}", self.game.board().pretty())?,
            Command::Status => writeln!(output, "{}", self.game.board().status())?,
            Command::Pgn => write!(output, "{}", self.game.to_pgn())?,
            Command::Export(path) => {
                let path = path.unwrap_or_else(|| self.config.pgn_path.clone());
                self.game
                    .export_pgn(&path)
                    .map_err(|source| SessionError::Export {
                        path: path.clone(),
                        source,
                    })?;
                writeln!(output, "saved {}", path.display())?;
            }
            Command::Perft(depth) => {
                writeln!(output, "{}", perft(self.game.board().position(), depth))?;
            }
            Command::Divide(depth) => {
                let results = divide(self.game.board().position(), depth);
                let mut total = 0u64;
                for (uci, nodes) in &results {
                    writeln!(output, "{uci}: {nodes}")?;
                    total += nodes;
                }
                writeln!(output, "total: {total}")?;
            }
            Command::Quit => return Ok(Flow::Quit),
            Command::Unknown(name) => {
                if !name.is_empty() {
                    warn!(cmd = %name, "unknown command");
                    writeln!(output, "unknown command: {name}")?;
                }
            }
        }
        Ok(Flow::Continue)
    }

    fn load<W: Write>(&mut self, fen: &str, output: &mut W) -> Result<(), SessionError> {
        self.game
            .load_fen(fen)
            .map_err(|source| SessionError::InvalidFen {
                fen: fen.to_string(),
                source,
            })?;
        writeln!(output, "{}", self.game.board())?;
        Ok(())
    }

    fn report_cursor<W: Write>(&self, moved: bool, output: &mut W) -> Result<(), SessionError> {
        if moved {
            writeln!(output, "{}", self.game.board())?;
        } else {
            writeln!(output, "none")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_script(config: SessionConfig, script: &str) -> (Session, String) {
        let mut session = Session::new(config).unwrap();
        let mut out = Vec::new();
        session.run(script.as_bytes(), &mut out).unwrap();
        (session, String::from_utf8(out).unwrap())
    }

    #[test]
    fn default_config() {
        let config = SessionConfig::default();
        assert_eq!(config.starting_fen, STARTING_FEN);
        assert!(!config.log_fen);
        assert_eq!(config.pgn_path, PathBuf::from("game.pgn"));
    }

    #[test]
    fn invalid_starting_fen_rejected() {
        let config = SessionConfig {
            starting_fen: "garbage".to_string(),
            ..SessionConfig::default()
        };
        assert!(matches!(
            Session::new(config),
            Err(SessionError::InvalidFen { .. })
        ));
    }

    #[test]
    fn play_prints_san() {
        let (_, out) = run_script(SessionConfig::default(), "e2e4\nmove g8f6\n");
        assert_eq!(out, "e4\nNf6\n");
    }

    #[test]
    fn log_fen_echoes_position() {
        let config = SessionConfig {
            log_fen: true,
            ..SessionConfig::default()
        };
        let (_, out) = run_script(config, "e2e4\n");
        assert_eq!(
            out,
            "e4\nrnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1\n"
        );
    }

    #[test]
    fn errors_do_not_end_session() {
        let (session, out) = run_script(SessionConfig::default(), "e2e5\nperft x\nd2d4\n");
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "error: illegal move: e2e5");
        assert_eq!(lines[1], "error: invalid depth: x");
        assert_eq!(lines[2], "d4");
        assert_eq!(session.game().log().entries().len(), 1);
    }

    #[test]
    fn quit_stops_reading() {
        let (session, out) = run_script(SessionConfig::default(), "quit\ne2e4\n");
        assert!(out.is_empty());
        assert!(session.game().log().entries().is_empty());
    }

    #[test]
    fn undo_at_start_prints_none() {
        let (_, out) = run_script(SessionConfig::default(), "undo\nredo\n");
        assert_eq!(out, "none\nnone\n");
    }

    #[test]
    fn unknown_command_reported() {
        let (_, out) = run_script(SessionConfig::default(), "hello\n");
        assert_eq!(out, "unknown command: hello\n");
    }
}
