//! Session command parsing.

use std::path::PathBuf;

use rookery_core::{Move, Square};

use crate::error::SessionError;

/// A parsed session command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `fen <FEN>` -- load a position and start a new log.
    Fen(String),
    /// `reset` -- back to the standard starting position.
    Reset,
    /// `moves [square]` -- list legal moves, optionally from one square.
    Moves(Option<Square>),
    /// `move <uci>` or a bare `<uci>` -- play a move.
    Play(Move),
    /// `undo` -- step back one move.
    Undo,
    /// `redo` -- step forward one undone move.
    Redo,
    /// `fen?` -- print the current FEN.
    ShowFen,
    /// `show` -- print the board as a grid.
    Show,
    /// `status` -- ongoing, checkmate or stalemate.
    Status,
    /// `pgn` -- print the game record.
    Pgn,
    /// `export [path]` -- write the game record to a file.
    Export(Option<PathBuf>),
    /// `perft <depth>` -- count leaf nodes.
    Perft(usize),
    /// `divide <depth>` -- perft split by first move.
    Divide(usize),
    /// `quit` -- leave the session.
    Quit,
    /// Unrecognized command.
    Unknown(String),
}

/// Parse a single input line into a [`Command`].
pub fn parse_command(line: &str) -> Result<Command, SessionError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let Some((&keyword, args)) = tokens.split_first() else {
        return Ok(Command::Unknown(String::new()));
    };

    match keyword {
        "fen" => {
            if args.is_empty() {
                return Err(malformed("fen", "missing FEN string"));
            }
            Ok(Command::Fen(args.join(" ")))
        }
        "reset" => no_args("reset", args, Command::Reset),
        "moves" => match args {
            [] => Ok(Command::Moves(None)),
            [sq] => Square::from_algebraic(sq)
                .map(|sq| Command::Moves(Some(sq)))
                .ok_or_else(|| SessionError::InvalidSquare {
                    value: sq.to_string(),
                }),
            _ => Err(malformed("moves", "expected at most one square")),
        },
        "move" => match args {
            [uci] => parse_move(uci).map(Command::Play),
            [] => Err(malformed("move", "missing move")),
            _ => Err(malformed("move", "expected one move")),
        },
        "undo" => no_args("undo", args, Command::Undo),
        "redo" => no_args("redo", args, Command::Redo),
        "fen?" => no_args("fen?", args, Command::ShowFen),
        "show" => no_args("show", args, Command::Show),
        "status" => no_args("status", args, Command::Status),
        "pgn" => no_args("pgn", args, Command::Pgn),
        "export" => match args {
            [] => Ok(Command::Export(None)),
            [path] => Ok(Command::Export(Some(PathBuf::from(*path)))),
            _ => Err(malformed("export", "expected at most one path")),
        },
        "perft" => parse_depth("perft", args).map(Command::Perft),
        "divide" => parse_depth("divide", args).map(Command::Divide),
        "quit" => Ok(Command::Quit),
        _ => match Move::from_uci(keyword) {
            Some(mv) if args.is_empty() => Ok(Command::Play(mv)),
            _ => Ok(Command::Unknown(keyword.to_string())),
        },
    }
}

fn malformed(command: &str, reason: &'static str) -> SessionError {
    SessionError::MalformedCommand {
        command: command.to_string(),
        reason,
    }
}

fn no_args(command: &str, args: &[&str], cmd: Command) -> Result<Command, SessionError> {
    if args.is_empty() {
        Ok(cmd)
    } else {
        Err(malformed(command, "takes no arguments"))
    }
}

fn parse_move(token: &str) -> Result<Move, SessionError> {
    Move::from_uci(token).ok_or_else(|| SessionError::InvalidMove {
        uci_move: token.to_string(),
    })
}

fn parse_depth(command: &str, args: &[&str]) -> Result<usize, SessionError> {
    match args {
        [value] => value.parse().map_err(|_| SessionError::InvalidDepth {
            value: value.to_string(),
        }),
        [] => Err(malformed(command, "missing depth")),
        _ => Err(malformed(command, "expected one depth")),
    }
}
