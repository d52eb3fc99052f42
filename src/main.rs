use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use rookery_core::{Board, STARTING_FEN};
use rookery_session::{Session, SessionConfig};

#[derive(Parser, Debug)]
#[command(about = "Chess rules engine with a text command session", author, version)]
struct CmdArgs {
    /// Starting position
    #[arg(long = "fen", short = 'F', value_name = "FEN", default_value = STARTING_FEN)]
    fen: String,

    /// Print every legal move of the starting position and exit
    #[arg(long)]
    get_moves: bool,

    /// Print the FEN after every move
    #[arg(long)]
    log_fen: bool,

    /// Default destination for `export`
    #[arg(long = "pgn", value_name = "PATH", default_value = "game.pgn")]
    pgn_path: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = CmdArgs::parse();

    if args.get_moves {
        let board = Board::from_fen(&args.fen).with_context(|| format!("loading {}", args.fen))?;
        let stdout = io::stdout();
        let mut out = stdout.lock();
        for mv in board.legal_moves() {
            writeln!(out, "{mv}")?;
        }
        return Ok(());
    }

    let config = SessionConfig {
        starting_fen: args.fen,
        log_fen: args.log_fen,
        pgn_path: args.pgn_path,
    };
    let mut session = Session::new(config).context("starting session")?;
    info!(fen = %session.game().board(), "rookery starting");

    let stdin = io::stdin();
    let stdout = io::stdout();
    session.run(stdin.lock(), &mut stdout.lock())?;

    info!("rookery shutting down");
    Ok(())
}
