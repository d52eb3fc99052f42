//! Chess rules: FEN codec, move generation, move application and game history.

mod board;
mod castle_rights;
mod chess_move;
mod color;
mod error;
mod fen;
mod game;
mod history;
mod make_move;
pub mod movegen;
pub mod perft;
mod pgn;
mod piece;
mod position;
mod square;

pub use board::{Board, GameStatus};
pub use castle_rights::{CastlePath, CastleRights, CastleSide};
pub use chess_move::{Move, PromotionPiece};
pub use color::Color;
pub use error::{BoardError, FenError, MoveError};
pub use fen::{FenParse, STARTING_FEN, decode as decode_fen};
pub use game::Game;
pub use history::{HistoryEntry, MoveLog};
pub use pgn::write_pgn;
pub use piece::{Piece, PieceKind};
pub use position::{Position, PrettyBoard};
pub use square::Square;
