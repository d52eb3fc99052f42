//! Text command session around a rookery game.

pub mod command;
pub mod error;
pub mod session;

pub use command::{Command, parse_command};
pub use error::SessionError;
pub use session::{Flow, Session, SessionConfig};
