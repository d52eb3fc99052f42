//! FEN string parsing and serialization for [`Position`].

use std::fmt;
use std::num::IntErrorKind;
use std::str::FromStr;

use tracing::warn;

use crate::castle_rights::CastleRights;
use crate::color::Color;
use crate::error::FenError;
use crate::piece::Piece;
use crate::position::Position;
use crate::square::Square;

/// The FEN string for the standard starting position.
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// A successfully decoded FEN, with any non-fatal problems found on the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FenParse {
    pub position: Position,
    /// Recoverable errors; each affected field was set to 0.
    pub recovered: Vec<FenError>,
}

/// Decode a FEN string.
///
/// Fields are separated by single spaces. Placement, side to move,
/// castling rights and en passant are mandatory. The halfmove clock
/// defaults to 0 and the fullmove number to 1 when absent. A non-numeric
/// counter is recorded in [`FenParse::recovered`] and read as 0; a counter
/// too large to store is clamped.
pub fn decode(fen: &str) -> Result<FenParse, FenError> {
    let fields: Vec<&str> = fen.trim().split(' ').collect();
    if !(4..=6).contains(&fields.len()) {
        return Err(FenError::WrongFieldCount {
            found: fields.len(),
        });
    }

    let mut position = Position::empty();
    decode_placement(fields[0], &mut position)?;

    let side = Color::from_fen(fields[1]).ok_or_else(|| FenError::InvalidColor {
        found: fields[1].to_string(),
    })?;
    position.set_side_to_move(side);

    position.set_castling(CastleRights::from_fen(fields[2])?);

    let en_passant = match fields[3] {
        "-" => None,
        text => Some(Square::from_algebraic(text).ok_or_else(|| {
            FenError::InvalidEnPassant {
                found: text.to_string(),
            }
        })?),
    };
    position.set_en_passant(en_passant);

    let mut recovered = Vec::new();
    let halfmove = decode_counter(fields.get(4), "halfmove clock", 0, &mut recovered);
    let fullmove = decode_counter(fields.get(5), "fullmove number", 1, &mut recovered);
    position.set_halfmove_clock(halfmove);
    position.set_fullmove_number(fullmove);

    position.validate()?;

    for err in &recovered {
        warn!(fen, error = %err, "recovered from malformed FEN field");
    }
    Ok(FenParse {
        position,
        recovered,
    })
}

fn decode_placement(placement: &str, position: &mut Position) -> Result<(), FenError> {
    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::WrongRankCount { found: ranks.len() });
    }

    // FEN lists rank 8 first.
    for (rank_index, text) in ranks.iter().enumerate() {
        let rank = 7 - rank_index as u8;
        let mut file: usize = 0;

        for c in text.chars() {
            if let Some(skip) = c.to_digit(10) {
                if !(1..=8).contains(&skip) {
                    return Err(FenError::InvalidPieceChar { character: c });
                }
                file += skip as usize;
                continue;
            }

            let piece =
                Piece::from_placement_char(c).ok_or(FenError::InvalidPieceChar { character: c })?;
            let sq = Square::new(file as u8, rank).ok_or(FenError::BadRankLength {
                rank_index,
                length: file + 1,
            })?;
            position.put(sq, Some(piece));
            file += 1;
        }

        if file != 8 {
            return Err(FenError::BadRankLength {
                rank_index,
                length: file,
            });
        }
    }
    Ok(())
}

fn decode_counter(
    field: Option<&&str>,
    name: &'static str,
    default: u16,
    recovered: &mut Vec<FenError>,
) -> u16 {
    let Some(text) = field else {
        return default;
    };
    match text.parse::<u16>() {
        Ok(value) => value,
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => u16::MAX,
        Err(_) => {
            recovered.push(FenError::InvalidMoveCounter {
                field: name,
                found: text.to_string(),
            });
            0
        }
    }
}

impl FromStr for Position {
    type Err = FenError;

    fn from_str(fen: &str) -> Result<Position, FenError> {
        decode(fen).map(|parsed| parsed.position)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0u8..8).rev() {
            let mut empty_run = 0u8;
            for file in 0u8..8 {
                let sq = Square::from_index_unchecked(rank * 8 + file);
                match self.piece_on(sq) {
                    Some(piece) => {
                        if empty_run > 0 {
                            write!(f, "{empty_run}")?;
                            empty_run = 0;
                        }
                        write!(f, "{piece}")?;
                    }
                    None => empty_run += 1,
                }
            }
            if empty_run > 0 {
                write!(f, "{empty_run}")?;
            }
            if rank > 0 {
                write!(f, "/")?;
            }
        }

        write!(f, " {} {}", self.side_to_move(), self.castling())?;
        match self.en_passant() {
            Some(sq) => write!(f, " {sq}")?,
            None => write!(f, " -")?,
        }
        write!(f, " {} {}", self.halfmove_clock(), self.fullmove_number())
    }
}
