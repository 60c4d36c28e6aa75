//! SFEN position codec.
//!
//! The wire form is `<board> <side-to-move> <hands>`: nine `/`
//! separated rows mixing empty-run digits with piece letters (case
//! encodes the color, a leading `+` promotion), then a side-to-move
//! field this widget parses past but ignores, then concatenated
//! `<count><letter>` hand entries (`-` for empty hands).
//!
//! Serialization currently emits the board section only.

use std::collections::HashMap;

use thiserror::Error;

use crate::board::Board;
use crate::piece::{Color, Piece, PieceKind};
use crate::square::Square;

/// The standard starting position.
pub const START_POSITION: &str =
    "lnsgkgsnl/1r5b1/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL b -";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SfenError {
    /// The board section does not have exactly nine rows.
    #[error("expected 9 board rows, found {0}")]
    RowCount(usize),
    /// A row's digits and piece letters do not tally to nine files.
    #[error("board row {0} does not describe exactly 9 files")]
    RowWidth(usize),
    /// A character in the board section is not a digit, a `+`, or a
    /// piece letter.
    #[error("invalid character {0:?} in board section")]
    InvalidChar(char),
    /// A letter the validator accepted (or a hand-section letter) has
    /// no piece mapping. Indicates caller input outside the contract.
    #[error("unrecognized piece letter {0:?}")]
    UnknownPiece(char),
}

/// Decoded but not yet committed position data.
pub(crate) struct ParsedPosition {
    pub pieces: HashMap<Square, Piece>,
    pub hands: Vec<(Color, PieceKind, u8)>,
}

/// Parses a full SFEN string. Nothing is mutated here; the caller
/// commits the result, so failures leave any prior position intact.
pub(crate) fn parse(sfen: &str) -> Result<ParsedPosition, SfenError> {
    let mut fields = sfen.split_whitespace();
    let board_part = fields.next().unwrap_or("");
    let _side_to_move = fields.next();
    let hand_part = fields.next();

    validate_board(board_part)?;

    let mut pieces = HashMap::new();
    for (row_idx, row) in board_part.split('/').enumerate() {
        let rank = row_idx as u8 + 1;
        // Files are written 9 down to 1 within a row.
        let mut file = 9i8;
        let mut promoted = false;
        for c in row.chars() {
            if let Some(n) = c.to_digit(10) {
                file -= n as i8;
                promoted = false;
                continue;
            }
            if c == '+' {
                // Marks promotion of the next letter only.
                promoted = true;
                continue;
            }
            let mut piece = Piece::from_sfen_char(c).ok_or(SfenError::UnknownPiece(c))?;
            piece.promoted = promoted;
            promoted = false;
            let sq = Square::new(file.max(0) as u8, rank)
                .ok_or(SfenError::RowWidth(rank as usize))?;
            pieces.insert(sq, piece);
            file -= 1;
        }
    }

    let hands = match hand_part {
        Some(hand) => parse_hands(hand)?,
        None => Vec::new(),
    };

    Ok(ParsedPosition { pieces, hands })
}

/// Checks the shape of the board section before any decoding: nine
/// rows, each tallying to exactly nine files, no characters outside
/// digits, `+`, and the piece alphabet.
fn validate_board(board_part: &str) -> Result<(), SfenError> {
    let rows: Vec<&str> = board_part.split('/').collect();
    if rows.len() != 9 {
        return Err(SfenError::RowCount(rows.len()));
    }
    for (row_idx, row) in rows.iter().enumerate() {
        let mut width = 0u32;
        for c in row.chars() {
            if let Some(n) = c.to_digit(10) {
                width += n;
            } else if c == '+' {
                // Not a file of its own.
            } else if PieceKind::from_sfen_char(c).is_some() {
                width += 1;
            } else {
                return Err(SfenError::InvalidChar(c));
            }
        }
        if width != 9 {
            return Err(SfenError::RowWidth(row_idx + 1));
        }
    }
    Ok(())
}

/// Decodes the hand section: count digits accumulate until a piece
/// letter consumes them (default count 1). Each letter is colored by
/// its own case. `-` means empty hands.
fn parse_hands(hand_part: &str) -> Result<Vec<(Color, PieceKind, u8)>, SfenError> {
    let mut entries = Vec::new();
    let mut pending: u32 = 0;
    for c in hand_part.chars() {
        if c == '-' {
            continue;
        }
        if let Some(n) = c.to_digit(10) {
            pending = pending.saturating_mul(10).saturating_add(n);
            continue;
        }
        let piece = Piece::from_sfen_char(c).ok_or(SfenError::UnknownPiece(c))?;
        let count = if pending == 0 {
            1
        } else {
            pending.min(u8::MAX as u32) as u8
        };
        entries.push((piece.color, piece.kind, count));
        pending = 0;
    }
    Ok(entries)
}

/// Writes the board section: run-length digits for empty squares,
/// piece codes otherwise, `/` between the nine rows.
pub(crate) fn write_board(board: &Board) -> String {
    let mut out = String::with_capacity(90);
    let mut empty = 0u32;
    let mut rank = 1u8;
    for sq in Square::iter() {
        if sq.rank() != rank {
            flush_empties(&mut out, &mut empty);
            out.push('/');
            rank = sq.rank();
        }
        match board.piece_at(sq) {
            Some(piece) => {
                flush_empties(&mut out, &mut empty);
                out.push_str(&piece.to_sfen());
            }
            None => empty += 1,
        }
    }
    flush_empties(&mut out, &mut empty);
    // TODO: emit the hand section; blocked on settling a canonical
    // ordering for hand entries.
    out
}

fn flush_empties(out: &mut String, empty: &mut u32) {
    if *empty > 0 {
        out.push_str(&empty.to_string());
        *empty = 0;
    }
}
