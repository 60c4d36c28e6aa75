//! Board state: piece placement and the captured-piece hands.
//!
//! No move legality is checked here; any relocation the caller asks
//! for is performed. Rule enforcement, if any, belongs to the layer
//! driving the widget.

use std::collections::HashMap;

use log::debug;

use crate::piece::{Color, Piece, PieceKind};
use crate::sfen::{self, SfenError};
use crate::square::Square;

/// Captured pieces available for dropping, one counter per droppable
/// kind. Counts never go negative.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hand {
    counts: [u8; 7],
}

impl Hand {
    pub fn count(&self, kind: PieceKind) -> u8 {
        match kind.hand_index() {
            Some(i) => self.counts[i],
            None => 0,
        }
    }

    fn add(&mut self, kind: PieceKind, amount: u8) -> bool {
        match kind.hand_index() {
            Some(i) => {
                self.counts[i] = self.counts[i].saturating_add(amount);
                true
            }
            None => false,
        }
    }

    fn remove(&mut self, kind: PieceKind, amount: u8) -> bool {
        match kind.hand_index() {
            Some(i) if self.counts[i] >= amount => {
                self.counts[i] -= amount;
                true
            }
            _ => false,
        }
    }
}

/// The position: a sparse placement map plus one hand per color.
#[derive(Debug, Clone, Default)]
pub struct Board {
    pieces: HashMap<Square, Piece>,
    hands: [Hand; 2],
}

fn hand_slot(color: Color) -> usize {
    match color {
        Color::Black => 0,
        Color::White => 1,
    }
}

impl Board {
    /// An empty board with empty hands.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.pieces.get(&sq).copied()
    }

    /// Unconditionally puts `piece` on `sq`, replacing any occupant.
    pub fn place(&mut self, piece: Piece, sq: Square) {
        self.pieces.insert(sq, piece);
    }

    /// Relocates the piece on `from` to `to`. Any occupant of `to` is
    /// silently discarded; crediting captures to the mover's hand is
    /// the caller's business. Returns false without mutating when
    /// `from == to` or `from` is empty.
    pub fn move_piece(&mut self, from: Square, to: Square) -> bool {
        if from == to {
            return false;
        }
        match self.pieces.remove(&from) {
            Some(piece) => {
                self.pieces.insert(to, piece);
                true
            }
            None => false,
        }
    }

    /// Takes `count` pieces of `kind` out of `color`'s hand and puts
    /// one fresh, unpromoted piece on `sq`. Fails without mutating
    /// when the hand holds fewer than `count`.
    pub fn drop_piece(&mut self, color: Color, kind: PieceKind, sq: Square, count: u8) -> bool {
        if !self.remove_from_hand(color, kind, count) {
            return false;
        }
        self.place(Piece::new(kind, color), sq);
        true
    }

    pub fn add_to_hand(&mut self, color: Color, kind: PieceKind, amount: u8) -> bool {
        self.hands[hand_slot(color)].add(kind, amount)
    }

    pub fn remove_from_hand(&mut self, color: Color, kind: PieceKind, amount: u8) -> bool {
        self.hands[hand_slot(color)].remove(kind, amount)
    }

    pub fn hand_count(&self, color: Color, kind: PieceKind) -> u8 {
        self.hands[hand_slot(color)].count(kind)
    }

    /// Replaces the whole position with the one described by `sfen`.
    /// On any error the previous position is left untouched.
    pub fn set_position(&mut self, sfen: &str) -> Result<(), SfenError> {
        let parsed = sfen::parse(sfen)?;
        self.pieces = parsed.pieces;
        self.hands = [Hand::default(), Hand::default()];
        for (color, kind, count) in parsed.hands {
            if !self.add_to_hand(color, kind, count) {
                // Only the king lands here; it has no hand slot.
                debug!("ignoring hand entry for {kind:?}");
            }
        }
        Ok(())
    }

    /// The SFEN board section for the current placement. The hand
    /// section is not emitted yet; see [`sfen`] for the gap.
    pub fn position(&self) -> String {
        sfen::write_board(self)
    }
}
