//! Piece and color definitions for the shogi board.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    White,
}

impl Color {
    /// Get the opponent of the current color.
    pub fn opponent(self) -> Color {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }
}

/// The eight base piece kinds. Promotion is carried separately on
/// [`Piece`]; gold and king have no promoted form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Lance,
    Knight,
    Silver,
    Gold,
    Bishop,
    Rook,
    King,
}

impl PieceKind {
    /// Kinds that can be held in hand and dropped. The king is never
    /// captured-and-held.
    pub const HAND_KINDS: [PieceKind; 7] = [
        PieceKind::Pawn,
        PieceKind::Lance,
        PieceKind::Knight,
        PieceKind::Silver,
        PieceKind::Gold,
        PieceKind::Bishop,
        PieceKind::Rook,
    ];

    /// The lowercase SFEN letter for this kind ("knight" is `n`).
    pub fn to_sfen_char(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Lance => 'l',
            PieceKind::Knight => 'n',
            PieceKind::Silver => 's',
            PieceKind::Gold => 'g',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::King => 'k',
        }
    }

    pub fn from_sfen_char(c: char) -> Option<PieceKind> {
        match c.to_ascii_lowercase() {
            'p' => Some(PieceKind::Pawn),
            'l' => Some(PieceKind::Lance),
            'n' => Some(PieceKind::Knight),
            's' => Some(PieceKind::Silver),
            'g' => Some(PieceKind::Gold),
            'b' => Some(PieceKind::Bishop),
            'r' => Some(PieceKind::Rook),
            'k' => Some(PieceKind::King),
            _ => None,
        }
    }

    /// Slot in a hand counter array, or `None` for the king.
    pub(crate) fn hand_index(self) -> Option<usize> {
        match self {
            PieceKind::Pawn => Some(0),
            PieceKind::Lance => Some(1),
            PieceKind::Knight => Some(2),
            PieceKind::Silver => Some(3),
            PieceKind::Gold => Some(4),
            PieceKind::Bishop => Some(5),
            PieceKind::Rook => Some(6),
            PieceKind::King => None,
        }
    }
}

/// A piece on the board (or mid-drag): kind, owner, promotion flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
    pub promoted: bool,
}

impl Piece {
    pub fn new(kind: PieceKind, color: Color) -> Piece {
        Piece {
            kind,
            color,
            promoted: false,
        }
    }

    /// Decode a single SFEN letter: case encodes the color, the base
    /// kind comes from the letter itself. The promotion marker is
    /// handled one level up, by the row decoder.
    pub fn from_sfen_char(c: char) -> Option<Piece> {
        let kind = PieceKind::from_sfen_char(c)?;
        let color = if c.is_ascii_uppercase() {
            Color::Black
        } else {
            Color::White
        };
        Some(Piece::new(kind, color))
    }

    /// The 1-2 character SFEN code: optional `+`, then the kind
    /// letter, uppercase for black.
    pub fn to_sfen(&self) -> String {
        let c = self.kind.to_sfen_char();
        let c = if self.color == Color::Black {
            c.to_ascii_uppercase()
        } else {
            c
        };
        if self.promoted {
            format!("+{c}")
        } else {
            c.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sfen_char_roundtrip() {
        for kind in [
            PieceKind::Pawn,
            PieceKind::Lance,
            PieceKind::Knight,
            PieceKind::Silver,
            PieceKind::Gold,
            PieceKind::Bishop,
            PieceKind::Rook,
            PieceKind::King,
        ] {
            let c = kind.to_sfen_char();
            assert_eq!(Some(kind), PieceKind::from_sfen_char(c));
            assert_eq!(Some(kind), PieceKind::from_sfen_char(c.to_ascii_uppercase()));
        }
    }

    #[test]
    fn case_encodes_color() {
        let black = Piece::from_sfen_char('P').unwrap();
        assert_eq!(Color::Black, black.color);
        assert_eq!(PieceKind::Pawn, black.kind);
        assert!(!black.promoted);

        let white = Piece::from_sfen_char('p').unwrap();
        assert_eq!(Color::White, white.color);
    }

    #[test]
    fn unknown_letter_is_rejected() {
        assert_eq!(None, Piece::from_sfen_char('z'));
        assert_eq!(None, Piece::from_sfen_char('+'));
        assert_eq!(None, Piece::from_sfen_char('3'));
    }

    #[test]
    fn promoted_pieces_carry_the_plus_prefix() {
        let mut piece = Piece::new(PieceKind::Rook, Color::Black);
        assert_eq!("R", piece.to_sfen());
        piece.promoted = true;
        assert_eq!("+R", piece.to_sfen());

        let mut knight = Piece::new(PieceKind::Knight, Color::White);
        knight.promoted = true;
        assert_eq!("+n", knight.to_sfen());
    }

    #[test]
    fn king_has_no_hand_slot() {
        assert_eq!(None, PieceKind::King.hand_index());
        for kind in PieceKind::HAND_KINDS {
            assert!(kind.hand_index().is_some());
        }
    }
}
