//! Pixel layout of the board canvas.
//!
//! The grid sits in the middle half of the canvas with the hand
//! trays on either side: the viewer's own tray to the right of the
//! grid, the opponent's to the left. Orientation is folded in here,
//! so the interaction layer never sees flipped coordinates.

use shogiban::geometry::{Geometry, Rect};
use shogiban::piece::{Color, PieceKind};
use shogiban::square::Square;

pub const CANVAS_WIDTH: f32 = 1000.0;
pub const CANVAS_HEIGHT: f32 = 560.0;

pub const SQ_SIZE: f32 = CANVAS_WIDTH / 2.0 / 9.0;

const BOARD: Rect = Rect {
    x: CANVAS_WIDTH / 4.0,
    y: 15.0,
    width: CANVAS_WIDTH / 2.0,
    height: CANVAS_WIDTH / 2.0,
};

pub struct Layout {
    pub orientation: Color,
}

impl Layout {
    pub fn new(orientation: Color) -> Self {
        Self { orientation }
    }

    /// Top-left pixel corner of a square under the current
    /// orientation.
    pub fn square_origin(&self, sq: Square) -> (f32, f32) {
        let mut col = (9 - sq.file()) as f32;
        let mut row = (sq.rank() - 1) as f32;
        if self.orientation == Color::White {
            col = 8.0 - col;
            row = 8.0 - row;
        }
        (BOARD.x + col * SQ_SIZE, BOARD.y + row * SQ_SIZE)
    }

    /// Tray slot for the viewer's own hand, right of the grid. The
    /// pawn slot is widest used so it sits on its own row.
    fn near_tray_rect(kind: PieceKind) -> Option<Rect> {
        let padding = BOARD.x + BOARD.width;
        let (x, y) = match kind {
            PieceKind::Pawn => (padding + SQ_SIZE * 1.5, SQ_SIZE * 6.0),
            PieceKind::Lance => (padding + SQ_SIZE * 0.5, SQ_SIZE * 7.0),
            PieceKind::Knight => (padding + SQ_SIZE * 0.5, SQ_SIZE * 8.0),
            PieceKind::Silver => (padding + SQ_SIZE * 1.5, SQ_SIZE * 7.0),
            PieceKind::Gold => (padding + SQ_SIZE * 2.5, SQ_SIZE * 7.0),
            PieceKind::Bishop => (padding + SQ_SIZE * 1.5, SQ_SIZE * 8.0),
            PieceKind::Rook => (padding + SQ_SIZE * 2.5, SQ_SIZE * 8.0),
            PieceKind::King => return None,
        };
        Some(Rect {
            x,
            y,
            width: SQ_SIZE,
            height: SQ_SIZE,
        })
    }

    /// Tray slot for the opponent's hand, left of the grid, mirrored
    /// toward the top.
    fn far_tray_rect(kind: PieceKind) -> Option<Rect> {
        let (x, y) = match kind {
            PieceKind::Pawn => (SQ_SIZE * 2.0, SQ_SIZE * 2.0),
            PieceKind::Lance => (SQ_SIZE * 3.0, SQ_SIZE),
            PieceKind::Knight => (SQ_SIZE * 3.0, 0.0),
            PieceKind::Silver => (SQ_SIZE * 2.0, SQ_SIZE),
            PieceKind::Gold => (SQ_SIZE, SQ_SIZE),
            PieceKind::Bishop => (SQ_SIZE * 2.0, 0.0),
            PieceKind::Rook => (SQ_SIZE, 0.0),
            PieceKind::King => return None,
        };
        Some(Rect {
            x,
            y,
            width: SQ_SIZE,
            height: SQ_SIZE,
        })
    }
}

impl Geometry for Layout {
    fn orientation(&self) -> Color {
        self.orientation
    }

    fn board_bounds(&self) -> Rect {
        BOARD
    }

    fn square_at(&self, x: f32, y: f32) -> Option<Square> {
        let mut col = ((x - BOARD.x) / SQ_SIZE).floor();
        let mut row = ((y - BOARD.y) / SQ_SIZE).floor();
        if self.orientation == Color::White {
            col = 8.0 - col;
            row = 8.0 - row;
        }
        if !(0.0..9.0).contains(&col) || !(0.0..9.0).contains(&row) {
            return None;
        }
        Square::new(9 - col as u8, row as u8 + 1)
    }

    fn square_center(&self, sq: Square) -> (f32, f32) {
        let (x, y) = self.square_origin(sq);
        (x + SQ_SIZE / 2.0, y + SQ_SIZE / 2.0)
    }

    fn hand_rect(&self, color: Color, kind: PieceKind) -> Option<Rect> {
        if color == self.orientation {
            Self::near_tray_rect(kind)
        } else {
            Self::far_tray_rect(kind)
        }
    }
}
