//! Annotation arrows drawn with the right mouse button.
//!
//! Arrows are a UI overlay, not game state: they persist across
//! right-click gestures until a left-click gesture clears them, and
//! repeating an identical arrow toggles it off.

use crate::piece::{Color, PieceKind};
use crate::square::Square;

pub const DEFAULT_ARROW_STYLE: &str = "blue";
pub const DEFAULT_ARROW_SIZE: f32 = 3.5;
/// Stroke-weight increase applied when an arrow replaces an existing
/// one of a different style on the same endpoints.
pub const ARROW_SIZE_STEP: f32 = 0.5;

#[derive(Debug, Clone, PartialEq)]
pub enum Arrow {
    /// Square-to-square annotation. `from == to` renders as a circle
    /// on the square. `to` is `None` only while the arrow is being
    /// drawn and the pointer is off the board.
    Square {
        style: String,
        size: f32,
        from: Square,
        to: Option<Square>,
    },
    /// From a hand-tray slot to a square.
    Hand {
        style: String,
        size: f32,
        kind: PieceKind,
        color: Color,
        to: Option<Square>,
    },
}

impl Arrow {
    pub fn style(&self) -> &str {
        match self {
            Arrow::Square { style, .. } | Arrow::Hand { style, .. } => style,
        }
    }

    pub fn size(&self) -> f32 {
        match self {
            Arrow::Square { size, .. } | Arrow::Hand { size, .. } => *size,
        }
    }

    pub fn to(&self) -> Option<Square> {
        match self {
            Arrow::Square { to, .. } | Arrow::Hand { to, .. } => *to,
        }
    }

    pub(crate) fn set_to(&mut self, dest: Option<Square>) {
        match self {
            Arrow::Square { to, .. } | Arrow::Hand { to, .. } => *to = dest,
        }
    }

    pub(crate) fn with_size(mut self, new_size: f32) -> Arrow {
        match &mut self {
            Arrow::Square { size, .. } | Arrow::Hand { size, .. } => *size = new_size,
        }
        self
    }

    /// Structural endpoint equality, ignoring style and size. This is
    /// what right-click toggling matches on.
    pub fn endpoints_match(&self, other: &Arrow) -> bool {
        match (self, other) {
            (
                Arrow::Square { from: f1, to: t1, .. },
                Arrow::Square { from: f2, to: t2, .. },
            ) => f1 == f2 && t1 == t2,
            (
                Arrow::Hand {
                    kind: k1,
                    color: c1,
                    to: t1,
                    ..
                },
                Arrow::Hand {
                    kind: k2,
                    color: c2,
                    to: t2,
                    ..
                },
            ) => k1 == k2 && c1 == c2 && matches!((t1, t2), (Some(a), Some(b)) if a == b),
            _ => false,
        }
    }
}
