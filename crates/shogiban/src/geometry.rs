//! The geometry oracle the renderer supplies to the interaction
//! layer: pixel/square mapping and the interactive regions.

use crate::piece::{Color, PieceKind};
use crate::square::Square;

/// Axis-aligned pixel rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// Half-open containment: the left/top edges are inside, the
    /// right/bottom edges are not.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

/// What the interaction layer needs to know about the renderer's
/// layout. Implemented by the drawing side; the state machine only
/// ever reads from it.
pub trait Geometry {
    /// Which color currently faces the viewer.
    fn orientation(&self) -> Color;

    /// Bounding rectangle of the 9x9 grid.
    fn board_bounds(&self) -> Rect;

    /// The square under a pixel position, or `None` off the grid.
    fn square_at(&self, x: f32, y: f32) -> Option<Square>;

    /// Pixel center of a square, for drawing arrows onto it.
    fn square_center(&self, sq: Square) -> (f32, f32);

    /// Bounding rectangle of the hand-tray slot holding `kind` for
    /// `color`, under the current orientation. `None` when the
    /// renderer lays out no tray slot for that kind.
    fn hand_rect(&self, color: Color, kind: PieceKind) -> Option<Rect>;
}
