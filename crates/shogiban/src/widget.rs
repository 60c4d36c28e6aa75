//! The board widget: board state, interaction state, and
//! configuration under one owner.
//!
//! The renderer drives this type with pointer events and reads back
//! everything it needs to draw. All mutation flows through here, so
//! the drawing side never holds stale references.

use log::debug;

use crate::arrow::Arrow;
use crate::board::Board;
use crate::config::Config;
use crate::geometry::Geometry;
use crate::input::{Button, DraggingPiece, Input, Modifiers, Request};
use crate::piece::Color;
use crate::sfen::SfenError;
use crate::square::Square;

pub struct ShogiBoard {
    board: Board,
    input: Input,
    config: Config,
}

impl ShogiBoard {
    pub fn new(config: Config) -> Self {
        Self {
            board: Board::new(),
            input: Input::new(),
            config,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn orientation(&self) -> Color {
        self.config.orientation
    }

    pub fn flip_orientation(&mut self) {
        self.config.orientation = self.config.orientation.opponent();
    }

    pub fn set_position(&mut self, sfen: &str) -> Result<(), SfenError> {
        self.board.set_position(sfen)
    }

    pub fn position(&self) -> String {
        self.board.position()
    }

    pub fn active_square(&self) -> Option<Square> {
        self.input.active_square()
    }

    pub fn dragging_piece(&self) -> Option<&DraggingPiece> {
        self.input.dragging_piece()
    }

    pub fn current_arrow(&self) -> Option<&Arrow> {
        self.input.current_arrow()
    }

    pub fn arrows(&self) -> &[Arrow] {
        self.input.arrows()
    }

    /// Feeds a button press through the state machine and applies
    /// whatever it requests. Returns true when the board changed.
    pub fn on_mouse_down(
        &mut self,
        x: f32,
        y: f32,
        button: Button,
        mods: Modifiers,
        geo: &dyn Geometry,
    ) -> bool {
        let request =
            self.input
                .on_mouse_down(x, y, button, mods, &self.board, geo, &mut self.config);
        match request {
            Some(req) => self.apply(req),
            None => false,
        }
    }

    pub fn on_mouse_move(&mut self, x: f32, y: f32, geo: &dyn Geometry) {
        self.input.on_mouse_move(x, y, geo);
    }

    pub fn on_mouse_up(&mut self, x: f32, y: f32, button: Button, geo: &dyn Geometry) -> bool {
        let request = self.input.on_mouse_up(x, y, button, geo, &mut self.config);
        match request {
            Some(req) => self.apply(req),
            None => false,
        }
    }

    fn apply(&mut self, request: Request) -> bool {
        match request {
            Request::Move { from, to } => {
                let allowed = match self.config.on_move_piece.as_mut() {
                    Some(cb) => cb(from, to),
                    None => true,
                };
                if !allowed {
                    debug!("move {from} -> {to} vetoed");
                    return false;
                }
                let moved = self.board.move_piece(from, to);
                if moved {
                    debug!("moved piece {from} -> {to}");
                }
                moved
            }
            Request::Drop { color, kind, to } => {
                let dropped = self.board.drop_piece(color, kind, to, 1);
                if dropped {
                    debug!("dropped {kind:?} on {to}");
                } else {
                    debug!("drop of {kind:?} on {to} rejected");
                }
                dropped
            }
        }
    }
}
