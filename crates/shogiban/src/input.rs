//! The pointer-interaction state machine.
//!
//! Consumes raw mouse events against the current board and the
//! renderer's geometry, and produces move/drop requests plus the
//! annotation-arrow overlay. Everything here is plain control flow:
//! a pointer outside every interactive region simply ends the
//! current action, it is never an error.

use log::trace;

use crate::arrow::{Arrow, ARROW_SIZE_STEP, DEFAULT_ARROW_SIZE};
use crate::board::Board;
use crate::config::Config;
use crate::geometry::Geometry;
use crate::piece::{Piece, PieceKind};
use crate::square::Square;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Primary,
    Secondary,
}

/// Modifier keys held during a pointer event.
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    pub alt: bool,
    pub ctrl: bool,
}

/// A mutation the state machine asks the orchestrator to perform.
/// The orchestrator applies vetoes and board mutation; the machine
/// itself never touches the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request {
    Move {
        from: Square,
        to: Square,
    },
    Drop {
        color: crate::piece::Color,
        kind: PieceKind,
        to: Square,
    },
}

/// A piece following the pointer mid-gesture, with its live pixel
/// position. For hand drags the piece is synthetic: the tray's kind
/// and owning color, never taken off the board.
#[derive(Debug, Clone, Copy)]
pub struct DraggingPiece {
    pub piece: Piece,
    pub x: f32,
    pub y: f32,
}

#[derive(Default)]
pub struct Input {
    active_square: Option<Square>,
    dragging: Option<DraggingPiece>,
    current_arrow: Option<Arrow>,
    arrows: Vec<Arrow>,
}

impl Input {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_square(&self) -> Option<Square> {
        self.active_square
    }

    pub fn dragging_piece(&self) -> Option<&DraggingPiece> {
        self.dragging.as_ref()
    }

    pub fn current_arrow(&self) -> Option<&Arrow> {
        self.current_arrow.as_ref()
    }

    pub fn arrows(&self) -> &[Arrow] {
        &self.arrows
    }

    pub fn clear_arrows(&mut self) {
        self.arrows.clear();
    }

    pub fn on_mouse_down(
        &mut self,
        x: f32,
        y: f32,
        button: Button,
        mods: Modifiers,
        board: &Board,
        geo: &dyn Geometry,
        config: &mut Config,
    ) -> Option<Request> {
        self.current_arrow = None;

        if button == Button::Secondary {
            self.begin_arrow(x, y, mods, geo, config);
            return None;
        }

        // A fresh left-gesture always clears the overlay.
        self.arrows.clear();

        if geo.board_bounds().contains(x, y) {
            let sq = geo.square_at(x, y)?;
            match board.piece_at(sq) {
                Some(piece)
                    if self.active_square.is_none() || self.active_square == Some(sq) =>
                {
                    if select_allowed(config, &piece, sq) {
                        trace!("selected {sq}");
                        self.active_square = Some(sq);
                        self.dragging = Some(DraggingPiece { piece, x, y });
                    }
                }
                _ => {
                    if let Some(from) = self.active_square {
                        if from != sq {
                            self.active_square = None;
                            return Some(Request::Move { from, to: sq });
                        }
                    }
                }
            }
            // Board and trays are disjoint regions.
            return None;
        }

        self.dragging = None;
        self.deselect(config);

        // Either side's tray can start a drag when pieces are there.
        for color in [geo.orientation(), geo.orientation().opponent()] {
            for kind in PieceKind::HAND_KINDS {
                let inside = geo
                    .hand_rect(color, kind)
                    .is_some_and(|rect| rect.contains(x, y));
                if !inside {
                    continue;
                }
                if board.hand_count(color, kind) == 0 {
                    return None;
                }
                trace!("dragging {kind:?} from {color:?}'s hand");
                self.dragging = Some(DraggingPiece {
                    piece: Piece::new(kind, color),
                    x,
                    y,
                });
                return None;
            }
        }
        None
    }

    pub fn on_mouse_move(&mut self, x: f32, y: f32, geo: &dyn Geometry) {
        if let Some(drag) = self.dragging.as_mut() {
            drag.x = x;
            drag.y = y;
        }
        if let Some(arrow) = self.current_arrow.as_mut() {
            // Off-board hover leaves the arrow without an endpoint;
            // it will not be committed in that state.
            arrow.set_to(geo.square_at(x, y));
        }
    }

    pub fn on_mouse_up(
        &mut self,
        x: f32,
        y: f32,
        button: Button,
        geo: &dyn Geometry,
        config: &mut Config,
    ) -> Option<Request> {
        if button == Button::Secondary {
            self.finish_arrow();
            return None;
        }

        let mut request = None;
        if geo.board_bounds().contains(x, y) {
            if let (Some(sq), Some(drag)) = (geo.square_at(x, y), self.dragging) {
                match self.active_square {
                    // Released where it was picked up: cancel the
                    // drag but keep the square selected.
                    Some(from) if from == sq => {}
                    Some(from) => {
                        self.active_square = None;
                        request = Some(Request::Move { from, to: sq });
                    }
                    None => {
                        request = Some(Request::Drop {
                            color: drag.piece.color,
                            kind: drag.piece.kind,
                            to: sq,
                        });
                    }
                }
            }
        } else {
            self.deselect(config);
        }
        self.dragging = None;
        request
    }

    /// Right mouse-down: piece manipulation and arrows are mutually
    /// exclusive, so any drag or selection is abandoned before the
    /// new arrow is anchored.
    fn begin_arrow(
        &mut self,
        x: f32,
        y: f32,
        mods: Modifiers,
        geo: &dyn Geometry,
        config: &Config,
    ) {
        self.dragging = None;
        self.active_square = None;

        let style = config.arrow_style_for(mods);

        if let Some(sq) = geo.square_at(x, y) {
            self.current_arrow = Some(Arrow::Square {
                style,
                size: DEFAULT_ARROW_SIZE,
                from: sq,
                to: Some(sq),
            });
            return;
        }
        for color in [geo.orientation(), geo.orientation().opponent()] {
            for kind in PieceKind::HAND_KINDS {
                let inside = geo
                    .hand_rect(color, kind)
                    .is_some_and(|rect| rect.contains(x, y));
                if inside {
                    self.current_arrow = Some(Arrow::Hand {
                        style,
                        size: DEFAULT_ARROW_SIZE,
                        kind,
                        color,
                        to: None,
                    });
                    return;
                }
            }
        }
    }

    /// Right mouse-up: commit, toggle off, or thicken-and-replace.
    fn finish_arrow(&mut self) {
        let Some(arrow) = self.current_arrow.take() else {
            return;
        };
        if arrow.to().is_none() {
            // The pointer left the board mid-draw.
            return;
        }
        match self.arrows.iter().position(|a| a.endpoints_match(&arrow)) {
            Some(i) => {
                let existing = self.arrows.remove(i);
                if existing.style() != arrow.style() {
                    self.arrows
                        .push(arrow.with_size(existing.size() + ARROW_SIZE_STEP));
                }
            }
            None => self.arrows.push(arrow),
        }
    }

    fn deselect(&mut self, config: &mut Config) {
        if self.active_square.is_none() {
            return;
        }
        let allowed = match config.on_deselect_piece.as_mut() {
            Some(cb) => cb(),
            None => true,
        };
        if allowed {
            self.active_square = None;
        }
    }
}

fn select_allowed(config: &mut Config, piece: &Piece, sq: Square) -> bool {
    match config.on_select_piece.as_mut() {
        Some(cb) => cb(piece, sq),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;
    use crate::piece::Color;

    /// Fixed black-facing layout: 50px squares at the origin, black's
    /// tray slots at x=500, white's at x=600, stacked by hand index.
    struct TestLayout;

    const SQ: f32 = 50.0;

    impl Geometry for TestLayout {
        fn orientation(&self) -> Color {
            Color::Black
        }

        fn board_bounds(&self) -> Rect {
            Rect {
                x: 0.0,
                y: 0.0,
                width: 9.0 * SQ,
                height: 9.0 * SQ,
            }
        }

        fn square_at(&self, x: f32, y: f32) -> Option<Square> {
            if !self.board_bounds().contains(x, y) {
                return None;
            }
            let col = (x / SQ) as u8;
            let row = (y / SQ) as u8;
            Square::new(9 - col, row + 1)
        }

        fn square_center(&self, sq: Square) -> (f32, f32) {
            let col = (9 - sq.file()) as f32;
            let row = (sq.rank() - 1) as f32;
            (col * SQ + SQ / 2.0, row * SQ + SQ / 2.0)
        }

        fn hand_rect(&self, color: Color, kind: PieceKind) -> Option<Rect> {
            let slot = PieceKind::HAND_KINDS.iter().position(|&k| k == kind)?;
            let x = if color == Color::Black { 500.0 } else { 600.0 };
            Some(Rect {
                x,
                y: slot as f32 * SQ,
                width: SQ,
                height: SQ,
            })
        }
    }

    fn sq(file: u8, rank: u8) -> Square {
        Square::new(file, rank).unwrap()
    }

    fn center(square: Square) -> (f32, f32) {
        TestLayout.square_center(square)
    }

    fn tray_center(color: Color, kind: PieceKind) -> (f32, f32) {
        let rect = TestLayout.hand_rect(color, kind).unwrap();
        (rect.x + rect.width / 2.0, rect.y + rect.height / 2.0)
    }

    fn press(input: &mut Input, board: &Board, config: &mut Config, at: (f32, f32)) -> Option<Request> {
        input.on_mouse_down(at.0, at.1, Button::Primary, Modifiers::default(), board, &TestLayout, config)
    }

    fn release(input: &mut Input, config: &mut Config, at: (f32, f32)) -> Option<Request> {
        input.on_mouse_up(at.0, at.1, Button::Primary, &TestLayout, config)
    }

    fn right_press(input: &mut Input, board: &Board, config: &mut Config, at: (f32, f32)) {
        input.on_mouse_down(at.0, at.1, Button::Secondary, Modifiers::default(), board, &TestLayout, config);
    }

    fn right_release(input: &mut Input, config: &mut Config, at: (f32, f32)) {
        input.on_mouse_up(at.0, at.1, Button::Secondary, &TestLayout, config);
    }

    fn board_with_pawn_on(square: Square) -> Board {
        let mut board = Board::new();
        board.place(Piece::new(PieceKind::Pawn, Color::Black), square);
        board
    }

    #[test]
    fn pressing_an_occupied_square_selects_and_drags() {
        let board = board_with_pawn_on(sq(7, 7));
        let mut input = Input::new();
        let mut config = Config::default();

        assert_eq!(None, press(&mut input, &board, &mut config, center(sq(7, 7))));
        assert_eq!(Some(sq(7, 7)), input.active_square());
        assert_eq!(
            PieceKind::Pawn,
            input.dragging_piece().unwrap().piece.kind
        );
    }

    #[test]
    fn pressing_a_second_square_requests_the_move() {
        let board = board_with_pawn_on(sq(7, 7));
        let mut input = Input::new();
        let mut config = Config::default();

        press(&mut input, &board, &mut config, center(sq(7, 7)));
        release(&mut input, &mut config, center(sq(7, 7)));
        let request = press(&mut input, &board, &mut config, center(sq(7, 6)));
        assert_eq!(
            Some(Request::Move {
                from: sq(7, 7),
                to: sq(7, 6)
            }),
            request
        );
        assert_eq!(None, input.active_square());
    }

    #[test]
    fn drag_release_on_a_new_square_requests_the_move() {
        let board = board_with_pawn_on(sq(7, 7));
        let mut input = Input::new();
        let mut config = Config::default();

        press(&mut input, &board, &mut config, center(sq(7, 7)));
        input.on_mouse_move(center(sq(7, 6)).0, center(sq(7, 6)).1, &TestLayout);
        let request = release(&mut input, &mut config, center(sq(7, 6)));
        assert_eq!(
            Some(Request::Move {
                from: sq(7, 7),
                to: sq(7, 6)
            }),
            request
        );
        assert!(input.dragging_piece().is_none());
    }

    #[test]
    fn releasing_in_place_cancels_the_drag_but_keeps_the_selection() {
        let board = board_with_pawn_on(sq(7, 7));
        let mut input = Input::new();
        let mut config = Config::default();

        press(&mut input, &board, &mut config, center(sq(7, 7)));
        assert_eq!(None, release(&mut input, &mut config, center(sq(7, 7))));
        assert!(input.dragging_piece().is_none());
        assert_eq!(Some(sq(7, 7)), input.active_square());
    }

    #[test]
    fn mouse_move_tracks_the_dragged_piece() {
        let board = board_with_pawn_on(sq(7, 7));
        let mut input = Input::new();
        let mut config = Config::default();

        press(&mut input, &board, &mut config, center(sq(7, 7)));
        input.on_mouse_move(333.0, 111.0, &TestLayout);
        let drag = input.dragging_piece().unwrap();
        assert_eq!((333.0, 111.0), (drag.x, drag.y));
    }

    #[test]
    fn pressing_outside_everything_clears_the_selection() {
        let board = board_with_pawn_on(sq(7, 7));
        let mut input = Input::new();
        let mut config = Config::default();

        press(&mut input, &board, &mut config, center(sq(7, 7)));
        press(&mut input, &board, &mut config, (900.0, 900.0));
        assert_eq!(None, input.active_square());
        assert!(input.dragging_piece().is_none());
    }

    #[test]
    fn releasing_off_board_clears_everything() {
        let board = board_with_pawn_on(sq(7, 7));
        let mut input = Input::new();
        let mut config = Config::default();

        press(&mut input, &board, &mut config, center(sq(7, 7)));
        assert_eq!(None, release(&mut input, &mut config, (900.0, 900.0)));
        assert_eq!(None, input.active_square());
        assert!(input.dragging_piece().is_none());
    }

    #[test]
    fn empty_tray_starts_no_drag() {
        let board = Board::new();
        let mut input = Input::new();
        let mut config = Config::default();

        press(
            &mut input,
            &board,
            &mut config,
            tray_center(Color::Black, PieceKind::Pawn),
        );
        assert!(input.dragging_piece().is_none());
        assert_eq!(None, input.active_square());
    }

    #[test]
    fn tray_drag_and_release_requests_the_drop() {
        let mut board = Board::new();
        board.add_to_hand(Color::White, PieceKind::Knight, 1);
        let mut input = Input::new();
        let mut config = Config::default();

        press(
            &mut input,
            &board,
            &mut config,
            tray_center(Color::White, PieceKind::Knight),
        );
        let drag = input.dragging_piece().unwrap();
        assert_eq!(Color::White, drag.piece.color);

        let request = release(&mut input, &mut config, center(sq(5, 5)));
        assert_eq!(
            Some(Request::Drop {
                color: Color::White,
                kind: PieceKind::Knight,
                to: sq(5, 5)
            }),
            request
        );
    }

    #[test]
    fn select_veto_blocks_the_selection() {
        let board = board_with_pawn_on(sq(7, 7));
        let mut input = Input::new();
        let mut config = Config {
            on_select_piece: Some(Box::new(|_, _| false)),
            ..Config::default()
        };

        press(&mut input, &board, &mut config, center(sq(7, 7)));
        assert_eq!(None, input.active_square());
        assert!(input.dragging_piece().is_none());
    }

    #[test]
    fn deselect_veto_keeps_the_selection() {
        let board = board_with_pawn_on(sq(7, 7));
        let mut input = Input::new();
        let mut config = Config {
            on_deselect_piece: Some(Box::new(|| false)),
            ..Config::default()
        };

        press(&mut input, &board, &mut config, center(sq(7, 7)));
        press(&mut input, &board, &mut config, (900.0, 900.0));
        assert_eq!(Some(sq(7, 7)), input.active_square());
    }

    #[test]
    fn left_press_clears_committed_arrows() {
        let board = Board::new();
        let mut input = Input::new();
        let mut config = Config::default();

        right_press(&mut input, &board, &mut config, center(sq(5, 5)));
        right_release(&mut input, &mut config, center(sq(5, 5)));
        assert_eq!(1, input.arrows().len());

        press(&mut input, &board, &mut config, center(sq(1, 1)));
        assert!(input.arrows().is_empty());
    }

    #[test]
    fn right_press_abandons_the_drag_and_starts_an_arrow() {
        let board = board_with_pawn_on(sq(7, 7));
        let mut input = Input::new();
        let mut config = Config::default();

        press(&mut input, &board, &mut config, center(sq(7, 7)));
        right_press(&mut input, &board, &mut config, center(sq(5, 5)));
        assert!(input.dragging_piece().is_none());
        assert_eq!(None, input.active_square());
        assert!(input.current_arrow().is_some());
    }

    #[test]
    fn right_click_off_board_commits_nothing() {
        let board = Board::new();
        let mut input = Input::new();
        let mut config = Config::default();

        right_press(&mut input, &board, &mut config, (900.0, 900.0));
        assert!(input.current_arrow().is_none());
        right_release(&mut input, &mut config, (900.0, 900.0));
        assert!(input.arrows().is_empty());
    }

    #[test]
    fn arrow_without_an_endpoint_is_discarded() {
        let board = Board::new();
        let mut input = Input::new();
        let mut config = Config::default();

        right_press(&mut input, &board, &mut config, center(sq(5, 5)));
        // Pointer leaves the board mid-draw.
        input.on_mouse_move(900.0, 900.0, &TestLayout);
        assert_eq!(None, input.current_arrow().unwrap().to());
        right_release(&mut input, &mut config, (900.0, 900.0));
        assert!(input.arrows().is_empty());
    }

    #[test]
    fn self_arrow_toggles_off_on_repeat() {
        let board = Board::new();
        let mut input = Input::new();
        let mut config = Config::default();

        right_press(&mut input, &board, &mut config, center(sq(5, 5)));
        right_release(&mut input, &mut config, center(sq(5, 5)));
        assert_eq!(1, input.arrows().len());
        match &input.arrows()[0] {
            Arrow::Square { from, to, .. } => {
                assert_eq!(*from, sq(5, 5));
                assert_eq!(*to, Some(sq(5, 5)));
            }
            other => panic!("expected a square arrow, got {other:?}"),
        }

        right_press(&mut input, &board, &mut config, center(sq(5, 5)));
        right_release(&mut input, &mut config, center(sq(5, 5)));
        assert!(input.arrows().is_empty());
    }

    #[test]
    fn restyled_arrow_replaces_and_thickens() {
        let board = Board::new();
        let mut input = Input::new();
        let mut config = Config {
            alt_arrow_style: Some("red".to_string()),
            ..Config::default()
        };

        right_press(&mut input, &board, &mut config, center(sq(7, 7)));
        input.on_mouse_move(center(sq(3, 3)).0, center(sq(3, 3)).1, &TestLayout);
        right_release(&mut input, &mut config, center(sq(3, 3)));
        assert_eq!(DEFAULT_ARROW_SIZE, input.arrows()[0].size());

        // Same endpoints, Alt held: the old arrow is replaced by a
        // thicker one in the override style.
        input.on_mouse_down(
            center(sq(7, 7)).0,
            center(sq(7, 7)).1,
            Button::Secondary,
            Modifiers { alt: true, ctrl: false },
            &board,
            &TestLayout,
            &mut config,
        );
        input.on_mouse_move(center(sq(3, 3)).0, center(sq(3, 3)).1, &TestLayout);
        right_release(&mut input, &mut config, center(sq(3, 3)));

        assert_eq!(1, input.arrows().len());
        assert_eq!("red", input.arrows()[0].style());
        assert_eq!(DEFAULT_ARROW_SIZE + ARROW_SIZE_STEP, input.arrows()[0].size());
    }

    #[test]
    fn hand_arrow_commits_from_the_tray() {
        let board = Board::new();
        let mut input = Input::new();
        let mut config = Config::default();

        right_press(
            &mut input,
            &board,
            &mut config,
            tray_center(Color::Black, PieceKind::Rook),
        );
        input.on_mouse_move(center(sq(2, 8)).0, center(sq(2, 8)).1, &TestLayout);
        right_release(&mut input, &mut config, center(sq(2, 8)));

        assert_eq!(1, input.arrows().len());
        match &input.arrows()[0] {
            Arrow::Hand { kind, color, to, .. } => {
                assert_eq!(PieceKind::Rook, *kind);
                assert_eq!(Color::Black, *color);
                assert_eq!(Some(sq(2, 8)), *to);
            }
            other => panic!("expected a hand arrow, got {other:?}"),
        }
    }
}
