//! The board GUI, built with Iced.
//!
//! This file follows the Elm architecture, a Model-View-Update pattern:
//! - `ShogibanApp` is the Model: It holds the entire state of the application.
//! - `Message` is the Update trigger: It defines all possible events that can change the state.
//! - `update` is the Update logic: It processes messages to transition the state.
//! - `view` is the View: It renders the UI based on the current state.

use iced::{
    keyboard, mouse,
    widget::{
        canvas::{self, event, Frame, Path, Program, Stroke},
        text, Button, Column, Container, Row, TextInput,
    },
    Application, Command, Element, Font, Length, Pixels, Point, Rectangle, Renderer, Settings,
    Size, Theme, Vector,
};
use log::warn;
use shogiban::{
    arrow::Arrow,
    config::Config,
    geometry::Geometry as BoardGeometry,
    input::{Button as PointerButton, Modifiers},
    piece::{Color, Piece, PieceKind},
    sfen::START_POSITION,
    square::Square,
    widget::ShogiBoard,
};

use crate::layout::{Layout, CANVAS_HEIGHT, CANVAS_WIDTH, SQ_SIZE};

const KANJI_FONT: Font = Font::with_name("Hiragino Sans");

/// Runs the GUI application.
pub fn run() -> iced::Result {
    ShogibanApp::run(Settings {
        window: iced::window::Settings {
            size: Size::new(CANVAS_WIDTH, CANVAS_HEIGHT + 120.0),
            ..iced::window::Settings::default()
        },
        ..Settings::default()
    })
}

/// Defines the messages that can be sent to the `update` function.
#[derive(Debug, Clone)]
enum Message {
    PointerPressed { x: f32, y: f32, button: PointerButton },
    PointerMoved { x: f32, y: f32 },
    PointerReleased { x: f32, y: f32, button: PointerButton },
    ModifiersChanged(Modifiers),
    SfenInputChanged(String),
    LoadSfen,
    FlipBoard,
}

/// The main application state (the "Model").
struct ShogibanApp {
    widget: ShogiBoard,
    layout: Layout,
    modifiers: Modifiers,
    sfen_input: String,
    board_cache: canvas::Cache,
}

impl Application for ShogibanApp {
    type Executor = iced::executor::Default;
    type Message = Message;
    type Theme = Theme;
    type Flags = ();

    fn new(_flags: ()) -> (Self, Command<Message>) {
        let mut widget = ShogiBoard::new(Config::default());
        // The bundled start position is a constant; it always parses.
        widget
            .set_position(START_POSITION)
            .expect("start position parses");

        let app = ShogibanApp {
            layout: Layout::new(widget.orientation()),
            widget,
            modifiers: Modifiers::default(),
            sfen_input: START_POSITION.to_string(),
            board_cache: canvas::Cache::new(),
        };
        (app, Command::none())
    }

    fn title(&self) -> String {
        String::from("Shogiban")
    }

    fn update(&mut self, message: Message) -> Command<Message> {
        match message {
            Message::PointerPressed { x, y, button } => {
                let changed =
                    self.widget
                        .on_mouse_down(x, y, button, self.modifiers, &self.layout);
                if changed {
                    self.sfen_input = self.widget.position();
                }
                // Selection and arrow state live in the cached layer.
                self.board_cache.clear();
            }
            Message::PointerMoved { x, y } => {
                self.widget.on_mouse_move(x, y, &self.layout);
            }
            Message::PointerReleased { x, y, button } => {
                let changed = self.widget.on_mouse_up(x, y, button, &self.layout);
                if changed {
                    self.sfen_input = self.widget.position();
                }
                self.board_cache.clear();
            }
            Message::ModifiersChanged(mods) => {
                self.modifiers = mods;
            }
            Message::SfenInputChanged(input) => {
                self.sfen_input = input;
            }
            Message::LoadSfen => match self.widget.set_position(&self.sfen_input) {
                Ok(()) => self.board_cache.clear(),
                Err(err) => warn!("rejected position string: {err}"),
            },
            Message::FlipBoard => {
                self.widget.flip_orientation();
                self.layout.orientation = self.widget.orientation();
                self.board_cache.clear();
            }
        }
        Command::none()
    }

    fn view(&'_ self) -> Element<'_, Message> {
        let canvas = canvas::Canvas::new(BoardCanvas {
            widget: &self.widget,
            layout: &self.layout,
            cache: &self.board_cache,
        })
        .width(Length::Fixed(CANVAS_WIDTH))
        .height(Length::Fixed(CANVAS_HEIGHT));

        let controls = Row::new()
            .spacing(10)
            .push(Button::new(text("Flip Board")).on_press(Message::FlipBoard));

        let sfen_controls = Row::new()
            .spacing(10)
            .align_items(iced::Alignment::Center)
            .push(
                TextInput::new("SFEN string...", &self.sfen_input)
                    .on_input(Message::SfenInputChanged)
                    .width(Length::Fill),
            )
            .push(Button::new(text("Load SFEN")).on_press(Message::LoadSfen));

        let content = Column::new()
            .spacing(10)
            .align_items(iced::Alignment::Center)
            .push(canvas)
            .push(controls)
            .push(sfen_controls);

        Container::new(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x()
            .center_y()
            .into()
    }
}

// --- Canvas Drawing Logic ---

struct BoardCanvas<'a> {
    widget: &'a ShogiBoard,
    layout: &'a Layout,
    cache: &'a canvas::Cache,
}

impl Program<Message> for BoardCanvas<'_> {
    type State = ();

    fn update(
        &self,
        _state: &mut Self::State,
        event: event::Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> (event::Status, Option<Message>) {
        match event {
            event::Event::Mouse(mouse::Event::ButtonPressed(button)) => {
                let (Some(pos), Some(button)) = (cursor.position_in(bounds), pointer_button(button))
                else {
                    return (event::Status::Ignored, None);
                };
                (
                    event::Status::Captured,
                    Some(Message::PointerPressed {
                        x: pos.x,
                        y: pos.y,
                        button,
                    }),
                )
            }
            event::Event::Mouse(mouse::Event::ButtonReleased(button)) => {
                let Some(button) = pointer_button(button) else {
                    return (event::Status::Ignored, None);
                };
                // Off-canvas releases still end the gesture.
                let pos = cursor
                    .position_in(bounds)
                    .unwrap_or(Point::new(-1.0, -1.0));
                (
                    event::Status::Captured,
                    Some(Message::PointerReleased {
                        x: pos.x,
                        y: pos.y,
                        button,
                    }),
                )
            }
            event::Event::Mouse(mouse::Event::CursorMoved { .. }) => {
                match cursor.position_in(bounds) {
                    Some(pos) => (
                        event::Status::Captured,
                        Some(Message::PointerMoved { x: pos.x, y: pos.y }),
                    ),
                    None => (event::Status::Ignored, None),
                }
            }
            event::Event::Keyboard(keyboard::Event::ModifiersChanged(mods)) => (
                event::Status::Ignored,
                Some(Message::ModifiersChanged(Modifiers {
                    alt: mods.alt(),
                    ctrl: mods.control(),
                })),
            ),
            _ => (event::Status::Ignored, None),
        }
    }

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<canvas::Geometry> {
        let board_layer = self.cache.draw(renderer, bounds.size(), |frame| {
            self.draw_background(frame);
            self.draw_grid(frame);
            self.draw_labels(frame);
            self.draw_pieces(frame);
            self.draw_hand(frame, Color::Black);
            self.draw_hand(frame, Color::White);
            self.draw_active_square(frame);
            for arrow in self.widget.arrows() {
                self.draw_annotation(frame, arrow, 1.0);
            }
        });

        // Drag and in-progress arrow change every pointer move, so
        // they get a fresh frame instead of the cache.
        let mut overlay = Frame::new(renderer, bounds.size());
        if let Some(arrow) = self.widget.current_arrow() {
            self.draw_annotation(&mut overlay, arrow, 0.6);
        }
        if let Some(drag) = self.widget.dragging_piece() {
            self.draw_glyph(
                &mut overlay,
                &drag.piece,
                Point::new(drag.x, drag.y),
                false,
            );
        }

        vec![board_layer, overlay.into_geometry()]
    }
}

// --- Canvas Drawing Helper Functions ---

impl BoardCanvas<'_> {
    fn draw_background(&self, frame: &mut Frame) {
        let background = Path::rectangle(Point::ORIGIN, frame.size());
        frame.fill(&background, iced::Color::from_rgb8(112, 128, 144));

        let board = self.layout.board_bounds();
        let grid = Path::rectangle(
            Point::new(board.x, board.y),
            Size::new(board.width, board.height),
        );
        frame.fill(&grid, iced::Color::from_rgb8(193, 154, 107));
    }

    fn draw_grid(&self, frame: &mut Frame) {
        let board = self.layout.board_bounds();
        let stroke = Stroke::default()
            .with_width(1.0)
            .with_color(iced::Color::from_rgb8(192, 192, 192));

        for f in 0..=9 {
            let x = board.x + f as f32 * SQ_SIZE;
            let path = Path::line(Point::new(x, board.y), Point::new(x, board.y + board.height));
            frame.stroke(&path, stroke.clone());
        }
        for r in 0..=9 {
            let y = board.y + r as f32 * SQ_SIZE;
            let path = Path::line(Point::new(board.x, y), Point::new(board.x + board.width, y));
            frame.stroke(&path, stroke.clone());
        }
    }

    fn draw_labels(&self, frame: &mut Frame) {
        let board = self.layout.board_bounds();
        for i in 0..9u8 {
            let label = if self.layout.orientation == Color::White {
                8 - i
            } else {
                i
            };

            // Rank letters run down the right edge.
            frame.fill_text(canvas::Text {
                content: char::from(b'a' + label).to_string(),
                position: Point::new(
                    board.x + board.width + 3.0,
                    board.y + SQ_SIZE / 2.0 + i as f32 * SQ_SIZE,
                ),
                color: iced::Color::WHITE,
                size: Pixels(15.0),
                vertical_alignment: iced::alignment::Vertical::Center,
                ..canvas::Text::default()
            });

            // File numbers run across the top, highest file first.
            frame.fill_text(canvas::Text {
                content: (9 - label).to_string(),
                position: Point::new(board.x + SQ_SIZE / 2.0 + i as f32 * SQ_SIZE, 0.0),
                color: iced::Color::WHITE,
                size: Pixels(15.0),
                horizontal_alignment: iced::alignment::Horizontal::Center,
                ..canvas::Text::default()
            });
        }
    }

    fn draw_pieces(&self, frame: &mut Frame) {
        for sq in Square::iter() {
            let Some(piece) = self.widget.board().piece_at(sq) else {
                continue;
            };
            if self
                .widget
                .dragging_piece()
                .is_some()
                && self.widget.active_square() == Some(sq)
            {
                // The dragged piece is drawn at the pointer instead.
                continue;
            }
            let (cx, cy) = self.layout.square_center(sq);
            let inverted = piece.color != self.layout.orientation;
            self.draw_glyph(frame, &piece, Point::new(cx, cy), inverted);
        }
    }

    /// A piece as its kanji glyph, centered on `at`. Opponent pieces
    /// point the other way, so they are drawn rotated by half a turn.
    fn draw_glyph(&self, frame: &mut Frame, piece: &Piece, at: Point, inverted: bool) {
        let color = if piece.promoted {
            iced::Color::from_rgb8(178, 34, 34)
        } else {
            iced::Color::BLACK
        };
        let glyph = canvas::Text {
            content: piece_glyph(piece).to_string(),
            position: Point::ORIGIN,
            color,
            size: Pixels(SQ_SIZE * 0.7),
            font: KANJI_FONT,
            horizontal_alignment: iced::alignment::Horizontal::Center,
            vertical_alignment: iced::alignment::Vertical::Center,
            shaping: iced::widget::text::Shaping::Advanced,
            ..canvas::Text::default()
        };
        frame.with_save(|frame| {
            frame.translate(Vector::new(at.x, at.y));
            if inverted {
                frame.rotate(std::f32::consts::PI);
            }
            frame.fill_text(glyph);
        });
    }

    fn draw_hand(&self, frame: &mut Frame, color: Color) {
        for kind in PieceKind::HAND_KINDS {
            let Some(rect) = self.layout.hand_rect(color, kind) else {
                continue;
            };
            let count = self.widget.board().hand_count(color, kind);
            let alpha = if count == 0 { 0.2 } else { 1.0 };

            let center = Point::new(rect.x + rect.width / 2.0, rect.y + rect.height / 2.0);
            let piece = Piece::new(kind, color);
            frame.with_save(|frame| {
                frame.translate(Vector::new(center.x, center.y));
                if color != self.layout.orientation {
                    frame.rotate(std::f32::consts::PI);
                }
                frame.fill_text(canvas::Text {
                    content: piece_glyph(&piece).to_string(),
                    position: Point::ORIGIN,
                    color: iced::Color::from_rgba(0.0, 0.0, 0.0, alpha),
                    size: Pixels(SQ_SIZE * 0.7),
                    font: KANJI_FONT,
                    horizontal_alignment: iced::alignment::Horizontal::Center,
                    vertical_alignment: iced::alignment::Vertical::Center,
                    shaping: iced::widget::text::Shaping::Advanced,
                    ..canvas::Text::default()
                });
            });

            frame.fill_text(canvas::Text {
                content: count.to_string(),
                position: Point::new(rect.x, rect.y + rect.height),
                color: iced::Color::from_rgba(1.0, 1.0, 1.0, alpha),
                size: Pixels(14.0),
                vertical_alignment: iced::alignment::Vertical::Bottom,
                ..canvas::Text::default()
            });
        }
    }

    fn draw_active_square(&self, frame: &mut Frame) {
        let Some(sq) = self.widget.active_square() else {
            return;
        };
        let (x, y) = self.layout.square_origin(sq);
        let path = Path::rectangle(
            Point::new(x + 4.0, y + 4.0),
            Size::new(SQ_SIZE - 8.0, SQ_SIZE - 8.0),
        );
        frame.stroke(
            &path,
            Stroke::default()
                .with_width(CANVAS_WIDTH / 200.0)
                .with_color(iced::Color::from_rgb(0.0, 1.0, 0.0)),
        );
    }

    fn draw_annotation(&self, frame: &mut Frame, arrow: &Arrow, alpha: f32) {
        let Some(to) = arrow.to() else {
            return;
        };
        let color = scale_alpha(style_color(arrow.style()), alpha);
        let (to_x, to_y) = self.layout.square_center(to);

        match arrow {
            Arrow::Square { from, .. } if *from == to => {
                // A self-arrow marks its square with a ring.
                let ring = Path::circle(Point::new(to_x, to_y), SQ_SIZE / 2.0 - 4.0);
                frame.stroke(
                    &ring,
                    Stroke::default().with_width(arrow.size()).with_color(color),
                );
            }
            Arrow::Square { from, .. } => {
                let (from_x, from_y) = self.layout.square_center(*from);
                draw_arrow_shaft(frame, color, arrow.size(), from_x, from_y, to_x, to_y);
            }
            Arrow::Hand { kind, color: owner, .. } => {
                let Some(rect) = self.layout.hand_rect(*owner, *kind) else {
                    return;
                };
                draw_arrow_shaft(
                    frame,
                    color,
                    arrow.size(),
                    rect.x + rect.width / 2.0,
                    rect.y + rect.height / 2.0,
                    to_x,
                    to_y,
                );
            }
        }
    }
}

/// Shaft plus a triangular head, the head inset so the shaft does
/// not poke through its tip.
fn draw_arrow_shaft(
    frame: &mut Frame,
    color: iced::Color,
    size: f32,
    from_x: f32,
    from_y: f32,
    to_x: f32,
    to_y: f32,
) {
    let mut angle = (to_y - from_y).atan2(to_x - from_x);
    let radius = CANVAS_WIDTH / 40.0;
    let base_x = to_x - radius * angle.cos();
    let base_y = to_y - radius * angle.sin();

    let shaft = Path::line(Point::new(from_x, from_y), Point::new(base_x, base_y));
    frame.stroke(
        &shaft,
        Stroke::default().with_width(size * 2.0).with_color(color),
    );

    let center_x = (to_x + base_x) / 2.0;
    let center_y = (to_y + base_y) / 2.0;
    let head = Path::new(|builder| {
        builder.move_to(Point::new(to_x, to_y));
        angle += 2.0 * std::f32::consts::PI / 3.0;
        builder.line_to(Point::new(
            center_x + radius * angle.cos(),
            center_y + radius * angle.sin(),
        ));
        angle += 2.0 * std::f32::consts::PI / 3.0;
        builder.line_to(Point::new(
            center_x + radius * angle.cos(),
            center_y + radius * angle.sin(),
        ));
        builder.close();
    });
    frame.fill(&head, color);
}

// --- Utility Functions ---

fn pointer_button(button: mouse::Button) -> Option<PointerButton> {
    match button {
        mouse::Button::Left => Some(PointerButton::Primary),
        mouse::Button::Right => Some(PointerButton::Secondary),
        _ => None,
    }
}

fn style_color(style: &str) -> iced::Color {
    match style {
        "red" => iced::Color::from_rgb8(220, 50, 47),
        "green" => iced::Color::from_rgb8(60, 160, 60),
        "orange" => iced::Color::from_rgb8(230, 130, 20),
        "yellow" => iced::Color::from_rgb8(220, 200, 40),
        // "blue" and anything unrecognized.
        _ => iced::Color::from_rgb8(50, 100, 220),
    }
}

fn scale_alpha(color: iced::Color, alpha: f32) -> iced::Color {
    iced::Color {
        a: color.a * alpha,
        ..color
    }
}

fn piece_glyph(piece: &Piece) -> char {
    match (piece.kind, piece.promoted) {
        (PieceKind::Pawn, false) => '歩',
        (PieceKind::Pawn, true) => 'と',
        (PieceKind::Lance, false) => '香',
        (PieceKind::Lance, true) => '杏',
        (PieceKind::Knight, false) => '桂',
        (PieceKind::Knight, true) => '圭',
        (PieceKind::Silver, false) => '銀',
        (PieceKind::Silver, true) => '全',
        (PieceKind::Gold, _) => '金',
        (PieceKind::Bishop, false) => '角',
        (PieceKind::Bishop, true) => '馬',
        (PieceKind::Rook, false) => '飛',
        (PieceKind::Rook, true) => '龍',
        (PieceKind::King, _) => '玉',
    }
}
