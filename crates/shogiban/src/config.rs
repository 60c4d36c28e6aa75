//! Configuration for the board widget.

use crate::arrow::DEFAULT_ARROW_STYLE;
use crate::input::Modifiers;
use crate::piece::{Color, Piece};
use crate::square::Square;

/// Returns false to veto the move.
pub type MoveCallback = Box<dyn FnMut(Square, Square) -> bool>;
/// Returns false to veto selecting the piece.
pub type SelectCallback = Box<dyn FnMut(&Piece, Square) -> bool>;
/// Returns false to keep the current selection.
pub type DeselectCallback = Box<dyn FnMut() -> bool>;

pub struct Config {
    /// Which color faces the viewer.
    pub orientation: Color,
    pub on_move_piece: Option<MoveCallback>,
    pub on_select_piece: Option<SelectCallback>,
    pub on_deselect_piece: Option<DeselectCallback>,
    /// Style name for annotation arrows, and the overrides applied
    /// while Alt or Ctrl is held during the right-click.
    pub arrow_style: String,
    pub alt_arrow_style: Option<String>,
    pub ctrl_arrow_style: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            orientation: Color::Black,
            on_move_piece: None,
            on_select_piece: None,
            on_deselect_piece: None,
            arrow_style: DEFAULT_ARROW_STYLE.to_string(),
            alt_arrow_style: None,
            ctrl_arrow_style: None,
        }
    }
}

impl Config {
    /// The arrow style for a right-click with the given modifiers.
    /// Ctrl wins over Alt when both are held and configured.
    pub fn arrow_style_for(&self, mods: Modifiers) -> String {
        if mods.ctrl {
            if let Some(style) = &self.ctrl_arrow_style {
                return style.clone();
            }
        }
        if mods.alt {
            if let Some(style) = &self.alt_arrow_style {
                return style.clone();
            }
        }
        self.arrow_style.clone()
    }
}
