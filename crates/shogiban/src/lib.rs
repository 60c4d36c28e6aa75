pub mod arrow;
pub mod board;
pub mod config;
pub mod geometry;
pub mod input;
pub mod piece;
pub mod sfen;
pub mod square;
pub mod widget;
