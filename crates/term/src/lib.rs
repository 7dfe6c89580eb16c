//! Terminal rendering for the match-3 game.
//!
//! A small, game-oriented rendering layer: views draw into a plain
//! framebuffer, and the renderer flushes framebuffers to the terminal.
//!
//! - Views stay pure and testable; only [`TerminalRenderer`] does I/O
//! - Cells are two terminal columns wide to offset the glyph aspect ratio

pub mod board_view;
pub mod fb;
pub mod renderer;

pub use tui_match3_core as core;
pub use tui_match3_engine as engine;
pub use tui_match3_types as types;

pub use board_view::{tile_color, BoardView, Viewport};
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
