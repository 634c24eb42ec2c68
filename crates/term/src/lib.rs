//! Terminal "game renderer".
//!
//! A small, game-oriented rendering layer. It renders a [`core::GameSnapshot`]
//! into a framebuffer of styled character cells and flushes the difference to
//! the terminal through crossterm. No widget toolkit is involved.
//!
//! - [`fb`]: framebuffer, styles, text and box primitives
//! - [`game_view`]: pure snapshot-to-framebuffer layout
//! - [`renderer`]: terminal setup/teardown and diff output; implements
//!   [`tetris_cle_engine::Display`]

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tetris_cle_core as core;
pub use tetris_cle_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, Viewport, WINDOW_HEIGHT, WINDOW_WIDTH};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
