//! Terminal input (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`] and provides
//! [`KeyPoller`], a non-blocking [`tetris_cle_engine::InputSource`] that hands
//! the game at most one key per tick.

pub mod map;
pub mod poller;

pub use tetris_cle_types as types;

pub use map::{handle_key_event, should_quit};
pub use poller::{KeyPoller, LatestEvent};
