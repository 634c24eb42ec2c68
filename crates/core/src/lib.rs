//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the game rules and state of a terminal Tetris with a
//! "swap next piece" special ability. It has no dependency on a terminal,
//! which makes it:
//!
//! - **Deterministic**: the same seed produces the same piece sequence
//! - **Testable**: every rule is reachable from plain unit tests
//! - **Portable**: a display and an input source are plugged in from outside
//!
//! # Module Structure
//!
//! - [`pieces`]: the seven 4x4 shapes and the index-arithmetic rotation mapping
//! - [`field`]: 10x17 playfield inside a fixed border, collision and line clearing
//! - [`game_state`]: active/next piece, score, speed, special charges, tick logic
//! - [`rng`]: uniform random piece generation
//! - [`scoring`]: lock/line points, speed progression, special charge meter
//! - [`snapshot`]: read-only frame data for displays
//!
//! # Game Rules
//!
//! - Pieces fall one row every `speed` ticks; speed starts at 60 and drops by
//!   one every 10 locked pieces, down to 10.
//! - A locked piece scores 25; clearing `n` lines with it adds `100 * 2^n`.
//! - Every 1000 points earns a special charge (at most 3); spending one swaps
//!   the falling piece with the next one.
//! - The game ends when a new piece cannot be placed at the spawn position.
//!
//! # Example
//!
//! ```
//! use tetris_cle_core::GameState;
//! use tetris_cle_types::GameAction;
//!
//! let mut game = GameState::new(12345);
//!
//! game.tick(Some(GameAction::MoveRight));
//! game.tick(Some(GameAction::Rotate));
//! game.tick(None);
//!
//! assert_eq!(game.score(), 0);
//! assert!(!game.game_over());
//! ```

pub mod field;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use tetris_cle_types as types;

// Re-export commonly used types for convenience
pub use field::{Field, FullLines};
pub use game_state::{GameState, Tetromino, TickOutcome};
pub use pieces::{filled_cells, rotate_index, rotated_mask};
pub use rng::{PieceGenerator, SimpleRng};
pub use scoring::{line_clear_score, lock_score, SpecialMeter};
pub use snapshot::{ActiveSnapshot, FieldCodes, GameSnapshot};
