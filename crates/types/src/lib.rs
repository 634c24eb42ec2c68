//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, terminal rendering, input mapping).
//!
//! # Field Dimensions
//!
//! The playfield is addressed in a 12x18 frame that includes its border:
//!
//! - **Interior width**: 10 columns (x = 1..=10)
//! - **Interior height**: 17 rows (y = 0..=16)
//! - **Border**: column 0, column 11 and row 17
//! - **Spawn position**: (`FIELD_WIDTH / 2 - 2`, 0) = (4, 0)
//!
//! # Game Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed tick period (~60 FPS) |
//! | `LINE_CLEAR_WAIT_MS` | 400 | Hold after marking full lines |
//! | `INITIAL_SPEED` | 60 | Ticks per forced descent at start |
//! | `MIN_SPEED` | 10 | Speed floor |
//! | `PIECES_PER_SPEEDUP` | 10 | Locked pieces between speed steps |
//!
//! # Examples
//!
//! ```
//! use tetris_cle_types::{PieceKind, Rotation, FIELD_HEIGHT, FIELD_WIDTH};
//!
//! let piece = PieceKind::from_index(6).unwrap();
//! assert_eq!(piece, PieceKind::O);
//! assert_eq!(piece.glyph(), 'G');
//!
//! assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
//! assert_eq!(Rotation::from_index(5), Rotation::East);
//!
//! assert_eq!(FIELD_WIDTH, 12);
//! assert_eq!(FIELD_HEIGHT, 18);
//! ```

/// Full field width including the two border columns.
pub const FIELD_WIDTH: u8 = 12;

/// Full field height including the bottom border row.
pub const FIELD_HEIGHT: u8 = 18;

/// Playable columns (x = 1..=10).
pub const INTERIOR_WIDTH: u8 = FIELD_WIDTH - 2;

/// Playable rows (y = 0..=16).
pub const INTERIOR_HEIGHT: u8 = FIELD_HEIGHT - 1;

/// Column where new pieces spawn (top-left of their 4x4 box).
pub const SPAWN_X: i8 = (FIELD_WIDTH / 2) as i8 - 2;

/// Row where new pieces spawn.
pub const SPAWN_Y: i8 = 0;

/// Fixed tick period in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// How long marked lines stay on screen before they are removed.
pub const LINE_CLEAR_WAIT_MS: u32 = 400;

/// Ticks per forced descent at the start of a game.
pub const INITIAL_SPEED: u32 = 60;

/// Fastest possible speed (ticks per forced descent).
pub const MIN_SPEED: u32 = 10;

/// Every this many locked pieces, speed drops by one tick.
pub const PIECES_PER_SPEEDUP: u32 = 10;

/// Points awarded for every locked piece.
pub const LOCK_SCORE: u32 = 25;

/// Base of the line clear bonus: `LINE_CLEAR_BASE << lines`.
pub const LINE_CLEAR_BASE: u32 = 100;

/// Score distance between two special charges.
pub const SPECIAL_SCORE_STEP: u32 = 1000;

/// Maximum number of banked special charges.
pub const MAX_SPECIAL: u8 = 3;

/// Display code of a blank cell.
pub const CODE_BLANK: u8 = 0;

/// Display code of a row marked for clearing.
pub const CODE_MARKED: u8 = 8;

/// Display code of a border cell.
pub const CODE_BORDER: u8 = 9;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_geometry() {
        assert_eq!(INTERIOR_WIDTH, 10);
        assert_eq!(INTERIOR_HEIGHT, 17);
        assert_eq!(SPAWN_X, 4);
    }

    #[test]
    fn cell_codes_cover_the_display_range() {
        assert_eq!(Cell::Blank.code(), CODE_BLANK);
        assert_eq!(Cell::Occupied(PieceKind::I).code(), 1);
        assert_eq!(Cell::Occupied(PieceKind::O).code(), 7);
        assert_eq!(Cell::MarkedForClear.code(), CODE_MARKED);
        assert_eq!(FieldCell::Border.code(), CODE_BORDER);
    }

    #[test]
    fn piece_index_roundtrip() {
        for (i, kind) in PieceKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
            assert_eq!(PieceKind::from_index(i), Some(*kind));
        }
        assert_eq!(PieceKind::from_index(7), None);
    }

    #[test]
    fn piece_names_and_glyphs() {
        let names: Vec<_> = PieceKind::ALL.iter().map(|k| k.as_str()).collect();
        assert_eq!(names, ["i", "l", "j", "s", "z", "t", "o"]);
        let glyphs: String = PieceKind::ALL.iter().map(|k| k.glyph()).collect();
        assert_eq!(glyphs, "ABCDEFG");
    }

    #[test]
    fn rotation_wraps_modulo_four() {
        assert_eq!(Rotation::from_index(0), Rotation::North);
        assert_eq!(Rotation::from_index(3), Rotation::West);
        assert_eq!(Rotation::from_index(4), Rotation::North);
        assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
    }
}

/// The seven tetromino piece kinds, in catalog order.
///
/// The index (0-6) is the identity used by the field and the display:
/// a locked cell stores `index + 1`, and the glyph is `'A' + index`.
///
/// - **I**: vertical bar
/// - **L**: L shape
/// - **J**: inverted L
/// - **S**: S shape
/// - **Z**: Z shape
/// - **T**: T shape
/// - **O**: 2x2 square
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    L,
    J,
    S,
    Z,
    T,
    O,
}

impl PieceKind {
    /// All kinds in catalog order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::L,
        PieceKind::J,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::T,
        PieceKind::O,
    ];

    /// Catalog index (0-6).
    pub fn index(self) -> usize {
        self as usize
    }

    /// Look up a kind by catalog index.
    ///
    /// # Examples
    ///
    /// ```
    /// use tetris_cle_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_index(0), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_index(5), Some(PieceKind::T));
    /// assert_eq!(PieceKind::from_index(9), None);
    /// ```
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Letter drawn for this piece (`'A'` for index 0 up to `'G'`).
    pub fn glyph(self) -> char {
        (b'A' + self as u8) as char
    }

    /// Lowercase name used in log fields.
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::L => "l",
            PieceKind::J => "j",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::T => "t",
            PieceKind::O => "o",
        }
    }
}

/// Rotation classes, one quarter turn apart.
///
/// - **North**: spawn orientation (0°)
/// - **East**: 90°
/// - **South**: 180°
/// - **West**: 270°
///
/// Only the active piece carries a rotation; shapes themselves are never rotated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Rotation for an arbitrary counter value, taken modulo 4.
    pub fn from_index(r: usize) -> Self {
        match r % 4 {
            0 => Rotation::North,
            1 => Rotation::East,
            2 => Rotation::South,
            _ => Rotation::West,
        }
    }

    /// Rotation class as 0-3.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Rotate clockwise (90°)
    ///
    /// # Examples
    ///
    /// ```
    /// use tetris_cle_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
    /// assert_eq!(Rotation::East.rotate_cw(), Rotation::South);
    /// assert_eq!(Rotation::South.rotate_cw(), Rotation::West);
    /// assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        Self::from_index(self.index() + 1)
    }
}

/// Content of one interior field cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Blank,
    Occupied(PieceKind),
    /// Part of a full row waiting to be removed.
    MarkedForClear,
}

impl Cell {
    pub fn is_blank(self) -> bool {
        matches!(self, Cell::Blank)
    }

    /// Numeric display code: 0 blank, 1-7 piece index + 1, 8 marked.
    pub fn code(self) -> u8 {
        match self {
            Cell::Blank => CODE_BLANK,
            Cell::Occupied(kind) => kind.index() as u8 + 1,
            Cell::MarkedForClear => CODE_MARKED,
        }
    }
}

/// What a field coordinate inside the 12x18 frame holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldCell {
    Interior(Cell),
    Border,
}

impl FieldCell {
    /// Anything other than a blank interior cell blocks a piece.
    pub fn is_blank(self) -> bool {
        matches!(self, FieldCell::Interior(Cell::Blank))
    }

    pub fn code(self) -> u8 {
        match self {
            FieldCell::Interior(cell) => cell.code(),
            FieldCell::Border => CODE_BORDER,
        }
    }
}

/// Game actions produced by the input layer.
///
/// One action (or none) is fed to the game every tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down
    SoftDrop,
    /// Rotate piece a quarter turn (edge-triggered)
    Rotate,
    /// Spend a special charge to swap the active and next piece
    Special,
    /// Toggle pause state (edge-triggered)
    Pause,
    /// End the game
    Quit,
}

/// Events an input source can report for a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Action(GameAction),
    /// The terminal changed size; the next frame must be redrawn in full.
    Resize { width: u16, height: u16 },
}

/// Lifecycle state of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    Playing,
    Paused,
    /// Terminal state.
    GameOver,
}

/// Core-side event emitted after a piece locks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoreLastEvent {
    pub kind: PieceKind,
    pub lines_cleared: u32,
    /// Points gained by this lock (lock bonus plus line bonus).
    pub score_gained: u32,
    pub special_gained: u8,
    pub speed: u32,
}
