//! Snapshot module - read-only frame data for displays.

use crate::pieces::rotated_mask;
use crate::types::{GameStatus, PieceKind, Rotation, FIELD_HEIGHT, FIELD_WIDTH, SPAWN_X, SPAWN_Y};
use crate::Tetromino;

/// Field display codes for the whole 12x18 frame, `field[y][x]`.
pub type FieldCodes = [[u8; FIELD_WIDTH as usize]; FIELD_HEIGHT as usize];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
    /// Rotated cell mask, `mask[py][px]`
    pub mask: [[bool; 4]; 4],
}

impl From<Tetromino> for ActiveSnapshot {
    fn from(value: Tetromino) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            x: value.x,
            y: value.y,
            mask: value.mask(),
        }
    }
}

/// Everything a display needs to draw one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub field: FieldCodes,
    pub active: ActiveSnapshot,
    pub next: PieceKind,
    /// Unrotated mask of the next piece, `next_mask[py][px]`
    pub next_mask: [[bool; 4]; 4],
    pub status: GameStatus,
    pub score: u32,
    pub speed: u32,
    pub special: u8,
    pub pieces_locked: u32,
    pub pending_lines: u8,
}

impl GameSnapshot {
    pub fn paused(&self) -> bool {
        self.status == GameStatus::Paused
    }

    pub fn game_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }

    /// Iterate the field cells covered by the active piece.
    pub fn active_cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        let a = &self.active;
        (0..4).flat_map(move |py| {
            (0..4).filter_map(move |px| {
                a.mask[py][px].then_some((a.x + px as i8, a.y + py as i8))
            })
        })
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let active = Tetromino {
            kind: PieceKind::I,
            rotation: Rotation::North,
            x: SPAWN_X,
            y: SPAWN_Y,
        };
        Self {
            field: [[0u8; FIELD_WIDTH as usize]; FIELD_HEIGHT as usize],
            active: ActiveSnapshot::from(active),
            next: PieceKind::I,
            next_mask: rotated_mask(PieceKind::I, Rotation::North),
            status: GameStatus::Playing,
            score: 0,
            speed: 0,
            special: 0,
            pieces_locked: 0,
            pending_lines: 0,
        }
    }
}
