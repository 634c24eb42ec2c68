//! Pieces module - tetromino catalog and rotation mapping
//!
//! Every tetromino is stored exactly once, unrotated, as a flat 4x4 grid
//! (row-major, 16 cells). Rotated shapes are never materialized: a rotated
//! cell is read through [`rotate_index`], which maps a cell coordinate of the
//! rotated 4x4 box back to an index of the stored grid.

use arrayvec::ArrayVec;

use crate::types::{PieceKind, Rotation};

/// A tetromino as 16 cells, row-major (`index = y * 4 + x`).
pub type ShapeGrid = [bool; 16];

/// Offset of a filled cell inside the 4x4 bounding box.
pub type CellOffset = (i8, i8);

const fn parse(rows: &[u8; 16]) -> ShapeGrid {
    let mut grid = [false; 16];
    let mut i = 0;
    while i < 16 {
        grid[i] = rows[i] == b'X';
        i += 1;
    }
    grid
}

/// The catalog, indexed by [`PieceKind::index`].
pub const CATALOG: [ShapeGrid; 7] = [
    parse(b"..X...X...X...X."), // I: vertical bar
    parse(b".X...X...XX....."), // L
    parse(b"..X...X..XX....."), // J: inverted L
    parse(b".X...XX...X....."), // S
    parse(b"..X..XX..X......"), // Z
    parse(b"..X..XX...X....."), // T
    parse(b".....XX..XX....."), // O
];

/// Index lookup for each rotation class.
///
/// Row `r` holds, for every cell `py * 4 + px` of the rotated box, the index of
/// the stored grid cell that appears there:
///
/// | class | formula |
/// |-------|---------|
/// | North | `py * 4 + px` |
/// | East  | `12 + py - px * 4` |
/// | South | `15 - py * 4 - px` |
/// | West  | `3 - py + px * 4` |
const ROTATION_TABLE: [[u8; 16]; 4] = [
    [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15],
    [12, 8, 4, 0, 13, 9, 5, 1, 14, 10, 6, 2, 15, 11, 7, 3],
    [15, 14, 13, 12, 11, 10, 9, 8, 7, 6, 5, 4, 3, 2, 1, 0],
    [3, 7, 11, 15, 2, 6, 10, 14, 1, 5, 9, 13, 0, 4, 8, 12],
];

/// Map cell `(px, py)` of a rotated 4x4 box to the flat index of the stored shape.
///
/// `px` and `py` must be in `0..4`. Each rotation class is a permutation of
/// `0..16`, and stepping the rotation by one turns the shape a quarter turn.
#[inline(always)]
pub fn rotate_index(px: usize, py: usize, rotation: Rotation) -> usize {
    debug_assert!(px < 4 && py < 4);
    ROTATION_TABLE[rotation.index()][py * 4 + px] as usize
}

/// The unrotated 4x4 grid for a piece.
pub fn shape_grid(kind: PieceKind) -> &'static ShapeGrid {
    &CATALOG[kind.index()]
}

/// Whether cell `(px, py)` of the rotated piece is filled.
#[inline(always)]
pub fn is_filled(kind: PieceKind, rotation: Rotation, px: usize, py: usize) -> bool {
    shape_grid(kind)[rotate_index(px, py, rotation)]
}

/// The rotated piece as a 4x4 mask, `mask[py][px]`.
pub fn rotated_mask(kind: PieceKind, rotation: Rotation) -> [[bool; 4]; 4] {
    let mut mask = [[false; 4]; 4];
    for (py, row) in mask.iter_mut().enumerate() {
        for (px, cell) in row.iter_mut().enumerate() {
            *cell = is_filled(kind, rotation, px, py);
        }
    }
    mask
}

/// Offsets of the filled cells of a rotated piece, in row-major order.
pub fn filled_cells(kind: PieceKind, rotation: Rotation) -> ArrayVec<CellOffset, 16> {
    let mut out = ArrayVec::new();
    for py in 0..4 {
        for px in 0..4 {
            if is_filled(kind, rotation, px, py) {
                out.push((px as i8, py as i8));
            }
        }
    }
    out
}
