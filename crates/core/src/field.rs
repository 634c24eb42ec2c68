//! Field module - the playfield grid
//!
//! The field is addressed in a 12x18 frame whose outer ring (left column,
//! right column, bottom row) is the border. Only the 10x17 interior is stored;
//! border coordinates are answered by bounds checks and can never be written.
//! Coordinates are (x, y) with x growing to the right and y growing downwards.

use arrayvec::ArrayVec;

use crate::pieces::is_filled;
use crate::types::{
    Cell, FieldCell, PieceKind, Rotation, FIELD_HEIGHT, FIELD_WIDTH, INTERIOR_HEIGHT,
    INTERIOR_WIDTH,
};

/// Total number of stored (interior) cells
const INTERIOR_SIZE: usize = (INTERIOR_WIDTH as usize) * (INTERIOR_HEIGHT as usize);

/// Full rows found by one detection pass. A piece spans at most four rows.
pub type FullLines = ArrayVec<usize, 4>;

/// The playfield: a 10x17 interior inside a fixed border.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// Interior cells, row-major (`y * INTERIOR_WIDTH + (x - 1)`)
    cells: [Cell; INTERIOR_SIZE],
}

impl Field {
    /// Create a new field with a blank interior
    pub fn new() -> Self {
        Self {
            cells: [Cell::Blank; INTERIOR_SIZE],
        }
    }

    /// Whether (x, y) lies inside the 12x18 frame
    #[inline(always)]
    pub fn in_bounds(x: i8, y: i8) -> bool {
        x >= 0 && x < FIELD_WIDTH as i8 && y >= 0 && y < FIELD_HEIGHT as i8
    }

    /// Whether (x, y) is a border coordinate
    #[inline(always)]
    pub fn is_border(x: i8, y: i8) -> bool {
        Self::in_bounds(x, y)
            && (x == 0 || x == FIELD_WIDTH as i8 - 1 || y == FIELD_HEIGHT as i8 - 1)
    }

    /// Flat index of an interior coordinate
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if !Self::in_bounds(x, y) || Self::is_border(x, y) {
            return None;
        }
        Some((y as usize) * (INTERIOR_WIDTH as usize) + (x as usize - 1))
    }

    pub fn width(&self) -> u8 {
        FIELD_WIDTH
    }

    pub fn height(&self) -> u8 {
        FIELD_HEIGHT
    }

    /// Get the content at (x, y).
    /// Returns None outside the 12x18 frame.
    pub fn get(&self, x: i8, y: i8) -> Option<FieldCell> {
        if !Self::in_bounds(x, y) {
            return None;
        }
        match Self::index(x, y) {
            Some(idx) => Some(FieldCell::Interior(self.cells[idx])),
            None => Some(FieldCell::Border),
        }
    }

    /// Set an interior cell.
    /// Returns false for border or out-of-frame coordinates (nothing is written).
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Display code (0-9) at (x, y); out-of-frame reads as blank
    pub fn code(&self, x: i8, y: i8) -> u8 {
        self.get(x, y).map(FieldCell::code).unwrap_or(0)
    }

    /// Check whether a piece can occupy the given placement.
    ///
    /// Only filled cells that land inside the frame are checked, so a piece may
    /// poke out above the top row. Border cells count as occupied, which keeps
    /// pieces between the walls and above the floor.
    pub fn fits(&self, kind: PieceKind, rotation: Rotation, x: i8, y: i8) -> bool {
        for py in 0..4 {
            for px in 0..4 {
                if !is_filled(kind, rotation, px, py) {
                    continue;
                }
                let fx = x + px as i8;
                let fy = y + py as i8;
                if let Some(cell) = self.get(fx, fy) {
                    if !cell.is_blank() {
                        return false;
                    }
                }
            }
        }
        true
    }

    /// Write a piece into the field.
    ///
    /// No collision check: callers lock only placements that [`Field::fits`]
    /// accepted. Cells over the border or outside the frame are dropped.
    pub fn lock(&mut self, kind: PieceKind, rotation: Rotation, x: i8, y: i8) {
        for py in 0..4 {
            for px in 0..4 {
                if is_filled(kind, rotation, px, py) {
                    self.set(x + px as i8, y + py as i8, Cell::Occupied(kind));
                }
            }
        }
    }

    /// Check if an interior row has no blank cell
    pub fn is_row_full(&self, y: usize) -> bool {
        match self.row(y) {
            Some(row) => row.iter().all(|cell| !cell.is_blank()),
            None => false,
        }
    }

    /// Mark full rows in `from_y..to_y` for clearing.
    ///
    /// The range is clamped to interior rows. Each full row has all of its
    /// interior cells replaced by [`Cell::MarkedForClear`]; the row indices are
    /// returned in ascending order. Scanning stops after four rows, the most a
    /// single piece can complete.
    pub fn detect_full_lines(&mut self, from_y: i8, to_y: i8) -> FullLines {
        let mut lines = FullLines::new();
        let from = from_y.max(0) as usize;
        let to = (to_y.max(0) as usize).min(INTERIOR_HEIGHT as usize);

        for y in from..to {
            if lines.is_full() {
                break;
            }
            if !self.is_row_full(y) {
                continue;
            }
            if let Some(row) = self.row_mut(y) {
                row.fill(Cell::MarkedForClear);
            }
            lines.push(y);
        }

        lines
    }

    /// Remove rows, one at a time, in the given order.
    ///
    /// Each removal shifts every interior row above it down by one and blanks
    /// the top row, operating on the field as left by the previous removal.
    pub fn clear_marked_lines(&mut self, rows: &[usize]) {
        for &y in rows {
            self.remove_row(y);
        }
    }

    /// Remove one interior row and shift the rows above it down.
    fn remove_row(&mut self, y: usize) {
        if y >= INTERIOR_HEIGHT as usize {
            return;
        }

        let width = INTERIOR_WIDTH as usize;

        // copy_within handles the overlapping ranges
        for row in (1..=y).rev() {
            let src_start = (row - 1) * width;
            let dst_start = row * width;
            self.cells.copy_within(src_start..src_start + width, dst_start);
        }

        self.cells[..width].fill(Cell::Blank);
    }

    /// Interior cells of row y
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= INTERIOR_HEIGHT as usize {
            return None;
        }
        let start = y * INTERIOR_WIDTH as usize;
        Some(&self.cells[start..start + INTERIOR_WIDTH as usize])
    }

    fn row_mut(&mut self, y: usize) -> Option<&mut [Cell]> {
        if y >= INTERIOR_HEIGHT as usize {
            return None;
        }
        let start = y * INTERIOR_WIDTH as usize;
        Some(&mut self.cells[start..start + INTERIOR_WIDTH as usize])
    }

    /// Write the display codes of the whole 12x18 frame, border included.
    pub fn write_codes(&self, out: &mut [[u8; FIELD_WIDTH as usize]; FIELD_HEIGHT as usize]) {
        for (y, row) in out.iter_mut().enumerate() {
            for (x, code) in row.iter_mut().enumerate() {
                *code = self.code(x as i8, y as i8);
            }
        }
    }

    /// Build a field from picture rows, one string per interior row from the top.
    ///
    /// Each string holds 10 characters: `.` is blank, `#` or `=` is marked,
    /// and a piece letter (`A`-`G`, as drawn on screen) is an occupied cell.
    /// Missing rows and characters are blank.
    pub fn from_rows(rows: &[&str]) -> Self {
        let mut field = Self::new();
        for (y, row) in rows.iter().enumerate().take(INTERIOR_HEIGHT as usize) {
            for (i, ch) in row.chars().enumerate().take(INTERIOR_WIDTH as usize) {
                let cell = match ch {
                    'A'..='G' => PieceKind::from_index((ch as u8 - b'A') as usize)
                        .map(Cell::Occupied)
                        .unwrap_or(Cell::Blank),
                    '#' | '=' => Cell::MarkedForClear,
                    _ => Cell::Blank,
                };
                field.set(i as i8 + 1, y as i8, cell);
            }
        }
        field
    }
}

impl Default for Field {
    fn default() -> Self {
        Self::new()
    }
}
