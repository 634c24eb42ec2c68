//! Field tests - collision, locking and line clearing on the bordered playfield

use tetris_cle::core::Field;
use tetris_cle::types::{
    Cell, FieldCell, PieceKind, Rotation, CODE_BLANK, CODE_BORDER, CODE_MARKED, FIELD_HEIGHT,
    FIELD_WIDTH, INTERIOR_HEIGHT,
};

fn fill_row(field: &mut Field, y: i8, kind: PieceKind) {
    for x in 1..=10 {
        assert!(field.set(x, y, Cell::Occupied(kind)));
    }
}

#[test]
fn test_new_field_is_blank_inside_a_border() {
    let field = Field::new();
    for y in 0..FIELD_HEIGHT as i8 {
        for x in 0..FIELD_WIDTH as i8 {
            let expected = if x == 0 || x == 11 || y == 17 {
                CODE_BORDER
            } else {
                CODE_BLANK
            };
            assert_eq!(field.code(x, y), expected, "cell ({}, {})", x, y);
        }
    }
}

#[test]
fn test_border_cannot_be_written() {
    let mut field = Field::new();
    assert!(!field.set(0, 5, Cell::Occupied(PieceKind::T)));
    assert!(!field.set(11, 5, Cell::Occupied(PieceKind::T)));
    assert!(!field.set(4, 17, Cell::Blank));
    assert!(!field.set(-1, 0, Cell::Occupied(PieceKind::T)));
    assert_eq!(field.get(0, 5), Some(FieldCell::Border));
    assert_eq!(field.get(4, 17), Some(FieldCell::Border));
    assert_eq!(field.get(12, 0), None);
}

#[test]
fn test_o_piece_fits_on_empty_field() {
    let field = Field::new();
    assert!(field.fits(PieceKind::O, Rotation::North, 5, 0));
}

#[test]
fn test_o_piece_blocked_by_any_of_its_cells() {
    // The O piece at (5, 0) covers (6,1), (7,1), (6,2) and (7,2).
    for (bx, by) in [(6, 1), (7, 1), (6, 2), (7, 2)] {
        let mut field = Field::new();
        field.set(bx, by, Cell::Occupied(PieceKind::I));
        assert!(
            !field.fits(PieceKind::O, Rotation::North, 5, 0),
            "block at ({}, {})",
            bx,
            by
        );
    }

    // A block next to it does not matter.
    let mut field = Field::new();
    field.set(8, 1, Cell::Occupied(PieceKind::I));
    assert!(field.fits(PieceKind::O, Rotation::North, 5, 0));
}

#[test]
fn test_piece_may_stick_out_above_the_top() {
    let field = Field::new();
    assert!(field.fits(PieceKind::I, Rotation::North, 4, -2));
}

#[test]
fn test_walls_and_floor_stop_pieces() {
    let field = Field::new();
    // Vertical I sits in column 2 of its box.
    assert!(field.fits(PieceKind::I, Rotation::North, -1, 0));
    assert!(!field.fits(PieceKind::I, Rotation::North, -2, 0));
    assert!(field.fits(PieceKind::I, Rotation::North, 4, 13));
    assert!(!field.fits(PieceKind::I, Rotation::North, 4, 14));
}

#[test]
fn test_lock_never_touches_the_border() {
    let mut field = Field::new();
    // Poke through the left wall and the floor; only interior cells are written.
    field.lock(PieceKind::O, Rotation::North, -1, 15);
    assert_eq!(field.code(0, 16), CODE_BORDER);
    assert_eq!(field.code(0, 17), CODE_BORDER);
    assert_eq!(field.code(1, 17), CODE_BORDER);
    assert_eq!(field.code(1, 16), PieceKind::O.index() as u8 + 1);
}

#[test]
fn test_full_row_detected_and_marked() {
    let mut field = Field::new();
    fill_row(&mut field, 5, PieceKind::L);

    let lines = field.detect_full_lines(2, 6);
    assert!(lines.contains(&5));
    assert_eq!(lines.as_slice(), &[5]);
    for x in 1..=10 {
        assert_eq!(field.code(x, 5), CODE_MARKED);
    }
}

#[test]
fn test_one_blank_column_prevents_detection() {
    let mut field = Field::new();
    fill_row(&mut field, 5, PieceKind::L);
    field.set(7, 5, Cell::Blank);

    assert!(!field.is_row_full(5));
    assert!(field.detect_full_lines(0, 17).is_empty());
    assert_eq!(field.code(1, 5), PieceKind::L.index() as u8 + 1);
}

#[test]
fn test_detect_range_is_clamped() {
    let mut field = Field::new();
    fill_row(&mut field, 16, PieceKind::S);
    let lines = field.detect_full_lines(14, 18);
    assert_eq!(lines.as_slice(), &[16]);
    assert!(field.detect_full_lines(-4, 0).is_empty());
}

#[test]
fn test_clearing_row_shifts_rows_above_down() {
    let mut field = Field::new();
    fill_row(&mut field, 5, PieceKind::T);
    field.set(1, 4, Cell::Occupied(PieceKind::J));
    field.set(1, 0, Cell::Occupied(PieceKind::Z));

    let lines = field.detect_full_lines(5, 6);
    field.clear_marked_lines(&lines);

    assert_eq!(field.code(1, 5), 3);
    assert_eq!(field.code(1, 1), PieceKind::Z.index() as u8 + 1);
    assert_eq!(field.code(1, 0), CODE_BLANK);
    assert!(!field.is_row_full(5));
}

#[test]
fn test_clearing_two_rows_keeps_the_rest_in_order() {
    let mut field = Field::from_rows(&[
        "", "", "", "", "", "", "", "", "", "", "", "", "", "",
        "A.........",
        "BBBBBBBBBB",
        "CCCCCCCCCC",
    ]);
    let lines = field.detect_full_lines(13, 17);
    assert_eq!(lines.as_slice(), &[15, 16]);

    field.clear_marked_lines(&lines);
    assert_eq!(field.code(1, 16), 1);
    assert!(field.row(15).unwrap().iter().all(|c| c.is_blank()));
    assert!((0..INTERIOR_HEIGHT as usize).all(|y| !field.is_row_full(y)));
}

#[test]
fn test_clearing_split_rows_one_at_a_time() {
    let mut rows = vec![""; 13];
    rows.extend(["D.........", "AAAAAAAAAA", "E.........", "AAAAAAAAAA"]);
    let mut field = Field::from_rows(&rows);
    let lines = field.detect_full_lines(13, 17);
    assert_eq!(lines.as_slice(), &[14, 16]);

    field.clear_marked_lines(&lines);
    let column: Vec<u8> = (13..17).map(|y| field.code(1, y)).collect();
    assert_eq!(column, vec![CODE_BLANK, CODE_BLANK, 4, 5]);
    assert!((0..INTERIOR_HEIGHT as usize).all(|y| !field.is_row_full(y)));
}
