//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! Layout, relative to the top-left of a 42x23 window:
//!
//! ```text
//! (2,2)   field frame, 12x18 glyphs
//! (17,2)  Score box, 12x3
//! (17,5)  Next box, 8x7
//! (26,5)  Special box, 9x3
//! (2,20)  key help, two lines
//! ```

use crate::core::GameSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{PieceKind, FIELD_HEIGHT, FIELD_WIDTH};

pub const WINDOW_WIDTH: u16 = 42;
pub const WINDOW_HEIGHT: u16 = 23;

const TITLE: &str = "TETRIS Command Line Edition";
const TITLE_X: u16 = 7;

const FIELD_X: u16 = 2;
const FIELD_Y: u16 = 2;

const SCORE_BOX: BoxRect = BoxRect::new(17, 2, 12, 3);
const NEXT_BOX: BoxRect = BoxRect::new(17, 5, 8, 7);
const SPECIAL_BOX: BoxRect = BoxRect::new(26, 5, 9, 3);

const HELP_Y: u16 = WINDOW_HEIGHT - 3;
const PAUSED_TEXT: &str = " PAUSED!! ";
const PAUSED_X: u16 = 3;

/// Field glyph by display code (0 blank, 1-7 pieces, 8 marked, 9 border).
const FIELD_GLYPHS: [char; 10] = [' ', 'A', 'B', 'C', 'D', 'E', 'F', 'G', '=', '#'];

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

#[derive(Debug, Clone, Copy)]
struct BoxRect {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

impl BoxRect {
    const fn new(x: u16, y: u16, w: u16, h: u16) -> Self {
        Self { x, y, w, h }
    }
}

/// Draws the game window; horizontally centered, vertically per [`AnchorY`].
pub struct GameView {
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        Self {
            anchor_y: AnchorY::Center,
        }
    }
}

impl GameView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Top-left corner of the game window inside `viewport`.
    pub fn origin(&self, viewport: Viewport) -> (u16, u16) {
        let x = viewport.width.saturating_sub(WINDOW_WIDTH) / 2;
        let y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(WINDOW_HEIGHT) / 2,
            AnchorY::Top => 0,
        };
        (x, y)
    }

    /// Render a frame into an existing framebuffer.
    ///
    /// Reusing the framebuffer across frames keeps this allocation-free except
    /// when the viewport changes size.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let (ox, oy) = self.origin(viewport);
        let frame = frame_style();

        fb.draw_box(ox, oy, WINDOW_WIDTH, WINDOW_HEIGHT, "", frame);
        fb.put_str(ox + TITLE_X, oy, TITLE, frame.bold());

        self.draw_field(fb, snap, ox + FIELD_X, oy + FIELD_Y);
        self.draw_active(fb, snap, ox + FIELD_X, oy + FIELD_Y);
        self.draw_score(fb, snap, ox, oy);
        self.draw_next(fb, snap, ox, oy);
        self.draw_special(fb, snap, ox, oy);
        self.draw_help(fb, ox, oy);

        if snap.paused() {
            fb.put_str(ox + PAUSED_X, oy + WINDOW_HEIGHT / 2, PAUSED_TEXT, paused_style());
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_field(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, fx: u16, fy: u16) {
        let plain = CellStyle::default();
        for (y, row) in snap.field.iter().enumerate() {
            for (x, &code) in row.iter().enumerate() {
                let glyph = FIELD_GLYPHS.get(code as usize).copied().unwrap_or('?');
                let style = match piece_from_code(code) {
                    Some(kind) => piece_style(kind),
                    None => plain,
                };
                fb.put_char(fx + x as u16, fy + y as u16, glyph, style);
            }
        }
    }

    fn draw_active(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, fx: u16, fy: u16) {
        let kind = snap.active.kind;
        let style = piece_style(kind);
        for (x, y) in snap.active_cells() {
            if (0..FIELD_WIDTH as i8).contains(&x) && (0..FIELD_HEIGHT as i8).contains(&y) {
                fb.put_char(fx + x as u16, fy + y as u16, kind.glyph(), style);
            }
        }
    }

    fn draw_score(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, ox: u16, oy: u16) {
        let b = SCORE_BOX;
        let (x, y) = (ox + b.x, oy + b.y);
        fb.draw_box(x, y, b.w, b.h, "Score", frame_style());
        fb.put_u32_right(x + b.w - 2, y + 1, snap.score, CellStyle::default());
    }

    fn draw_next(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, ox: u16, oy: u16) {
        let b = NEXT_BOX;
        let (x, y) = (ox + b.x, oy + b.y);
        fb.draw_box(x, y, b.w, b.h, "Next", frame_style());

        let style = piece_style(snap.next);
        for (py, row) in snap.next_mask.iter().enumerate() {
            for (px, &filled) in row.iter().enumerate() {
                if filled {
                    fb.put_char(x + 2 + px as u16, y + 2 + py as u16, snap.next.glyph(), style);
                }
            }
        }
    }

    fn draw_special(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, ox: u16, oy: u16) {
        let b = SPECIAL_BOX;
        let (x, y) = (ox + b.x, oy + b.y);
        fb.draw_box(x, y, b.w, b.h, "Special", frame_style());

        let mark = CellStyle::new(Rgb::YELLOW, Rgb::BLACK).bold();
        for i in 0..u16::from(snap.special.min(3)) {
            fb.put_char(x + 6 - 2 * i, y + 1, '*', mark);
        }
    }

    fn draw_help(&self, fb: &mut FrameBuffer, ox: u16, oy: u16) {
        let style = CellStyle::default();
        let y = oy + HELP_Y;
        fb.put_char(ox + 2, y, '←', style);
        fb.put_char(ox + 4, y, '↓', style);
        fb.put_char(ox + 6, y, '→', style);
        fb.put_str(ox + 8, y, "to move, z to rotate, p to pause,", style);
        fb.put_str(ox + 2, y + 1, "space to use special, q to quit.", style);
    }
}

fn frame_style() -> CellStyle {
    CellStyle::new(Rgb::new(200, 200, 200), Rgb::BLACK)
}

fn paused_style() -> CellStyle {
    CellStyle::new(Rgb::YELLOW, Rgb::BLUE).bold()
}

/// Dark glyph on a per-piece background.
fn piece_style(kind: PieceKind) -> CellStyle {
    let bg = match kind {
        PieceKind::I => Rgb::new(80, 220, 220),
        PieceKind::L => Rgb::new(255, 165, 0),
        PieceKind::J => Rgb::new(80, 120, 220),
        PieceKind::S => Rgb::new(100, 220, 120),
        PieceKind::Z => Rgb::new(220, 80, 80),
        PieceKind::T => Rgb::new(200, 120, 220),
        PieceKind::O => Rgb::new(240, 220, 80),
    };
    CellStyle::new(Rgb::BLACK, bg)
}

fn piece_from_code(code: u8) -> Option<PieceKind> {
    match code {
        1..=7 => PieceKind::from_index(code as usize - 1),
        _ => None,
    }
}
