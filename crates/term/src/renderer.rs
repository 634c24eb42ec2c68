//! TerminalRenderer: flushes frames to a real terminal.
//!
//! Frames are rendered into a reusable framebuffer and only the cells that
//! changed since the previous frame are written out.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};
use tetris_cle_engine::Display;

use crate::core::GameSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::game_view::{GameView, Viewport, WINDOW_HEIGHT, WINDOW_WIDTH};

/// Where the viewport size comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SizeSource {
    Terminal,
    Fixed(Viewport),
}

pub struct TerminalRenderer<W: Write = io::Stdout> {
    out: W,
    view: GameView,
    size: SizeSource,
    /// Frame being drawn.
    frame: FrameBuffer,
    /// Frame currently on screen; `None` forces a full redraw.
    last: Option<FrameBuffer>,
    buf: Vec<u8>,
}

impl TerminalRenderer<io::Stdout> {
    pub fn new() -> Self {
        Self::with_writer(io::stdout(), None)
    }
}

impl Default for TerminalRenderer<io::Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> TerminalRenderer<W> {
    /// Render to `out`. With `viewport` set the terminal is never queried.
    pub fn with_writer(out: W, viewport: Option<Viewport>) -> Self {
        Self {
            out,
            view: GameView::default(),
            size: viewport.map_or(SizeSource::Terminal, SizeSource::Fixed),
            frame: FrameBuffer::new(0, 0),
            last: None,
            buf: Vec::with_capacity(16 * 1024),
        }
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()?;
        self.last = None;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    fn viewport(&self) -> Viewport {
        match self.size {
            SizeSource::Fixed(v) => v,
            SizeSource::Terminal => terminal::size()
                .map(|(w, h)| Viewport::new(w, h))
                .unwrap_or(Viewport::new(WINDOW_WIDTH, WINDOW_HEIGHT)),
        }
    }

    /// Render `snap` and write the difference to the previous frame.
    pub fn draw(&mut self, snap: &GameSnapshot) -> Result<()> {
        let viewport = self.viewport();
        self.view.render_into(snap, viewport, &mut self.frame);

        self.buf.clear();
        match self.last.take() {
            Some(mut prev)
                if prev.width() == self.frame.width() && prev.height() == self.frame.height() =>
            {
                encode_diff_into(&prev, &self.frame, &mut self.buf)?;
                // The old screen becomes next tick's scratch buffer.
                std::mem::swap(&mut prev, &mut self.frame);
                self.last = Some(prev);
            }
            _ => {
                encode_full_into(&self.frame, &mut self.buf)?;
                let shown = std::mem::replace(&mut self.frame, FrameBuffer::new(0, 0));
                self.last = Some(shown);
            }
        }
        self.flush_buf()
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.out.write_all(&self.buf)?;
        self.out.flush()?;
        Ok(())
    }
}

impl<W: Write> Display for TerminalRenderer<W> {
    fn present(&mut self, snapshot: &GameSnapshot) -> Result<()> {
        self.draw(snapshot)
    }

    fn invalidate(&mut self) {
        self.last = None;
    }
}

/// Encode a full-frame redraw into `out`.
///
/// This builds a sequence of crossterm commands without writing to stdout.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let mut current_style: Option<CellStyle> = None;
    for y in 0..fb.height() {
        out.queue(cursor::MoveTo(0, y))?;
        for x in 0..fb.width() {
            let cell = fb.get(x, y).unwrap_or_default();
            if current_style != Some(cell.style) {
                apply_style_into(out, cell.style)?;
                current_style = Some(cell.style);
            }
            out.queue(Print(cell.ch))?;
        }
    }

    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

/// Encode a diff redraw (changed runs) into `out`.
///
/// Both frames must have the same size.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let mut current_style: Option<CellStyle> = None;
    let mut any = false;

    for_each_changed_run(prev, next, |x, y, len| {
        any = true;
        out.queue(cursor::MoveTo(x, y))?;
        for dx in 0..len {
            let cell = next.get(x + dx, y).unwrap_or_default();
            if current_style != Some(cell.style) {
                apply_style_into(out, cell.style)?;
                current_style = Some(cell.style);
            }
            out.queue(Print(cell.ch))?;
        }
        Ok(())
    })?;

    if any {
        out.queue(ResetColor)?;
        out.queue(SetAttribute(Attribute::Reset))?;
    }
    Ok(())
}

fn apply_style_into(out: &mut Vec<u8>, style: CellStyle) -> Result<()> {
    out.queue(SetAttribute(Attribute::Reset))?;
    out.queue(SetForegroundColor(rgb_to_color(style.fg)))?;
    out.queue(SetBackgroundColor(rgb_to_color(style.bg)))?;
    if style.bold {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    Ok(())
}

fn rgb_to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

fn for_each_changed_run(
    prev: &FrameBuffer,
    next: &FrameBuffer,
    mut f: impl FnMut(u16, u16, u16) -> Result<()>,
) -> Result<()> {
    let w = next.width();
    for y in 0..next.height() {
        let mut x = 0;
        while x < w {
            if prev.get(x, y) == next.get(x, y) {
                x += 1;
                continue;
            }
            let start = x;
            x += 1;
            while x < w && prev.get(x, y) != next.get(x, y) {
                x += 1;
            }
            f(start, y, x - start)?;
        }
    }
    Ok(())
}
