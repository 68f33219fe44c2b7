//! TerminalRenderer: flushes a framebuffer to a real terminal.
//!
//! Output is row-granular. A row is rewritten in full when it differs from
//! the last frame drawn; unchanged rows are skipped. A resize or an
//! invalidated renderer rewrites every row.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    style::{Attribute, Color, Colors, Print, SetAttribute, SetColors},
    terminal, QueueableCommand,
};

use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};

pub struct TerminalRenderer {
    out: io::Stdout,
    last: Option<FrameBuffer>,
    buf: Vec<u8>,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            out: io::stdout(),
            last: None,
            buf: Vec::with_capacity(16 * 1024),
        }
    }

    /// Raw mode, alternate screen, hidden cursor, mouse clicks reported.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(terminal::Clear(terminal::ClearType::All))?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(EnableMouseCapture)?;
        self.write_out()
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(DisableMouseCapture)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.write_out()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Forget the last frame so the next draw rewrites every row.
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Draw `fb`, then swap it with the previous frame.
    ///
    /// On return `fb` holds stale contents the caller overwrites next pass;
    /// keeping the two buffers alive avoids a clone per frame.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        let mut prev = match self.last.take() {
            Some(prev) if prev.width() == fb.width() && prev.height() == fb.height() => Some(prev),
            _ => None,
        };

        self.buf.clear();
        encode_rows_into(prev.as_ref(), fb, &mut self.buf)?;
        if !self.buf.is_empty() {
            self.write_out()?;
        }

        let mut spare = prev.take().unwrap_or_else(|| FrameBuffer::new(fb.width(), fb.height()));
        std::mem::swap(&mut spare, fb);
        self.last = Some(spare);
        Ok(())
    }

    fn write_out(&mut self) -> Result<()> {
        self.out.write_all(&self.buf)?;
        self.out.flush()?;
        Ok(())
    }
}

/// Rows of `next` that need writing: all of them without a comparable
/// previous frame, otherwise those that differ.
pub fn dirty_rows<'a>(
    prev: Option<&'a FrameBuffer>,
    next: &'a FrameBuffer,
) -> impl Iterator<Item = u16> + 'a {
    (0..next.height()).filter(move |&y| match prev {
        Some(prev) => prev.row(y) != next.row(y),
        None => true,
    })
}

/// Queue the commands that bring the screen from `prev` to `next`.
///
/// Writes nothing when no row changed.
pub fn encode_rows_into(
    prev: Option<&FrameBuffer>,
    next: &FrameBuffer,
    out: &mut Vec<u8>,
) -> Result<()> {
    // Style is unknown at the start of every batch.
    let mut pen: Option<CellStyle> = None;
    let mut wrote = false;

    for y in dirty_rows(prev, next) {
        out.queue(cursor::MoveTo(0, y))?;
        for cell in next.row(y) {
            put_cell(out, &mut pen, cell)?;
        }
        wrote = true;
    }

    if wrote {
        out.queue(SetAttribute(Attribute::Reset))?;
    }
    Ok(())
}

fn put_cell(out: &mut Vec<u8>, pen: &mut Option<CellStyle>, cell: &Cell) -> Result<()> {
    let style = cell.style;
    let prev = *pen;

    // Bold and dim share one intensity reset.
    let intensity_changed = prev.map_or(true, |p| p.bold != style.bold || p.dim != style.dim);
    if intensity_changed {
        out.queue(SetAttribute(Attribute::NormalIntensity))?;
        if style.bold {
            out.queue(SetAttribute(Attribute::Bold))?;
        }
        if style.dim {
            out.queue(SetAttribute(Attribute::Dim))?;
        }
    }
    if intensity_changed || prev.map_or(true, |p| p.fg != style.fg || p.bg != style.bg) {
        out.queue(SetColors(Colors::new(term_color(style.fg), term_color(style.bg))))?;
    }

    *pen = Some(style);
    out.queue(Print(cell.ch))?;
    Ok(())
}

fn term_color(c: Rgb) -> Color {
    Color::Rgb {
        r: c.r,
        g: c.g,
        b: c.b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_of(out: &[u8]) -> String {
        String::from_utf8_lossy(out).into_owned()
    }

    #[test]
    fn first_frame_writes_every_row() {
        let mut fb = FrameBuffer::new(8, 3);
        fb.put_str(0, 2, "Score: 7", CellStyle::default());
        assert_eq!(dirty_rows(None, &fb).collect::<Vec<_>>(), vec![0, 1, 2]);

        let mut out = Vec::new();
        encode_rows_into(None, &fb, &mut out).unwrap();
        assert!(text_of(&out).contains("Score: 7"));
    }

    #[test]
    fn only_changed_rows_are_dirty() {
        let prev = FrameBuffer::new(5, 4);
        let mut next = prev.clone();
        next.put_char(3, 1, '●', CellStyle::default());
        next.put_char(0, 3, 'x', CellStyle::default());
        assert_eq!(dirty_rows(Some(&prev), &next).collect::<Vec<_>>(), vec![1, 3]);
    }

    #[test]
    fn style_only_change_marks_row_dirty() {
        let prev = FrameBuffer::new(3, 2);
        let mut next = prev.clone();
        let bold = CellStyle {
            bold: true,
            ..CellStyle::default()
        };
        next.put_char(1, 0, ' ', bold);
        assert_eq!(dirty_rows(Some(&prev), &next).collect::<Vec<_>>(), vec![0]);
    }

    #[test]
    fn identical_frames_write_nothing() {
        let fb = FrameBuffer::new(4, 4);
        let mut out = Vec::new();
        encode_rows_into(Some(&fb), &fb.clone(), &mut out).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn style_is_emitted_once_per_run() {
        let mut fb = FrameBuffer::new(6, 1);
        let red = CellStyle::fg(Rgb::new(255, 0, 0), Rgb::new(0, 0, 0));
        fb.put_str(0, 0, "abc", red);

        let mut runs = Vec::new();
        encode_rows_into(None, &fb, &mut runs).unwrap();
        let text = text_of(&runs);
        assert!(text.contains("abc"), "same-style cells print back to back");
        assert_eq!(text.matches("38;2;255;0;0").count(), 1);
    }
}
