//! Differential renderer for fullscreen mode.
//!
//! The DiffRenderer compares the current frame to the previous frame and only
//! outputs cells that have changed.
//!
//! # Algorithm
//!
//! 1. Wrap output in a synchronized update
//! 2. For each cell in the new frame:
//!    - If previous frame exists with the same size and the cell is unchanged: skip
//!    - Otherwise: move, restyle only what differs, print
//! 3. Flush the writer once
//! 4. Store the frame as previous for the next comparison

use std::io::{self, Write};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::queue;
use crossterm::style::{
    Attribute, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
};
use crossterm::terminal::{
    BeginSynchronizedUpdate, Clear, ClearType, EndSynchronizedUpdate, EnterAlternateScreen,
    LeaveAlternateScreen,
};

use super::buffer::FrameBuffer;
use crate::types::{Attr, Cell, Rgba};

/// Terminal style last emitted, to skip redundant escape codes.
#[derive(Debug, Default)]
struct PenState {
    fg: Option<Rgba>,
    bg: Option<Rgba>,
    attrs: Option<Attr>,
    cursor: Option<(u16, u16)>,
}

pub struct DiffRenderer<W: Write> {
    out: W,
    pen: PenState,
    previous: Option<FrameBuffer>,
}

impl DiffRenderer<io::Stdout> {
    /// Renderer writing to stdout.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> DiffRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            pen: PenState::default(),
            previous: None,
        }
    }

    /// Render a frame, outputting only changed cells.
    ///
    /// Returns the number of cells written.
    pub fn render(&mut self, buffer: &FrameBuffer) -> io::Result<usize> {
        let mut written = 0;
        queue!(self.out, BeginSynchronizedUpdate)?;

        // Cursor moves between frames are not tracked
        self.pen.cursor = None;

        let width = buffer.width();
        let height = buffer.height();
        let comparable = self
            .previous
            .as_ref()
            .filter(|prev| prev.width() == width && prev.height() == height);

        for y in 0..height {
            for x in 0..width {
                let Some(cell) = buffer.get(x, y) else {
                    continue;
                };
                let changed = match comparable.and_then(|prev| prev.get(x, y)) {
                    Some(prev_cell) => prev_cell != cell,
                    None => true,
                };
                if changed {
                    write_cell(&mut self.out, &mut self.pen, x, y, cell)?;
                    written += 1;
                }
            }
        }

        queue!(self.out, EndSynchronizedUpdate)?;
        self.out.flush()?;

        self.previous = Some(buffer.clone());
        Ok(written)
    }

    /// Next render will be a full redraw.
    pub fn invalidate(&mut self) {
        self.previous = None;
        self.pen = PenState::default();
    }

    pub fn has_previous(&self) -> bool {
        self.previous.is_some()
    }

    /// Enter the alternate screen and hide the cursor.
    pub fn enter_fullscreen(&mut self) -> io::Result<()> {
        queue!(self.out, EnterAlternateScreen, Hide, Clear(ClearType::All))?;
        self.out.flush()?;
        self.invalidate();
        Ok(())
    }

    /// Restore the main screen and the cursor.
    pub fn exit_fullscreen(&mut self) -> io::Result<()> {
        queue!(
            self.out,
            SetAttribute(Attribute::Reset),
            ResetColor,
            Show,
            LeaveAlternateScreen
        )?;
        self.out.flush()
    }

    pub fn writer(&self) -> &W {
        &self.out
    }
}

fn write_cell<W: Write>(
    out: &mut W,
    pen: &mut PenState,
    x: u16,
    y: u16,
    cell: &Cell,
) -> io::Result<()> {
    if pen.cursor != Some((x, y)) {
        queue!(out, MoveTo(x, y))?;
    }
    if pen.attrs != Some(cell.attrs) {
        queue!(out, SetAttribute(Attribute::Reset))?;
        if cell.attrs.contains(Attr::BOLD) {
            queue!(out, SetAttribute(Attribute::Bold))?;
        }
        if cell.attrs.contains(Attr::DIM) {
            queue!(out, SetAttribute(Attribute::Dim))?;
        }
        pen.attrs = Some(cell.attrs);
        // Attribute reset also drops colours
        pen.fg = None;
        pen.bg = None;
    }
    if pen.fg != Some(cell.fg) {
        queue!(out, SetForegroundColor(cell.fg.into()))?;
        pen.fg = Some(cell.fg);
    }
    if pen.bg != Some(cell.bg) {
        queue!(out, SetBackgroundColor(cell.bg.into()))?;
        pen.bg = Some(cell.bg);
    }
    queue!(out, Print(cell.char))?;
    pen.cursor = Some((x.saturating_add(1), y));
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn renderer() -> DiffRenderer<Vec<u8>> {
        DiffRenderer::new(Vec::new())
    }

    #[test]
    fn test_first_frame_writes_everything() {
        let mut renderer = renderer();
        let buffer = FrameBuffer::new(4, 3);
        assert_eq!(renderer.render(&buffer).unwrap(), 12);
        assert!(renderer.has_previous());
    }

    #[test]
    fn test_only_changed_cells_written() {
        let mut renderer = renderer();
        let mut buffer = FrameBuffer::new(4, 3);
        renderer.render(&buffer).unwrap();

        buffer.draw_char(2, 1, 'X', Rgba::BLACK, 1.0, Attr::BOLD);
        assert_eq!(renderer.render(&buffer).unwrap(), 1);
        assert_eq!(renderer.render(&buffer).unwrap(), 0);

        let output = String::from_utf8_lossy(renderer.writer());
        assert!(output.contains('X'));
    }

    #[test]
    fn test_resize_forces_full_redraw() {
        let mut renderer = renderer();
        renderer.render(&FrameBuffer::new(4, 3)).unwrap();
        assert_eq!(renderer.render(&FrameBuffer::new(5, 3)).unwrap(), 15);
    }

    #[test]
    fn test_invalidate() {
        let mut renderer = renderer();
        let buffer = FrameBuffer::new(2, 2);
        renderer.render(&buffer).unwrap();

        renderer.invalidate();
        assert!(!renderer.has_previous());
        assert_eq!(renderer.render(&buffer).unwrap(), 4);
    }
}
