//! FrameBuffer - a 2D grid of cells.
//!
//! Flat storage, row-major indexing: `index = y * width + x`.
//! Writes outside the grid are ignored.

use crate::types::{Attr, Cell, Rgba};

#[derive(Debug, Clone, PartialEq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    /// A buffer of blank white cells.
    pub fn new(width: u16, height: u16) -> Self {
        Self::with_background(width, height, Rgba::WHITE)
    }

    pub fn with_background(width: u16, height: u16, bg: Rgba) -> Self {
        let size = width as usize * height as usize;
        Self {
            width,
            height,
            cells: vec![Cell::blank(bg); size],
        }
    }

    #[inline]
    pub fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u16 {
        self.height
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y as usize * self.width as usize + x as usize)
    }

    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = cell;
        }
    }

    /// Reset every cell to blank on `bg`.
    pub fn clear(&mut self, bg: Rgba) {
        self.cells.fill(Cell::blank(bg));
    }

    /// Draw one glyph over the existing background.
    ///
    /// `opacity` fades the glyph toward the cell's background; a fully
    /// transparent glyph leaves the cell untouched.
    pub fn draw_char(&mut self, x: i32, y: i32, ch: char, fg: Rgba, opacity: f32, attrs: Attr) {
        if opacity <= 0.0 || x < 0 || y < 0 || x > u16::MAX as i32 || y > u16::MAX as i32 {
            return;
        }
        if let Some(i) = self.index(x as u16, y as u16) {
            let cell = &mut self.cells[i];
            cell.char = ch;
            cell.fg = fg.faded(cell.bg, opacity);
            cell.attrs = attrs;
        }
    }

    /// Draw `text` starting at `(x, y)`, one opacity per character.
    pub fn draw_text(&mut self, x: i32, y: i32, text: &str, fg: Rgba, opacities: &[f32], attrs: Attr) {
        for (offset, ch) in text.chars().enumerate() {
            let opacity = opacities.get(offset).copied().unwrap_or(1.0);
            self.draw_char(x + offset as i32, y, ch, fg, opacity, attrs);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_bounds_ignored() {
        let mut buffer = FrameBuffer::new(4, 2);
        buffer.set(9, 9, Cell::blank(Rgba::BLACK));
        buffer.draw_char(-1, 0, 'X', Rgba::BLACK, 1.0, Attr::NONE);
        assert!(buffer.get(4, 0).is_none());
        assert_eq!(buffer.get(0, 0), Some(&Cell::blank(Rgba::WHITE)));
    }

    #[test]
    fn test_draw_text_with_opacities() {
        let mut buffer = FrameBuffer::new(8, 1);
        buffer.draw_text(1, 0, "TO", Rgba::BLACK, &[1.0, 0.0], Attr::BOLD);

        let t = buffer.get(1, 0).copied();
        assert_eq!(t.map(|c| c.char), Some('T'));
        assert_eq!(t.map(|c| c.fg), Some(Rgba::BLACK));
        // Invisible glyph leaves the blank cell
        assert_eq!(buffer.get(2, 0).map(|c| c.char), Some(' '));
    }

    #[test]
    fn test_clear() {
        let mut buffer = FrameBuffer::new(2, 2);
        buffer.draw_char(0, 0, 'A', Rgba::BLACK, 1.0, Attr::NONE);
        buffer.clear(Rgba::BLACK);
        assert_eq!(buffer.get(0, 0), Some(&Cell::blank(Rgba::BLACK)));
    }
}
