//! Paint - Lays a [`ScreenFrame`] out on a character grid.
//!
//! The circle hangs off a point orbiting the grid centre at the orb's
//! rotation, and its height shrinks with the flip angle about its top edge.
//! Text is drawn over it, glyph colours faded toward whatever is beneath.

use crate::screen::{ScreenFrame, WordFrame};
use crate::types::{Attr, Cell, Rgba};

use super::buffer::FrameBuffer;

/// Terminal cells are roughly twice as tall as they are wide.
const CELL_ASPECT: f32 = 2.0;

const MARGIN: i32 = 2;

/// Background and circle colours.
pub fn scene_colours(inverted: bool) -> (Rgba, Rgba) {
    if inverted {
        (Rgba::BLACK, Rgba::WHITE)
    } else {
        (Rgba::WHITE, Rgba::BLACK)
    }
}

/// Glyph colour of a word whose resting colour is `base`.
pub fn word_colour(base: Rgba, inverted: bool) -> Rgba {
    match (base == Rgba::WHITE, inverted) {
        (true, false) | (false, true) => Rgba::WHITE,
        _ => Rgba::BLACK,
    }
}

/// Index of the stacked word in the one-row window, if any.
pub fn stack_word_in_view(offset: f32, words: usize) -> Option<usize> {
    // Word k sits at row k - 1 + offset
    let index = (1.0 - offset).round();
    (index >= 0.0 && (index as usize) < words).then_some(index as usize)
}

pub fn paint(frame: &ScreenFrame, buffer: &mut FrameBuffer) {
    let (background, circle) = scene_colours(frame.inverted);
    buffer.clear(background);

    paint_circle(frame, buffer, circle);

    let width = buffer.width() as i32;
    let height = buffer.height() as i32;
    let title_row = height / 2;

    // Lead subtitle, top right
    if let Some(lead) = frame.subtitles.first() {
        let x = width - MARGIN - lead.text.chars().count() as i32;
        paint_word(buffer, lead, x, MARGIN - 1, Rgba::BLACK, Attr::NONE);
    }

    // Title slides in from the right by up to a quarter of the width
    let slide = (frame.title_offset / 100.0 * width as f32 / 4.0).round() as i32;
    paint_word(buffer, &frame.title, MARGIN + slide, title_row, Rgba::WHITE, Attr::BOLD);

    let to_row = title_row + 2;
    paint_word(buffer, &frame.to, MARGIN, to_row, Rgba::BLACK, Attr::BOLD);

    let stack = &frame.stack;
    if stack.visible {
        let x = MARGIN + frame.to.text.chars().count() as i32 + 1;
        let fg = word_colour(Rgba::WHITE, stack.inverted);
        match stack_word_in_view(stack.offset, stack.words.len()) {
            Some(0) => buffer.draw_text(x, to_row, stack.words[0], fg, &stack.first_word, Attr::BOLD),
            Some(index) => buffer.draw_text(x, to_row, stack.words[index], fg, &[], Attr::BOLD),
            None => {}
        }
    }

    // Body subtitles in two columns below
    let column = (width / 2).max(MARGIN + 1);
    let origins = [
        (MARGIN, to_row + 2),
        (MARGIN, to_row + 3),
        (column, to_row + 2),
        (column, to_row + 3),
    ];
    for (line, (x, y)) in frame.subtitles.iter().skip(1).zip(origins) {
        paint_word(buffer, line, x, y, Rgba::BLACK, Attr::DIM);
    }
}

fn paint_word(buffer: &mut FrameBuffer, word: &WordFrame, x: i32, y: i32, base: Rgba, attrs: Attr) {
    let fg = word_colour(base, word.inverted);
    buffer.draw_text(x, y, word.text, fg, &word.opacities, attrs);
}

fn paint_circle(frame: &ScreenFrame, buffer: &mut FrameBuffer, colour: Rgba) {
    let width = buffer.width() as f32;
    let height = buffer.height() as f32;
    if width < 1.0 || height < 1.0 {
        return;
    }

    let radius_y = height * 0.4;
    let radius_x = radius_y * CELL_ASPECT;
    let squash = frame.flip_angle.to_radians().cos().abs();

    let angle = frame.orb_rotation.to_radians();
    let centre_x = width / 2.0 + angle.cos() * radius_x * 0.5;
    let centre_y = height / 2.0 + angle.sin() * radius_y * 0.5;

    // Flip pivots about the top edge
    let top = centre_y - radius_y;
    let squashed_y = radius_y * squash;
    let squashed_centre = top + squashed_y;
    if squashed_y < 0.5 {
        return;
    }

    for y in 0..buffer.height() {
        for x in 0..buffer.width() {
            let dx = (x as f32 + 0.5 - centre_x) / radius_x;
            let dy = (y as f32 + 0.5 - squashed_centre) / squashed_y;
            if dx * dx + dy * dy <= 1.0 {
                buffer.set(x, y, Cell::blank(colour));
            }
        }
    }

    // Orb marker on the rim
    let marker_x = (centre_x + angle.cos() * radius_x).floor() as i32;
    let marker_y = (squashed_centre + angle.sin() * squashed_y).floor() as i32;
    buffer.draw_char(marker_x, marker_y, '●', Rgba::ORANGE, 1.0, Attr::BOLD);
}

// =============================================================================
// Tests
// =============================================================================
