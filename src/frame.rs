// Copyright (c) 2026 deathscythe

use crossterm::style::Color;

use crate::cell::Cell;
use crate::render::Surface;
use crate::theme::{self, ColorMode, Rgba};

/// Off-screen cell buffer with dirty-cell tracking. The terminal writer
/// diffs against its own copy of the previous frame, so a cleared frame does
/// not force a full repaint on the wire.
#[derive(Clone, Debug)]
pub struct Frame {
    pub width: u16,
    pub height: u16,
    cells: Vec<Cell>,
    dirty_all: bool,
    dirty_map: Vec<bool>,
    dirty: Vec<usize>,
}

impl Frame {
    pub fn new(width: u16, height: u16, bg: Option<Color>) -> Self {
        let len = width as usize * height as usize;
        Self {
            width,
            height,
            cells: vec![Cell::blank(bg); len],
            dirty_all: true,
            dirty_map: vec![false; len],
            dirty: Vec::new(),
        }
    }

    pub fn clear(&mut self, bg: Option<Color>) {
        self.cells.fill(Cell::blank(bg));
        self.dirty_all = true;
        self.dirty.clear();
    }

    pub fn is_dirty_all(&self) -> bool {
        self.dirty_all
    }

    pub fn dirty_indices(&self) -> &[usize] {
        &self.dirty
    }

    pub fn clear_dirty(&mut self) {
        if self.dirty_all {
            self.dirty_all = false;
            self.dirty_map.fill(false);
            self.dirty.clear();
            return;
        }
        for &i in &self.dirty {
            self.dirty_map[i] = false;
        }
        self.dirty.clear();
    }

    pub fn index(&self, x: u16, y: u16) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    #[allow(dead_code)]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    pub fn cell_at_index(&self, i: usize) -> Cell {
        self.cells[i]
    }

    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        let Some(i) = self.index(x, y) else {
            return;
        };
        if self.cells[i] == cell {
            return;
        }
        self.cells[i] = cell;
        if !self.dirty_all && !self.dirty_map[i] {
            self.dirty_map[i] = true;
            self.dirty.push(i);
        }
    }
}

/// Bridges the render pass's pixel space onto a `Frame`: pixel coordinates
/// divide down to character cells, alpha composites over the session
/// background, and anything outside the viewport is dropped.
pub struct FrameSurface<'a> {
    frame: &'a mut Frame,
    mode: ColorMode,
    background: Rgba,
    term_bg: Option<Color>,
}

impl<'a> FrameSurface<'a> {
    pub fn new(frame: &'a mut Frame, mode: ColorMode) -> Self {
        Self {
            frame,
            mode,
            background: theme::BACKGROUND_DARK,
            term_bg: None,
        }
    }
}

impl Surface for FrameSurface<'_> {
    fn clear(&mut self, background: Rgba) {
        self.background = background;
        self.term_bg = Some(theme::to_term_color(background, background, self.mode));
        self.frame.clear(self.term_bg);
    }

    fn draw_glyph(&mut self, glyph: char, x: i32, y: i32, cell_size: i32, color: Rgba) {
        if x < 0 || y < 0 {
            return;
        }
        let col = x / cell_size.max(1);
        let row = y / cell_size.max(1);
        if col >= self.frame.width as i32 || row >= self.frame.height as i32 {
            return;
        }
        let fg = theme::to_term_color(color, self.background, self.mode);
        self.frame.set(
            col as u16,
            row as u16,
            Cell {
                ch: glyph,
                fg: Some(fg),
                bg: self.term_bg,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Surface;
    use crate::theme::{ColorMode, Rgba, BACKGROUND_DARK};

    #[test]
    fn set_tracks_dirty_cells_after_clear_dirty() {
        let mut f = Frame::new(4, 2, None);
        assert!(f.is_dirty_all());
        f.clear_dirty();

        f.set(1, 0, Cell { ch: 'x', fg: None, bg: None });
        f.set(1, 0, Cell { ch: 'x', fg: None, bg: None }); // no duplicate entry
        assert_eq!(f.dirty_indices(), &[1]);
        assert_eq!(f.get(1, 0).unwrap().ch, 'x');
    }

    #[test]
    fn set_outside_bounds_is_a_noop() {
        let mut f = Frame::new(2, 2, None);
        f.clear_dirty();
        f.set(2, 0, Cell { ch: 'x', fg: None, bg: None });
        f.set(0, 2, Cell { ch: 'x', fg: None, bg: None });
        assert!(f.dirty_indices().is_empty());
    }

    #[test]
    fn surface_maps_pixels_to_cells_and_skips_offscreen() {
        let mut f = Frame::new(3, 3, None);
        let mut s = FrameSurface::new(&mut f, ColorMode::TrueColor);
        s.clear(BACKGROUND_DARK);

        s.draw_glyph('a', 40, 25, 20, Rgba::opaque(0, 255, 70));
        s.draw_glyph('b', 0, -5, 20, Rgba::opaque(0, 255, 70)); // above viewport
        s.draw_glyph('c', 0, 60, 20, Rgba::opaque(0, 255, 70)); // below viewport

        assert_eq!(f.get(2, 1).unwrap().ch, 'a');
        assert_eq!(f.get(0, 0).unwrap().ch, ' ');
    }

    #[test]
    fn surface_composites_alpha_over_background() {
        let mut f = Frame::new(1, 1, None);
        let mut s = FrameSurface::new(&mut f, ColorMode::TrueColor);
        s.clear(BACKGROUND_DARK);
        s.draw_glyph('x', 0, 0, 20, Rgba::opaque(0, 255, 70).with_alpha(0));

        // fully transparent ink over black lands on black
        assert_eq!(
            f.get(0, 0).unwrap().fg,
            Some(crossterm::style::Color::Rgb { r: 0, g: 0, b: 0 })
        );
    }
}
