// Copyright (c) 2026 deathscythe

use rand::Rng;

use crate::grid::Grid;
use crate::theme::{self, Rgba, ThemeChoice};

/// Drawing target for one frame, in the simulation's pixel space. Drawing
/// outside the viewport must be a no-op; the render pass does not cull.
pub trait Surface {
    fn clear(&mut self, background: Rgba);
    fn draw_glyph(&mut self, glyph: char, x: i32, y: i32, cell_size: i32, color: Rgba);
}

/// Emits every live trail cell. Cell 0 is the head at `top_y`; higher cells
/// sit one glyph cell further up the screen.
pub fn render(
    grid: &Grid,
    choice: &ThemeChoice,
    background: Rgba,
    surface: &mut impl Surface,
    rng: &mut impl Rng,
) {
    surface.clear(background);

    for (i, col) in grid.columns().iter().enumerate() {
        let x = i as i32 * grid.cell_size;
        for j in 0..col.trail_len {
            let y = col.top_y - j as i32 * grid.cell_size;
            let t = match choice {
                ThemeChoice::Fixed(t) => t,
                ThemeChoice::Rainbow => theme::random_theme(rng),
            };
            let color = theme::trail_color(t, j, col.trail_len);
            surface.draw_glyph(col.glyph(j), x, y, grid.cell_size, color);
        }
    }
}
