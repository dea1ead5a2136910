// Copyright (c) 2026 deathscythe

use rand::{
    distr::{Distribution, Uniform},
    Rng,
};

/// Virtual pixels per glyph cell. The simulation runs in pixel units; the
/// terminal surface divides back down to character cells.
pub const CELL_SIZE: i32 = 20;
pub const MAX_GRID_SIZE: usize = 200;
pub const MIN_TRAIL_LEN: usize = 10;
pub const MAX_TRAIL_LEN: usize = 30;
pub const MIN_SPEED: i32 = 4;
pub const MAX_SPEED: i32 = 15;
/// Frames a cell must age before it becomes eligible to mutate.
pub const MUTATE_INTERVAL: u32 = 10;
const MUTATE_CHANCE: f32 = 0.1;

pub const GLYPH_LOW: u8 = 33;
pub const GLYPH_HIGH: u8 = 125;

/// One falling trail. `glyphs` and `timers` are fixed-capacity arenas; only
/// indices below `trail_len` are live. Speed and length are re-rolled at
/// reset, never mid-flight.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Column {
    pub top_y: i32,
    pub trail_len: usize,
    pub fall_speed: i32,
    glyphs: [char; MAX_TRAIL_LEN],
    timers: [u32; MAX_TRAIL_LEN],
}

impl Column {
    fn vacant() -> Self {
        Self {
            top_y: 0,
            trail_len: MIN_TRAIL_LEN,
            fall_speed: MIN_SPEED,
            glyphs: ['0'; MAX_TRAIL_LEN],
            timers: [0; MAX_TRAIL_LEN],
        }
    }

    pub fn glyph(&self, j: usize) -> char {
        debug_assert!(j < self.trail_len);
        self.glyphs[j]
    }
}

/// Uniform draws shared by reset and advance, built once per grid.
struct Draws {
    start_y: Uniform<i32>,
    trail_len: Uniform<usize>,
    speed: Uniform<i32>,
    glyph: Uniform<u8>,
    timer: Uniform<u32>,
    chance: Uniform<f32>,
}

impl Draws {
    fn new(screen_h: i32) -> Self {
        Self {
            start_y: Uniform::new(0, screen_h.max(1)).expect("valid range"),
            trail_len: Uniform::new(MIN_TRAIL_LEN, MAX_TRAIL_LEN).expect("valid range"),
            speed: Uniform::new(MIN_SPEED, MAX_SPEED).expect("valid range"),
            glyph: Uniform::new_inclusive(GLYPH_LOW, GLYPH_HIGH).expect("valid range"),
            timer: Uniform::new(0, MUTATE_INTERVAL).expect("valid range"),
            chance: Uniform::new(0.0, 1.0).expect("valid range"),
        }
    }

    fn glyph(&self, rng: &mut impl Rng) -> char {
        self.glyph.sample(rng) as char
    }

    /// Respawn: fresh length, speed, glyph contents, and desynchronized
    /// per-cell mutation phase, with the head placed above the viewport.
    fn reset(&self, col: &mut Column, rng: &mut impl Rng) {
        col.top_y = -self.start_y.sample(rng);
        col.trail_len = self.trail_len.sample(rng);
        col.fall_speed = self.speed.sample(rng);
        for j in 0..col.trail_len {
            col.glyphs[j] = self.glyph(rng);
            col.timers[j] = self.timer.sample(rng);
        }
    }
}

/// The full column grid. Sized once from the screen width; columns respawn in
/// place and are never added or removed afterwards.
pub struct Grid {
    pub cell_size: i32,
    pub screen_h: i32,
    columns: Vec<Column>,
    draws: Draws,
}

impl Grid {
    pub fn new(screen_w: i32, screen_h: i32, cell_size: i32, rng: &mut impl Rng) -> Self {
        let count = ((screen_w / cell_size.max(1)).max(0) as usize).min(MAX_GRID_SIZE);
        let draws = Draws::new(screen_h);

        let mut columns = vec![Column::vacant(); count];
        for col in &mut columns {
            draws.reset(col, rng);
        }

        Self {
            cell_size,
            screen_h,
            columns,
            draws,
        }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// One frame: constant-velocity fall, irregular glyph flicker, respawn
    /// once the trailing edge has cleared the bottom of the screen.
    pub fn advance(&mut self, rng: &mut impl Rng) {
        let draws = &self.draws;
        let cell_size = self.cell_size;
        let screen_h = self.screen_h;

        for col in &mut self.columns {
            col.top_y += col.fall_speed;

            for j in 0..col.trail_len {
                col.timers[j] += 1;
                if col.timers[j] > MUTATE_INTERVAL && draws.chance.sample(rng) < MUTATE_CHANCE {
                    col.glyphs[j] = draws.glyph(rng);
                    col.timers[j] = draws.timer.sample(rng);
                }
            }

            if col.top_y - (col.trail_len as i32) * cell_size > screen_h {
                draws.reset(col, rng);
            }
        }
    }
}
