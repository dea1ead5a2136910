// Copyright (c) 2026 deathscythe

use std::io::{stdout, Result, Stdout, Write};

use crossterm::{
    cursor, event,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal, ExecutableCommand, QueueableCommand,
};

use crate::cell::Cell;
use crate::frame::Frame;

/// Raw-mode alternate-screen writer. Keeps its own copy of the previously
/// drawn frame so each draw only emits cells that actually changed.
pub struct Terminal {
    stdout: Stdout,
    last: Vec<Cell>,
    last_size: (u16, u16),
}

impl Terminal {
    pub fn new() -> Result<Self> {
        let mut out = stdout();
        terminal::enable_raw_mode()?;
        let init: Result<()> = (|| {
            out.execute(terminal::EnterAlternateScreen)?;
            out.execute(cursor::Hide)?;
            out.execute(ResetColor)?;
            out.execute(terminal::Clear(terminal::ClearType::All))?;
            out.flush()?;
            Ok(())
        })();
        if let Err(e) = init {
            restore_terminal_best_effort();
            return Err(e);
        }
        Ok(Self {
            stdout: out,
            last: Vec::new(),
            last_size: (0, 0),
        })
    }

    pub fn size(&self) -> Result<(u16, u16)> {
        terminal::size()
    }

    pub fn poll_event(timeout: std::time::Duration) -> Result<bool> {
        event::poll(timeout)
    }

    pub fn read_event() -> Result<event::Event> {
        event::read()
    }

    pub fn draw(&mut self, frame: &mut Frame) -> Result<()> {
        let size = (frame.width, frame.height);
        if self.last_size != size {
            let len = frame.width as usize * frame.height as usize;
            self.last = vec![Cell::blank(None); len];
            self.last_size = size;
            self.stdout
                .queue(terminal::Clear(terminal::ClearType::All))?;
        }

        let mut cur_fg: Option<Option<Color>> = None;
        let mut cur_bg: Option<Option<Color>> = None;
        let mut cur_pos: Option<(u16, u16)> = None;
        let width = frame.width as usize;

        let mut emit = |out: &mut Stdout, idx: usize, cell: Cell| -> Result<()> {
            let x = (idx % width) as u16;
            let y = (idx / width) as u16;

            if cur_pos != Some((x, y)) {
                out.queue(cursor::MoveTo(x, y))?;
            }
            if cur_fg != Some(cell.fg) {
                out.queue(SetForegroundColor(cell.fg.unwrap_or(Color::Reset)))?;
                cur_fg = Some(cell.fg);
            }
            if cur_bg != Some(cell.bg) {
                out.queue(SetBackgroundColor(cell.bg.unwrap_or(Color::Reset)))?;
                cur_bg = Some(cell.bg);
            }
            out.queue(Print(cell.ch))?;

            let next_x = x.saturating_add(1);
            cur_pos = if (next_x as usize) < width {
                Some((next_x, y))
            } else {
                None
            };
            Ok(())
        };

        if frame.is_dirty_all() {
            for idx in 0..self.last.len() {
                let cell = frame.cell_at_index(idx);
                if self.last[idx] == cell {
                    continue;
                }
                self.last[idx] = cell;
                emit(&mut self.stdout, idx, cell)?;
            }
        } else {
            let mut dirty: Vec<usize> = frame.dirty_indices().to_vec();
            dirty.sort_unstable();
            for idx in dirty {
                let cell = frame.cell_at_index(idx);
                if self.last[idx] == cell {
                    continue;
                }
                self.last[idx] = cell;
                emit(&mut self.stdout, idx, cell)?;
            }
        }

        self.stdout.queue(ResetColor)?;
        self.stdout.flush()?;
        frame.clear_dirty();
        Ok(())
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        restore_terminal_best_effort();
    }
}

pub fn restore_terminal_best_effort() {
    let mut out = stdout();
    let _ = out.execute(ResetColor);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
    let _ = out.flush();
}
