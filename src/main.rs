// Copyright (c) 2026 deathscythe

mod cell;
mod config;
mod frame;
mod grid;
mod render;
mod session;
mod terminal;
mod theme;

use std::time::{Duration, Instant};

#[cfg(unix)]
use std::thread;

use clap::Parser;
use crossterm::event::{Event, KeyEventKind};

#[cfg(unix)]
use signal_hook::consts::{SIGHUP, SIGINT, SIGTERM};
#[cfg(unix)]
use signal_hook::iterator::Signals;

use crate::config::{detect_color_mode, print_list_colors, Args};
use crate::frame::{Frame, FrameSurface};
use crate::grid::CELL_SIZE;
use crate::session::{Session, SessionConfig};
use crate::terminal::{restore_terminal_best_effort, Terminal};

fn require_f64_range(name: &str, v: f64, min: f64, max: f64) -> f64 {
    if !v.is_finite() {
        eprintln!("failed to apply {} {} (must be a finite number)", name, v);
        std::process::exit(1);
    }
    if v < min || v > max {
        eprintln!("failed to apply {} {} (min {} max {})", name, v, min, max);
        std::process::exit(1);
    }
    v
}

fn main() -> std::io::Result<()> {
    std::panic::set_hook(Box::new(|info| {
        restore_terminal_best_effort();
        eprintln!("{}", info);
    }));

    #[cfg(unix)]
    {
        if let Ok(mut signals) = Signals::new([SIGINT, SIGTERM, SIGHUP]) {
            thread::spawn(move || {
                if let Some(sig) = signals.forever().next() {
                    restore_terminal_best_effort();
                    std::process::exit(128 + sig);
                }
            });
        }
    }

    #[cfg(windows)]
    {
        if let Err(e) = ctrlc::set_handler(|| {
            restore_terminal_best_effort();
            std::process::exit(130);
        }) {
            eprintln!("failed to install Ctrl-C handler: {}", e);
        }
    }

    let args = Args::parse();

    if args.list_colors {
        print_list_colors();
        return Ok(());
    }

    let target_fps = require_f64_range("--fps", args.fps, 1.0, 240.0);
    let duration_s = args
        .duration
        .map(|s| require_f64_range("--duration", s, 0.1, 86400.0));
    let color_mode = detect_color_mode(&args);

    let (choice, background) = match theme::resolve(&args.color, &mut rand::rng()) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    let mut term = Terminal::new()?;
    let (cols, rows) = term.size()?;

    let mut session = Session::new(SessionConfig {
        screen_w: cols as i32 * CELL_SIZE,
        screen_h: rows as i32 * CELL_SIZE,
        cell_size: CELL_SIZE,
        choice,
        background,
        seed: args.seed,
    });
    let mut frame = Frame::new(cols, rows, None);

    let start = Instant::now();
    let end_time = duration_s.map(|s| start + Duration::from_secs_f64(s));
    let target_period = Duration::from_secs_f64(1.0 / target_fps);
    let mut next_frame = Instant::now();
    let mut running = true;

    while running {
        if end_time.is_some_and(|end| Instant::now() >= end) {
            break;
        }

        // wait out the frame period on the event queue; any key ends the run
        loop {
            while Terminal::poll_event(Duration::from_millis(0))? {
                match Terminal::read_event()? {
                    Event::Key(k) if k.kind == KeyEventKind::Press => running = false,
                    Event::Mouse(_) => running = false,
                    // resizing is unsupported; the grid keeps its startup size
                    _ => {}
                }
            }
            if !running {
                break;
            }

            let now = Instant::now();
            if now >= next_frame {
                break;
            }
            let mut timeout = next_frame - now;
            if let Some(end) = end_time {
                if now >= end {
                    break;
                }
                timeout = timeout.min(end - now);
            }
            let _ = Terminal::poll_event(timeout)?;
        }

        if !running {
            break;
        }

        session.advance();
        {
            let mut surface = FrameSurface::new(&mut frame, color_mode);
            session.render(&mut surface);
        }
        term.draw(&mut frame)?;

        next_frame += target_period;
        let now = Instant::now();
        if now > next_frame {
            next_frame = now;
        }
    }

    Ok(())
}
