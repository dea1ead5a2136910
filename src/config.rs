// Copyright (c) 2026 deathscythe

use std::env;

use clap::Parser;

use crate::theme::{ColorMode, THEMES};

#[derive(Parser, Debug, Clone)]
#[command(name = "glyphrain", version, about = "Matrix-style digital rain screensaver for the terminal")]
pub struct Args {
    #[arg(
        short = 'c',
        long = "color",
        default_value = "green",
        help = "Color theme, or 'random' / 'rainbow' (see --list-colors)"
    )]
    pub color: String,

    #[arg(
        short = 'f',
        long = "fps",
        default_value_t = 60.0,
        help = "Target FPS (min 1 max 240)"
    )]
    pub fps: f64,

    #[arg(long = "duration", help = "Stop after N seconds (min 0.1 max 86400)")]
    pub duration: Option<f64>,

    #[arg(long = "seed", help = "Fixed random seed for a reproducible run")]
    pub seed: Option<u64>,

    #[arg(
        long = "colormode",
        help = "Force color mode (allowed: 8,24). Default: auto-detect from COLORTERM/TERM"
    )]
    pub colormode: Option<u8>,

    #[arg(long = "list-colors", help = "List available color themes and exit")]
    pub list_colors: bool,
}

pub fn print_list_colors() {
    println!("AVAILABLE COLOR THEMES:");
    println!();
    for t in &THEMES {
        println!(
            "{:<10} head #{:02x}{:02x}{:02x}  body #{:02x}{:02x}{:02x}",
            t.name, t.head.r, t.head.g, t.head.b, t.body.r, t.body.g, t.body.b
        );
    }
    println!("{:<10} one of the above, picked at startup", "random");
    println!("{:<10} re-picked per glyph cell every frame", "rainbow");
}

fn detect_color_mode_auto() -> ColorMode {
    let colorterm = env::var("COLORTERM")
        .unwrap_or_default()
        .to_ascii_lowercase();
    if colorterm.contains("truecolor") || colorterm.contains("24bit") {
        return ColorMode::TrueColor;
    }
    ColorMode::Color256
}

pub fn detect_color_mode(args: &Args) -> ColorMode {
    if let Some(m) = args.colormode {
        return match m {
            8 => ColorMode::Color256,
            24 => ColorMode::TrueColor,
            _ => {
                eprintln!("invalid --colormode: {} (allowed: 8,24)", m);
                std::process::exit(1);
            }
        };
    }
    detect_color_mode_auto()
}
