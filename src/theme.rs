// Copyright (c) 2026 deathscythe

use crossterm::style::Color;
use rand::Rng;

/// Straight-alpha color in the simulation's color space. Alpha is only ever
/// produced by the trail fade; theme definitions are opaque.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self {
            r: self.r,
            g: self.g,
            b: self.b,
            a,
        }
    }
}

pub const BACKGROUND_DARK: Rgba = Rgba::opaque(0, 0, 0);
pub const BACKGROUND_LIGHT: Rgba = Rgba::opaque(225, 225, 225);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColorTheme {
    pub name: &'static str,
    pub head: Rgba,
    pub body: Rgba,
}

pub const THEMES: [ColorTheme; 10] = [
    ColorTheme {
        name: "white",
        head: Rgba::opaque(255, 255, 255),
        body: Rgba::opaque(160, 160, 160),
    },
    ColorTheme {
        name: "black",
        head: Rgba::opaque(0, 0, 0),
        body: Rgba::opaque(96, 96, 96),
    },
    ColorTheme {
        name: "red",
        head: Rgba::opaque(255, 0, 0),
        body: Rgba::opaque(255, 83, 83),
    },
    ColorTheme {
        name: "green",
        head: Rgba::opaque(180, 255, 180),
        body: Rgba::opaque(0, 255, 70),
    },
    ColorTheme {
        name: "blue",
        head: Rgba::opaque(0, 0, 255),
        body: Rgba::opaque(180, 180, 255),
    },
    ColorTheme {
        name: "yellow",
        head: Rgba::opaque(255, 255, 0),
        body: Rgba::opaque(255, 255, 72),
    },
    ColorTheme {
        name: "orange",
        head: Rgba::opaque(255, 128, 0),
        body: Rgba::opaque(255, 153, 51),
    },
    ColorTheme {
        name: "pink",
        head: Rgba::opaque(255, 0, 127),
        body: Rgba::opaque(255, 153, 204),
    },
    ColorTheme {
        name: "purple",
        head: Rgba::opaque(127, 0, 255),
        body: Rgba::opaque(153, 51, 255),
    },
    ColorTheme {
        name: "cyan",
        head: Rgba::opaque(0, 204, 204),
        body: Rgba::opaque(153, 255, 255),
    },
];

/// Theme selection for a session: one fixed pair, or a fresh pair per cell
/// per frame.
#[derive(Clone, Copy, Debug)]
pub enum ThemeChoice {
    Fixed(&'static ColorTheme),
    Rainbow,
}

pub fn random_theme(rng: &mut impl Rng) -> &'static ColorTheme {
    &THEMES[rng.random_range(0..THEMES.len())]
}

/// The black theme is unreadable on the default background, so it flips the
/// backdrop to light gray.
fn background_for(theme: &ColorTheme) -> Rgba {
    if theme.name == "black" {
        BACKGROUND_LIGHT
    } else {
        BACKGROUND_DARK
    }
}

/// Resolves a `--color` argument to a theme choice and its background.
/// `random` picks one theme for the whole session; `rainbow` re-picks per
/// cell per frame.
pub fn resolve(name: &str, rng: &mut impl Rng) -> Result<(ThemeChoice, Rgba), String> {
    match name.trim().to_ascii_lowercase().as_str() {
        "rainbow" => Ok((ThemeChoice::Rainbow, BACKGROUND_DARK)),
        "random" => {
            let t = random_theme(rng);
            Ok((ThemeChoice::Fixed(t), background_for(t)))
        }
        other => THEMES
            .iter()
            .find(|t| t.name == other)
            .map(|t| (ThemeChoice::Fixed(t), background_for(t)))
            .ok_or_else(|| format!("invalid color: {} (see --list-colors)", name)),
    }
}

/// Color for trail cell `j` (0 = head). Cells 1..=3 form a solid neck behind
/// the head; deeper cells fade linearly, steeper for shorter trails. Alpha is
/// clamped so degenerate lengths cannot wrap.
pub fn trail_color(theme: &ColorTheme, j: usize, trail_len: usize) -> Rgba {
    if j == 0 {
        theme.head
    } else if j <= 3 {
        theme.body
    } else {
        let step = 230 / trail_len.max(1) as i32;
        let a = (255 - step * j as i32).clamp(0, 255) as u8;
        theme.body.with_alpha(a)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorMode {
    Color256,
    TrueColor,
}

/// Composites `fg` over an opaque background in straight-alpha RGB.
pub fn composite(fg: Rgba, bg: Rgba) -> (u8, u8, u8) {
    let blend = |f: u8, b: u8| -> u8 {
        let a = fg.a as u32;
        (((f as u32) * a + (b as u32) * (255 - a) + 127) / 255) as u8
    };
    (blend(fg.r, bg.r), blend(fg.g, bg.g), blend(fg.b, bg.b))
}

pub fn to_term_color(c: Rgba, bg: Rgba, mode: ColorMode) -> Color {
    let (r, g, b) = composite(c, bg);
    match mode {
        ColorMode::TrueColor => Color::Rgb { r, g, b },
        ColorMode::Color256 => Color::AnsiValue(rgb_to_ansi256(r, g, b)),
    }
}

fn dist2(r0: u8, g0: u8, b0: u8, r1: u8, g1: u8, b1: u8) -> i32 {
    let dr = (r0 as i32) - (r1 as i32);
    let dg = (g0 as i32) - (g1 as i32);
    let db = (b0 as i32) - (b1 as i32);
    (dr * dr) + (dg * dg) + (db * db)
}

/// Nearest xterm-256 index: best of the 6x6x6 cube and the grayscale ramp.
fn rgb_to_ansi256(r: u8, g: u8, b: u8) -> u8 {
    const CUBE_LEVELS: [u8; 6] = [0, 95, 135, 175, 215, 255];

    let r6 = ((r as u16 * 5) + 127) / 255;
    let g6 = ((g as u16 * 5) + 127) / 255;
    let b6 = ((b as u16 * 5) + 127) / 255;

    let cr = CUBE_LEVELS[r6 as usize];
    let cg = CUBE_LEVELS[g6 as usize];
    let cb = CUBE_LEVELS[b6 as usize];
    let cube_idx = 16 + (36 * r6 as u8) + (6 * g6 as u8) + (b6 as u8);
    let cube_dist = dist2(r, g, b, cr, cg, cb);

    let avg = ((r as u16 + g as u16 + b as u16) / 3) as u8;
    let gray_idx = if avg < 8 {
        16
    } else if avg > 238 {
        231
    } else {
        232 + ((avg - 8) / 10)
    };
    let (gr, gg, gb) = if gray_idx == 16 {
        (0, 0, 0)
    } else if gray_idx == 231 {
        (255, 255, 255)
    } else {
        let v = 8 + 10 * (gray_idx - 232);
        (v, v, v)
    };
    let gray_dist = dist2(r, g, b, gr, gg, gb);

    if gray_dist < cube_dist {
        gray_idx
    } else {
        cube_idx
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn head_and_neck_render_opaque() {
        let t = &THEMES[3];
        assert_eq!(trail_color(t, 0, 20), t.head);
        for j in 1..=3 {
            assert_eq!(trail_color(t, j, 20), t.body);
        }
    }

    #[test]
    fn tail_alpha_strictly_decreases_and_stays_in_range() {
        let t = &THEMES[3];
        for len in crate::grid::MIN_TRAIL_LEN..crate::grid::MAX_TRAIL_LEN {
            let mut prev = 256i32;
            for j in 4..len {
                let c = trail_color(t, j, len);
                assert_eq!((c.r, c.g, c.b), (t.body.r, t.body.g, t.body.b));
                assert!((c.a as i32) < prev, "alpha must fall as j grows");
                prev = c.a as i32;
            }
        }
    }

    #[test]
    fn tail_alpha_clamps_for_degenerate_lengths() {
        let t = &THEMES[0];
        // j beyond what a sane trail allows must still land in 0..=255
        let c = trail_color(t, 200, 1);
        assert_eq!(c.a, 0);
    }

    #[test]
    fn resolve_finds_every_named_theme() {
        let mut rng = StdRng::seed_from_u64(1);
        for t in &THEMES {
            let (choice, _) = resolve(t.name, &mut rng).unwrap();
            match choice {
                ThemeChoice::Fixed(f) => assert_eq!(f.name, t.name),
                ThemeChoice::Rainbow => panic!("named theme must resolve to fixed"),
            }
        }
    }

    #[test]
    fn resolve_black_flips_background() {
        let mut rng = StdRng::seed_from_u64(1);
        let (_, bg) = resolve("black", &mut rng).unwrap();
        assert_eq!(bg, BACKGROUND_LIGHT);
        let (_, bg) = resolve("green", &mut rng).unwrap();
        assert_eq!(bg, BACKGROUND_DARK);
    }

    #[test]
    fn resolve_rejects_unknown_names() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(resolve("mauve", &mut rng).is_err());
    }

    #[test]
    fn composite_is_identity_for_opaque_and_bg_for_transparent() {
        let fg = Rgba::opaque(10, 200, 30);
        assert_eq!(composite(fg, BACKGROUND_DARK), (10, 200, 30));
        assert_eq!(composite(fg.with_alpha(0), BACKGROUND_LIGHT), (225, 225, 225));
    }

    #[test]
    fn ansi256_hits_cube_corners() {
        assert_eq!(rgb_to_ansi256(0, 0, 0), 16);
        assert_eq!(rgb_to_ansi256(255, 255, 255), 231);
    }
}
