use ratatui::style::Color;

/// Levels of the xterm 6×6×6 color cube (palette indices 16..=231).
const CUBE_LEVELS: [u8; 6] = [0, 95, 135, 175, 215, 255];

/// Color depth advertised by the terminal through `COLORTERM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSupport {
    TrueColor,
    Palette256,
}

impl ColorSupport {
    pub fn detect() -> Self {
        Self::from_colorterm(std::env::var("COLORTERM").ok().as_deref())
    }

    fn from_colorterm(value: Option<&str>) -> Self {
        match value.map(str::to_ascii_lowercase) {
            Some(v) if v.contains("truecolor") || v.contains("24bit") => Self::TrueColor,
            _ => Self::Palette256,
        }
    }
}

/// Map an RGB triple to a color the current terminal can show: the exact
/// value on truecolor terminals, otherwise the nearest xterm-256 entry.
pub fn map_rgb_to_color(r: u8, g: u8, b: u8) -> Color {
    map_with_support(ColorSupport::detect(), r, g, b)
}

pub fn map_with_support(support: ColorSupport, r: u8, g: u8, b: u8) -> Color {
    match support {
        ColorSupport::TrueColor => Color::Rgb(r, g, b),
        ColorSupport::Palette256 => Color::Indexed(nearest_palette_index(r, g, b)),
    }
}

fn nearest_cube_level(v: u8) -> usize {
    CUBE_LEVELS
        .iter()
        .enumerate()
        .min_by_key(|(_, level)| (i32::from(**level) - i32::from(v)).abs())
        .map(|(idx, _)| idx)
        .unwrap_or(0)
}

fn nearest_palette_index(r: u8, g: u8, b: u8) -> u8 {
    let (ri, gi, bi) = (nearest_cube_level(r), nearest_cube_level(g), nearest_cube_level(b));
    let cube = (CUBE_LEVELS[ri], CUBE_LEVELS[gi], CUBE_LEVELS[bi]);
    let cube_index = 16 + 36 * ri + 6 * gi + bi;

    // grayscale ramp 232..=255 covers 8, 18, ..., 238
    let avg = (u32::from(r) + u32::from(g) + u32::from(b)) / 3;
    let step = (avg.saturating_sub(8) / 10).min(23);
    let level = (8 + step * 10) as u8;
    let gray = (level, level, level);

    if distance((r, g, b), gray) < distance((r, g, b), cube) {
        (232 + step) as u8
    } else {
        cube_index as u8
    }
}

fn distance(a: (u8, u8, u8), b: (u8, u8, u8)) -> u32 {
    let d = |x: u8, y: u8| (i32::from(x) - i32::from(y)).pow(2) as u32;
    d(a.0, b.0) + d(a.1, b.1) + d(a.2, b.2)
}
