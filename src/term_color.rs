use ratatui::style::Color;

/// Map an RGB triple to a `Color` the current terminal can show: truecolor
/// when `COLORTERM` advertises it, otherwise the nearest xterm-256 cube entry.
pub fn map_rgb_to_color(r: u8, g: u8, b: u8) -> Color {
    if truecolor_supported() {
        Color::Rgb(r, g, b)
    } else {
        Color::Indexed(xterm_cube_index(r, g, b))
    }
}

fn truecolor_supported() -> bool {
    std::env::var("COLORTERM").is_ok_and(|var| {
        let var = var.to_lowercase();
        var.contains("truecolor") || var.contains("24bit")
    })
}

fn xterm_cube_index(r: u8, g: u8, b: u8) -> u8 {
    // 6x6x6 cube occupies 16..=231
    let level = |v: u8| ((v as u16 * 5 + 127) / 255) as u8;
    16 + 36 * level(r) + 6 * level(g) + level(b)
}

/// Rotate the hue of an RGB colour by `degrees`, keeping saturation and
/// value. Used by the rainbow theme.
pub fn hue_rotate(rgb: (u8, u8, u8), degrees: f32) -> (u8, u8, u8) {
    let (h, s, v) = rgb_to_hsv(rgb);
    hsv_to_rgb(((h + degrees) % 360.0 + 360.0) % 360.0, s, v)
}

fn rgb_to_hsv((r, g, b): (u8, u8, u8)) -> (f32, f32, f32) {
    let (r, g, b) = (r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0);
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;
    let h = if delta == 0.0 {
        0.0
    } else if max == r {
        60.0 * (((g - b) / delta) % 6.0)
    } else if max == g {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    };
    let s = if max == 0.0 { 0.0 } else { delta / max };
    ((h + 360.0) % 360.0, s, max)
}

fn hsv_to_rgb(h: f32, s: f32, v: f32) -> (u8, u8, u8) {
    let c = v * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = v - c;
    let (r, g, b) = match h as u32 {
        0..=59 => (c, x, 0.0),
        60..=119 => (x, c, 0.0),
        120..=179 => (0.0, c, x),
        180..=239 => (0.0, x, c),
        240..=299 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let to_u8 = |v: f32| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    (to_u8(r), to_u8(g), to_u8(b))
}
