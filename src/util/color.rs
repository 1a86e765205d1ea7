//! Accent color normalization.

#[cfg(test)]
#[path = "color_test.rs"]
mod color_test;

use crate::state::preferences::DEFAULT_ACCENT_COLOR;

/// Parse `#RGB` or `#RRGGBB` values into RGB channels.
pub fn parse_hex_rgb(raw: &str) -> Option<(u8, u8, u8)> {
    let hex = raw.trim().strip_prefix('#')?;
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        3 => Some((
            channel(&hex[0..1].repeat(2))?,
            channel(&hex[1..2].repeat(2))?,
            channel(&hex[2..3].repeat(2))?,
        )),
        6 => Some((channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?)),
        _ => None,
    }
}

/// Canonical lowercase `#rrggbb`, or the default accent when `value` is not a hex color.
pub fn normalize_accent(value: &str) -> String {
    let (r, g, b) = parse_hex_rgb(value)
        .or_else(|| parse_hex_rgb(DEFAULT_ACCENT_COLOR))
        .unwrap_or((0x1c, 0xa1, 0xc1));
    format!("#{r:02x}{g:02x}{b:02x}")
}
