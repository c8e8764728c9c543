//! Header colors for boards and columns.
//!
//! Colors are stored as `#rrggbb` strings; an empty string means "no color".

use ratatui::style::Color;

/// The header colors offered when cycling, starting with "no color".
pub const HEADER_COLORS: [&str; 7] = [
    "", "#155e75", "#065f46", "#7c2d12", "#581c87", "#1e3a8a", "#9f1239",
];

/// Returns the color that follows `current` in [`HEADER_COLORS`].
///
/// A color that is not in the palette (e.g. one set by hand in the stored
/// data) moves to the first real color.
///
/// # Examples
///
/// ```
/// use orcganizer_tui::palette::next_color;
///
/// assert_eq!(next_color(""), "#155e75");
/// assert_eq!(next_color("#9f1239"), "");
/// assert_eq!(next_color("#abcdef"), "#155e75");
/// ```
#[must_use]
pub fn next_color(current: &str) -> &'static str {
    let idx = HEADER_COLORS
        .iter()
        .position(|c| c.eq_ignore_ascii_case(current))
        .unwrap_or(0);
    HEADER_COLORS[(idx + 1) % HEADER_COLORS.len()]
}

/// Parses a `#rrggbb` string into a terminal color.
///
/// # Examples
///
/// ```
/// use orcganizer_tui::palette::parse_hex;
/// use ratatui::style::Color;
///
/// assert_eq!(parse_hex("#155e75"), Some(Color::Rgb(0x15, 0x5e, 0x75)));
/// assert_eq!(parse_hex(""), None);
/// ```
#[must_use]
pub fn parse_hex(value: &str) -> Option<Color> {
    let hex = value.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |at: usize| u8::from_str_radix(&hex[at..at + 2], 16).ok();
    Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?))
}
