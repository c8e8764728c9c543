//! Helpers shared by the rendering tests.

use ratatui::buffer::Buffer;

/// Returns the symbols on row `y` of `buf`, without trailing spaces.
fn row_text(buf: &Buffer, y: u16) -> String {
    let row: String = (0..buf.area.width)
        .filter_map(|x| buf.cell((buf.area.x + x, buf.area.y + y)))
        .map(|cell| cell.symbol())
        .collect();
    row.trim_end_matches(' ').to_string()
}

/// Renders `buf` as text, one line per row.
///
/// Trailing spaces are dropped so inline snapshots stay readable.
#[must_use]
pub(crate) fn buffer_to_string(buf: &Buffer) -> String {
    (0..buf.area.height)
        .map(|y| row_text(buf, y) + "\n")
        .collect()
}

/// Finds the screen position of the first occurrence of `needle`.
///
/// Only works for text made of single-width characters.
#[must_use]
pub(crate) fn position_of(buf: &Buffer, needle: &str) -> Option<(u16, u16)> {
    (0..buf.area.height).find_map(|y| {
        let row = row_text(buf, y);
        let column = row.find(needle)?;
        let prefix = row[..column].chars().count();
        Some((buf.area.x + u16::try_from(prefix).ok()?, buf.area.y + y))
    })
}
