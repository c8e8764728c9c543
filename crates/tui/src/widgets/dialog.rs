//! Modal dialogs: text prompts and yes/no confirmations.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget, Wrap},
};

use super::help::centered_rect;
use crate::state::{PendingAction, TextInput};

/// Width of a dialog.
const DIALOG_WIDTH: u16 = 64;

/// Rows of text shown in a multi-line prompt.
const MULTILINE_ROWS: u16 = 6;

fn dialog_block(title: &str, color: Color) -> Block<'static> {
    Block::default()
        .title(Span::styled(
            format!(" {title} "),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
}

fn key_hint(key: &'static str, action: &str) -> [Span<'static>; 2] {
    [
        Span::styled(key, Style::default().fg(Color::Yellow)),
        Span::styled(format!(" {action}  "), Style::default().fg(Color::DarkGray)),
    ]
}

/// Renders an open text prompt centered in `area`.
///
/// # Layout
///
/// ```text
/// ╭ Name your Quest board ──────────────────────────╮
/// │The Order of Swift Blades▏                       │
/// │                                                 │
/// │[Enter] Forge Quest board  [Esc] Cancel          │
/// ╰─────────────────────────────────────────────────╯
/// ```
///
/// # Examples
///
/// ```
/// use orcganizer_tui::state::{TextInput, TextTarget};
/// use orcganizer_tui::widgets::render_prompt;
/// use ratatui::{buffer::Buffer, layout::Rect};
///
/// let input = TextInput::new(TextTarget::NewBoard, "The Order of Flow");
/// let area = Rect::new(0, 0, 80, 24);
/// let mut buf = Buffer::empty(area);
///
/// render_prompt(&input, area, &mut buf);
/// ```
pub fn render_prompt(input: &TextInput, area: Rect, buf: &mut Buffer) {
    let text_rows = if input.target.is_multiline() {
        MULTILINE_ROWS
    } else {
        1
    };
    let popup = centered_rect(DIALOG_WIDTH, text_rows + 4, area);
    Clear.render(popup, buf);

    let block = dialog_block(input.target.prompt(), Color::Cyan);
    let inner = block.inner(popup);
    block.render(popup, buf);

    let [text_area, error_area, hint_area] = Layout::vertical([
        Constraint::Length(text_rows),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(inner);

    let text_style = Style::default().fg(Color::White);
    let cursor = Span::styled("▏", Style::default().fg(Color::Cyan));
    let mut lines: Vec<Line<'_>> = input
        .buffer
        .split('\n')
        .map(|line| Line::from(Span::styled(line.to_string(), text_style)))
        .collect();
    if let Some(last) = lines.last_mut() {
        last.spans.push(cursor);
    }
    // Keep the cursor line in view.
    let skip = lines.len().saturating_sub(usize::from(text_rows));
    Paragraph::new(lines.split_off(skip))
        .wrap(Wrap { trim: false })
        .render(text_area, buf);

    if let Some(error) = &input.error {
        Paragraph::new(Span::styled(error.clone(), Style::default().fg(Color::Red)))
            .render(error_area, buf);
    }

    let mut hints: Vec<Span<'_>> = Vec::new();
    hints.extend(key_hint("[Enter]", input.target.confirm_label()));
    hints.extend(key_hint("[Esc]", "Cancel"));
    if input.target.suggests_names() {
        hints.extend(key_hint("[Ctrl+G]", "Suggest"));
    }
    if input.target.is_multiline() {
        hints.extend(key_hint("[Alt+Enter]", "New line"));
    }
    Paragraph::new(Line::from(hints)).render(hint_area, buf);
}

/// Renders a yes/no question about `action` centered in `area`.
///
/// # Examples
///
/// ```
/// use orcganizer_tui::state::PendingAction;
/// use orcganizer_tui::widgets::render_confirm;
/// use ratatui::{buffer::Buffer, layout::Rect};
///
/// let area = Rect::new(0, 0, 80, 24);
/// let mut buf = Buffer::empty(area);
///
/// render_confirm(&PendingAction::ResetAll, area, &mut buf);
/// ```
pub fn render_confirm(action: &PendingAction, area: Rect, buf: &mut Buffer) {
    let popup = centered_rect(DIALOG_WIDTH, 6, area);
    Clear.render(popup, buf);

    let block = dialog_block("Are you sure?", Color::LightRed);
    let inner = block.inner(popup);
    block.render(popup, buf);

    let [question, _, hint] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(inner);

    Paragraph::new(Span::styled(
        action.question(),
        Style::default().fg(Color::White),
    ))
    .wrap(Wrap { trim: true })
    .render(question, buf);

    let mut hints: Vec<Span<'_>> = Vec::new();
    hints.extend(key_hint("[y]", "Yes"));
    hints.extend(key_hint("[n]", "No"));
    Paragraph::new(Line::from(hints)).render(hint, buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::TextTarget;
    use crate::test_utils::buffer_to_string;

    fn render(input: &TextInput) -> String {
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        render_prompt(input, area, &mut buf);
        buffer_to_string(&buf)
    }

    #[test]
    fn prompt_shows_title_text_and_hints() {
        let content = render(&TextInput::new(TextTarget::NewBoard, "The Order of Flow"));
        assert!(content.contains("Name your Quest board"));
        assert!(content.contains("The Order of Flow▏"));
        assert!(content.contains("[Enter] Forge Quest board"));
        assert!(content.contains("[Ctrl+G] Suggest"));
        assert!(!content.contains("New line"));
    }

    #[test]
    fn prompt_shows_error() {
        let mut input = TextInput::new(TextTarget::NewBoard, "");
        input.error = Some("enter quest name to Forge Quest board".to_string());
        assert!(render(&input).contains("enter quest name to Forge Quest board"));
    }

    #[test]
    fn notes_prompt_is_multiline() {
        let input = TextInput::new(
            TextTarget::CardNotes {
                board: "b".into(),
                column: "c".into(),
                card: "t".into(),
            },
            "first\nsecond",
        );
        let content = render(&input);
        assert!(content.contains("first"));
        assert!(content.contains("second▏"));
        assert!(content.contains("[Alt+Enter] New line"));
        assert!(!content.contains("Suggest"));
    }

    #[test]
    fn confirm_shows_question() {
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        render_confirm(
            &PendingAction::DeleteBoard {
                board: "b".into(),
                name: "The Guild".into(),
            },
            area,
            &mut buf,
        );

        let content = buffer_to_string(&buf);
        assert!(content.contains("Delete Quest board \"The Guild\"?"));
        assert!(content.contains("[y] Yes"));
        assert!(content.contains("[n] No"));
    }
}
