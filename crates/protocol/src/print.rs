//! Printable card documents.
//!
//! A card is printed as a standalone HTML page sized like a playing card
//! (70mm by 80mm). The page has no external resources: the header pattern is
//! inlined as CSS, so the file can be opened straight from a temp directory.

use crate::card::Card;
use crate::pattern::CardPattern;

/// Escapes text for use in HTML element content and attribute values.
///
/// # Examples
///
/// ```
/// use orcganizer_protocol::print::escape_html;
///
/// assert_eq!(escape_html(r#"<a href="x">Tom & Jerry's</a>"#),
///     "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;");
/// ```
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Renders `card` as a printable HTML document.
///
/// # Examples
///
/// ```
/// use orcganizer_protocol::print::render_card_document;
/// use orcganizer_protocol::{Card, CardDraft};
///
/// let card = Card::from_draft("t-1", "seed01", CardDraft::titled("Slay <the> bug"));
/// let html = render_card_document(&card);
///
/// assert!(html.starts_with("<!doctype html>"));
/// assert!(html.contains("Slay &lt;the&gt; bug"));
/// assert!(html.contains("size: 70mm 80mm"));
/// ```
#[must_use]
pub fn render_card_document(card: &Card) -> String {
    let pattern = CardPattern::for_card(card).css();
    let title = if card.title.is_empty() { "Task" } else { card.title.as_str() };

    format!(
        r##"<!doctype html>
<html>
<head>
<meta charset="utf-8"/>
<title>Print Task</title>
<meta name="color-scheme" content="light"/>
<style>
  @page {{ size: 70mm 80mm; margin: 0; }}
  html, body {{ height: 100%; }}
  body {{
    margin: 0;
    background: #ffffff;
    color: #0a0a0a;
    font: 14px/1.4 system-ui, -apple-system, "Segoe UI", Roboto, Arial, sans-serif;
    -webkit-print-color-adjust: exact; print-color-adjust: exact;
  }}
  .card {{
    width: 70mm; height: 80mm;
    border: 1px solid #374151;
    border-radius: 14px;
    overflow: hidden;
    display: flex; flex-direction: column;
  }}
  .header {{ position: relative; background: #155e75; color: #fff; padding: 6px 8px; }}
  .meta {{ font-size: 10px; opacity: .9; margin: 0 0 2px; }}
  .title {{ font-size: 14px; font-weight: 700; margin: 0; display: flex; align-items: center; gap: 6px; }}
  .icon {{ font-size: 16px; border: 1px solid rgba(255,255,255,.25); border-radius: 8px; padding: 2px 6px; }}
  .pat {{
    position: absolute; top: 0; right: 0; bottom: 0; width: 26mm;
    opacity: .4; background-image: {pattern};
    background-repeat: no-repeat; background-position: right top; background-size: 200px 160px;
  }}
  .body {{ flex: 1; padding: 8px; white-space: pre-wrap; overflow: hidden; font-size: 13px; line-height: 1.35; }}
  .band {{
    background: #155e75; color: #fff; padding: 6px 8px;
    display: flex; align-items: center; justify-content: space-between; font-size: 11px;
  }}
</style>
</head>
<body>
  <div class="card">
    <div class="header">
      <div class="title">
        <span class="icon">{icon}</span>
        <div>
          <div class="meta">{kind}</div>
          <div>{title}</div>
        </div>
      </div>
      <div class="pat"></div>
    </div>
    <div class="body">{notes}</div>
    <div class="band"><span>PRIORITY</span><span>{stars}</span></div>
  </div>
</body>
</html>
"##,
        icon = card.icon.glyph(),
        kind = escape_html(card.task_type.label()),
        title = escape_html(title),
        notes = escape_html(&card.notes),
        stars = card.priority.stars(),
    )
}
