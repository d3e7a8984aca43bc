//! Key hint rendering for the footer.

use ratatui::{
    style::Style,
    text::Span,
};

use super::{ACCENT_PRIMARY, TEXT_FAINT, TEXT_MUTED};

/// Spans for `[(key, action, enabled)]`. Disabled hints are dimmed.
pub fn render_key_hints(hints: &[(&str, &str, bool)]) -> Vec<Span<'static>> {
    let mut spans = Vec::new();

    for (i, (key, action, enabled)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("   "));
        }

        let (key_style, action_style) = if *enabled {
            (
                Style::default().fg(ACCENT_PRIMARY),
                Style::default().fg(TEXT_MUTED),
            )
        } else {
            (Style::default().fg(TEXT_FAINT), Style::default().fg(TEXT_FAINT))
        };
        spans.push(Span::styled(key.to_string(), key_style));
        spans.push(Span::styled(format!(" {}", action), action_style));
    }

    spans
}
