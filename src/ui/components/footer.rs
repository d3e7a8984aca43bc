use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::playback::{PlaybackPhase, SlotState};

use super::{render_key_hints, Spinner, ACCENT_ERROR, ACCENT_PRIMARY, ACCENT_SUCCESS, TEXT_MUTED};

/// Bottom line: playback status on the left, key hints on the right
pub struct Footer<'a> {
    state: &'a SlotState,
    phase: PlaybackPhase,
    spinner: &'a Spinner,
    backend: &'a str,
}

impl<'a> Footer<'a> {
    pub fn new(
        state: &'a SlotState,
        phase: PlaybackPhase,
        spinner: &'a Spinner,
        backend: &'a str,
    ) -> Self {
        Self {
            state,
            phase,
            spinner,
            backend,
        }
    }

    fn status_spans(&self) -> Vec<Span<'static>> {
        if self.phase.is_active() {
            return self.spinner.with_label(&self.phase.label(), ACCENT_PRIMARY);
        }
        if let Some(error) = &self.state.error {
            return vec![Span::styled(error.clone(), Style::default().fg(ACCENT_ERROR))];
        }
        if let Some(summary) = &self.state.summary {
            let color = if summary.success {
                ACCENT_SUCCESS
            } else {
                ACCENT_ERROR
            };
            return vec![Span::styled(summary.describe(), Style::default().fg(color))];
        }
        vec![Span::styled(
            format!("Ready · {}", self.backend),
            Style::default().fg(TEXT_MUTED),
        )]
    }
}

impl Widget for Footer<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let hints = render_key_hints(&[
            ("r", "run", self.state.run_enabled),
            ("x", "reset", true),
            ("q", "quit", true),
        ]);
        let hints_width: usize = hints.iter().map(|s| s.width()).sum();

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(hints_width as u16 + 1)])
            .split(area);

        Paragraph::new(Line::from(self.status_spans())).render(chunks[0], buf);
        Paragraph::new(Line::from(hints)).render(chunks[1], buf);
    }
}
