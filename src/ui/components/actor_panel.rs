use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use crate::playback::slots::PanelState;
use crate::simulation::Side;

use super::{CHILD_ACCENT, PARENT_ACCENT, TEXT_MUTED, TEXT_PRIMARY};

/// Status and data of one simulated process
pub struct ActorPanel<'a> {
    side: Side,
    state: &'a PanelState,
}

impl<'a> ActorPanel<'a> {
    pub fn new(side: Side, state: &'a PanelState) -> Self {
        Self { side, state }
    }

    fn accent(&self) -> Color {
        match self.side {
            Side::Parent => PARENT_ACCENT,
            Side::Child => CHILD_ACCENT,
        }
    }
}

impl Widget for ActorPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let accent = self.accent();
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(accent))
            .title(Span::styled(
                format!(" {} ", self.side.label()),
                Style::default().fg(accent).add_modifier(Modifier::BOLD),
            ));

        let lines = vec![
            Line::from(vec![
                Span::styled("Status: ", Style::default().fg(TEXT_MUTED)),
                Span::styled(
                    self.state.status.clone(),
                    Style::default().fg(TEXT_PRIMARY).add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                Span::styled("Data:   ", Style::default().fg(TEXT_MUTED)),
                Span::styled(self.state.data.clone(), Style::default().fg(TEXT_PRIMARY)),
            ]),
        ];

        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}
