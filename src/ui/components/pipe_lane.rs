//! The pipe between the two panels, with the payload in transit.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

use crate::playback::slots::PipeState;

use super::{ACCENT_PRIMARY, TEXT_FAINT, TEXT_PRIMARY};

/// Column at which a payload `payload_width` wide starts inside a lane
/// `lane_width` wide, for `position` out of `distance`.
pub fn payload_offset(position: u32, distance: u32, lane_width: u16, payload_width: u16) -> u16 {
    let room = lane_width.saturating_sub(payload_width) as u64;
    if distance == 0 || room == 0 {
        return 0;
    }
    let position = position.min(distance) as u64;
    (room * position / distance as u64) as u16
}

pub struct PipeLane<'a> {
    state: &'a PipeState,
    travel_distance: u32,
}

impl<'a> PipeLane<'a> {
    pub fn new(state: &'a PipeState, travel_distance: u32) -> Self {
        Self {
            state,
            travel_distance,
        }
    }
}

impl Widget for PipeLane<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let pipe_style = if self.state.active {
            Style::default()
                .fg(ACCENT_PRIMARY)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(TEXT_FAINT)
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(pipe_style)
            .title(Span::styled(" Pipe ", pipe_style));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let lane_width = inner.width;
        let message: String = truncate_to_width(&self.state.message, lane_width);
        let message_width = message.width() as u16;
        let offset = payload_offset(
            self.state.position,
            self.travel_distance,
            lane_width,
            message_width,
        );

        let payload = Line::from(vec![
            Span::raw(" ".repeat(offset as usize)),
            Span::styled(
                message,
                Style::default()
                    .fg(TEXT_PRIMARY)
                    .add_modifier(Modifier::BOLD),
            ),
        ]);
        let lane = Line::from(Span::styled("═".repeat(lane_width as usize), pipe_style));

        let mut lines = vec![payload];
        if inner.height > 1 {
            lines.push(lane);
        }
        Paragraph::new(lines).render(inner, buf);
    }
}

fn truncate_to_width(text: &str, max_width: u16) -> String {
    let mut out = String::new();
    let mut width = 0usize;
    for ch in text.chars() {
        let ch_width = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if width + ch_width > max_width as usize {
            break;
        }
        width += ch_width;
        out.push(ch);
    }
    out
}
