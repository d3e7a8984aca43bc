use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::playback::slots::LogView;
use crate::playback::{LogRecord, StepRecord};
use crate::simulation::Actor;

use super::{
    ACCENT_ERROR, ACCENT_SUCCESS, ACCENT_WARNING, CHILD_ACCENT, PARENT_ACCENT, TEXT_FAINT,
    TEXT_MUTED, TEXT_PRIMARY,
};

fn placeholder_line(text: &str) -> Line<'static> {
    Line::from(Span::styled(
        text.to_string(),
        Style::default()
            .fg(TEXT_FAINT)
            .add_modifier(Modifier::ITALIC),
    ))
}

/// Render `lines` inside a titled block, keeping the newest lines visible.
fn render_tail(title: &str, lines: Vec<Line<'static>>, area: Rect, buf: &mut Buffer) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(TEXT_FAINT))
        .title(Span::styled(
            format!(" {} ", title),
            Style::default().fg(TEXT_MUTED),
        ));
    let inner = block.inner(area);
    block.render(area, buf);

    let skip = lines.len().saturating_sub(inner.height as usize);
    let visible: Vec<Line<'static>> = lines.into_iter().skip(skip).collect();
    Paragraph::new(visible).render(inner, buf);
}

fn actor_color(actor: Actor) -> Color {
    match actor {
        Actor::Parent => PARENT_ACCENT,
        Actor::Child => CHILD_ACCENT,
        Actor::System | Actor::Unknown => TEXT_MUTED,
    }
}

fn level_color(level: &str) -> Color {
    match level.to_ascii_uppercase().as_str() {
        "ERROR" | "FATAL" => ACCENT_ERROR,
        "WARN" | "WARNING" => ACCENT_WARNING,
        "INFO" => ACCENT_SUCCESS,
        _ => TEXT_MUTED,
    }
}

pub struct StepLog<'a> {
    view: &'a LogView<StepRecord>,
}

impl<'a> StepLog<'a> {
    pub fn new(view: &'a LogView<StepRecord>) -> Self {
        Self { view }
    }
}

impl Widget for StepLog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut lines = Vec::new();
        if let Some(placeholder) = &self.view.placeholder {
            lines.push(placeholder_line(placeholder));
        }
        for (i, record) in self.view.entries.iter().enumerate() {
            lines.push(Line::from(vec![
                Span::styled(format!("{:>2}. ", i + 1), Style::default().fg(TEXT_FAINT)),
                Span::styled(
                    record.title.clone(),
                    Style::default()
                        .fg(TEXT_PRIMARY)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!(" [{}]", record.actor),
                    Style::default()
                        .fg(actor_color(record.actor))
                        .add_modifier(Modifier::ITALIC),
                ),
                Span::styled(
                    format!(" - {}", record.description),
                    Style::default().fg(TEXT_MUTED),
                ),
            ]));
        }
        render_tail("Steps", lines, area, buf);
    }
}

pub struct MessageLog<'a> {
    view: &'a LogView<LogRecord>,
}

impl<'a> MessageLog<'a> {
    pub fn new(view: &'a LogView<LogRecord>) -> Self {
        Self { view }
    }
}

impl Widget for MessageLog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut lines = Vec::new();
        if let Some(placeholder) = &self.view.placeholder {
            lines.push(placeholder_line(placeholder));
        }
        for record in &self.view.entries {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("[{}] ", record.timestamp),
                    Style::default().fg(TEXT_FAINT),
                ),
                Span::styled(
                    record.level.clone(),
                    Style::default()
                        .fg(level_color(&record.level))
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!(": {}", record.message),
                    Style::default().fg(TEXT_PRIMARY),
                ),
            ]));
        }
        render_tail("Logs", lines, area, buf);
    }
}
