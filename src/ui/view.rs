//! Full-screen layout of the playback display.

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::playback::{PlaybackPhase, SlotState};
use crate::simulation::Side;
use crate::ui::components::{ActorPanel, Footer, MessageLog, PipeLane, Spinner, StepLog};

/// Everything drawn in one frame besides the slots themselves.
pub struct ViewContext<'a> {
    pub phase: PlaybackPhase,
    pub spinner: &'a Spinner,
    pub travel_distance: u32,
    pub backend: &'a str,
}

pub fn draw(frame: &mut Frame, state: &SlotState, ctx: &ViewContext<'_>) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(5),
            Constraint::Length(8),
            Constraint::Length(1),
        ])
        .split(frame.area());

    let actors = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(30),
            Constraint::Percentage(40),
            Constraint::Percentage(30),
        ])
        .split(rows[0]);

    frame.render_widget(ActorPanel::new(Side::Parent, &state.parent), actors[0]);
    frame.render_widget(PipeLane::new(&state.pipe, ctx.travel_distance), actors[1]);
    frame.render_widget(ActorPanel::new(Side::Child, &state.child), actors[2]);
    frame.render_widget(StepLog::new(&state.steps), rows[1]);
    frame.render_widget(MessageLog::new(&state.logs), rows[2]);
    frame.render_widget(
        Footer::new(state, ctx.phase, ctx.spinner, ctx.backend),
        rows[3],
    );
}
