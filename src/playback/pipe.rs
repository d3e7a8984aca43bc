//! Pipe transfer animation.

use std::time::Duration;

use crate::playback::scope::{Cancelled, RunScope};
use crate::playback::timing::PlaybackSettings;

/// Moves a payload across the pipe in fixed increments.
#[derive(Debug, Clone, Copy)]
pub struct PipeAnimator {
    travel_distance: u32,
    step_increment: u32,
    frame_delay: Duration,
}

impl PipeAnimator {
    pub fn new(settings: &PlaybackSettings) -> Self {
        Self {
            travel_distance: settings.pipe_travel_distance,
            step_increment: settings.pipe_step_increment.max(1),
            frame_delay: settings.frame_delay(),
        }
    }

    /// Positions visited by one transfer: `0, inc, 2*inc, ...` up to the
    /// travel distance.
    pub fn positions(&self) -> impl Iterator<Item = u32> {
        (0..=self.travel_distance).step_by(self.step_increment as usize)
    }

    pub fn frame_count(&self) -> u32 {
        (self.travel_distance / self.step_increment).saturating_add(1)
    }

    /// Wall-clock length of one transfer. Saturates at `Duration::MAX`.
    pub fn duration(&self) -> Duration {
        self.frame_delay
            .checked_mul(self.frame_count())
            .unwrap_or(Duration::MAX)
    }

    /// Animate `payload` from the sending side to the receiving side.
    ///
    /// Resolves once the last frame's delay has elapsed and the active cue is
    /// cleared.
    pub async fn transfer(&self, scope: &RunScope, payload: &str) -> Result<(), Cancelled> {
        tracing::debug!(
            bytes = payload.len(),
            frames = self.frame_count(),
            "Pipe transfer started"
        );

        scope.write(|slots| {
            slots.set_pipe_message(payload);
            slots.set_pipe_position(0);
            slots.set_pipe_active(true);
        })?;

        for position in self.positions() {
            scope.write(|slots| slots.set_pipe_position(position))?;
            scope.sleep(self.frame_delay).await?;
        }

        scope.write(|slots| slots.set_pipe_active(false))
    }
}
