use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Longest pipe, in abstract units.
pub const MAX_TRAVEL_DISTANCE: u32 = 100_000;
/// Longest single delay (frame or pause), one hour.
pub const MAX_DELAY_MS: u64 = 3_600_000;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    #[error("{field} must be at most {max}, got {value}")]
    TooLarge {
        field: &'static str,
        value: u64,
        max: u64,
    },
}

/// Presentation parameters of a playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackSettings {
    /// Distance the payload travels across the pipe, in abstract units.
    pub pipe_travel_distance: u32,
    /// Distance covered per animation frame.
    pub pipe_step_increment: u32,
    /// Delay after each animation frame.
    pub frame_delay_ms: u64,
    /// Pause after each step.
    pub inter_step_pause_ms: u64,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            pipe_travel_distance: 160,
            pipe_step_increment: 4,
            frame_delay_ms: 20,
            inter_step_pause_ms: 600,
        }
    }
}

impl PlaybackSettings {
    /// Settings with no delays at all; steps are rendered back to back.
    pub fn instant() -> Self {
        Self {
            frame_delay_ms: 0,
            inter_step_pause_ms: 0,
            ..Self::default()
        }
    }

    pub fn frame_delay(&self) -> Duration {
        Duration::from_millis(self.frame_delay_ms)
    }

    pub fn inter_step_pause(&self) -> Duration {
        Duration::from_millis(self.inter_step_pause_ms)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.pipe_step_increment == 0 {
            return Err(SettingsError::Zero("pipe_step_increment"));
        }
        if self.pipe_travel_distance == 0 {
            return Err(SettingsError::Zero("pipe_travel_distance"));
        }

        let limits = [
            (
                "pipe_travel_distance",
                self.pipe_travel_distance as u64,
                MAX_TRAVEL_DISTANCE as u64,
            ),
            ("frame_delay_ms", self.frame_delay_ms, MAX_DELAY_MS),
            ("inter_step_pause_ms", self.inter_step_pause_ms, MAX_DELAY_MS),
        ];
        for (field, value, max) in limits {
            if value > max {
                return Err(SettingsError::TooLarge { field, value, max });
            }
        }
        Ok(())
    }
}
