//! Append-only renderers for the step log and the message log.

use crate::playback::record::{LogRecord, StepRecord};
use crate::playback::slots::DisplaySlots;
use crate::simulation::{LogEntry, Step};

#[derive(Debug, Clone, Copy, Default)]
pub struct StepRenderer;

impl StepRenderer {
    pub fn render(&self, slots: &dyn DisplaySlots, step: &Step) {
        slots.append_step(StepRecord::from(step));
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LogRenderer;

impl LogRenderer {
    pub fn render(&self, slots: &dyn DisplaySlots, entry: &LogEntry) {
        slots.append_log(LogRecord::from(entry));
    }
}
