//! Slot sink that records every write, for tests.
//!
//! [`RecordingSlots`] forwards to a [`MemorySlots`] (so the latest state can
//! still be inspected) and keeps an ordered journal of each call together with
//! the tokio clock reading at the time of the write. Under a paused clock the
//! timestamps are exact, which lets tests assert on animation and pause timing.

use parking_lot::Mutex;
use tokio::time::Instant;

use crate::playback::record::{LogRecord, StepRecord};
use crate::playback::slots::{DisplaySlots, MemorySlots, SlotState};
use crate::simulation::{Side, SimulationSummary};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotWrite {
    Status(Side, String),
    Data(Side, String),
    PipeMessage(String),
    PipePosition(u32),
    PipeActive(bool),
    StepPlaceholder(String),
    StepsCleared,
    Step(StepRecord),
    LogPlaceholder(String),
    LogsCleared,
    Log(LogRecord),
    RunEnabled(bool),
    Error(Option<String>),
    Summary(Option<SimulationSummary>),
}

#[derive(Debug, Default)]
pub struct RecordingSlots {
    inner: MemorySlots,
    journal: Mutex<Vec<(Instant, SlotWrite)>>,
}

impl RecordingSlots {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> SlotState {
        self.inner.snapshot()
    }

    /// Every write so far, oldest first.
    pub fn writes(&self) -> Vec<SlotWrite> {
        self.journal.lock().iter().map(|(_, w)| w.clone()).collect()
    }

    /// Every write so far with the time it happened.
    pub fn timed_writes(&self) -> Vec<(Instant, SlotWrite)> {
        self.journal.lock().clone()
    }

    pub fn clear_journal(&self) {
        self.journal.lock().clear();
    }

    /// Number of pipe transfers started (one `PipeActive(true)` each).
    pub fn transfer_count(&self) -> usize {
        self.journal
            .lock()
            .iter()
            .filter(|(_, w)| *w == SlotWrite::PipeActive(true))
            .count()
    }

    fn record(&self, write: SlotWrite) {
        self.journal.lock().push((Instant::now(), write));
    }
}

impl DisplaySlots for RecordingSlots {
    fn set_status(&self, side: Side, text: &str) {
        self.record(SlotWrite::Status(side, text.to_string()));
        self.inner.set_status(side, text);
    }

    fn set_data(&self, side: Side, text: &str) {
        self.record(SlotWrite::Data(side, text.to_string()));
        self.inner.set_data(side, text);
    }

    fn set_pipe_message(&self, text: &str) {
        self.record(SlotWrite::PipeMessage(text.to_string()));
        self.inner.set_pipe_message(text);
    }

    fn set_pipe_position(&self, position: u32) {
        self.record(SlotWrite::PipePosition(position));
        self.inner.set_pipe_position(position);
    }

    fn set_pipe_active(&self, active: bool) {
        self.record(SlotWrite::PipeActive(active));
        self.inner.set_pipe_active(active);
    }

    fn set_step_placeholder(&self, text: &str) {
        self.record(SlotWrite::StepPlaceholder(text.to_string()));
        self.inner.set_step_placeholder(text);
    }

    fn clear_steps(&self) {
        self.record(SlotWrite::StepsCleared);
        self.inner.clear_steps();
    }

    fn append_step(&self, record: StepRecord) {
        self.record(SlotWrite::Step(record.clone()));
        self.inner.append_step(record);
    }

    fn set_log_placeholder(&self, text: &str) {
        self.record(SlotWrite::LogPlaceholder(text.to_string()));
        self.inner.set_log_placeholder(text);
    }

    fn clear_logs(&self) {
        self.record(SlotWrite::LogsCleared);
        self.inner.clear_logs();
    }

    fn append_log(&self, record: LogRecord) {
        self.record(SlotWrite::Log(record.clone()));
        self.inner.append_log(record);
    }

    fn set_run_enabled(&self, enabled: bool) {
        self.record(SlotWrite::RunEnabled(enabled));
        self.inner.set_run_enabled(enabled);
    }

    fn show_error(&self, message: Option<&str>) {
        self.record(SlotWrite::Error(message.map(str::to_string)));
        self.inner.show_error(message);
    }

    fn show_summary(&self, summary: Option<&SimulationSummary>) {
        self.record(SlotWrite::Summary(summary.cloned()));
        self.inner.show_summary(summary);
    }
}
