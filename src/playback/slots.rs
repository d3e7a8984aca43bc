//! Display slots the playback engine writes into.
//!
//! A presentation shell implements [`DisplaySlots`]; the engine never reads
//! application state back from it. [`MemorySlots`] keeps the latest value of
//! every slot in memory and is what the terminal UI draws from.

use parking_lot::Mutex;

use crate::playback::record::{LogRecord, StepRecord};
use crate::simulation::{Side, SimulationSummary};

pub const IDLE_STATUS: &str = "Idle";
pub const DATA_PLACEHOLDER: &str = "-";
pub const STEP_LOG_PLACEHOLDER: &str = "Run the simulation to see step-by-step IPC operations.";
pub const MESSAGE_LOG_PLACEHOLDER: &str = "Logs will appear here after simulation.";

/// Write-only targets for the playback engine.
///
/// Every method takes `&self`: slots are shared between the controller and
/// whatever draws them, so implementations use interior mutability.
pub trait DisplaySlots: Send + Sync {
    fn set_status(&self, side: Side, text: &str);
    fn set_data(&self, side: Side, text: &str);

    fn set_pipe_message(&self, text: &str);
    fn set_pipe_position(&self, position: u32);
    fn set_pipe_active(&self, active: bool);

    /// Replace the step log with a single placeholder line.
    fn set_step_placeholder(&self, text: &str);
    fn clear_steps(&self);
    fn append_step(&self, record: StepRecord);

    /// Replace the message log with a single placeholder line.
    fn set_log_placeholder(&self, text: &str);
    fn clear_logs(&self);
    fn append_log(&self, record: LogRecord);

    fn set_run_enabled(&self, enabled: bool);
    fn show_error(&self, message: Option<&str>);
    fn show_summary(&self, summary: Option<&SimulationSummary>);
}

/// Return every slot to its idle default.
pub fn reset_slots(slots: &dyn DisplaySlots) {
    for side in [Side::Parent, Side::Child] {
        slots.set_status(side, IDLE_STATUS);
        slots.set_data(side, DATA_PLACEHOLDER);
    }
    slots.set_pipe_message("");
    slots.set_pipe_position(0);
    slots.set_pipe_active(false);
    slots.set_step_placeholder(STEP_LOG_PLACEHOLDER);
    slots.set_log_placeholder(MESSAGE_LOG_PLACEHOLDER);
    slots.show_error(None);
    slots.show_summary(None);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelState {
    pub status: String,
    pub data: String,
}

impl Default for PanelState {
    fn default() -> Self {
        Self {
            status: IDLE_STATUS.to_string(),
            data: DATA_PLACEHOLDER.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipeState {
    pub message: String,
    pub position: u32,
    pub active: bool,
}

/// A log slot: either a placeholder line or the appended records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogView<T> {
    pub placeholder: Option<String>,
    pub entries: Vec<T>,
}

impl<T> LogView<T> {
    fn placeholder(text: &str) -> Self {
        Self {
            placeholder: Some(text.to_string()),
            entries: Vec::new(),
        }
    }

    fn clear(&mut self) {
        self.placeholder = None;
        self.entries.clear();
    }

    fn push(&mut self, entry: T) {
        self.placeholder = None;
        self.entries.push(entry);
    }
}

/// Snapshot of everything a presentation shell shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotState {
    pub parent: PanelState,
    pub child: PanelState,
    pub pipe: PipeState,
    pub steps: LogView<StepRecord>,
    pub logs: LogView<LogRecord>,
    pub run_enabled: bool,
    pub error: Option<String>,
    pub summary: Option<SimulationSummary>,
}

impl Default for SlotState {
    fn default() -> Self {
        Self {
            parent: PanelState::default(),
            child: PanelState::default(),
            pipe: PipeState::default(),
            steps: LogView::placeholder(STEP_LOG_PLACEHOLDER),
            logs: LogView::placeholder(MESSAGE_LOG_PLACEHOLDER),
            run_enabled: true,
            error: None,
            summary: None,
        }
    }
}

impl SlotState {
    pub fn panel(&self, side: Side) -> &PanelState {
        match side {
            Side::Parent => &self.parent,
            Side::Child => &self.child,
        }
    }

    fn panel_mut(&mut self, side: Side) -> &mut PanelState {
        match side {
            Side::Parent => &mut self.parent,
            Side::Child => &mut self.child,
        }
    }

    /// True when every slot shows its idle default.
    pub fn is_idle_default(&self) -> bool {
        *self == SlotState::default()
    }
}

/// In-memory slots, read back through [`MemorySlots::snapshot`].
#[derive(Debug, Default)]
pub struct MemorySlots {
    state: Mutex<SlotState>,
}

impl MemorySlots {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> SlotState {
        self.state.lock().clone()
    }

    pub fn run_enabled(&self) -> bool {
        self.state.lock().run_enabled
    }
}

impl DisplaySlots for MemorySlots {
    fn set_status(&self, side: Side, text: &str) {
        self.state.lock().panel_mut(side).status = text.to_string();
    }

    fn set_data(&self, side: Side, text: &str) {
        self.state.lock().panel_mut(side).data = text.to_string();
    }

    fn set_pipe_message(&self, text: &str) {
        self.state.lock().pipe.message = text.to_string();
    }

    fn set_pipe_position(&self, position: u32) {
        self.state.lock().pipe.position = position;
    }

    fn set_pipe_active(&self, active: bool) {
        self.state.lock().pipe.active = active;
    }

    fn set_step_placeholder(&self, text: &str) {
        self.state.lock().steps = LogView::placeholder(text);
    }

    fn clear_steps(&self) {
        self.state.lock().steps.clear();
    }

    fn append_step(&self, record: StepRecord) {
        self.state.lock().steps.push(record);
    }

    fn set_log_placeholder(&self, text: &str) {
        self.state.lock().logs = LogView::placeholder(text);
    }

    fn clear_logs(&self) {
        self.state.lock().logs.clear();
    }

    fn append_log(&self, record: LogRecord) {
        self.state.lock().logs.push(record);
    }

    fn set_run_enabled(&self, enabled: bool) {
        self.state.lock().run_enabled = enabled;
    }

    fn show_error(&self, message: Option<&str>) {
        self.state.lock().error = message.map(str::to_string);
    }

    fn show_summary(&self, summary: Option<&SimulationSummary>) {
        self.state.lock().summary = summary.cloned();
    }
}
