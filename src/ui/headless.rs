//! Line-oriented presentation shell.
//!
//! [`ConsoleSlots`] prints appended records, actor data changes, pipe
//! transfers and the run outcome as plain lines. Individual animation frames
//! and the idle reset are not printed.

use std::io::Write;

use parking_lot::Mutex;

use crate::playback::slots::{DisplaySlots, PanelState};
use crate::playback::{LogRecord, StepRecord};
use crate::simulation::{Side, SimulationSummary};

struct ConsoleState<W> {
    out: W,
    parent: PanelState,
    child: PanelState,
    pipe_message: String,
}

pub struct ConsoleSlots<W: Write + Send> {
    state: Mutex<ConsoleState<W>>,
}

impl<W: Write + Send> ConsoleSlots<W> {
    pub fn new(out: W) -> Self {
        Self {
            state: Mutex::new(ConsoleState {
                out,
                parent: PanelState::default(),
                child: PanelState::default(),
                pipe_message: String::new(),
            }),
        }
    }

    pub fn into_inner(self) -> W {
        self.state.into_inner().out
    }

    fn line(&self, text: std::fmt::Arguments<'_>) {
        let mut state = self.state.lock();
        if let Err(e) = writeln!(state.out, "{}", text) {
            tracing::debug!(error = %e, "Failed to write console line");
        }
    }
}

impl<W: Write + Send> DisplaySlots for ConsoleSlots<W> {
    fn set_status(&self, side: Side, text: &str) {
        let mut state = self.state.lock();
        let panel = match side {
            Side::Parent => &mut state.parent,
            Side::Child => &mut state.child,
        };
        panel.status = text.to_string();
    }

    fn set_data(&self, side: Side, text: &str) {
        let changed = {
            let mut state = self.state.lock();
            let panel = match side {
                Side::Parent => &mut state.parent,
                Side::Child => &mut state.child,
            };
            let changed = panel.data != text;
            panel.data = text.to_string();
            changed
        };
        if changed {
            self.line(format_args!(
                "        {} data: {}",
                side.label().to_ascii_lowercase(),
                text
            ));
        }
    }

    fn set_pipe_message(&self, text: &str) {
        self.state.lock().pipe_message = text.to_string();
    }

    fn set_pipe_position(&self, _position: u32) {}

    fn set_pipe_active(&self, active: bool) {
        if active {
            let message = self.state.lock().pipe_message.clone();
            self.line(format_args!("[pipe]  {}", message));
        }
    }

    fn set_step_placeholder(&self, _text: &str) {}

    fn clear_steps(&self) {}

    fn append_step(&self, record: StepRecord) {
        self.line(format_args!("[step]  {}", record));
    }

    fn set_log_placeholder(&self, _text: &str) {}

    fn clear_logs(&self) {}

    fn append_log(&self, record: LogRecord) {
        self.line(format_args!("[log]   {}", record));
    }

    fn set_run_enabled(&self, _enabled: bool) {}

    fn show_error(&self, message: Option<&str>) {
        if let Some(message) = message {
            self.line(format_args!("[error] {}", message));
        }
    }

    fn show_summary(&self, summary: Option<&SimulationSummary>) {
        if let Some(summary) = summary {
            self.line(format_args!("[done]  {}", summary.describe()));
        }
    }
}
