use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{enable_raw_mode, EnterAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Frame, Terminal};
use tokio::task::JoinHandle;

use crate::config::Config;
use crate::playback::{MemorySlots, PlaybackController, RunOutcome};
use crate::simulation::{SimulationBackend, SimulationRequest};
use crate::ui::components::Spinner;
use crate::ui::terminal_guard::TerminalGuard;
use crate::ui::view::{draw, ViewContext};

/// Terminal presentation shell around a [`PlaybackController`].
pub struct App {
    controller: Arc<PlaybackController>,
    slots: Arc<MemorySlots>,
    request: SimulationRequest,
    backend_name: String,
    should_quit: bool,
    spinner: Spinner,
    tick_count: u32,
    run_task: Option<JoinHandle<()>>,
}

impl App {
    pub fn new(config: Config, backend: Arc<dyn SimulationBackend>) -> Self {
        let slots = Arc::new(MemorySlots::new());
        let backend_name = backend.name().to_string();
        let controller = Arc::new(PlaybackController::new(
            backend,
            slots.clone(),
            config.playback,
        ));

        Self {
            controller,
            slots,
            request: config.request,
            backend_name,
            should_quit: false,
            spinner: Spinner::new(),
            tick_count: 0,
            run_task: None,
        }
    }

    pub fn slots(&self) -> &Arc<MemorySlots> {
        &self.slots
    }

    /// Run the application main loop
    pub async fn run(&mut self, autorun: bool) -> anyhow::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let mut guard = TerminalGuard::new();

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        if autorun {
            self.start_run();
        }

        let result = self.event_loop(&mut terminal).await;

        if let Some(task) = self.run_task.take() {
            task.abort();
        }
        guard.cleanup()?;
        terminal.show_cursor()?;

        result
    }

    async fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        let mut events = EventStream::new();
        let mut ticker = tokio::time::interval(Duration::from_millis(16));

        loop {
            terminal.draw(|f| self.draw(f))?;

            tokio::select! {
                _ = ticker.tick() => {
                    // Spinner every 6 frames (~100ms)
                    self.tick_count = self.tick_count.wrapping_add(1);
                    if self.tick_count % 6 == 0 {
                        self.spinner.tick();
                    }
                }
                maybe_event = events.next() => match maybe_event {
                    Some(Ok(Event::Key(key))) => self.handle_key_event(key),
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return Err(e.into()),
                    None => break,
                },
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('r') | KeyCode::Enter => self.start_run(),
            KeyCode::Char('x') => self.reset(),
            _ => {}
        }
    }

    /// Start a playback unless the run trigger is disabled or a spawned run
    /// has not finished yet.
    pub fn start_run(&mut self) {
        if !self.slots.run_enabled() {
            tracing::debug!("Run key ignored while a playback is active");
            return;
        }
        if self.run_task.as_ref().is_some_and(|task| !task.is_finished()) {
            tracing::debug!("Run key ignored while a spawned run is pending");
            return;
        }

        let controller = self.controller.clone();
        let request = self.request.clone();
        self.run_task = Some(tokio::spawn(async move {
            match controller.run(request).await {
                Ok(RunOutcome::Completed) => {}
                Ok(outcome) => tracing::debug!(?outcome, "Playback did not complete"),
                Err(e) => tracing::warn!(error = %e, "Simulation request failed"),
            }
        }));
    }

    /// Cancel the active playback and restore the idle display.
    pub fn reset(&mut self) {
        self.controller.reset();
        if let Some(task) = self.run_task.take() {
            task.abort();
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn draw(&self, frame: &mut Frame) {
        let state = self.slots.snapshot();
        let ctx = ViewContext {
            phase: self.controller.phase(),
            spinner: &self.spinner,
            travel_distance: self.controller.settings().pipe_travel_distance,
            backend: &self.backend_name,
        };
        draw(frame, &state, &ctx);
    }
}
