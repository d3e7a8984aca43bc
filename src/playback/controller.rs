//! Playback orchestration.
//!
//! [`PlaybackController::run`] requests a simulation and replays it step by
//! step: step record, actor panel update, optional pipe transfer, pause. Log
//! entries are rendered once every step is done. Only one playback is active
//! at a time; [`PlaybackController::reset`] cancels it and restores the idle
//! display.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;
use uuid::Uuid;

use crate::playback::actor_view::ActorStateView;
use crate::playback::pipe::PipeAnimator;
use crate::playback::render::{LogRenderer, StepRenderer};
use crate::playback::scope::{Cancelled, PlaybackPhase, RunScope, RunState};
use crate::playback::slots::{reset_slots, DisplaySlots};
use crate::playback::timing::PlaybackSettings;
use crate::simulation::{SimulationBackend, SimulationError, SimulationRequest, SimulationResult};

/// How a call to [`PlaybackController::run`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every step and log entry was rendered.
    Completed,
    /// The run was invalidated by `reset()` before it finished.
    Cancelled,
    /// Another playback was already active; nothing was done.
    Rejected,
}

pub struct PlaybackController {
    backend: Arc<dyn SimulationBackend>,
    slots: Arc<dyn DisplaySlots>,
    settings: PlaybackSettings,
    state: Arc<Mutex<RunState>>,
    step_renderer: StepRenderer,
    log_renderer: LogRenderer,
    actor_view: ActorStateView,
    pipe: PipeAnimator,
}

impl PlaybackController {
    pub fn new(
        backend: Arc<dyn SimulationBackend>,
        slots: Arc<dyn DisplaySlots>,
        settings: PlaybackSettings,
    ) -> Self {
        Self {
            backend,
            slots,
            pipe: PipeAnimator::new(&settings),
            settings,
            state: Arc::new(Mutex::new(RunState::default())),
            step_renderer: StepRenderer,
            log_renderer: LogRenderer,
            actor_view: ActorStateView,
        }
    }

    pub fn settings(&self) -> &PlaybackSettings {
        &self.settings
    }

    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    pub fn phase(&self) -> PlaybackPhase {
        self.state.lock().phase
    }

    pub fn is_running(&self) -> bool {
        self.phase().is_active()
    }

    /// Request a simulation and play it back.
    ///
    /// Returns `Err` only when the backend fails; the error is also shown in
    /// the error slot and the run trigger is re-enabled.
    pub async fn run(&self, request: SimulationRequest) -> Result<RunOutcome, SimulationError> {
        let Some(scope) = self.begin() else {
            tracing::debug!("Run ignored: a playback is already active");
            return Ok(RunOutcome::Rejected);
        };

        let run_id = Uuid::new_v4();
        let span = tracing::info_span!("playback", %run_id, backend = %self.backend.name());

        async move {
            tracing::info!("Playback started");
            let outcome = match self.play(&scope, &request).await {
                Ok(Ok(())) => Ok(RunOutcome::Completed),
                Ok(Err(err)) => self.fail(&scope, err),
                Err(Cancelled) => Ok(RunOutcome::Cancelled),
            };
            match &outcome {
                Ok(outcome) => tracing::info!(?outcome, "Playback finished"),
                Err(err) => tracing::warn!(error = %err, kind = ?err.kind(), "Playback failed"),
            }
            outcome
        }
        .instrument(span)
        .await
    }

    /// Cancel any active playback and return every slot to its idle default.
    pub fn reset(&self) {
        let mut state = self.state.lock();
        if let Some(token) = state.token.take() {
            tracing::info!("Reset cancelled the active playback");
            token.cancel();
        }
        state.phase = PlaybackPhase::Idle;
        reset_slots(self.slots.as_ref());
        self.slots.set_run_enabled(true);
    }

    /// Claim the controller for a new run: fresh token, idle display, trigger
    /// disabled. `None` if a run is already active.
    fn begin(&self) -> Option<RunScope> {
        let mut state = self.state.lock();
        if state.phase.is_active() {
            return None;
        }

        let token = CancellationToken::new();
        if let Some(stale) = state.token.replace(token.clone()) {
            stale.cancel();
        }
        state.phase = PlaybackPhase::Requesting;

        reset_slots(self.slots.as_ref());
        self.slots.set_run_enabled(false);

        Some(RunScope::attached(
            self.slots.clone(),
            self.state.clone(),
            token,
        ))
    }

    /// Drive one run. The outer `Result` is cancellation, the inner one the
    /// backend outcome.
    async fn play(
        &self,
        scope: &RunScope,
        request: &SimulationRequest,
    ) -> Result<Result<(), SimulationError>, Cancelled> {
        let result = match scope.until(self.backend.simulate(request)).await? {
            Ok(result) => result,
            Err(err) => return Ok(Err(err)),
        };

        tracing::info!(
            steps = result.steps.len(),
            logs = result.logs.len(),
            "Simulation received"
        );

        self.replay(scope, &result).await?;
        Ok(Ok(()))
    }

    async fn replay(&self, scope: &RunScope, result: &SimulationResult) -> Result<(), Cancelled> {
        let total = result.steps.len();

        scope.write(|slots| {
            slots.clear_steps();
            slots.clear_logs();
        })?;

        for (index, step) in result.steps.iter().enumerate() {
            tracing::debug!(step = index, actor = %step.actor, title = %step.title, "Replaying step");

            scope.write_in(PlaybackPhase::Replaying { step: index, total }, |slots| {
                self.step_renderer.render(slots, step);
                self.actor_view.update(slots, step);
            })?;

            if let Some(payload) = step.pipe_payload() {
                self.pipe.transfer(scope, payload).await?;
            }

            scope.sleep(self.settings.inter_step_pause()).await?;
        }

        scope.write_in(PlaybackPhase::LoggingResults, |slots| {
            for entry in &result.logs {
                self.log_renderer.render(slots, entry);
            }
            if let Some(summary) = &result.summary {
                slots.show_summary(Some(summary));
            }
        })?;

        scope.finish(|slots| slots.set_run_enabled(true))
    }

    fn fail(&self, scope: &RunScope, err: SimulationError) -> Result<RunOutcome, SimulationError> {
        let message = err.to_string();
        match scope.finish(|slots| {
            slots.show_error(Some(&message));
            slots.set_run_enabled(true);
        }) {
            Ok(()) => Err(err),
            Err(Cancelled) => Ok(RunOutcome::Cancelled),
        }
    }
}
