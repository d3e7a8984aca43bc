//! Per-run write gate and cancellation.
//!
//! A [`RunScope`] is handed to everything that writes on behalf of one
//! playback. Writes go through [`RunScope::write`], which holds the shared run
//! lock and checks the run's token first, so once `reset()` has cancelled a run
//! under that lock the run cannot touch a slot again. Suspension points race
//! the token and return [`Cancelled`] as soon as it fires.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;

use crate::playback::slots::DisplaySlots;

/// The run's token was cancelled; stop without writing anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cancelled;

/// Where the controller is in its state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackPhase {
    #[default]
    Idle,
    Requesting,
    /// `step` is zero-based.
    Replaying {
        step: usize,
        total: usize,
    },
    LoggingResults,
}

impl PlaybackPhase {
    pub fn is_active(&self) -> bool {
        !matches!(self, PlaybackPhase::Idle)
    }

    pub fn label(&self) -> String {
        match self {
            PlaybackPhase::Idle => "Idle".to_string(),
            PlaybackPhase::Requesting => "Requesting simulation".to_string(),
            PlaybackPhase::Replaying { step, total } => {
                format!("Replaying step {}/{}", step + 1, total)
            }
            PlaybackPhase::LoggingResults => "Rendering logs".to_string(),
        }
    }
}

/// State shared by the controller and every scope it hands out.
#[derive(Debug, Default)]
pub struct RunState {
    pub(crate) phase: PlaybackPhase,
    /// Token of the active run, if any.
    pub(crate) token: Option<CancellationToken>,
}

pub struct RunScope {
    token: CancellationToken,
    slots: Arc<dyn DisplaySlots>,
    state: Arc<Mutex<RunState>>,
}

impl RunScope {
    /// Scope with its own run state, for driving components outside a
    /// controller.
    pub fn new(slots: Arc<dyn DisplaySlots>) -> Self {
        Self::attached(
            slots,
            Arc::new(Mutex::new(RunState::default())),
            CancellationToken::new(),
        )
    }

    pub(crate) fn attached(
        slots: Arc<dyn DisplaySlots>,
        state: Arc<Mutex<RunState>>,
        token: CancellationToken,
    ) -> Self {
        Self {
            token,
            slots,
            state,
        }
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Run `f` against the slots unless this run has been cancelled.
    pub fn write<R>(&self, f: impl FnOnce(&dyn DisplaySlots) -> R) -> Result<R, Cancelled> {
        let _state = self.state.lock();
        if self.token.is_cancelled() {
            return Err(Cancelled);
        }
        Ok(f(self.slots.as_ref()))
    }

    /// Like [`RunScope::write`], also moving the controller to `phase`.
    pub fn write_in<R>(
        &self,
        phase: PlaybackPhase,
        f: impl FnOnce(&dyn DisplaySlots) -> R,
    ) -> Result<R, Cancelled> {
        let mut state = self.state.lock();
        if self.token.is_cancelled() {
            return Err(Cancelled);
        }
        state.phase = phase;
        Ok(f(self.slots.as_ref()))
    }

    /// Final write of a run: applies `f`, returns to idle and releases the
    /// run's token.
    pub fn finish<R>(&self, f: impl FnOnce(&dyn DisplaySlots) -> R) -> Result<R, Cancelled> {
        let mut state = self.state.lock();
        if self.token.is_cancelled() {
            return Err(Cancelled);
        }
        state.phase = PlaybackPhase::Idle;
        state.token = None;
        Ok(f(self.slots.as_ref()))
    }

    pub async fn sleep(&self, duration: Duration) -> Result<(), Cancelled> {
        self.until(tokio::time::sleep(duration)).await
    }

    /// Await `future` unless the run is cancelled first.
    pub async fn until<F: Future>(&self, future: F) -> Result<F::Output, Cancelled> {
        tokio::select! {
            biased;
            _ = self.token.cancelled() => Err(Cancelled),
            output = future => Ok(output),
        }
    }
}
