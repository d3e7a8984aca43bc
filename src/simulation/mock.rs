//! Mock simulation backend for deterministic testing
//!
//! Implements `SimulationBackend` to hand out a pre-configured result (or
//! failure) without any network traffic, and captures every request it
//! receives for later verification.
//!
//! # Example
//! ```no_run
//! use pipeviz::simulation::mock::MockBackend;
//! use pipeviz::simulation::{Actor, SimulationResult, Step};
//!
//! let backend = MockBackend::new(SimulationResult::new(
//!     vec![Step::new("Write", Actor::Parent).with_pipe_data("hi")],
//!     vec![],
//! ));
//! ```

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::simulation::backend::SimulationBackend;
use crate::simulation::error::SimulationError;
use crate::simulation::model::{SimulationRequest, SimulationResult};

/// Failure to simulate instead of returning the configured result
#[derive(Clone, Debug)]
pub enum MockFailure {
    Transport(String),
    Status(u16),
    Malformed(String),
}

impl MockFailure {
    fn into_error(self) -> SimulationError {
        match self {
            MockFailure::Transport(msg) => SimulationError::Transport(msg),
            MockFailure::Status(status) => SimulationError::Status {
                status,
                body: "mock failure".into(),
            },
            MockFailure::Malformed(msg) => SimulationError::Malformed(msg),
        }
    }
}

pub struct MockBackend {
    result: SimulationResult,
    failure: Option<MockFailure>,
    /// Delay before answering (simulates network latency)
    delay: Duration,
    captured_requests: Arc<Mutex<Vec<SimulationRequest>>>,
}

impl MockBackend {
    pub fn new(result: SimulationResult) -> Self {
        Self {
            result,
            failure: None,
            delay: Duration::ZERO,
            captured_requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Mock that fails every request with a transport error
    pub fn failing() -> Self {
        Self::new(SimulationResult::default())
            .failing_with(MockFailure::Transport("connection refused".into()))
    }

    pub fn failing_with(mut self, failure: MockFailure) -> Self {
        self.failure = Some(failure);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Requests received so far, in order
    pub fn captured_requests(&self) -> Vec<SimulationRequest> {
        self.captured_requests.lock().clone()
    }

    pub fn request_count(&self) -> usize {
        self.captured_requests.lock().len()
    }
}

#[async_trait]
impl SimulationBackend for MockBackend {
    fn name(&self) -> &str {
        "mock"
    }

    async fn simulate(
        &self,
        request: &SimulationRequest,
    ) -> Result<SimulationResult, SimulationError> {
        self.captured_requests.lock().push(request.clone());

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        match &self.failure {
            Some(failure) => Err(failure.clone().into_error()),
            None => Ok(self.result.clone()),
        }
    }
}
