use thiserror::Error;

/// How a failed simulation request should be reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The backend could not be reached or refused the request.
    RequestFailure,
    /// The backend answered with something that cannot be played back.
    MalformedResponse,
}

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("Simulation request failed: {0}")]
    Transport(String),

    #[error("Simulation backend returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Simulation request timed out after {0}ms")]
    Timeout(u64),

    #[error("Malformed simulation response: {0}")]
    Malformed(String),

    #[error("Failed to read simulation file: {0}")]
    Io(#[from] std::io::Error),
}

impl SimulationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SimulationError::Malformed(_) => ErrorKind::MalformedResponse,
            SimulationError::Transport(_)
            | SimulationError::Status { .. }
            | SimulationError::Timeout(_)
            | SimulationError::Io(_) => ErrorKind::RequestFailure,
        }
    }
}

impl From<reqwest::Error> for SimulationError {
    fn from(err: reqwest::Error) -> Self {
        SimulationError::Transport(err.to_string())
    }
}
