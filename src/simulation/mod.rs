//! Simulation data and the backends that produce it.

pub mod backend;
pub mod error;
pub mod mock;
pub mod model;

pub use backend::{FileBackend, HttpBackend, SimulationBackend};
pub use error::{ErrorKind, SimulationError};
pub use model::{
    Actor, DataAfter, LogEntry, Side, SimulationRequest, SimulationResult, SimulationSummary,
    Step,
};
