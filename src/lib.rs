pub mod config;
pub mod playback;
pub mod simulation;
pub mod ui;
pub mod util;

pub use config::Config;
pub use playback::{DisplaySlots, MemorySlots, PlaybackController, PlaybackSettings, RunOutcome};
pub use simulation::{
    FileBackend, HttpBackend, SimulationBackend, SimulationError, SimulationRequest,
    SimulationResult,
};
pub use ui::App;
