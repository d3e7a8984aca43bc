//! The playback engine: replays a precomputed simulation into display slots.

pub mod actor_view;
pub mod controller;
pub mod pipe;
pub mod record;
pub mod recording;
pub mod render;
pub mod scope;
pub mod slots;
pub mod timing;

pub use actor_view::{select_data, ActorStateView, DataField};
pub use controller::{PlaybackController, RunOutcome};
pub use pipe::PipeAnimator;
pub use record::{LogRecord, StepRecord};
pub use render::{LogRenderer, StepRenderer};
pub use scope::{Cancelled, PlaybackPhase, RunScope};
pub use slots::{reset_slots, DisplaySlots, MemorySlots, SlotState};
pub use timing::{PlaybackSettings, SettingsError};
