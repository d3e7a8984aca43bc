mod actor_panel;
mod footer;
mod key_hints;
mod log_panes;
mod pipe_lane;
mod spinner;

pub use actor_panel::ActorPanel;
pub use footer::Footer;
pub use key_hints::render_key_hints;
pub use log_panes::{MessageLog, StepLog};
pub use pipe_lane::{payload_offset, PipeLane};
pub use spinner::Spinner;

use ratatui::style::Color;

pub const ACCENT_PRIMARY: Color = Color::Cyan;
pub const ACCENT_SUCCESS: Color = Color::Green;
pub const ACCENT_WARNING: Color = Color::Yellow;
pub const ACCENT_ERROR: Color = Color::Red;
pub const TEXT_PRIMARY: Color = Color::White;
pub const TEXT_MUTED: Color = Color::Gray;
pub const TEXT_FAINT: Color = Color::DarkGray;
pub const PARENT_ACCENT: Color = Color::LightBlue;
pub const CHILD_ACCENT: Color = Color::LightMagenta;
