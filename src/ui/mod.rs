pub mod app;
pub mod components;
pub mod headless;
pub mod terminal_guard;
pub mod view;

pub use app::App;
pub use headless::ConsoleSlots;
