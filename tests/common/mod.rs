//! Shared test utilities for pipeviz
//!
//! - Simulation fixtures shaped like real backend responses
//! - TUI terminal testing helpers

pub mod fixtures;
pub mod terminal;
