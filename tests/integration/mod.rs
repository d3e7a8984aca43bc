//! Integration tests for pipeviz
//!
//! These tests verify that multiple components work together correctly.

#[path = "../common/mod.rs"]
pub mod common;

pub mod http_backend;
pub mod playback_flow;
