//! Unit tests for stackup CLI
//!
//! These tests use fake ports and run fast without touching the host.

mod fallback_chain;
mod menu_command;
mod mocks;
mod state_tracker;
