//! Command implementations

pub mod config;
pub mod install;
pub mod menu;
pub mod remove;
pub mod runtime;
pub mod status;
pub mod version;
