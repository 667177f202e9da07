//! Infrastructure layer: concrete implementations of application port traits.
//!
//! This module contains all I/O-performing code: process execution, container
//! queries, filesystem access, configuration files, prompts and embedded
//! payloads.
//!
//! Imports from `crate::domain` and `crate::application::ports` are allowed.
//! Imports from `crate::commands` or `crate::output` are forbidden.

pub mod assets;
pub mod command_runner;
pub mod config;
pub mod docker;
pub mod executor;
pub mod fs;
pub mod host;
pub mod platform;
pub mod prompt;

pub use command_runner::TokioCommandRunner;
pub use config::YamlConfigStore;
pub use host::SystemHost;
pub use platform::HostPlatform;
pub use prompt::TerminalPrompt;
