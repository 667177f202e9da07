//! Domain layer: pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod component;
pub mod config;
pub mod error;
pub mod menu;
pub mod outcome;
pub mod platform;
pub mod recipes;
pub mod retry;
pub mod strategy;

pub use component::{
    Catalog, Component, ComponentReport, ComponentStatus, PayloadFile, StatusReport,
};
pub use config::{StackupConfig, validate_config_key, validate_config_value};
pub use error::{ChainError, ConfigError, LifecycleError, StartupError, StrategyFailure};
pub use outcome::{FailureClass, Outcome};
pub use retry::RetryPolicy;
pub use strategy::{Action, Check, CommandSpec, Strategy};
