//! # Accounts Config
//!
//! Configuration management for the accounts backend.
//! Supports layered configuration from files, environment variables,
//! and runtime refresh.

mod app_config;
mod loader;
pub mod validation;

pub use app_config::*;
pub use loader::*;
pub use validation::{ConfigValidationError, ConfigValidator};
