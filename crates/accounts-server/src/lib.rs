//! # Accounts Server Library
//!
//! Composition root for the accounts backend: dependency injection wiring,
//! application lifecycle, logging and shutdown handling.

pub mod app;
pub mod di;
pub mod startup;
