//! # Accounts Service
//!
//! User handlers for the accounts backend: input validation, cache-aside
//! reads and database writes, with failures normalized into
//! [`HandlerError`](accounts_core::HandlerError).

pub mod cache;
pub mod dto;
pub mod r#impl;
pub mod user_handlers;

pub use cache::*;
pub use dto::*;
pub use r#impl::*;
pub use user_handlers::*;
