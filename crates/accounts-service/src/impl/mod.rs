//! Handler implementations.
//!
//! Trait definitions live in the parent module (`user_handlers.rs`).

pub mod user_handlers_impl;

pub use user_handlers_impl::{UserHandlersComponent, UserHandlersComponentParameters, DEFAULT_CACHE_TTL};
