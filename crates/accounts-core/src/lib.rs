//! # Accounts Core
//!
//! Core types, field schema, and error definitions for the accounts backend.
//! Every other crate in the workspace builds on these.

pub mod domain;
pub mod error;
pub mod id;
pub mod result;
pub mod schema;
pub mod validation;

pub use domain::*;
pub use error::*;
pub use id::*;
pub use result::*;

// Re-export shaku for dependency injection
pub use shaku::Interface;
