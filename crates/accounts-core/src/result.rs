//! Result type aliases for the accounts backend.

use crate::{AccountsError, HandlerError};

/// A specialized `Result` type for store, cache, and validation operations.
pub type AccountsResult<T> = Result<T, AccountsError>;

/// Result returned by handler operations.
pub type HandlerResult<T> = Result<T, HandlerError>;
