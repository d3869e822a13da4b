//! # Accounts Repository
//!
//! Data access for user records.
//!
//! ```text
//! UserHandlers
//!   ↓  Arc<dyn UserRepository>
//! MySqlUserRepository
//!   ↓  Arc<dyn DatabasePoolInterface>
//! DatabasePool (sqlx MySqlPool)
//!   ↓
//! MySQL
//! ```

pub mod mysql;
pub mod pool;
pub mod traits;

#[cfg(any(test, feature = "test-util"))]
pub mod memory;

pub use mysql::*;
pub use pool::*;
pub use traits::*;

#[cfg(any(test, feature = "test-util"))]
pub use memory::InMemoryUserRepository;
