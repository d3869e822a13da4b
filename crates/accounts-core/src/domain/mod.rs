//! Domain entities and value objects for user accounts.

mod role;
mod user;

pub use role::{UnknownRoleError, UserRole};
pub use user::{NewUser, User};
