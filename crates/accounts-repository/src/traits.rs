//! Repository trait definitions.

use accounts_core::{AccountsResult, Interface, NewUser, User, UserId, UserRole};
use async_trait::async_trait;

/// User repository trait.
///
/// Writes report the number of affected rows instead of the written record;
/// callers re-read when they need it.
#[async_trait]
pub trait UserRepository: Interface + Send + Sync {
    /// Returns every user, newest first.
    async fn find_all(&self) -> AccountsResult<Vec<User>>;

    /// Finds a user by ID.
    async fn find_by_id(&self, id: &UserId) -> AccountsResult<Option<User>>;

    /// Finds a user by email.
    async fn find_by_email(&self, email: &str) -> AccountsResult<Option<User>>;

    /// Inserts a new user. Role, flags and `created_at` take column defaults.
    async fn insert(&self, user: &NewUser) -> AccountsResult<()>;

    /// Sets the role of a user.
    async fn update_role(&self, id: &UserId, role: UserRole) -> AccountsResult<u64>;

    /// Deletes a user by ID.
    async fn delete(&self, id: &UserId) -> AccountsResult<u64>;

    /// Counts all users.
    async fn count(&self) -> AccountsResult<u64>;
}
