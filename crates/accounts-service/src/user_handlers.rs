//! User handler trait definition.

use crate::dto::{AddRoleRequest, CreateUserRequest};
use accounts_core::{HandlerResult, Interface, User};
use async_trait::async_trait;

/// Operation names carried by [`HandlerError`](accounts_core::HandlerError)s.
pub mod operations {
    pub const GET_ALL_USERS: &str = "getAllUsers";
    pub const GET_USER_BY_ID: &str = "getUserById";
    pub const GET_USER_BY_EMAIL: &str = "getUserByEmail";
    pub const CREATE_USER: &str = "createUser";
    pub const ADD_ROLE_TO_USER: &str = "addRoleToUser";
    pub const DELETE_USER: &str = "deleteUser";
}

/// Entry points for user operations.
///
/// Each operation validates its input before touching the store. Input
/// errors fail with status 400, store and cache errors with 500. Reads go
/// through the cache; writes never invalidate it, so readers may see data up
/// to one TTL old.
#[async_trait]
pub trait UserHandlers: Interface + Send + Sync {
    /// Lists every user.
    async fn list_users(&self) -> HandlerResult<Vec<User>>;

    /// Gets a user by ID. Unknown IDs yield `None`.
    async fn get_user_by_id(&self, id: &str) -> HandlerResult<Option<User>>;

    /// Gets a user by email. Unknown emails yield `None`.
    async fn get_user_by_email(&self, email: &str) -> HandlerResult<Option<User>>;

    /// Creates a user and returns the stored record.
    async fn create_user(&self, request: CreateUserRequest) -> HandlerResult<User>;

    /// Sets the role of an existing user and returns the updated record.
    ///
    /// Returns `None` without writing when the user does not exist. The
    /// existence check is a [`get_user_by_id`](Self::get_user_by_id) call,
    /// so its failures carry that operation's name.
    async fn add_role_to_user(&self, request: AddRoleRequest) -> HandlerResult<Option<User>>;

    /// Deletes a user. Deleting an unknown ID succeeds.
    async fn delete_user(&self, id: &str) -> HandlerResult<()>;
}
