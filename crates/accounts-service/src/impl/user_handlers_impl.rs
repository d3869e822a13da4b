//! User handler implementation.

use crate::cache::{CacheAside, CacheKeys, CacheStore};
use crate::dto::{AddRoleRequest, CreateUserRequest};
use crate::user_handlers::operations::{
    ADD_ROLE_TO_USER, CREATE_USER, DELETE_USER, GET_ALL_USERS, GET_USER_BY_EMAIL, GET_USER_BY_ID,
};
use crate::user_handlers::UserHandlers;
use accounts_core::schema::{validate_fields, UserCandidate, UserField};
use accounts_core::{AccountsError, AccountsResult, HandlerError, HandlerResult, NewUser, User, UserId, UserRole};
use accounts_repository::UserRepository;
use async_trait::async_trait;
use shaku::Component;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Lifetime of cached reads unless configured otherwise.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(10);

/// Shaku-injectable user handlers over a repository and a cache store.
#[derive(Component)]
#[shaku(interface = UserHandlers)]
pub struct UserHandlersComponent {
    #[shaku(inject)]
    user_repository: Arc<dyn UserRepository>,
    #[shaku(inject)]
    cache: Arc<dyn CacheStore>,
    #[shaku(default = DEFAULT_CACHE_TTL)]
    ttl: Duration,
    keys: CacheKeys,
}

impl UserHandlersComponent {
    /// Creates handlers with unprefixed cache keys.
    #[must_use]
    pub fn new(user_repository: Arc<dyn UserRepository>, cache: Arc<dyn CacheStore>, ttl: Duration) -> Self {
        Self {
            user_repository,
            cache,
            ttl,
            keys: CacheKeys::default(),
        }
    }

    /// Namespaces every cache key under `prefix`.
    #[must_use]
    pub fn with_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.keys = CacheKeys::new(prefix);
        self
    }

    /// Module parameters for the given cache settings.
    #[must_use]
    pub fn parameters(ttl: Duration, key_prefix: impl Into<String>) -> UserHandlersComponentParameters {
        UserHandlersComponentParameters {
            ttl,
            keys: CacheKeys::new(key_prefix),
        }
    }

    /// Check-then-save read: a cached value wins, otherwise `load` runs and a
    /// found record is cached. Absent results are not cached.
    async fn cached_lookup<F, Fut>(&self, key: &str, load: F) -> AccountsResult<Option<User>>
    where
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = AccountsResult<Option<User>>> + Send,
    {
        if let Some(user) = self.cache.check::<User>(key).await? {
            return Ok(Some(user));
        }

        let user = load().await?;
        if let Some(user) = &user {
            self.cache.save(key, self.ttl, user).await?;
        }
        Ok(user)
    }
}

fn validate(operation: &'static str, candidate: &UserCandidate<'_>, fields: &[UserField]) -> HandlerResult<()> {
    validate_fields(candidate, fields).map_err(|e| HandlerError::bad_request(operation, e))
}

fn internal(operation: &'static str) -> impl FnOnce(AccountsError) -> HandlerError {
    move |e| HandlerError::internal(operation, e)
}

#[async_trait]
impl UserHandlers for UserHandlersComponent {
    async fn list_users(&self) -> HandlerResult<Vec<User>> {
        info!(operation = GET_ALL_USERS, "Listing users");

        let key = self.keys.all_users();
        self.cache
            .cache(&key, self.ttl, || self.user_repository.find_all())
            .await
            .map_err(internal(GET_ALL_USERS))
    }

    async fn get_user_by_id(&self, id: &str) -> HandlerResult<Option<User>> {
        info!(operation = GET_USER_BY_ID, "Getting user: {}", id);

        let candidate = UserCandidate {
            id: Some(id),
            ..UserCandidate::default()
        };
        validate(GET_USER_BY_ID, &candidate, &[UserField::Id])?;

        let user_id = UserId::from(id);
        self.cached_lookup(&self.keys.user_by_id(id), || self.user_repository.find_by_id(&user_id))
            .await
            .map_err(internal(GET_USER_BY_ID))
    }

    async fn get_user_by_email(&self, email: &str) -> HandlerResult<Option<User>> {
        info!(operation = GET_USER_BY_EMAIL, "Getting user by email: {}", email);

        let candidate = UserCandidate {
            email: Some(email),
            ..UserCandidate::default()
        };
        validate(GET_USER_BY_EMAIL, &candidate, &[UserField::Email])?;

        self.cached_lookup(&self.keys.user_by_email(email), || {
            self.user_repository.find_by_email(email)
        })
        .await
        .map_err(internal(GET_USER_BY_EMAIL))
    }

    async fn create_user(&self, request: CreateUserRequest) -> HandlerResult<User> {
        info!(operation = CREATE_USER, "Creating user: {}", request.email);

        validate(
            CREATE_USER,
            &request.candidate(),
            &[UserField::Name, UserField::Email, UserField::Password],
        )?;

        let new_user = NewUser::new(request.name, request.email, request.password);
        self.user_repository
            .insert(&new_user)
            .await
            .map_err(internal(CREATE_USER))?;

        // No RETURNING in MySQL; a concurrent delete can empty this read.
        let user = self
            .user_repository
            .find_by_email(&new_user.email)
            .await
            .map_err(internal(CREATE_USER))?
            .ok_or_else(|| HandlerError::internal(CREATE_USER, AccountsError::internal("user fetch failed")))?;

        info!("User created: {}", user.id);
        Ok(user)
    }

    async fn add_role_to_user(&self, request: AddRoleRequest) -> HandlerResult<Option<User>> {
        info!(operation = ADD_ROLE_TO_USER, "Adding role {} to user: {}", request.role, request.id);

        validate(ADD_ROLE_TO_USER, &request.candidate(), &[UserField::Id, UserField::Role])?;
        let role = request
            .role
            .parse::<UserRole>()
            .map_err(|e| HandlerError::bad_request(ADD_ROLE_TO_USER, AccountsError::validation(e.to_string())))?;

        if self.get_user_by_id(&request.id).await?.is_none() {
            debug!("User {} not found, role unchanged", request.id);
            return Ok(None);
        }

        let user_id = UserId::from(request.id);
        self.user_repository
            .update_role(&user_id, role)
            .await
            .map_err(internal(ADD_ROLE_TO_USER))?;

        self.user_repository
            .find_by_id(&user_id)
            .await
            .map_err(internal(ADD_ROLE_TO_USER))
    }

    async fn delete_user(&self, id: &str) -> HandlerResult<()> {
        info!(operation = DELETE_USER, "Deleting user: {}", id);

        let candidate = UserCandidate {
            id: Some(id),
            ..UserCandidate::default()
        };
        validate(DELETE_USER, &candidate, &[UserField::Id])?;

        let deleted = self
            .user_repository
            .delete(&UserId::from(id))
            .await
            .map_err(internal(DELETE_USER))?;

        debug!("Deleted {} row(s) for user {}", deleted, id);
        Ok(())
    }
}

impl std::fmt::Debug for UserHandlersComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserHandlersComponent")
            .field("ttl", &self.ttl)
            .field("keys", &self.keys)
            .finish_non_exhaustive()
    }
}
