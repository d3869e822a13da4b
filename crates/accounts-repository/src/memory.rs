//! In-memory user repository for tests and local runs without MySQL.
//!
//! Mirrors the column defaults and unique constraints of the `users` table.

use crate::traits::UserRepository;
use accounts_core::{AccountsError, AccountsResult, NewUser, User, UserId, UserRole};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// `UserRepository` backed by a vector, newest row last.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
    role_updates: AtomicUsize,
}

impl InMemoryUserRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository holding the given rows.
    #[must_use]
    pub fn with_users(users: Vec<User>) -> Self {
        Self {
            users: Mutex::new(users),
            role_updates: AtomicUsize::new(0),
        }
    }

    /// Inserts or replaces a complete row, bypassing the defaults.
    pub fn put(&self, user: User) {
        let mut users = self.lock();
        match users.iter_mut().find(|u| u.id == user.id) {
            Some(existing) => *existing = user,
            None => users.push(user),
        }
    }

    /// Number of `update_role` calls received.
    pub fn role_updates(&self) -> usize {
        self.role_updates.load(Ordering::SeqCst)
    }

    fn lock(&self) -> MutexGuard<'_, Vec<User>> {
        self.users.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_all(&self) -> AccountsResult<Vec<User>> {
        Ok(self.lock().iter().rev().cloned().collect())
    }

    async fn find_by_id(&self, id: &UserId) -> AccountsResult<Option<User>> {
        Ok(self.lock().iter().find(|u| &u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AccountsResult<Option<User>> {
        Ok(self.lock().iter().find(|u| u.email == email).cloned())
    }

    async fn insert(&self, user: &NewUser) -> AccountsResult<()> {
        let mut users = self.lock();
        if users.iter().any(|u| u.id == user.id || u.email == user.email) {
            return Err(AccountsError::Database("Unique constraint violated".to_string()));
        }
        users.push(User {
            id: user.id.clone(),
            role: UserRole::default(),
            name: user.name.clone(),
            email: user.email.clone(),
            password: user.password.clone(),
            image: None,
            activation_id: None,
            reset_password_id: None,
            is_activated: false,
            is_banned: false,
            created_at: Utc::now(),
        });
        Ok(())
    }

    async fn update_role(&self, id: &UserId, role: UserRole) -> AccountsResult<u64> {
        self.role_updates.fetch_add(1, Ordering::SeqCst);
        let mut users = self.lock();
        Ok(users
            .iter_mut()
            .find(|u| &u.id == id)
            .map_or(0, |user| {
                user.role = role;
                1
            }))
    }

    async fn delete(&self, id: &UserId) -> AccountsResult<u64> {
        let mut users = self.lock();
        let before = users.len();
        users.retain(|u| &u.id != id);
        Ok((before - users.len()) as u64)
    }

    async fn count(&self) -> AccountsResult<u64> {
        Ok(self.lock().len() as u64)
    }
}
