//! Cache key naming.
//!
//! Keys are `getAllUsers`, `getUserById:{id}` and `getUserByEmail:{email}`,
//! optionally namespaced as `{prefix}:{key}`.

/// Builds cache keys under an optional namespace.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheKeys {
    prefix: String,
}

impl CacheKeys {
    /// Creates a key builder. An empty prefix yields the bare key names.
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self { prefix: prefix.into() }
    }

    /// Key for the full user listing.
    #[must_use]
    pub fn all_users(&self) -> String {
        self.key("getAllUsers".to_string())
    }

    /// Key for a user looked up by ID.
    #[must_use]
    pub fn user_by_id(&self, id: &str) -> String {
        self.key(format!("getUserById:{}", id))
    }

    /// Key for a user looked up by email.
    #[must_use]
    pub fn user_by_email(&self, email: &str) -> String {
        self.key(format!("getUserByEmail:{}", email))
    }

    fn key(&self, name: String) -> String {
        if self.prefix.is_empty() {
            name
        } else {
            format!("{}:{}", self.prefix, name)
        }
    }
}
