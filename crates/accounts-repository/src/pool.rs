//! MySQL pool backing the accounts store.

use accounts_config::DatabaseConfig;
use accounts_core::{AccountsError, AccountsResult, Interface};
use async_trait::async_trait;
use shaku::Component;
use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use tracing::{info, warn};

/// Shared handle to the accounts database.
///
/// The repository and the server lifecycle resolve this from the module.
#[async_trait]
pub trait DatabasePoolInterface: Interface + Send + Sync {
    /// Connections used by the user repository.
    fn inner(&self) -> &MySqlPool;

    /// Round-trips `SELECT 1`; fails when no connection can be acquired.
    async fn health_check(&self) -> AccountsResult<()>;

    /// Applies pending migrations from `migrations/`, creating `users`.
    async fn run_migrations(&self) -> AccountsResult<()>;

    /// Waits for checked-out connections, then closes the pool.
    async fn close(&self);
}

/// Pool component registered in the accounts module.
#[derive(Component)]
#[shaku(interface = DatabasePoolInterface)]
pub struct DatabasePool {
    pool: MySqlPool,
}

impl DatabasePool {
    /// Opens a pool sized and timed by `[database]`.
    pub async fn connect(config: &DatabaseConfig) -> AccountsResult<Self> {
        info!(max = config.max_connections, "Opening accounts database pool");

        let pool = MySqlPoolOptions::new()
            .min_connections(config.min_connections)
            .max_connections(config.max_connections)
            .acquire_timeout(config.connect_timeout())
            .idle_timeout(Some(config.idle_timeout()))
            .connect(&config.url)
            .await
            .map_err(|e| {
                warn!(error = %e, "Accounts database unreachable");
                AccountsError::Database(format!("Failed to connect: {e}"))
            })?;

        info!("Accounts database pool ready");
        Ok(Self { pool })
    }

    /// Adopts a pool built elsewhere, such as a lazy test pool.
    #[must_use]
    pub fn with_pool(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Module parameters sharing this pool's connections.
    #[must_use]
    pub fn parameters(&self) -> DatabasePoolParameters {
        DatabasePoolParameters {
            pool: self.pool.clone(),
        }
    }
}

#[async_trait]
impl DatabasePoolInterface for DatabasePool {
    fn inner(&self) -> &MySqlPool {
        &self.pool
    }

    async fn health_check(&self) -> AccountsResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AccountsError::Database(format!("Health check failed: {e}")))?;
        Ok(())
    }

    async fn run_migrations(&self) -> AccountsResult<()> {
        info!("Applying accounts schema migrations");
        sqlx::migrate!("../../migrations")
            .run(&self.pool)
            .await
            .map_err(|e| AccountsError::Database(format!("Migration failed: {e}")))?;
        info!("Accounts schema up to date");
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
        info!("Accounts database pool closed");
    }
}

impl std::fmt::Debug for DatabasePool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabasePool")
            .field("size", &self.pool.size())
            .field("num_idle", &self.pool.num_idle())
            .finish()
    }
}
