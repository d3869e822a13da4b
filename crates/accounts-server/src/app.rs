//! Application lifecycle: connect, migrate, wire, and shut down.

use crate::di::{build_module, AccountsModule, AccountsResolver};
use accounts_config::AppConfig;
use accounts_core::AccountsResult;
use accounts_repository::{DatabasePool, DatabasePoolInterface};
use accounts_service::UserHandlers;
use std::sync::Arc;
use tracing::info;

/// A started application holding the wired module.
pub struct App {
    config: AppConfig,
    module: Arc<AccountsModule>,
}

impl App {
    /// Connects to the database, runs migrations when enabled, builds the
    /// module and verifies the database is reachable.
    pub async fn start(config: AppConfig) -> AccountsResult<Self> {
        let db_pool = DatabasePool::connect(&config.database).await?;

        if config.database.run_migrations {
            db_pool.run_migrations().await?;
        }

        let module = build_module(&db_pool, &config.redis, &config.cache)?;
        module.database_pool().health_check().await?;

        info!("Application started");
        Ok(Self { config, module })
    }

    /// Returns the configuration the application started with.
    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Returns the user handlers.
    #[must_use]
    pub fn handlers(&self) -> Arc<dyn UserHandlers> {
        self.module.user_handlers()
    }

    /// Closes the database pool.
    pub async fn shutdown(self) {
        self.module.database_pool().close().await;
        info!("Application shutdown complete");
    }
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("environment", &self.config.app.environment)
            .finish_non_exhaustive()
    }
}
