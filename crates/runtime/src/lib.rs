//! Process-level wiring shared by the server binary: tracing setup,
//! backend service initialisation, and shutdown handling.

use std::sync::Arc;

use anyhow::{Context, Result};
use jackfruit_config::AppConfig;
use jackfruit_database::{initialize_database, SqlitePool, UserRepository};
use jackfruit_gateway::AppState;
use jackfruit_users::UserService;
use tracing::info;

pub mod telemetry {
    use anyhow::Result;
    use tracing_subscriber::{fmt, EnvFilter};

    /// Install the global fmt subscriber. `RUST_LOG` overrides the default
    /// `info` filter.
    pub fn init_tracing() -> Result<()> {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .try_init()
            .map_err(|error| anyhow::anyhow!("failed to set tracing subscriber: {error}"))
    }
}

#[derive(Clone)]
pub struct BackendServices {
    pub db_pool: SqlitePool,
    pub users: Arc<UserRepository>,
}

impl BackendServices {
    /// Open the database, apply migrations, and build the user store.
    pub async fn initialise(config: &AppConfig) -> Result<Self> {
        let db_pool = initialize_database(&config.database)
            .await
            .context("failed to initialise database")?;

        let users = Arc::new(UserRepository::new(db_pool.clone()));
        let user_count = users.count().await.context("failed to count users")?;
        info!(user_count, "backend services ready");

        Ok(Self { db_pool, users })
    }

    pub fn user_service(&self) -> UserService {
        UserService::new(self.users.clone())
    }

    /// Gateway state wired against this process's store.
    pub fn app_state(&self, config: &AppConfig) -> AppState {
        AppState::new(self.users.clone(), &config.auth)
    }
}

/// Resolves on Ctrl-C, or SIGTERM on Unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = tokio::signal::ctrl_c().await {
            tracing::warn!(?error, "failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(error) => {
                tracing::warn!(?error, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutdown signal received");
}
