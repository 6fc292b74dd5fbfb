//! Application assembly and serve loop.

use crate::startup::print_startup_info;
use axum::Router;
use roster_config::{AppConfig, ServerConfig};
use roster_core::{RosterError, RosterResult};
use roster_repository::{create_pool, DatabasePool, PgUserStore, UserStore};
use roster_rest::{create_router, AppState};
use roster_service::{CacheInterface, RedisCacheService, UserService, UserServiceImpl};
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};

/// A fully wired server, ready to bind.
pub struct App {
    config: AppConfig,
    router: Router,
    db_pool: Arc<DatabasePool>,
    cache_enabled: bool,
}

impl App {
    /// Connects to the record store, prepares the cache pool and builds the router.
    pub async fn build(config: AppConfig) -> RosterResult<Self> {
        let db_pool = create_pool(&config.database).await?;

        let store: Arc<dyn UserStore> = Arc::new(PgUserStore::new(Arc::clone(&db_pool)));
        let cache: Arc<dyn CacheInterface> = Arc::new(RedisCacheService::from_config(&config.redis)?);
        let cache_enabled = cache.is_enabled();

        let router = build_router(store, cache, &config.server);

        Ok(Self {
            config,
            router,
            db_pool,
            cache_enabled,
        })
    }

    /// Serves requests until a shutdown signal arrives.
    pub async fn run(self) -> RosterResult<()> {
        let addr = self.config.server.addr();

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| RosterError::Internal(format!("Failed to bind {}: {}", addr, e)))?;

        print_startup_info(&addr, &self.config.database.display_target(), self.cache_enabled);
        info!("Starting REST server on http://{}", addr);

        let served = axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| RosterError::Internal(format!("REST server error: {}", e)));

        self.db_pool.close().await;
        served?;

        info!("Server shutdown complete");
        Ok(())
    }
}

/// Builds the HTTP router over the given store and cache.
pub fn build_router(
    store: Arc<dyn UserStore>,
    cache: Arc<dyn CacheInterface>,
    server_config: &ServerConfig,
) -> Router {
    let user_service: Arc<dyn UserService> = Arc::new(UserServiceImpl::new(store, cache));
    create_router(AppState::new(user_service), server_config)
}

/// Resolves on Ctrl+C or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received terminate signal, initiating graceful shutdown...");
        }
    }
}
