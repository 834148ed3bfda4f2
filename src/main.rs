//! Session API server entry point.

use std::sync::Arc;
use std::time::Duration;

use session_api::adapters::http::{app_router, AppState};
use session_api::adapters::{
    Argon2PasswordHasher, InMemorySessionStore, PostgresUserRepository, RedisSessionStore,
};
use session_api::config::{AppConfig, SessionStoreKind};
use session_api::ports::SessionStore;
use tokio::sync::watch;
use tracing_subscriber::EnvFilter;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config);
    tracing::info!(environment = ?config.server.environment, "Starting session API");

    let pool = config
        .database
        .pool_options()
        .connect(&config.database.url)
        .await?;
    if config.database.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Database migrations applied");
    }

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let sessions = session_store(&config, shutdown_rx).await?;

    let state = AppState::new(
        Arc::new(PostgresUserRepository::new(pool)),
        Arc::new(Argon2PasswordHasher::default()),
        sessions,
        config.session.clone(),
    )
    .with_request_timeout(config.server.request_timeout());

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Listening");

    axum::serve(listener, app_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Stops the in-memory session purge, if one is running
    let _ = shutdown_tx.send(true);
    tracing::info!("Session API stopped");
    Ok(())
}

/// `RUST_LOG` wins over the configured filter. Production logs are JSON.
fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if config.is_production() {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn session_store(
    config: &AppConfig,
    shutdown: watch::Receiver<bool>,
) -> Result<Arc<dyn SessionStore>, BoxError> {
    match (config.session.store, &config.redis) {
        (SessionStoreKind::Redis, Some(redis_config)) => {
            let client = redis::Client::open(redis_config.url.as_str())?;
            let conn = client.get_multiplexed_async_connection().await?;
            tracing::info!("Using Redis session store");
            Ok(Arc::new(
                RedisSessionStore::new(conn).with_key_prefix(redis_config.key_prefix.clone()),
            ))
        }
        (SessionStoreKind::Redis, None) => {
            Err("redis session store selected without redis config".into())
        }
        (SessionStoreKind::Memory, _) => {
            tracing::warn!("Using in-memory session store; sessions are lost on restart");
            let store = InMemorySessionStore::new();
            let purger = store.clone();
            let period = Duration::from_secs(config.session.purge_interval_secs);
            tokio::spawn(async move { purger.run_purge(period, shutdown).await });
            Ok(Arc::new(store))
        }
    }
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown signal received"),
        Err(e) => {
            tracing::error!(error = %e, "Failed to listen for shutdown signal");
            std::future::pending::<()>().await
        }
    }
}
