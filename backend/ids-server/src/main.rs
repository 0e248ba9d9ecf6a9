use ids_server::housekeeping::{CLEANUP_INTERVAL, spawn_delivery_cleanup};
use ids_server::{AppState, ServerError, WebhookMetrics, build_router, logger};

use ids_auth::WebhookVerifier;
use ids_config::Config;
use ids_db::{DeliveryRepository, PoolSettings, UserRepository};
use ids_provider::{ProviderClient, ProviderClientConfig, RetryPolicy};
use ids_reconcile::Reconciler;

use std::path::PathBuf;
use std::sync::Arc;

use log::{info, warn};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    // .env is optional
    dotenvy::dotenv().ok();

    // Load and validate configuration
    let config = Config::load()?;
    config.validate()?;

    let log_file_path: Option<PathBuf> = if let Some(ref filename) = config.logging.file {
        let log_dir = Config::config_dir()?.join(&config.logging.dir);
        std::fs::create_dir_all(&log_dir)?;
        Some(log_dir.join(filename))
    } else {
        None
    };

    // Initialize logger (before any other logging)
    logger::initialize(config.logging.level, log_file_path, config.logging.colored)?;

    info!("Starting ids-server v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    let pool = ids_db::connect(&PoolSettings {
        path: config.database_path()?,
        max_connections: config.database.max_connections,
        busy_timeout: config.database.busy_timeout(),
    })
    .await?;

    // Inbound verification
    let verifier = WebhookVerifier::new(config.webhook.secret()?, config.webhook.tolerance());

    // Outbound role push
    let provider_config =
        ProviderClientConfig::new(&config.provider.api_url, config.provider.secret_key()?)
            .with_timeout(config.provider.timeout());
    let provider = ProviderClient::new(provider_config, RetryPolicy::from(&config.retry))?;
    info!("Provider client ready: {}", config.provider.api_url);

    let reconciler = Reconciler::new(
        Arc::new(UserRepository::new(pool.clone())),
        Arc::new(provider),
        config.reconcile.match_key,
    );

    let deliveries = Arc::new(DeliveryRepository::new(pool.clone()));

    let cleanup = match config.webhook.retention_secs() {
        Some(max_age_secs) => Some(spawn_delivery_cleanup(
            deliveries.clone(),
            max_age_secs,
            CLEANUP_INTERVAL,
        )),
        None => {
            warn!("Delivery retention is 0, processed delivery ids are kept forever");
            None
        }
    };

    let app_state = AppState {
        pool: pool.clone(),
        verifier: Arc::new(verifier),
        reconciler: Arc::new(reconciler),
        deliveries,
        metrics: WebhookMetrics::new(),
    };

    let app = build_router(app_state);

    let listener = TcpListener::bind(config.bind_addr()).await?;
    info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(handle) = cleanup {
        handle.abort();
    }
    pool.close().await;
    info!("Graceful shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received SIGINT (Ctrl+C), initiating graceful shutdown"),
        Err(e) => {
            log::error!("Failed to listen for SIGINT: {}", e);
            // Without a signal handler, serve until killed
            std::future::pending::<()>().await;
        }
    }
}
