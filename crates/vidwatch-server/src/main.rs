mod api;
mod middleware;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;
use vidwatch_classify::{ClassifierConfig, HttpClassifier};

use crate::api::{build_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = vidwatch_core::load_app_config_from_env()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let pool_config = vidwatch_db::PoolConfig::from_app_config(&config);
    let pool = vidwatch_db::connect_pool(&config.database_url, pool_config).await?;
    vidwatch_db::run_migrations(&pool).await?;

    // One classifier for the process lifetime; every analysis request
    // borrows it.
    let classifier = Arc::new(HttpClassifier::from_config(
        &ClassifierConfig::from_app_config(&config),
    )?);

    let app = build_app(AppState {
        pool,
        classifier,
        classify_concurrency: config.classify_concurrency,
    });

    tracing::info!(addr = %config.bind_addr, "starting vidwatch server");
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
