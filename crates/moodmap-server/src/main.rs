mod api;
mod middleware;
mod scheduler;

use std::sync::Arc;

use moodmap_db::PgHeatmapStore;
use moodmap_heatmap::{HeatmapConfig, HeatmapGenerator};
use tracing_subscriber::EnvFilter;

use crate::api::{build_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Arc::new(moodmap_core::load_app_config()?);
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    tracing::info!(env = %config.env, bind_addr = %config.bind_addr, "starting moodmap-server");

    let pool_config = moodmap_db::PoolConfig::from_app_config(&config);
    let pool = moodmap_db::connect_pool(&config.database_url, pool_config).await?;
    let applied = moodmap_db::run_migrations(&pool).await?;
    tracing::info!(applied, "migrations up to date");

    let heatmap_config = HeatmapConfig::from_app_config(&config)?;
    let heatmap = Arc::new(HeatmapGenerator::new(
        PgHeatmapStore::new(pool.clone()),
        heatmap_config,
    ));

    let _scheduler = scheduler::build_scheduler(Arc::clone(&heatmap), Arc::clone(&config)).await?;

    let app = build_app(AppState {
        pool,
        heatmap,
        default_emotion: config.default_emotion.clone(),
    });

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
