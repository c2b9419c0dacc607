use std::time::Duration;

use anyhow::Context;
use neuroscan_pipeline::{populate, JsonHeaderReader, MaskCoordinates};
use neuroscan_worker::catalog::load_catalog_file;
use neuroscan_worker::config::WorkerConfig;
use neuroscan_worker::runner::run_periodically;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "neuroscan_worker=debug,neuroscan_pipeline=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = WorkerConfig::from_env().context("Invalid worker configuration")?;

    let pool = neuroscan_db::create_pool(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database pool created");

    neuroscan_db::health_check(&pool)
        .await
        .context("Database health check failed")?;

    neuroscan_db::run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;
    tracing::info!("Database migrations applied");

    if let Some(path) = &config.movie_catalog {
        load_catalog_file(&pool, path).await?;
    }

    let routine = MaskCoordinates::new(
        pool.clone(),
        JsonHeaderReader::new(config.header_root.clone()),
        config.mask_layout,
    );
    let options = config.populate_options();

    if config.run_once {
        let report = populate(&routine, &options).await?;
        tracing::info!(
            keys = report.keys_populated,
            rows = report.rows_inserted,
            failed = report.failures.len(),
            "Single populate run complete"
        );
    } else {
        tracing::info!(
            interval_secs = config.interval_secs,
            max_keys = ?config.max_keys,
            suppress_errors = config.suppress_errors,
            "Worker started"
        );
        run_periodically(
            &routine,
            &options,
            Duration::from_secs(config.interval_secs),
            shutdown_signal(),
        )
        .await;
    }

    pool.close().await;
    tracing::info!("Worker stopped");
    Ok(())
}

/// Wait for SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), stopping after the current run");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, stopping after the current run");
        }
    }
}
