use anyhow::Context;
use api::app;
use api::state::AppState;
use migration::{Migrator, MigratorTrait};
use services::media::{CloudinaryClient, CloudinarySettings};
use std::{fs, net::SocketAddr, sync::Arc};
use tracing_appender::{non_blocking::WorkerGuard, rolling};
use util::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::init().context("Failed to load configuration")?;
    let _log_guard = init_logging(config);

    tracing::info!(env = %config.env, "Starting {}", config.project_name);

    let db = db::connect(&config.database_path)
        .await
        .with_context(|| format!("Failed to open database at {}", config.database_path))?;
    Migrator::up(&db, None)
        .await
        .context("Failed to apply migrations")?;

    let media = CloudinaryClient::new(CloudinarySettings::from(config))
        .context("Failed to build media host client")?;
    let app_state = AppState::from_config(config, db, Arc::new(media));

    let addr: SocketAddr = config
        .bind_addr()
        .parse()
        .with_context(|| format!("Invalid bind address {}", config.bind_addr()))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        app(app_state).into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .context("Server crashed")
}

fn init_logging(config: &AppConfig) -> WorkerGuard {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    fs::create_dir_all("logs").ok();

    let file_appender = rolling::daily("logs", &config.log_file);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true);

    let stdout_layer = config.log_to_stdout.then(|| {
        fmt::layer()
            .with_writer(std::io::stdout)
            .with_ansi(true)
            .with_target(true)
    });

    let env_filter = EnvFilter::try_new(&config.log_level)
        .unwrap_or_else(|_| EnvFilter::new("api=info,services=info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stdout_layer)
        .init();

    guard
}
