use std::sync::Arc;
use std::time::Duration;

use dotenv::dotenv;
use sqlx::postgres::PgPoolOptions;
use tracing::{error, info};
use tracing_appender::rolling;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use lombbv_server::config::ServerConfig;
use lombbv_server::notifications::line::LineSender;
use lombbv_server::sensor::client::SensorClient;
use lombbv_server::web::create_axum_router;

fn init_logging() {
    // Log to a file: JSON format, daily rotation
    let file_appender = rolling::daily("logs", "server.log");
    let file_layer = fmt::layer()
        .with_writer(file_appender)
        .with_ansi(false)
        .json();

    // Log to stdout: human-readable format
    let stdout_layer = fmt::layer().with_writer(std::io::stdout);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,sqlx::query=warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stdout_layer)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    init_logging();
    dotenv().ok();

    let config = match ServerConfig::from_env() {
        Ok(config) => Arc::new(config),
        Err(e) => {
            error!("Failed to load server configuration: {}", e);
            return Err(e.into());
        }
    };

    let db_pool = PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(10))
        .connect(&config.database_url)
        .await?;

    sqlx::migrate!("./migrations").run(&db_pool).await?;
    info!("Database migrations applied.");

    let sensor = Arc::new(SensorClient::new(config.sensor.clone()));
    let line = Arc::new(LineSender::new(config.line_access_token.clone()));

    let app = create_axum_router(db_pool, sensor, line, config.clone());

    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    info!(address = %config.listen_addr, "HTTP server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
