use axum::{http::Method, routing::get, Router};
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::config::ServerConfig;
use crate::notifications::line::LineSender;
use crate::sensor::client::SensorClient;
use crate::web::routes::*;

pub mod error;
pub mod routes;

pub use error::AppError;

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub sensor: Arc<SensorClient>,
    pub line: Arc<LineSender>,
    pub config: Arc<ServerConfig>,
}

async fn health_check_handler() -> &'static str {
    "OK"
}

pub fn create_axum_router(
    db_pool: PgPool,
    sensor: Arc<SensorClient>,
    line: Arc<LineSender>,
    config: Arc<ServerConfig>,
) -> Router {
    let app_state = Arc::new(AppState {
        db_pool,
        sensor,
        line,
        config,
    });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(vec![
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any);

    Router::new()
        .route("/api/health", get(health_check_handler))
        .nest("/api/webhook", webhook_routes::create_webhook_router())
        .nest("/api/groups", group_routes::create_group_router())
        .nest("/api/alert", alert_routes::create_alert_router())
        .nest(
            "/api/school-weather",
            weather_routes::create_weather_router(),
        )
        .nest(
            "/api/school-history",
            history_routes::create_history_router(),
        )
        .nest("/api/cron-fetch", history_routes::create_cron_router())
        .with_state(app_state)
        .layer(cors)
}
