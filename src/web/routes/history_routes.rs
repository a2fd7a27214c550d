use axum::{extract::State, routing::get, Json, Router};
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

use crate::{
    db::{models::AqSnapshot, services::history_service},
    web::{error::AppError, AppState},
};

// Roughly a week of hourly cron-fetch rows.
const HISTORY_LIMIT: i64 = 168;

pub fn create_history_router() -> Router<Arc<AppState>> {
    Router::new().route("/", get(recent_history))
}

pub fn create_cron_router() -> Router<Arc<AppState>> {
    Router::new().route("/", get(snapshot_now))
}

async fn recent_history(
    State(app_state): State<Arc<AppState>>,
) -> Result<Json<Vec<AqSnapshot>>, AppError> {
    let snapshots = history_service::recent_snapshots(&app_state.db_pool, HISTORY_LIMIT).await?;
    Ok(Json(snapshots))
}

// Invoked by the external cron scheduler: fetch the live reading and store it.
async fn snapshot_now(State(app_state): State<Arc<AppState>>) -> Result<Json<Value>, AppError> {
    let reading = app_state.sensor.latest_reading().await?;
    let inserted = history_service::insert_snapshot(&app_state.db_pool, &reading).await?;
    info!(pm25 = inserted.pm25, "Stored air-quality snapshot.");

    Ok(Json(serde_json::json!({
        "success": true,
        "inserted": inserted,
    })))
}
