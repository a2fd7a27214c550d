use axum::{extract::State, routing::get, Json, Router};
use std::sync::Arc;

use crate::{
    sensor::client::SensorReading,
    web::{error::AppError, AppState},
};

pub fn create_weather_router() -> Router<Arc<AppState>> {
    Router::new().route("/", get(current_reading))
}

// Live reading for the dashboard. Presentation (units, gauges, fallback text)
// lives in the frontend; this just relays the station's current values.
async fn current_reading(
    State(app_state): State<Arc<AppState>>,
) -> Result<Json<SensorReading>, AppError> {
    let reading = app_state.sensor.latest_reading().await?;
    Ok(Json(reading))
}
