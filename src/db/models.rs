use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// One registered chat group or room. `group_id` is the platform-issued opaque
/// identifier and the table's primary key; `added_at` is fixed at first insert.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LineGroup {
    pub group_id: String,
    pub added_at: DateTime<Utc>,
}

/// A stored air-quality snapshot, one row per cron-fetch run.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AqSnapshot {
    pub id: i32,
    pub pm25: f64,
    pub pm10: f64,
    pub temperature: f64,
    pub humidity: f64,
    pub wind_speed: f64,
    pub wind_direction: f64,
    pub recorded_at: DateTime<Utc>,
}
