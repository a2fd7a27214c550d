use sqlx::{PgPool, Result};

use crate::db::models::AqSnapshot;
use crate::sensor::client::SensorReading;

/// Persists one snapshot of the current reading into `aq_history`.
pub async fn insert_snapshot(pool: &PgPool, reading: &SensorReading) -> Result<AqSnapshot> {
    sqlx::query_as::<_, AqSnapshot>(
        r#"
        INSERT INTO aq_history (pm25, pm10, temperature, humidity, wind_speed, wind_direction)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, pm25, pm10, temperature, humidity, wind_speed, wind_direction, recorded_at
        "#,
    )
    .bind(reading.pm25)
    .bind(reading.pm10)
    .bind(reading.temperature)
    .bind(reading.humidity)
    .bind(reading.wind_speed)
    .bind(reading.wind_direction)
    .fetch_one(pool)
    .await
}

/// Recent snapshots, newest first.
pub async fn recent_snapshots(pool: &PgPool, limit: i64) -> Result<Vec<AqSnapshot>> {
    sqlx::query_as::<_, AqSnapshot>(
        r#"
        SELECT id, pm25, pm10, temperature, humidity, wind_speed, wind_direction, recorded_at
        FROM aq_history
        ORDER BY recorded_at DESC
        LIMIT $1
        "#,
    )
    .bind(limit)
    .fetch_all(pool)
    .await
}
