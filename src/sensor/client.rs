use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

use crate::config::SensorConfig;

const SENSOR_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Error, Debug)]
pub enum SensorError {
    #[error("Sensor feed unreachable: {0}")]
    Unreachable(#[from] reqwest::Error),
    #[error("Sensor feed returned non-success status: {0}")]
    BadStatus(reqwest::StatusCode),
    #[error("Station {0} not found in scan results")]
    StationNotFound(String),
}

/// The latest reading for the school's station. Missing metrics default to
/// zero: the upstream DIY sensors frequently omit fields, and a zero reading
/// is preferred over failing the whole dashboard or alert run.
#[derive(Debug, Clone, Serialize)]
pub struct SensorReading {
    pub station_name: Option<String>,
    pub pm25: f64,
    pub pm10: f64,
    pub temperature: f64,
    pub humidity: f64,
    pub wind_speed: f64,
    pub wind_direction: f64,
    pub rainfall: f64,
    /// Upstream measurement timestamp (epoch millis), when present.
    pub observed_at: Option<i64>,
}

/// Client for the KidBright watch API, which returns every station near a
/// coordinate; we pick ours out of the scan by station id.
pub struct SensorClient {
    client: Client,
    config: SensorConfig,
}

impl SensorClient {
    pub fn new(config: SensorConfig) -> Self {
        let client = Client::builder()
            .timeout(SENSOR_TIMEOUT)
            // The upstream rejects requests without a browser-ish UA.
            .user_agent("Mozilla/5.0")
            .build()
            .unwrap_or_default();
        Self { client, config }
    }

    pub async fn latest_reading(&self) -> Result<SensorReading, SensorError> {
        let url = format!(
            "{}/scan?datasource=latest_data_by_station&lat={}&lon={}",
            self.config.base_url, self.config.latitude, self.config.longitude
        );

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SensorError::BadStatus(status));
        }

        let stations: Vec<Value> = response.json().await?;
        let station = find_station(&stations, &self.config.station_id)
            .ok_or_else(|| SensorError::StationNotFound(self.config.station_id.clone()))?;

        Ok(reading_from_station(station))
    }
}

/// Matches either the scan key or the profile station id; older firmware
/// reports only one of the two.
fn find_station<'a>(stations: &'a [Value], station_id: &str) -> Option<&'a Value> {
    stations.iter().find(|s| {
        s["meta"]["_key"].as_str() == Some(station_id)
            || s["_profile"]["station_id"].as_str() == Some(station_id)
    })
}

fn reading_from_station(station: &Value) -> SensorReading {
    let data = &station["data"];
    SensorReading {
        station_name: station["_profile"]["station_name"]
            .as_str()
            .map(str::to_string),
        pm25: current(data, "pm2.5"),
        pm10: current(data, "pm10"),
        temperature: current(data, "temp"),
        humidity: current(data, "humid"),
        wind_speed: current(data, "wind_speed"),
        wind_direction: current(data, "wind_direct"),
        rainfall: current(data, "rainfall"),
        observed_at: station["meta"]["_ts"].as_i64(),
    }
}

fn current(data: &Value, key: &str) -> f64 {
    data[key]["current"].as_f64().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_station() -> Value {
        json!({
            "meta": { "_key": "781C3CA55E54", "_ts": 1738569600000i64 },
            "_profile": { "station_id": "781C3CA55E54", "station_name": "Bang Pakong School" },
            "data": {
                "pm2.5": { "current": 42.0 },
                "temp": { "current": 31.5 },
                "humid": { "current": 64.0 }
            }
        })
    }

    #[test]
    fn finds_station_by_meta_key() {
        let stations = vec![json!({"meta": {"_key": "OTHER"}}), sample_station()];
        let found = find_station(&stations, "781C3CA55E54");
        assert!(found.is_some());
    }

    #[test]
    fn finds_station_by_profile_id_when_meta_key_differs() {
        let station = json!({
            "meta": { "_key": "SCAN-KEY" },
            "_profile": { "station_id": "781C3CA55E54" },
            "data": {}
        });
        let stations = vec![station];
        assert!(find_station(&stations, "781C3CA55E54").is_some());
    }

    #[test]
    fn missing_station_yields_none() {
        let stations = vec![json!({"meta": {"_key": "OTHER"}})];
        assert!(find_station(&stations, "781C3CA55E54").is_none());
    }

    #[test]
    fn missing_metrics_default_to_zero() {
        let reading = reading_from_station(&sample_station());
        assert_eq!(reading.pm25, 42.0);
        assert_eq!(reading.temperature, 31.5);
        // pm10, wind and rainfall are absent from the sample payload.
        assert_eq!(reading.pm10, 0.0);
        assert_eq!(reading.wind_speed, 0.0);
        assert_eq!(reading.rainfall, 0.0);
    }

    #[test]
    fn carries_station_name_and_timestamp() {
        let reading = reading_from_station(&sample_station());
        assert_eq!(reading.station_name.as_deref(), Some("Bang Pakong School"));
        assert_eq!(reading.observed_at, Some(1738569600000));
    }
}
