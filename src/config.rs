use std::env;

/// Runtime configuration, loaded once at startup from the environment
/// (a `.env` file is honored via dotenv in `main`).
#[derive(Clone)]
pub struct ServerConfig {
    pub listen_addr: String,
    pub database_url: String,
    pub line_access_token: String,
    pub sensor: SensorConfig,
    /// Linked from the footer button of every alert card.
    pub dashboard_url: String,
}

#[derive(Clone)]
pub struct SensorConfig {
    pub base_url: String,
    pub latitude: String,
    pub longitude: String,
    pub station_id: String,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, String> {
        let database_url =
            env::var("DATABASE_URL").map_err(|_| "DATABASE_URL must be set".to_string())?;

        let line_access_token = env::var("LINE_ACCESS_TOKEN")
            .map_err(|_| "LINE_ACCESS_TOKEN must be set".to_string())?;

        let listen_addr =
            env::var("LISTEN_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

        let sensor = SensorConfig {
            base_url: env::var("SENSOR_BASE_URL")
                .unwrap_or_else(|_| "https://watch.kid-bright.org/diy/api".to_string()),
            latitude: env::var("SENSOR_LAT").unwrap_or_else(|_| "13.504004".to_string()),
            longitude: env::var("SENSOR_LON").unwrap_or_else(|_| "101.002182".to_string()),
            station_id: env::var("SENSOR_STATION_ID")
                .unwrap_or_else(|_| "781C3CA55E54".to_string()),
        };

        let dashboard_url = env::var("DASHBOARD_URL")
            .unwrap_or_else(|_| "https://airatbbv.vercel.app".to_string());

        Ok(ServerConfig {
            listen_addr,
            database_url,
            line_access_token,
            sensor,
            dashboard_url,
        })
    }
}
