use crate::location::LocationRequest;
use chrono_tz::Tz;
use std::path::PathBuf;
use std::time::Duration;

/// Default proximity radius for shop matching, in meters
pub const DEFAULT_NEARBY_RADIUS_M: f64 = 500.0;

/// Engine configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the local database file
    pub data_dir: PathBuf,
    /// Radius for nearby-shop matching, in meters
    pub nearby_radius_m: f64,
    /// Timeout for a location fix, in milliseconds
    pub location_timeout_ms: u64,
    /// Request a high-accuracy fix from the provider
    pub high_accuracy: bool,
    /// Operator's local timezone, used for calendar-day boundaries
    pub timezone: Tz,
    /// Log level for the tracing subscriber
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Self {
        // Pick up a .env file if the embedding app ships one
        let _ = dotenv::dotenv();

        Self {
            data_dir: std::env::var("DUKAAN_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./data")),
            nearby_radius_m: std::env::var("DUKAAN_NEARBY_RADIUS_M")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_NEARBY_RADIUS_M),
            location_timeout_ms: std::env::var("DUKAAN_LOCATION_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10_000),
            high_accuracy: std::env::var("DUKAAN_HIGH_ACCURACY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            timezone: std::env::var("DUKAAN_TIMEZONE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(chrono_tz::Asia::Kolkata),
            log_level: std::env::var("DUKAAN_LOG_LEVEL").unwrap_or_else(|_| "info".into()),
        }
    }

    /// Path of the database file inside `data_dir`
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join("dukaan.redb")
    }

    /// Location request options derived from this configuration
    ///
    /// `max_age` stays zero: every capture forces a fresh fix.
    pub fn location_request(&self) -> LocationRequest {
        LocationRequest {
            high_accuracy: self.high_accuracy,
            timeout: Duration::from_millis(self.location_timeout_ms),
            max_age: Duration::ZERO,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config {
            data_dir: PathBuf::from("./data"),
            nearby_radius_m: DEFAULT_NEARBY_RADIUS_M,
            location_timeout_ms: 10_000,
            high_accuracy: true,
            timezone: chrono_tz::Asia::Kolkata,
            log_level: "info".into(),
        };
        assert_eq!(config.database_path(), PathBuf::from("./data/dukaan.redb"));
        let request = config.location_request();
        assert!(request.high_accuracy);
        assert_eq!(request.timeout, Duration::from_secs(10));
        assert_eq!(request.max_age, Duration::ZERO);
    }
}
