use std::env;
use std::time::Duration;

use crate::error::FleetError;

#[derive(Debug, Clone)]
pub struct Config {
    pub fleet_api_url: String,
    pub http_timeout: Duration,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Self, FleetError> {
        let _ = dotenvy::dotenv();

        Ok(Self {
            fleet_api_url: env::var("FLEET_API_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            http_timeout: Duration::from_secs(parse_or_default("FLEET_HTTP_TIMEOUT_SECS", 10)?),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn parse_or_default<T>(key: &str, default: T) -> Result<T, FleetError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .map_err(|err| FleetError::Config(format!("invalid {key}: {err}"))),
        Err(_) => Ok(default),
    }
}
