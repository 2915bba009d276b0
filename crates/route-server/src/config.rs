//! Server configuration from environment.

use route_core::{CoordStyle, DistanceUnit};
use route_overpass::{DEFAULT_ENDPOINT, DEFAULT_TIMEOUT_SECS};
use std::env;
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_port: u16,
    pub overpass_url: String,
    pub overpass_timeout_s: u64,
    pub distance_unit: DistanceUnit,
    pub coord_style: CoordStyle,
    /// Column label language, `en` or `de`
    pub table_lang: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            server_port: parsed("ROUTE_PORT").unwrap_or(3000),
            overpass_url: env::var("OVERPASS_URL").unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string()),
            overpass_timeout_s: parsed("OVERPASS_TIMEOUT_S").unwrap_or(DEFAULT_TIMEOUT_SECS),
            distance_unit: parsed("ROUTE_DISTANCE_UNIT").unwrap_or_default(),
            coord_style: parsed("ROUTE_COORD_FORMAT").unwrap_or_default(),
            table_lang: env::var("ROUTE_TABLE_LANG").unwrap_or_else(|_| "en".to_string()),
        }
    }
}

fn parsed<T: FromStr>(key: &str) -> Option<T> {
    let raw = env::var(key).ok()?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!("Ignoring invalid {}={:?}", key, raw);
            None
        }
    }
}
