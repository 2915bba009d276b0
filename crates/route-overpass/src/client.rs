//! Overpass API HTTP client.

use crate::query::build_query;
use reqwest::Client;
use route_core::{FeatureElement, FeatureResponse};
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_ENDPOINT: &str = "https://overpass-api.de/api/interpreter";
pub const DEFAULT_TIMEOUT_SECS: u64 = 25;

#[derive(Debug, Error)]
pub enum OverpassError {
    #[error("Overpass request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Overpass returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to parse Overpass response: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Anything that can answer a nearby-feature query.
pub trait FeatureSource: Send + Sync {
    fn fetch_features(
        &self,
        lat: f64,
        lon: f64,
    ) -> impl Future<Output = Result<Vec<FeatureElement>, OverpassError>> + Send;
}

/// HTTP client for an Overpass interpreter endpoint.
#[derive(Debug, Clone)]
pub struct OverpassClient {
    client: Client,
    endpoint: String,
}

impl OverpassClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, OverpassError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl FeatureSource for OverpassClient {
    async fn fetch_features(&self, lat: f64, lon: f64) -> Result<Vec<FeatureElement>, OverpassError> {
        let query = build_query(lat, lon);
        tracing::debug!("Querying {} around {},{}", self.endpoint, lat, lon);

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("data", query.as_str())])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(OverpassError::Status {
                status: status.as_u16(),
                body,
            });
        }

        parse_response(&body)
    }
}

/// Elements of a JSON response body. A body without `elements` yields none.
pub fn parse_response(body: &str) -> Result<Vec<FeatureElement>, OverpassError> {
    let response: FeatureResponse = serde_json::from_str(body)?;
    Ok(response.elements)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_tolerates_missing_elements() {
        assert!(parse_response(r#"{"version":0.6}"#).unwrap().is_empty());
    }

    #[test]
    fn parse_rejects_non_json() {
        let err = parse_response("<html>rate limited</html>").unwrap_err();
        assert!(matches!(err, OverpassError::Parse(_)));
    }

    #[test]
    fn parse_reads_tags() {
        let elements = parse_response(
            r#"{"elements":[{"type":"node","id":7,"lat":54.0,"lon":10.0,"tags":{"seamark:type":"buoy"}}]}"#,
        )
        .unwrap();
        assert_eq!(elements[0].tag("seamark:type"), Some("buoy"));
    }
}
