//! Nearest seamark lookup against the Overpass API.
//!
//! Builds the fixed feature query, fetches it once and ranks the result into
//! chart-style labels.

pub mod client;
pub mod query;

pub use client::{parse_response, FeatureSource, OverpassClient, OverpassError, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT_SECS};
pub use query::build_query;

use route_core::nearest_labels;

/// Labels of the features nearest to `(lat, lon)`, closest first.
///
/// `Some(vec![])` means the service answered with nothing nearby; `None`
/// means the lookup itself failed and was logged.
pub async fn lookup_labels<S: FeatureSource>(source: &S, lat: f64, lon: f64) -> Option<Vec<String>> {
    match source.fetch_features(lat, lon).await {
        Ok(elements) => {
            let found = elements.len();
            let labels = nearest_labels(elements, lat, lon);
            tracing::info!(
                "Seamark lookup at {:.5},{:.5}: {} features, {} labels",
                lat,
                lon,
                found,
                labels.len()
            );
            Some(labels)
        }
        Err(e) => {
            tracing::error!("Error fetching nearest seamark label: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use route_core::FeatureElement;

    enum FakeSource {
        Elements(Vec<FeatureElement>),
        Broken,
    }

    impl FeatureSource for FakeSource {
        async fn fetch_features(&self, _lat: f64, _lon: f64) -> Result<Vec<FeatureElement>, OverpassError> {
            match self {
                FakeSource::Elements(elements) => Ok(elements.clone()),
                FakeSource::Broken => Err(parse_response("not json").unwrap_err()),
            }
        }
    }

    fn node(id: i64, lat: f64, lon: f64, tags: &[(&str, &str)]) -> FeatureElement {
        FeatureElement {
            element_type: "node".into(),
            id,
            lat: Some(lat),
            lon: Some(lon),
            center: None,
            tags: tags.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
        }
    }

    #[tokio::test]
    async fn zero_results_are_an_empty_list() {
        let labels = lookup_labels(&FakeSource::Elements(Vec::new()), 54.3, 10.1).await;
        assert_eq!(labels, Some(Vec::new()));
    }

    #[tokio::test]
    async fn failed_fetch_is_none() {
        assert_eq!(lookup_labels(&FakeSource::Broken, 54.3, 10.1).await, None);
    }

    #[tokio::test]
    async fn labels_are_sorted_by_distance() {
        let source = FakeSource::Elements(vec![
            node(1, 54.40, 10.1, &[("place", "village"), ("name", "Far")]),
            node(2, 54.31, 10.1, &[("seamark:type", "beacon_cardinal")]),
        ]);
        let labels = lookup_labels(&source, 54.3, 10.1).await.unwrap();
        assert_eq!(labels, vec!["Beacon (0.6 sm)".to_string(), "Far (6.0 sm)".to_string()]);
    }
}
