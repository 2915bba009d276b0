//! Live query against the public Overpass endpoint.
//!
//! Run with `cargo test -p route-overpass -- --ignored`.

use route_overpass::{lookup_labels, OverpassClient, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT_SECS};
use std::time::Duration;

#[tokio::test]
#[ignore]
async fn kiel_fjord_has_nearby_features() {
    let client = OverpassClient::new(DEFAULT_ENDPOINT, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
        .expect("client");

    // Friedrichsort light
    let labels = lookup_labels(&client, 54.3917, 10.1895)
        .await
        .expect("lookup should reach the service");

    assert!(!labels.is_empty());
    assert!(labels.len() <= 10);
    assert!(labels.iter().all(|l| l.ends_with(" sm)")));
}
