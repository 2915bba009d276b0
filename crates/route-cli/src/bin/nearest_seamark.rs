//! Print labels of the navigational features nearest to a position.
//!
//! Usage:
//!   cargo run -p route-cli --bin nearest_seamark -- --lat 54.3917 --lon 10.1895

use anyhow::{bail, Result};
use clap::Parser;
use route_cli::init_tracing;
use route_overpass::{lookup_labels, OverpassClient, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT_SECS};
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(author, version, about = "Nearest seamarks and places from the Overpass API")]
struct Args {
    /// Latitude in degrees
    #[arg(long, allow_hyphen_values = true)]
    lat: f64,

    /// Longitude in degrees
    #[arg(long, allow_hyphen_values = true)]
    lon: f64,

    /// Overpass interpreter URL
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    url: String,

    /// Request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing()?;
    let args = Args::parse();

    let client = OverpassClient::new(args.url, Duration::from_secs(args.timeout))?;
    let Some(labels) = lookup_labels(&client, args.lat, args.lon).await else {
        bail!("Lookup against {} failed", client.endpoint());
    };

    if labels.is_empty() {
        println!("No options available.");
        return Ok(());
    }
    for (i, label) in labels.iter().enumerate() {
        println!("{:>2}. {}", i + 1, label);
    }
    Ok(())
}
