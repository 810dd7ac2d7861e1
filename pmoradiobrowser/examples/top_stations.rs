//! Example: List the most voted stations of a country
//!
//! Run with: cargo run -p pmoradiobrowser --example top_stations -- AT

use pmoradiobrowser::{ListOptions, Order, RadioBrowserClient, RadioBrowserConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let country = std::env::args().nth(1).unwrap_or_else(|| "AT".to_string());

    let config = RadioBrowserConfig::load(None)?;
    let client = RadioBrowserClient::builder().config(config).build()?;

    let stats = client.stats().await?;
    println!(
        "Radio Browser {}: {} stations ({} working)\n",
        stats.software_version,
        stats.stations,
        stats.working_stations()
    );

    let options = ListOptions::new().order(Order::Votes).reverse(true).limit(10);
    let stations = client.stations_by_country_code(&country, options).await?;

    println!("=== Top {} stations in {} ===", stations.len(), country);
    for station in &stations {
        println!(
            "  {:>6} votes  {:<40} {} {}kbps",
            station.votes, station.name, station.codec, station.bitrate
        );
        println!("               {}", station.stream_url_resolved);
    }

    Ok(())
}
