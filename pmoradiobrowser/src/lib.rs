//! Radio Browser client library for PMOMusic
//!
//! This crate provides a Rust client for [Radio Browser](https://www.radio-browser.info),
//! the community-maintained directory of internet radio stations served by
//! several interchangeable mirrors.
//!
//! # Features
//!
//! - **Mirror selection**: round-robin or random choice among mirrors, from a
//!   fixed list or a caller-supplied host provider
//! - **Station queries**: listings, lookups by name/country/UUID, top and
//!   recent lists, advanced search with ordering and paging
//! - **Click registration**: count a play and get the resolved stream URL
//! - **Server information**: backend configuration, statistics, mirror list,
//!   catalog facets (countries, languages, tags, codecs, states)
//! - **Observers**: request lifecycle and typed result notifications
//! - **RadioTime**: browse the TuneIn OPML category tree
//!
//! Records are decoded eagerly: timestamps are `DateTime<Utc>`, flags are
//! `bool`, URLs are `Url`, and station names are cleaned up.
//!
//! # Example
//!
//! ```no_run
//! use pmoradiobrowser::{RadioBrowserClient, SearchQuery, Order};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = RadioBrowserClient::new()?;
//!
//!     let query = SearchQuery::new()
//!         .tag("jazz")
//!         .country_code("FR")
//!         .order(Order::ClickCount)
//!         .reverse(true)
//!         .limit(20);
//!
//!     for station in client.search_stations(query).await? {
//!         println!("{} - {}", station.name, station.stream_url_resolved);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Errors
//!
//! Every call returns either a decoded value or exactly one [`Error`]. The
//! client does not retry; [`Error::is_transient`] tells whether asking again
//! (which goes to the next mirror) may help.

pub mod client;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod models;
pub mod observer;
pub mod query;
pub mod radiotime;
pub mod resource;
pub mod server;
pub mod transport;

// Re-exports
pub use client::{ClientBuilder, RadioBrowserClient};
pub use config::RadioBrowserConfig;
pub use endpoint::{Endpoint, ResponseFormat};
pub use error::{Error, Result};
pub use models::{
    clean_station_name, Category, CategoryHead, CategoryResponse, ClickCount, Config, Facet,
    GeoLocation, ServerMirror, Station, Stats,
};
pub use observer::RadioBrowserObserver;
pub use query::{ListOptions, Order, QuerySpec, SearchQuery, StationFilter, DEFAULT_LIMIT, DEFAULT_OFFSET};
pub use radiotime::{CategoryKey, RadioTimeClient};
pub use resource::{
    ApiResource, CatalogResource, ClickCountResource, ConfigResource, MirrorsResource,
    StationsResource, StatsResource,
};
pub use server::{HostProvider, SelectionPolicy, ServerPool, DEFAULT_SERVERS};
pub use transport::{classify_response, RequestInfo, DEFAULT_TIMEOUT_SECS};
