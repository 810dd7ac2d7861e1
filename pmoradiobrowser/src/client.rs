//! HTTP client for the Radio Browser directory
//!
//! # Example
//!
//! ```no_run
//! use pmoradiobrowser::{ListOptions, Order, RadioBrowserClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = RadioBrowserClient::new()?;
//!
//!     let options = ListOptions::new().order(Order::Votes).reverse(true).limit(10);
//!     for station in client.stations_by_country_code("AT", options).await? {
//!         println!("{} ({} votes) {}", station.name, station.votes, station.stream_url);
//!     }
//!
//!     Ok(())
//! }
//! ```

use crate::config::RadioBrowserConfig;
use crate::endpoint::{Endpoint, ResponseFormat};
use crate::error::Result;
use crate::models::{ClickCount, Config, Facet, ServerMirror, Station, Stats};
use crate::observer::RadioBrowserObserver;
use crate::query::{ListOptions, QuerySpec, SearchQuery};
use crate::radiotime::RadioTimeClient;
use crate::resource::{
    ApiResource, CatalogResource, ClickCountResource, ConfigResource, MirrorsResource,
    StationsResource, StatsResource,
};
use crate::server::{SelectionPolicy, ServerPool};
use crate::transport::Transport;
use reqwest::Client;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;
use uuid::Uuid;

/// Radio Browser HTTP client
///
/// Cheap to clone: clones share the HTTP connection pool, the server pool
/// cursor and the registered observers. The client does not cache responses
/// and never retries; a failed call can simply be issued again, it will be
/// routed to the next mirror.
#[derive(Clone)]
pub struct RadioBrowserClient {
    transport: Transport,
    pool: Arc<ServerPool>,
    scheme: String,
    format: ResponseFormat,
}

impl RadioBrowserClient {
    /// Create a new client with default settings
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    /// Create a builder for configuring the client
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Create a client with a custom reqwest::Client and default settings
    pub fn with_client(client: Client) -> Result<Self> {
        Self::builder().client(client).build()
    }

    pub fn server_pool(&self) -> &ServerPool {
        &self.pool
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Format used by [`build_url`](Self::build_url)
    pub fn response_format(&self) -> ResponseFormat {
        self.format
    }

    pub fn user_agent(&self) -> &str {
        self.transport.user_agent()
    }

    pub fn timeout(&self) -> Duration {
        self.transport.timeout()
    }

    /// RadioTime category browser sharing this client's transport and observers
    pub fn radiotime(&self) -> RadioTimeClient {
        RadioTimeClient::new(self.transport.clone())
    }

    /// URL of a query on the next mirror, in the configured response format
    ///
    /// Useful for handing playlist links (`m3u`, `pls`) to a player.
    pub fn build_url(&self, spec: &QuerySpec) -> Result<Url> {
        spec.build_url(&self.pool.next(), &self.scheme, self.format)
    }

    /// Fetch any resource from the next mirror
    ///
    /// Requests are always made in JSON, whatever the configured format.
    pub async fn fetch<R: ApiResource>(&self, resource: &R) -> Result<R::Model> {
        let spec = resource.spec();
        let url = spec.build_url(&self.pool.next(), &self.scheme, ResponseFormat::Json)?;
        self.transport.get(url, Some(spec.endpoint)).await
    }

    // ========================================================================
    // Stations
    // ========================================================================

    /// All stations
    pub async fn stations(&self, options: ListOptions) -> Result<Vec<Station>> {
        self.fetch_stations(&StationsResource::new(Endpoint::Stations, options))
            .await
    }

    /// Stations whose name contains `name`
    pub async fn stations_by_name(&self, name: &str, options: ListOptions) -> Result<Vec<Station>> {
        self.fetch_stations(&StationsResource::by_name(name, options))
            .await
    }

    /// Stations of a country, by ISO 3166-1 alpha-2 code (`AT`, `DE`...)
    pub async fn stations_by_country_code(
        &self,
        code: &str,
        options: ListOptions,
    ) -> Result<Vec<Station>> {
        self.fetch_stations(&StationsResource::by_country_code(code, options))
            .await
    }

    /// Advanced search
    pub async fn search_stations(&self, query: SearchQuery) -> Result<Vec<Station>> {
        self.fetch_stations(&query).await
    }

    /// Most clicked stations
    pub async fn top_click_stations(&self, options: ListOptions) -> Result<Vec<Station>> {
        self.fetch_stations(&StationsResource::new(Endpoint::StationsTopClick, options))
            .await
    }

    /// Most voted stations
    pub async fn top_vote_stations(&self, options: ListOptions) -> Result<Vec<Station>> {
        self.fetch_stations(&StationsResource::new(Endpoint::StationsTopVote, options))
            .await
    }

    /// Stations clicked most recently
    pub async fn last_click_stations(&self, options: ListOptions) -> Result<Vec<Station>> {
        self.fetch_stations(&StationsResource::new(Endpoint::StationsLastClick, options))
            .await
    }

    /// Stations changed most recently
    pub async fn last_change_stations(&self, options: ListOptions) -> Result<Vec<Station>> {
        self.fetch_stations(&StationsResource::new(Endpoint::StationsLastChange, options))
            .await
    }

    /// Look a station up by its UUID
    pub async fn station_by_uuid(&self, uuid: Uuid) -> Result<Option<Station>> {
        let stations = self.fetch_stations(&StationsResource::by_uuid(uuid)).await?;
        Ok(stations.into_iter().next())
    }

    async fn fetch_stations<R>(&self, resource: &R) -> Result<Vec<Station>>
    where
        R: ApiResource<Model = Vec<Station>>,
    {
        let stations = self.fetch(resource).await?;
        debug!("Received {} stations", stations.len());
        for observer in self.transport.observers() {
            observer.stations_received(self, &stations);
        }
        Ok(stations)
    }

    // ========================================================================
    // Clicks
    // ========================================================================

    /// Register a click on `station` and get its playable URL back
    ///
    /// Mirrors count at most one click per client IP and station per day.
    pub async fn update_click_count(&self, station: &Station) -> Result<ClickCount> {
        self.update_click_count_for(station.station_uuid).await
    }

    pub async fn update_click_count_for(&self, station_uuid: Uuid) -> Result<ClickCount> {
        let click = self.fetch(&ClickCountResource(station_uuid)).await?;
        debug!("Click on {} registered: {}", click.station_uuid, click.ok);
        for observer in self.transport.observers() {
            observer.click_count_updated(self, &click);
        }
        Ok(click)
    }

    // ========================================================================
    // Server information
    // ========================================================================

    /// Configuration of the mirror that answers
    pub async fn backend_config(&self) -> Result<Config> {
        let config = self.fetch(&ConfigResource).await?;
        for observer in self.transport.observers() {
            observer.config_received(self, &config);
        }
        Ok(config)
    }

    pub async fn stats(&self) -> Result<Stats> {
        self.fetch(&StatsResource).await
    }

    /// Mirrors known to the directory
    pub async fn mirrors(&self) -> Result<Vec<ServerMirror>> {
        self.fetch(&MirrorsResource).await
    }

    // ========================================================================
    // Catalog
    // ========================================================================

    pub async fn countries(&self) -> Result<Vec<Facet>> {
        self.fetch(&CatalogResource::Countries).await
    }

    pub async fn languages(&self) -> Result<Vec<Facet>> {
        self.fetch(&CatalogResource::Languages).await
    }

    pub async fn tags(&self) -> Result<Vec<Facet>> {
        self.fetch(&CatalogResource::Tags).await
    }

    pub async fn codecs(&self) -> Result<Vec<Facet>> {
        self.fetch(&CatalogResource::Codecs).await
    }

    pub async fn states(&self) -> Result<Vec<Facet>> {
        self.fetch(&CatalogResource::States).await
    }
}

impl fmt::Debug for RadioBrowserClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RadioBrowserClient")
            .field("pool", &self.pool)
            .field("scheme", &self.scheme)
            .field("format", &self.format)
            .field("user_agent", &self.transport.user_agent())
            .field("observers", &self.transport.observers().len())
            .finish()
    }
}

/// Builder for [`RadioBrowserClient`]
pub struct ClientBuilder {
    config: RadioBrowserConfig,
    client: Option<Client>,
    pool: Option<ServerPool>,
    timeout: Option<Duration>,
    proxy: Option<String>,
    observers: Vec<Arc<dyn RadioBrowserObserver>>,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self {
            config: RadioBrowserConfig::default(),
            client: None,
            pool: None,
            timeout: None,
            proxy: None,
            observers: Vec::new(),
        }
    }
}

impl ClientBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all settings with `config`
    pub fn config(mut self, config: RadioBrowserConfig) -> Self {
        self.config = config;
        self
    }

    /// Set a custom HTTP client
    ///
    /// The client's own timeout and User-Agent are overridden per request.
    /// A [`proxy`](Self::proxy) set on the builder is not applied to it.
    pub fn client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Use a fixed list of mirror hostnames
    pub fn servers<I, S>(mut self, servers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.servers = servers.into_iter().map(Into::into).collect();
        self
    }

    pub fn selection(mut self, selection: SelectionPolicy) -> Self {
        self.config.selection = selection;
        self
    }

    /// Use a ready-made pool (e.g. one backed by a host provider)
    ///
    /// Takes precedence over `servers` and `selection`.
    pub fn server_pool(mut self, pool: ServerPool) -> Self {
        self.pool = Some(pool);
        self
    }

    /// URL scheme; only meant for plain-HTTP test servers
    pub fn scheme(mut self, scheme: impl Into<String>) -> Self {
        self.config.scheme = scheme.into();
        self
    }

    pub fn response_format(mut self, format: ResponseFormat) -> Self {
        self.config.response_format = format;
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set a custom User-Agent header
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Set a proxy URL
    ///
    /// Only used when the builder creates the HTTP client itself.
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Register an observer; may be called several times
    pub fn observer(mut self, observer: Arc<dyn RadioBrowserObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Build the client
    pub fn build(self) -> Result<RadioBrowserClient> {
        let timeout = self.timeout.unwrap_or_else(|| self.config.timeout());

        let client = if let Some(client) = self.client {
            if let Some(proxy_url) = &self.proxy {
                warn!("Proxy {} ignored: a custom HTTP client was supplied", proxy_url);
            }
            client
        } else {
            let mut builder = Client::builder()
                .user_agent(&self.config.user_agent)
                .timeout(timeout);

            if let Some(proxy_url) = &self.proxy {
                builder = builder.proxy(reqwest::Proxy::all(proxy_url)?);
            }

            builder.build()?
        };

        let pool = self.pool.unwrap_or_else(|| self.config.server_pool());

        Ok(RadioBrowserClient {
            transport: Transport::new(client, self.config.user_agent, timeout, self.observers),
            pool: Arc::new(pool),
            scheme: self.config.scheme,
            format: self.config.response_format,
        })
    }
}
