//! Typed resources: what to ask for and what comes back
//!
//! An [`ApiResource`] pairs a [`QuerySpec`] with the record type the mirror
//! answers with. [`RadioBrowserClient::fetch`](crate::RadioBrowserClient::fetch)
//! accepts any of them, so callers can define their own on top of the
//! built-in ones.

use crate::endpoint::Endpoint;
use crate::models::{ClickCount, Config, Facet, ServerMirror, Station, Stats};
use crate::query::{ListOptions, QuerySpec, SearchQuery};
use serde::de::DeserializeOwned;
use uuid::Uuid;

/// A remote resource and the type it decodes to
pub trait ApiResource {
    type Model: DeserializeOwned;

    /// Request description; all stations with broken ones hidden by default
    fn spec(&self) -> QuerySpec {
        QuerySpec::default()
    }
}

/// Station lists: `stations`, `stations/topvote`, `stations/byname/{name}`...
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationsResource {
    endpoint: Endpoint,
    path: Option<String>,
    options: ListOptions,
}

impl StationsResource {
    pub fn new(endpoint: Endpoint, options: ListOptions) -> Self {
        Self {
            endpoint,
            path: None,
            options,
        }
    }

    /// Stations whose name contains `name`
    pub fn by_name(name: impl Into<String>, options: ListOptions) -> Self {
        Self::new(Endpoint::StationsByName, options).with_path(name)
    }

    /// Stations of the country with ISO 3166-1 code `code`
    pub fn by_country_code(code: impl Into<String>, options: ListOptions) -> Self {
        Self::new(Endpoint::StationsByCountryCode, options).with_path(code)
    }

    pub fn by_uuid(uuid: Uuid) -> Self {
        Self::new(Endpoint::StationsByUuid, ListOptions::default()).with_path(uuid.to_string())
    }

    fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}

impl Default for StationsResource {
    fn default() -> Self {
        Self::new(Endpoint::Stations, ListOptions::default())
    }
}

impl ApiResource for StationsResource {
    type Model = Vec<Station>;

    fn spec(&self) -> QuerySpec {
        let spec = QuerySpec::stations(self.endpoint).with_options(&self.options);
        match &self.path {
            Some(path) => spec.with_path(path.clone()),
            None => spec,
        }
    }
}

impl ApiResource for SearchQuery {
    type Model = Vec<Station>;

    fn spec(&self) -> QuerySpec {
        self.clone().into_spec()
    }
}

/// Click registration on a station (`url/{stationuuid}`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickCountResource(pub Uuid);

impl ApiResource for ClickCountResource {
    type Model = ClickCount;

    fn spec(&self) -> QuerySpec {
        QuerySpec::bare(Endpoint::ClickCount).with_path(self.0.to_string())
    }
}

/// Backend configuration of the mirror
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfigResource;

impl ApiResource for ConfigResource {
    type Model = Config;

    fn spec(&self) -> QuerySpec {
        QuerySpec::bare(Endpoint::Config)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsResource;

impl ApiResource for StatsResource {
    type Model = Stats;

    fn spec(&self) -> QuerySpec {
        QuerySpec::bare(Endpoint::Stats)
    }
}

/// Catalog listings with station counts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogResource {
    Countries,
    Languages,
    Tags,
    Codecs,
    States,
}

impl CatalogResource {
    pub fn endpoint(&self) -> Endpoint {
        match self {
            CatalogResource::Countries => Endpoint::Countries,
            CatalogResource::Languages => Endpoint::Languages,
            CatalogResource::Tags => Endpoint::Tags,
            CatalogResource::Codecs => Endpoint::Codecs,
            CatalogResource::States => Endpoint::States,
        }
    }
}

impl ApiResource for CatalogResource {
    type Model = Vec<Facet>;

    fn spec(&self) -> QuerySpec {
        QuerySpec::bare(self.endpoint())
    }
}

/// Mirrors known to the directory
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MirrorsResource;

impl ApiResource for MirrorsResource {
    type Model = Vec<ServerMirror>;

    fn spec(&self) -> QuerySpec {
        QuerySpec::bare(Endpoint::Servers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoint::ResponseFormat;
    use crate::query::Order;

    fn url_of<R: ApiResource>(resource: &R) -> String {
        resource
            .spec()
            .build_url("de1.api.radio-browser.info", "https", ResponseFormat::Json)
            .unwrap()
            .to_string()
    }

    struct AllStations;

    impl ApiResource for AllStations {
        type Model = Vec<Station>;
    }

    #[test]
    fn test_default_spec_hides_broken_stations() {
        assert_eq!(
            url_of(&AllStations),
            "https://de1.api.radio-browser.info/json/stations?hidebroken=true"
        );
    }

    #[test]
    fn test_by_country_code() {
        let resource = StationsResource::by_country_code(
            "AT",
            ListOptions::new().order(Order::Votes).reverse(true).limit(10),
        );
        assert_eq!(
            url_of(&resource),
            "https://de1.api.radio-browser.info/json/stations/bycountrycodeexact/AT?order=votes&reverse=true&limit=10&hidebroken=true"
        );
    }

    #[test]
    fn test_by_name_is_percent_encoded() {
        let resource = StationsResource::by_name("Radio Wien", ListOptions::default());
        assert_eq!(
            url_of(&resource),
            "https://de1.api.radio-browser.info/json/stations/byname/Radio%20Wien?hidebroken=true"
        );
    }

    #[test]
    fn test_non_station_resources_have_no_parameters() {
        let uuid = Uuid::parse_str("9617a958-0601-11e8-ae97-52543be04c81").unwrap();
        assert_eq!(
            url_of(&ClickCountResource(uuid)),
            "https://de1.api.radio-browser.info/json/url/9617a958-0601-11e8-ae97-52543be04c81"
        );
        assert_eq!(url_of(&ConfigResource), "https://de1.api.radio-browser.info/json/config");
        assert_eq!(url_of(&StatsResource), "https://de1.api.radio-browser.info/json/stats");
        assert_eq!(
            url_of(&CatalogResource::Countries),
            "https://de1.api.radio-browser.info/json/countries"
        );
        assert_eq!(url_of(&MirrorsResource), "https://de1.api.radio-browser.info/json/servers");
    }

    #[test]
    fn test_search_query_resource() {
        let query = SearchQuery::new().tag("jazz").limit(5);
        let url = url_of(&query);
        assert!(url.starts_with("https://de1.api.radio-browser.info/json/stations/search?"));
        assert!(url.contains("tag=jazz"));
        assert!(url.contains("tagExact=false"));
        assert!(url.contains("limit=5"));
        assert!(url.contains("hidebroken=true"));
    }
}
