//! Query specification and URL construction
//!
//! A `QuerySpec` describes one call: which endpoint, an optional path suffix
//! (station name, country code or UUID) and a set of optional filters. Turning
//! it into a URL follows a fixed set of rules:
//!
//! - an absent field is never sent, which the service treats differently from
//!   a field explicitly set to `false` or `0`;
//! - `*Exact` modifiers are only sent when their companion value is present
//!   and non-empty;
//! - parameters always appear in the same order.

use crate::endpoint::{Endpoint, ResponseFormat};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// Default pagination offset used by station searches
pub const DEFAULT_OFFSET: u32 = 0;

/// Default page size used by station searches
pub const DEFAULT_LIMIT: u32 = 250;

/// Default URL scheme for mirror requests
pub const DEFAULT_SCHEME: &str = "https";

/// Sort keys accepted by the `order` parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Order {
    Name,
    Url,
    Homepage,
    Favicon,
    Tags,
    Country,
    State,
    Language,
    Votes,
    Codec,
    Bitrate,
    LastCheckOk,
    LastCheckTime,
    ClickTimestamp,
    ClickCount,
    ClickTrend,
    ChangeTimestamp,
    Random,
}

impl Order {
    pub fn as_str(&self) -> &'static str {
        match self {
            Order::Name => "name",
            Order::Url => "url",
            Order::Homepage => "homepage",
            Order::Favicon => "favicon",
            Order::Tags => "tags",
            Order::Country => "country",
            Order::State => "state",
            Order::Language => "language",
            Order::Votes => "votes",
            Order::Codec => "codec",
            Order::Bitrate => "bitrate",
            Order::LastCheckOk => "lastcheckok",
            Order::LastCheckTime => "lastchecktime",
            Order::ClickTimestamp => "clicktimestamp",
            Order::ClickCount => "clickcount",
            Order::ClickTrend => "clicktrend",
            Order::ChangeTimestamp => "changetimestamp",
            Order::Random => "random",
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every optional filter, ordering and pagination parameter
///
/// Field names are the domain names; `query_pairs` maps them to wire names
/// (`country_code` → `countrycode`, `has_geo_info` → `has_geo_info`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StationFilter {
    pub name: Option<String>,
    pub name_exact: Option<bool>,
    pub country: Option<String>,
    pub country_exact: Option<bool>,
    pub country_code: Option<String>,
    pub state: Option<String>,
    pub state_exact: Option<bool>,
    pub language: Option<String>,
    pub language_exact: Option<bool>,
    pub tag: Option<String>,
    pub tag_exact: Option<bool>,
    pub tag_list: Option<String>,
    pub codec: Option<String>,
    pub bitrate_min: Option<u32>,
    pub bitrate_max: Option<u32>,
    pub has_geo_info: Option<bool>,
    pub has_extended_info: Option<bool>,
    pub order: Option<Order>,
    pub reverse: Option<bool>,
    pub offset: Option<u32>,
    pub limit: Option<u32>,
    pub hide_broken: Option<bool>,
    pub seconds: Option<u32>,
}

impl StationFilter {
    /// Wire-named query parameters in their fixed order
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();

        push_text(&mut pairs, "name", &self.name);
        push_exact(&mut pairs, "nameExact", self.name_exact, &self.name);
        push_text(&mut pairs, "country", &self.country);
        push_exact(&mut pairs, "countryExact", self.country_exact, &self.country);
        push_text(&mut pairs, "countrycode", &self.country_code);
        push_text(&mut pairs, "state", &self.state);
        push_exact(&mut pairs, "stateExact", self.state_exact, &self.state);
        push_text(&mut pairs, "language", &self.language);
        push_exact(&mut pairs, "languageExact", self.language_exact, &self.language);
        push_text(&mut pairs, "tag", &self.tag);
        push_exact(&mut pairs, "tagExact", self.tag_exact, &self.tag);
        push_text(&mut pairs, "tagList", &self.tag_list);
        push_text(&mut pairs, "codec", &self.codec);
        push_value(&mut pairs, "bitrateMin", self.bitrate_min);
        push_value(&mut pairs, "bitrateMax", self.bitrate_max);
        push_value(&mut pairs, "has_geo_info", self.has_geo_info);
        push_value(&mut pairs, "has_extended_info", self.has_extended_info);
        push_value(&mut pairs, "order", self.order);
        push_value(&mut pairs, "reverse", self.reverse);
        push_value(&mut pairs, "offset", self.offset);
        push_value(&mut pairs, "limit", self.limit);
        push_value(&mut pairs, "hidebroken", self.hide_broken);
        push_value(&mut pairs, "seconds", self.seconds);

        pairs
    }
}

fn push_text(pairs: &mut Vec<(&'static str, String)>, key: &'static str, value: &Option<String>) {
    if let Some(value) = value {
        pairs.push((key, value.clone()));
    }
}

fn push_exact(
    pairs: &mut Vec<(&'static str, String)>,
    key: &'static str,
    exact: Option<bool>,
    companion: &Option<String>,
) {
    if let (Some(exact), Some(companion)) = (exact, companion) {
        if !companion.is_empty() {
            pairs.push((key, exact.to_string()));
        }
    }
}

fn push_value<T: ToString>(pairs: &mut Vec<(&'static str, String)>, key: &'static str, value: Option<T>) {
    if let Some(value) = value {
        pairs.push((key, value.to_string()));
    }
}

/// A fully described call: endpoint, optional path suffix and filters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuerySpec {
    pub endpoint: Endpoint,
    pub path: Option<String>,
    pub filter: StationFilter,
}

impl Default for QuerySpec {
    /// `stations` endpoint with broken stations hidden
    fn default() -> Self {
        Self {
            endpoint: Endpoint::Stations,
            path: None,
            filter: StationFilter {
                hide_broken: Some(true),
                ..StationFilter::default()
            },
        }
    }
}

impl QuerySpec {
    /// Station query on `endpoint` with broken stations hidden
    pub fn stations(endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            ..Self::default()
        }
    }

    /// Query on `endpoint` without any parameter
    pub fn bare(endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            path: None,
            filter: StationFilter::default(),
        }
    }

    /// Set the path suffix appended after the endpoint path
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Apply list options (order, reverse, offset, limit, hidebroken)
    pub fn with_options(mut self, options: &ListOptions) -> Self {
        self.filter.order = options.order;
        self.filter.reverse = options.reverse;
        self.filter.offset = options.offset;
        self.filter.limit = options.limit;
        self.filter.hide_broken = options.hide_broken;
        self
    }

    /// Build the request URL for `host`
    ///
    /// `{scheme}://{host}/{format}/{endpoint}[/{path}]?{query}`. The path
    /// suffix is percent-encoded as a single segment; no `?` is emitted when
    /// there is no parameter.
    pub fn build_url(&self, host: &str, scheme: &str, format: ResponseFormat) -> Result<Url> {
        let base = format!("{}://{}/{}/{}", scheme, host, format.as_str(), self.endpoint.path());
        let mut url = Url::parse(&base).map_err(|e| Error::malformed_url(&base, e))?;

        if let Some(path) = &self.path {
            url.path_segments_mut()
                .map_err(|_| Error::malformed_url(&base, url::ParseError::RelativeUrlWithCannotBeABaseBase))?
                .push(path);
        }

        let pairs = self.filter.query_pairs();
        if !pairs.is_empty() {
            let mut query = url.query_pairs_mut();
            for (key, value) in &pairs {
                query.append_pair(key, value);
            }
        }

        Ok(url)
    }
}

/// Options shared by the list endpoints
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListOptions {
    pub order: Option<Order>,
    pub reverse: Option<bool>,
    pub offset: Option<u32>,
    pub limit: Option<u32>,
    pub hide_broken: Option<bool>,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            order: None,
            reverse: None,
            offset: None,
            limit: None,
            hide_broken: Some(true),
        }
    }
}

impl ListOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn order(mut self, order: Order) -> Self {
        self.order = Some(order);
        self
    }

    pub fn reverse(mut self, reverse: bool) -> Self {
        self.reverse = Some(reverse);
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn hide_broken(mut self, hide_broken: bool) -> Self {
        self.hide_broken = Some(hide_broken);
        self
    }
}

/// Parameters of the advanced station search (`stations/search`)
///
/// `Default` mirrors the service defaults: exact matching off, `offset=0`,
/// `limit=250`, broken stations hidden. Exact flags only reach the URL when
/// the matching value is set and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    filter: StationFilter,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            filter: StationFilter {
                name_exact: Some(false),
                country_exact: Some(false),
                state_exact: Some(false),
                language_exact: Some(false),
                tag_exact: Some(false),
                reverse: Some(false),
                offset: Some(DEFAULT_OFFSET),
                limit: Some(DEFAULT_LIMIT),
                hide_broken: Some(true),
                ..StationFilter::default()
            },
        }
    }
}

impl SearchQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a raw filter, without any default
    pub fn from_filter(filter: StationFilter) -> Self {
        Self { filter }
    }

    pub fn filter(&self) -> &StationFilter {
        &self.filter
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.filter.name = Some(name.into());
        self
    }

    pub fn name_exact(mut self, exact: bool) -> Self {
        self.filter.name_exact = Some(exact);
        self
    }

    pub fn country(mut self, country: impl Into<String>) -> Self {
        self.filter.country = Some(country.into());
        self
    }

    pub fn country_exact(mut self, exact: bool) -> Self {
        self.filter.country_exact = Some(exact);
        self
    }

    pub fn country_code(mut self, code: impl Into<String>) -> Self {
        self.filter.country_code = Some(code.into());
        self
    }

    pub fn state(mut self, state: impl Into<String>) -> Self {
        self.filter.state = Some(state.into());
        self
    }

    pub fn state_exact(mut self, exact: bool) -> Self {
        self.filter.state_exact = Some(exact);
        self
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.filter.language = Some(language.into());
        self
    }

    pub fn language_exact(mut self, exact: bool) -> Self {
        self.filter.language_exact = Some(exact);
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.filter.tag = Some(tag.into());
        self
    }

    pub fn tag_exact(mut self, exact: bool) -> Self {
        self.filter.tag_exact = Some(exact);
        self
    }

    /// Comma-separated tags that must all match
    pub fn tag_list<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = tags
            .into_iter()
            .map(|t| t.as_ref().to_string())
            .collect::<Vec<_>>()
            .join(",");
        self.filter.tag_list = Some(joined);
        self
    }

    pub fn codec(mut self, codec: impl Into<String>) -> Self {
        self.filter.codec = Some(codec.into());
        self
    }

    pub fn bitrate_min(mut self, kbps: u32) -> Self {
        self.filter.bitrate_min = Some(kbps);
        self
    }

    pub fn bitrate_max(mut self, kbps: u32) -> Self {
        self.filter.bitrate_max = Some(kbps);
        self
    }

    pub fn has_geo_info(mut self, value: bool) -> Self {
        self.filter.has_geo_info = Some(value);
        self
    }

    pub fn has_extended_info(mut self, value: bool) -> Self {
        self.filter.has_extended_info = Some(value);
        self
    }

    pub fn order(mut self, order: Order) -> Self {
        self.filter.order = Some(order);
        self
    }

    pub fn reverse(mut self, reverse: bool) -> Self {
        self.filter.reverse = Some(reverse);
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.filter.offset = Some(offset);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.filter.limit = Some(limit);
        self
    }

    pub fn hide_broken(mut self, hide_broken: bool) -> Self {
        self.filter.hide_broken = Some(hide_broken);
        self
    }

    /// Query spec for `stations/search`
    pub fn into_spec(self) -> QuerySpec {
        QuerySpec {
            endpoint: Endpoint::StationsSearch,
            path: None,
            filter: self.filter,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOST: &str = "de1.api.radio-browser.info";

    fn url_of(spec: &QuerySpec) -> String {
        spec.build_url(HOST, DEFAULT_SCHEME, ResponseFormat::Json)
            .unwrap()
            .to_string()
    }

    fn count_key(url: &str, key: &str) -> usize {
        let parsed = Url::parse(url).unwrap();
        parsed.query_pairs().filter(|(k, _)| k == key).count()
    }

    #[test]
    fn test_country_code_example() {
        let spec = QuerySpec::stations(Endpoint::StationsByCountryCode)
            .with_path("AT")
            .with_options(&ListOptions::new().order(Order::Votes).reverse(true).limit(10));

        assert_eq!(
            url_of(&spec),
            "https://de1.api.radio-browser.info/json/stations/bycountrycodeexact/AT?order=votes&reverse=true&limit=10&hidebroken=true"
        );
    }

    #[test]
    fn test_default_spec() {
        let spec = QuerySpec::default();
        assert_eq!(spec.endpoint, Endpoint::Stations);
        assert_eq!(
            url_of(&spec),
            "https://de1.api.radio-browser.info/json/stations?hidebroken=true"
        );
    }

    #[test]
    fn test_bare_spec_has_no_query() {
        let spec = QuerySpec::bare(Endpoint::Config);
        assert_eq!(url_of(&spec), "https://de1.api.radio-browser.info/json/config");
    }

    #[test]
    fn test_exact_requires_non_empty_companion() {
        let empty = SearchQuery::new().name("").name_exact(true).into_spec();
        let url = url_of(&empty);
        assert_eq!(count_key(&url, "nameExact"), 0);
        assert_eq!(count_key(&url, "name"), 1);

        let jazz = SearchQuery::new().name("Jazz").name_exact(true).into_spec();
        let url = url_of(&jazz);
        assert_eq!(count_key(&url, "nameExact"), 1);
        assert!(url.contains("name=Jazz&nameExact=true"));
    }

    #[test]
    fn test_exact_without_companion_is_omitted() {
        let spec = SearchQuery::new().tag_exact(true).country_exact(true).into_spec();
        let url = url_of(&spec);
        assert_eq!(count_key(&url, "tagExact"), 0);
        assert_eq!(count_key(&url, "countryExact"), 0);
    }

    #[test]
    fn test_every_set_field_appears_once_with_wire_name() {
        let filter = StationFilter {
            name: Some("n".into()),
            name_exact: Some(true),
            country: Some("Austria".into()),
            country_exact: Some(false),
            country_code: Some("AT".into()),
            state: Some("Vienna".into()),
            state_exact: Some(true),
            language: Some("german".into()),
            language_exact: Some(true),
            tag: Some("jazz".into()),
            tag_exact: Some(false),
            tag_list: Some("jazz,blues".into()),
            codec: Some("MP3".into()),
            bitrate_min: Some(64),
            bitrate_max: Some(320),
            has_geo_info: Some(true),
            has_extended_info: Some(false),
            order: Some(Order::ClickCount),
            reverse: Some(true),
            offset: Some(0),
            limit: Some(5),
            hide_broken: Some(false),
            seconds: Some(60),
        };
        let spec = QuerySpec {
            endpoint: Endpoint::StationsSearch,
            path: None,
            filter,
        };
        let url = url_of(&spec);

        let expected = [
            "name",
            "nameExact",
            "country",
            "countryExact",
            "countrycode",
            "state",
            "stateExact",
            "language",
            "languageExact",
            "tag",
            "tagExact",
            "tagList",
            "codec",
            "bitrateMin",
            "bitrateMax",
            "has_geo_info",
            "has_extended_info",
            "order",
            "reverse",
            "offset",
            "limit",
            "hidebroken",
            "seconds",
        ];
        for key in expected {
            assert_eq!(count_key(&url, key), 1, "{} should appear exactly once", key);
        }

        let keys: Vec<String> = Url::parse(&url)
            .unwrap()
            .query_pairs()
            .map(|(k, _)| k.into_owned())
            .collect();
        assert_eq!(keys, expected);
    }

    #[test]
    fn test_unset_fields_never_appear() {
        let spec = QuerySpec::bare(Endpoint::StationsSearch);
        let url = url_of(&spec);
        assert!(!url.contains('?'));

        let spec = SearchQuery::from_filter(StationFilter {
            codec: Some("AAC".into()),
            ..StationFilter::default()
        })
        .into_spec();
        assert_eq!(
            url_of(&spec),
            "https://de1.api.radio-browser.info/json/stations/search?codec=AAC"
        );
    }

    #[test]
    fn test_false_and_zero_are_sent() {
        let spec = QuerySpec::bare(Endpoint::Stations)
            .with_options(&ListOptions::new().reverse(false).offset(0).hide_broken(false));
        assert_eq!(
            url_of(&spec),
            "https://de1.api.radio-browser.info/json/stations?reverse=false&offset=0&hidebroken=false"
        );
    }

    #[test]
    fn test_search_defaults() {
        let url = url_of(&SearchQuery::new().into_spec());
        assert_eq!(
            url,
            "https://de1.api.radio-browser.info/json/stations/search?reverse=false&offset=0&limit=250&hidebroken=true"
        );
    }

    #[test]
    fn test_path_suffix_is_encoded() {
        let spec = QuerySpec::stations(Endpoint::StationsByName).with_path("Radio FM4");
        assert_eq!(
            url_of(&spec),
            "https://de1.api.radio-browser.info/json/stations/byname/Radio%20FM4?hidebroken=true"
        );
    }

    #[test]
    fn test_tag_list_is_joined() {
        let spec = SearchQuery::from_filter(StationFilter::default())
            .tag_list(["rock", "indie"])
            .into_spec();
        assert!(url_of(&spec).ends_with("tagList=rock%2Cindie"));
    }

    #[test]
    fn test_other_format_and_scheme() {
        let spec = QuerySpec::bare(Endpoint::Stats);
        let url = spec
            .build_url("127.0.0.1:8080", "http", ResponseFormat::Xml)
            .unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8080/xml/stats");
    }

    #[test]
    fn test_malformed_host() {
        let spec = QuerySpec::default();
        let err = spec
            .build_url("bad host", DEFAULT_SCHEME, ResponseFormat::Json)
            .unwrap_err();
        assert!(matches!(err, Error::MalformedUrl { .. }));
    }
}
