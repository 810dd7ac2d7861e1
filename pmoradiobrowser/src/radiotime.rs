//! RadioTime (TuneIn OPML) category browsing
//!
//! RadioTime is not part of Radio Browser but is commonly used next to it to
//! offer a genre/topic tree. Requests go through the same transport as the
//! directory client, so observers see them too (with no [`Endpoint`]).
//!
//! [`Endpoint`]: crate::Endpoint

use crate::error::{Error, Result};
use crate::models::{Category, CategoryResponse};
use crate::transport::Transport;
use std::fmt;
use tracing::debug;
use url::Url;

/// Default RadioTime base URL
pub const RADIOTIME_BASE_URL: &str = "https://opml.radiotime.com";

/// Top-level RadioTime browse categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoryKey {
    Local,
    Music,
    Talk,
    Sports,
    Podcast,
    Lang,
}

impl CategoryKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryKey::Local => "local",
            CategoryKey::Music => "music",
            CategoryKey::Talk => "talk",
            CategoryKey::Sports => "sports",
            CategoryKey::Podcast => "podcast",
            CategoryKey::Lang => "lang",
        }
    }
}

impl fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Client for the RadioTime OPML directory
///
/// Obtained from [`RadioBrowserClient::radiotime`](crate::RadioBrowserClient::radiotime).
#[derive(Clone)]
pub struct RadioTimeClient {
    transport: Transport,
    base_url: String,
}

impl RadioTimeClient {
    pub(crate) fn new(transport: Transport) -> Self {
        Self {
            transport,
            base_url: RADIOTIME_BASE_URL.to_string(),
        }
    }

    /// Use another base URL (mirror or test server)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `{base}/Browse.ashx?render=json`
    pub fn browse_url(&self) -> String {
        format!("{}/Browse.ashx?render=json", self.base_url)
    }

    /// `{base}/Search.ashx?render=json`
    pub fn search_url(&self) -> String {
        format!("{}/Search.ashx?render=json", self.base_url)
    }

    /// Fetch the categories listed at `url`
    ///
    /// `url` is typically the `url` of a previously fetched [`Category`].
    pub async fn fetch_categories(&self, url: &str) -> Result<Vec<Category>> {
        let url = Url::parse(url).map_err(|e| Error::malformed_url(url, e))?;
        self.fetch(url).await
    }

    /// Root listing of the whole tree
    pub async fn root(&self) -> Result<Vec<Category>> {
        self.fetch_categories(&self.browse_url()).await
    }

    /// Listing of a top-level category
    pub async fn browse(&self, key: CategoryKey) -> Result<Vec<Category>> {
        let base = self.browse_url();
        let mut url = Url::parse(&base).map_err(|e| Error::malformed_url(&base, e))?;
        url.query_pairs_mut().append_pair("c", key.as_str());
        self.fetch(url).await
    }

    /// Free-text search
    pub async fn search(&self, query: &str) -> Result<Vec<Category>> {
        let base = self.search_url();
        let mut url = Url::parse(&base).map_err(|e| Error::malformed_url(&base, e))?;
        url.query_pairs_mut().append_pair("query", query);
        self.fetch(url).await
    }

    async fn fetch(&self, url: Url) -> Result<Vec<Category>> {
        let response: CategoryResponse = self.transport.get(url, None).await?;
        debug!(
            "RadioTime '{}' returned {} categories",
            response.head.title,
            response.body.len()
        );
        Ok(response.body)
    }
}
