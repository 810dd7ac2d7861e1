//! Request lifecycle and result notifications
//!
//! Observers are registered on [`ClientBuilder`](crate::ClientBuilder) and are
//! called synchronously from the task that issued the request. Every method
//! has an empty default, so an observer only implements what it cares about.

use crate::client::RadioBrowserClient;
use crate::error::Error;
use crate::models::{ClickCount, Config, Station};
use crate::transport::RequestInfo;

/// Receives notifications about requests and decoded results
///
/// For each request `will_start_request` is called exactly once, followed by
/// exactly one `did_end_request`: with `None` when the request produced a
/// value, with the error otherwise.
pub trait RadioBrowserObserver: Send + Sync {
    fn will_start_request(&self, _request: &RequestInfo) {}

    fn did_end_request(&self, _request: &RequestInfo, _error: Option<&Error>) {}

    fn stations_received(&self, _client: &RadioBrowserClient, _stations: &[Station]) {}

    fn config_received(&self, _client: &RadioBrowserClient, _config: &Config) {}

    fn click_count_updated(&self, _client: &RadioBrowserClient, _click: &ClickCount) {}
}
