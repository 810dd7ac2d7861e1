//! Backend configuration of a mirror (`json/config`)

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration reported by a Radio Browser mirror
///
/// Missing keys decode to their `Default` value; older mirrors omit the
/// file path entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub check_enabled: bool,
    pub prometheus_exporter_enabled: bool,
    /// Mirrors this server pulls station changes from
    pub pull_servers: Vec<String>,
    pub tcp_timeout_seconds: u64,
    pub broken_stations_never_working_timeout_seconds: u64,
    pub broken_stations_timeout_seconds: u64,
    pub checks_timeout_seconds: u64,
    pub click_valid_timeout_seconds: u64,
    pub clicks_timeout_seconds: u64,
    pub mirror_pull_interval_seconds: u64,
    pub update_caches_interval_seconds: u64,
    pub server_name: String,
    pub server_location: String,
    pub server_country_code: String,
    pub check_retries: u32,
    pub check_batchsize: u32,
    pub check_pause_seconds: u64,
    pub api_threads: u32,
    pub cache_type: String,
    pub cache_ttl: u64,
    pub language_replace_filepath: Option<String>,
    pub language_to_code_filepath: Option<String>,
}

impl Config {
    pub fn tcp_timeout(&self) -> Duration {
        Duration::from_secs(self.tcp_timeout_seconds)
    }

    /// Window during which repeated clicks from one client count once
    pub fn click_valid_timeout(&self) -> Duration {
        Duration::from_secs(self.click_valid_timeout_seconds)
    }

    pub fn mirror_pull_interval(&self) -> Duration {
        Duration::from_secs(self.mirror_pull_interval_seconds)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl)
    }
}
