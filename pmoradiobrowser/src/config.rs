//! Client configuration
//!
//! `RadioBrowserConfig` is plain data handed to
//! [`ClientBuilder::config`](crate::ClientBuilder::config). It can be written
//! in code, read from YAML, and overridden from the environment:
//!
//! ```yaml
//! servers:
//!   - de1.api.radio-browser.info
//!   - fi1.api.radio-browser.info
//! selection: random
//! timeout_secs: 10
//! ```
//!
//! Environment variables prefixed with `PMORADIOBROWSER__` override single
//! keys, `__` separating nested keys. Values are parsed as YAML, so
//! `PMORADIOBROWSER__SERVERS='[at1.api.radio-browser.info]'` replaces the
//! mirror list and `PMORADIOBROWSER__TIMEOUT_SECS=2` sets a number.

use crate::endpoint::ResponseFormat;
use crate::query::DEFAULT_SCHEME;
use crate::server::{SelectionPolicy, ServerPool, DEFAULT_SERVERS};
use crate::transport::{default_user_agent, DEFAULT_TIMEOUT_SECS};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};
use std::env;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

const ENV_PREFIX: &str = "PMORADIOBROWSER__";

/// Settings of a [`RadioBrowserClient`](crate::RadioBrowserClient)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RadioBrowserConfig {
    /// Mirror hostnames; an empty list means the built-in mirrors
    pub servers: Vec<String>,
    pub selection: SelectionPolicy,
    /// URL scheme, `https` outside of tests
    pub scheme: String,
    pub response_format: ResponseFormat,
    pub user_agent: String,
    pub timeout_secs: u64,
}

impl Default for RadioBrowserConfig {
    fn default() -> Self {
        Self {
            servers: DEFAULT_SERVERS.iter().map(|s| s.to_string()).collect(),
            selection: SelectionPolicy::default(),
            scheme: DEFAULT_SCHEME.to_string(),
            response_format: ResponseFormat::default(),
            user_agent: default_user_agent(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl RadioBrowserConfig {
    /// Parse a YAML document; missing keys keep their default
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let value: Value = serde_yaml::from_str(yaml).context("Invalid Radio Browser YAML configuration")?;
        Self::from_value(value)
    }

    /// Read a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let yaml = fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file {}", path.display()))?;
        Self::from_yaml_str(&yaml)
    }

    /// Read `path` when it exists, then apply environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let value = match path {
            Some(path) if path.exists() => {
                info!(config_file = %path.display(), "Loaded Radio Browser configuration");
                let yaml = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read configuration file {}", path.display()))?;
                serde_yaml::from_str(&yaml).context("Invalid Radio Browser YAML configuration")?
            }
            Some(path) => {
                info!(config_file = %path.display(), "Configuration file not found, using defaults");
                Value::Null
            }
            None => Value::Null,
        };

        Self::from_value_with_overrides(value, env::vars())
    }

    /// Build from a YAML value, applying `PMORADIOBROWSER__*` pairs from `vars`
    pub fn from_value_with_overrides<I>(mut value: Value, vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        apply_overrides(&mut value, vars);
        Self::from_value(value)
    }

    fn from_value(value: Value) -> Result<Self> {
        let value = match lower_keys(value) {
            Value::Null => Value::Mapping(Mapping::new()),
            other => other,
        };
        serde_yaml::from_value(value).context("Invalid Radio Browser configuration")
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Server pool over the configured mirrors
    pub fn server_pool(&self) -> ServerPool {
        ServerPool::new(self.servers.iter().cloned(), self.selection)
    }
}

fn apply_overrides<I>(config: &mut Value, vars: I)
where
    I: IntoIterator<Item = (String, String)>,
{
    for (key, raw) in vars {
        let Some(path) = key.strip_prefix(ENV_PREFIX) else {
            continue;
        };
        let key_path: Vec<String> = path.split("__").map(str::to_lowercase).collect();
        if key_path.iter().any(|k| k.is_empty()) {
            continue;
        }
        debug!(key = %key, "Applying environment override");
        set_value(config, &key_path, convert_env_value(&raw));
    }
}

fn convert_env_value(value: &str) -> Value {
    serde_yaml::from_str::<Value>(value).unwrap_or_else(|_| Value::String(value.to_string()))
}

fn set_value(config: &mut Value, path: &[String], value: Value) {
    let Some((head, rest)) = path.split_first() else {
        *config = value;
        return;
    };

    if !matches!(config, Value::Mapping(_)) {
        *config = Value::Mapping(Mapping::new());
    }
    if let Value::Mapping(map) = config {
        let entry = map
            .entry(Value::String(head.clone()))
            .or_insert(Value::Null);
        set_value(entry, rest, value);
    }
}

fn lower_keys(value: Value) -> Value {
    match value {
        Value::Mapping(map) => Value::Mapping(
            map.into_iter()
                .map(|(k, v)| {
                    let k = match k {
                        Value::String(s) => Value::String(s.to_lowercase()),
                        other => other,
                    };
                    (k, lower_keys(v))
                })
                .collect(),
        ),
        Value::Sequence(seq) => Value::Sequence(seq.into_iter().map(lower_keys).collect()),
        other => other,
    }
}
