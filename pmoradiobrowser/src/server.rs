//! Mirror selection
//!
//! Radio Browser is served by several equivalent mirrors. `ServerPool` hands
//! out one hostname per request so the load is spread across them and a single
//! dead mirror only fails the calls routed to it.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::{trace, warn};

/// Built-in mirrors used when no other host list is available
pub const DEFAULT_SERVERS: &[&str] = &[
    "de1.api.radio-browser.info",
    "de2.api.radio-browser.info",
    "fi1.api.radio-browser.info",
];

/// Caller-supplied source of mirror hostnames, queried on every selection
pub type HostProvider = Arc<dyn Fn() -> anyhow::Result<Vec<String>> + Send + Sync>;

/// How the next mirror is picked
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionPolicy {
    /// Cycle through the hosts in order
    #[default]
    RoundRobin,
    /// Uniform random choice on every call
    Random,
}

enum HostSource {
    Static(Vec<String>),
    Provider(HostProvider),
}

/// Set of interchangeable mirrors with a selection policy
pub struct ServerPool {
    source: HostSource,
    policy: SelectionPolicy,
    cursor: AtomicUsize,
}

impl ServerPool {
    /// Create a pool over a fixed host list
    ///
    /// Blank entries are dropped; an empty list falls back to `DEFAULT_SERVERS`.
    pub fn new<I, S>(hosts: I, policy: SelectionPolicy) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let hosts = sanitize(hosts.into_iter().map(Into::into).collect());
        Self {
            source: HostSource::Static(hosts),
            policy,
            cursor: AtomicUsize::new(0),
        }
    }

    /// Create a pool over the built-in mirrors
    pub fn default_servers(policy: SelectionPolicy) -> Self {
        Self::new(DEFAULT_SERVERS.iter().copied(), policy)
    }

    /// Create a pool whose hosts come from `provider`
    ///
    /// The provider is called on every selection, so the mirror set can change
    /// at runtime without rebuilding the pool.
    pub fn with_provider(provider: HostProvider, policy: SelectionPolicy) -> Self {
        Self {
            source: HostSource::Provider(provider),
            policy,
            cursor: AtomicUsize::new(0),
        }
    }

    pub fn policy(&self) -> SelectionPolicy {
        self.policy
    }

    /// Hosts currently eligible for selection (never empty)
    pub fn hosts(&self) -> Vec<String> {
        match &self.source {
            HostSource::Static(hosts) if !hosts.is_empty() => hosts.clone(),
            HostSource::Static(_) => defaults(),
            HostSource::Provider(provider) => match provider() {
                Ok(hosts) => {
                    let hosts = sanitize(hosts);
                    if hosts.is_empty() {
                        warn!("Host provider returned no mirrors, using defaults");
                        defaults()
                    } else {
                        hosts
                    }
                }
                Err(e) => {
                    warn!("Host provider failed ({}), using defaults", e);
                    defaults()
                }
            },
        }
    }

    /// Pick the host for the next request
    pub fn next(&self) -> String {
        let mut hosts = self.hosts();
        let index = match self.policy {
            SelectionPolicy::RoundRobin => self.cursor.fetch_add(1, Ordering::Relaxed) % hosts.len(),
            SelectionPolicy::Random => rand::rng().random_range(0..hosts.len()),
        };
        let host = hosts.swap_remove(index);
        trace!(host = %host, policy = ?self.policy, "Selected mirror");
        host
    }
}

impl Default for ServerPool {
    fn default() -> Self {
        Self::default_servers(SelectionPolicy::default())
    }
}

impl fmt::Debug for ServerPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let source = match &self.source {
            HostSource::Static(hosts) => format!("{:?}", hosts),
            HostSource::Provider(_) => "<provider>".to_string(),
        };
        f.debug_struct("ServerPool")
            .field("source", &source)
            .field("policy", &self.policy)
            .finish()
    }
}

fn sanitize(hosts: Vec<String>) -> Vec<String> {
    hosts
        .into_iter()
        .map(|h| h.trim().to_string())
        .filter(|h| !h.is_empty())
        .collect()
}

fn defaults() -> Vec<String> {
    DEFAULT_SERVERS.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Mutex;

    #[test]
    fn test_round_robin_visits_every_host_once() {
        let hosts = vec!["a.example", "b.example", "c.example", "d.example"];
        let pool = ServerPool::new(hosts.clone(), SelectionPolicy::RoundRobin);

        let first = pool.next();
        let mut seen = HashSet::new();
        seen.insert(first.clone());
        for _ in 1..hosts.len() {
            assert!(seen.insert(pool.next()), "host visited twice");
        }
        assert_eq!(seen.len(), hosts.len());
        assert_eq!(pool.next(), first);
    }

    #[test]
    fn test_round_robin_starts_at_first_host() {
        let pool = ServerPool::new(["one", "two"], SelectionPolicy::RoundRobin);
        assert_eq!(pool.next(), "one");
        assert_eq!(pool.next(), "two");
        assert_eq!(pool.next(), "one");
    }

    #[test]
    fn test_random_stays_in_pool() {
        let hosts = ["x", "y", "z"];
        let pool = ServerPool::new(hosts, SelectionPolicy::Random);
        for _ in 0..50 {
            let host = pool.next();
            assert!(hosts.contains(&host.as_str()));
        }
    }

    #[test]
    fn test_empty_list_falls_back_to_defaults() {
        let pool = ServerPool::new(Vec::<String>::new(), SelectionPolicy::RoundRobin);
        let host = pool.next();
        assert!(DEFAULT_SERVERS.contains(&host.as_str()));
    }

    #[test]
    fn test_blank_entries_are_ignored() {
        let pool = ServerPool::new(["", "  ", "only.example"], SelectionPolicy::RoundRobin);
        assert_eq!(pool.hosts(), vec!["only.example".to_string()]);
        assert_eq!(pool.next(), "only.example");
    }

    #[test]
    fn test_failing_provider_falls_back_to_defaults() {
        let provider: HostProvider = Arc::new(|| Err(anyhow::anyhow!("lookup failed")));
        let pool = ServerPool::with_provider(provider, SelectionPolicy::Random);
        let host = pool.next();
        assert!(!host.is_empty());
        assert!(DEFAULT_SERVERS.contains(&host.as_str()));
    }

    #[test]
    fn test_provider_is_queried_on_every_call() {
        let current = Arc::new(Mutex::new(vec!["old.example".to_string()]));
        let shared = current.clone();
        let provider: HostProvider = Arc::new(move || Ok(shared.lock().unwrap().clone()));
        let pool = ServerPool::with_provider(provider, SelectionPolicy::RoundRobin);

        assert_eq!(pool.next(), "old.example");
        *current.lock().unwrap() = vec!["new.example".to_string()];
        assert_eq!(pool.next(), "new.example");
    }
}
