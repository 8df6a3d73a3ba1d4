//! Read-only access to environment variables.
//!
//! The engine never calls `std::env` directly. It goes through an
//! [`EnvironmentReader`] so that tests and embedding hosts can supply a fixed
//! view of the environment.
//!
//! Author: kelexine (<https://github.com/kelexine>)

use std::collections::HashMap;

/// Overrides the endpoint path on first start.
pub const PROMETHEUS_ENDPOINT: &str = "PROMETHEUS_ENDPOINT";

/// Seeds the collection period when none has been persisted.
pub const COLLECTING_METRICS_PERIOD_IN_SECONDS: &str = "COLLECTING_METRICS_PERIOD_IN_SECONDS";

/// Forces the disk-usage collection flag on every start.
pub const COLLECT_DISK_USAGE: &str = "COLLECT_DISK_USAGE";

/// Key/value lookup over the process environment.
pub trait EnvironmentReader: Send + Sync {
    /// Returns the value of `name`, or `None` when it is unset or not valid UTF-8.
    fn get(&self, name: &str) -> Option<String>;

    fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }
}

/// Reads the real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnvironment;

impl EnvironmentReader for ProcessEnvironment {
    fn get(&self, name: &str) -> Option<String> {
        std::env::var_os(name).and_then(|raw| raw.into_string().ok())
    }
}

/// A fixed environment snapshot.
#[derive(Debug, Clone, Default)]
pub struct MapEnvironment {
    vars: HashMap<String, String>,
}

impl MapEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }
}

impl<K, V> FromIterator<(K, V)> for MapEnvironment
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl EnvironmentReader for MapEnvironment {
    fn get(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}
