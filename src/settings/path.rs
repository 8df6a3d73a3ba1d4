// Endpoint path decomposition
// Author: kelexine (https://github.com/kelexine)

use serde::Serialize;
use std::fmt;

/// Endpoint name used when nothing else provides one.
pub const DEFAULT_ENDPOINT: &str = "prometheus";

/// The metrics endpoint path, split into the first segment (`url_name`) and the
/// remainder (`additional_path`).
///
/// `additional_path` is either empty or starts with `/`, so the effective path
/// is always `url_name + additional_path`. `url_name` is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointPath {
    url_name: String,
    additional_path: String,
}

impl EndpointPath {
    /// Decomposes a raw path such as `"prometheus"` or `"a/b/c"`.
    ///
    /// Leading and trailing slashes are ignored; everything else, whitespace
    /// included, is kept as written. Returns an error when nothing remains to
    /// name the endpoint.
    pub fn parse(raw: &str) -> Result<Self, String> {
        let trimmed = raw.trim_matches('/');
        if trimmed.is_empty() {
            return Err(format!("'{}' does not name an endpoint", raw));
        }

        let (url_name, rest) = match trimmed.split_once('/') {
            Some((head, tail)) => (head, Some(tail)),
            None => (trimmed, None),
        };

        Ok(Self {
            url_name: url_name.to_string(),
            additional_path: rest.map(|tail| format!("/{}", tail)).unwrap_or_default(),
        })
    }

    /// Like [`EndpointPath::parse`], but falls back to the default endpoint.
    pub fn parse_or_default(raw: &str) -> Self {
        Self::parse(raw).unwrap_or_default()
    }

    /// Reassembles a persisted `(url_name, additional_path)` pair.
    pub fn from_parts(url_name: &str, additional_path: Option<&str>) -> Result<Self, String> {
        Self::parse(&format!("{}{}", url_name, additional_path.unwrap_or_default()))
    }

    pub fn url_name(&self) -> &str {
        &self.url_name
    }

    pub fn additional_path(&self) -> &str {
        &self.additional_path
    }

    /// The path routers should serve, `url_name + additional_path`.
    pub fn effective(&self) -> String {
        format!("{}{}", self.url_name, self.additional_path)
    }
}

impl Default for EndpointPath {
    fn default() -> Self {
        Self {
            url_name: DEFAULT_ENDPOINT.to_string(),
            additional_path: String::new(),
        }
    }
}

impl fmt::Display for EndpointPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.url_name, self.additional_path)
    }
}
