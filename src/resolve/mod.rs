//! Precedence rules for the environment-aware settings.
//!
//! Three settings may come from the environment. Instead of encoding their
//! precedence as branches, each one has a [`FieldRule`]: an ordered chain of
//! [`Source`]s that [`resolve`] walks until one yields a usable value.
//!
//! | field | chain |
//! |---|---|
//! | endpoint path | persisted, `PROMETHEUS_ENDPOINT`, default |
//! | collection period | persisted, `COLLECTING_METRICS_PERIOD_IN_SECONDS`, default |
//! | disk usage | `COLLECT_DISK_USAGE`, persisted, default |
//!
//! Author: kelexine (<https://github.com/kelexine>)

use crate::env::{
    EnvironmentReader, COLLECTING_METRICS_PERIOD_IN_SECONDS, COLLECT_DISK_USAGE,
    PROMETHEUS_ENDPOINT,
};
use crate::settings::{CollectionPeriod, EndpointPath};
use serde::Serialize;
use tracing::{debug, warn};

/// Where a resolved value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "variable", rename_all = "lowercase")]
pub enum Source {
    Persisted,
    Environment(&'static str),
    Default,
}

/// Resolution strategy for one field.
pub struct FieldRule<T: 'static> {
    pub field: &'static str,
    pub chain: &'static [Source],
    pub parse: fn(&str) -> Result<T, String>,
    pub default: fn() -> T,
    /// Warning logged when the chain ends on the default.
    pub default_warning: Option<fn() -> String>,
}

/// An environment value that was present but could not be used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedValue {
    pub variable: &'static str,
    pub value: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Resolved<T> {
    pub value: T,
    pub source: Source,
    pub rejected: Vec<RejectedValue>,
}

pub const ENDPOINT_PATH: FieldRule<EndpointPath> = FieldRule {
    field: "path",
    chain: &[
        Source::Persisted,
        Source::Environment(PROMETHEUS_ENDPOINT),
        Source::Default,
    ],
    parse: EndpointPath::parse,
    default: EndpointPath::default,
    default_warning: None,
};

pub const COLLECTION_PERIOD: FieldRule<CollectionPeriod> = FieldRule {
    field: "collectingMetricsPeriodInSeconds",
    chain: &[
        Source::Persisted,
        Source::Environment(COLLECTING_METRICS_PERIOD_IN_SECONDS),
        Source::Default,
    ],
    parse: CollectionPeriod::parse,
    default: CollectionPeriod::default,
    default_warning: Some(period_default_warning),
};

pub const DISK_USAGE: FieldRule<bool> = FieldRule {
    field: "collectDiskUsage",
    chain: &[
        Source::Environment(COLLECT_DISK_USAGE),
        Source::Persisted,
        Source::Default,
    ],
    parse: parse_bool_literal,
    default: default_collect_disk_usage,
    default_warning: None,
};

/// Accepts `true` or `false` in any case, nothing else.
pub fn parse_bool_literal(raw: &str) -> Result<bool, String> {
    if raw.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if raw.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err("must either be 'true' or 'false'".to_string())
    }
}

fn default_collect_disk_usage() -> bool {
    true
}

/// Walks `rule.chain` and returns the first usable value.
///
/// Invalid environment values are logged, recorded in `rejected` and skipped.
/// A chain without `Default` still ends on the rule's default.
pub fn resolve<T>(
    rule: &FieldRule<T>,
    mut persisted: Option<T>,
    env: &dyn EnvironmentReader,
) -> Resolved<T> {
    let mut rejected = Vec::new();

    for source in rule.chain {
        match *source {
            Source::Persisted => {
                if let Some(value) = persisted.take() {
                    debug!("{} taken from persisted settings", rule.field);
                    return Resolved {
                        value,
                        source: Source::Persisted,
                        rejected,
                    };
                }
            }
            Source::Environment(variable) => {
                let Some(raw) = env.get(variable) else {
                    continue;
                };
                match (rule.parse)(&raw) {
                    Ok(value) => {
                        debug!("{} taken from environment variable {}", rule.field, variable);
                        return Resolved {
                            value,
                            source: Source::Environment(variable),
                            rejected,
                        };
                    }
                    Err(reason) => {
                        warn!(
                            "Unable to parse environment variable '{}' ({}). Ignoring...",
                            variable, reason
                        );
                        rejected.push(RejectedValue {
                            variable,
                            value: raw,
                            reason,
                        });
                    }
                }
            }
            Source::Default => break,
        }
    }

    if let Some(message) = rule.default_warning {
        warn!("{}", message());
    }
    Resolved {
        value: (rule.default)(),
        source: Source::Default,
        rejected,
    }
}

fn period_default_warning() -> String {
    format!(
        "{} must be a positive integer. The default value: '{}' will be used instead of provided.",
        COLLECTING_METRICS_PERIOD_IN_SECONDS,
        CollectionPeriod::DEFAULT
    )
}
