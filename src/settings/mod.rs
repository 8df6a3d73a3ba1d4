//! The effective settings of the metrics endpoint.
//!
//! [`Settings`] is an immutable snapshot. The store replaces the whole
//! snapshot on every update, so consumers holding an `Arc<Settings>` always see
//! a consistent set of values.
//!
//! Author: kelexine (<https://github.com/kelexine>)

mod path;

pub use path::{EndpointPath, DEFAULT_ENDPOINT};

use crate::persistence::SettingsRecord;
use serde::Serialize;
use std::fmt;
use std::time::Duration;

pub const DEFAULT_NAMESPACE: &str = "default";
pub const DEFAULT_JOB_ATTRIBUTE_NAME: &str = "jenkins_job";

/// How often metrics are collected, in seconds. Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct CollectionPeriod(u64);

impl CollectionPeriod {
    pub const DEFAULT: CollectionPeriod = CollectionPeriod(120);

    /// Returns `None` for zero or negative values.
    pub fn new(seconds: i64) -> Option<Self> {
        u64::try_from(seconds).ok().filter(|s| *s > 0).map(Self)
    }

    /// Parses a decimal string. Malformed and non-positive input produce
    /// different messages.
    pub fn parse(raw: &str) -> Result<Self, String> {
        let seconds: i64 = raw
            .trim()
            .parse()
            .map_err(|_| format!("'{}' is not an integer", raw))?;
        Self::new(seconds).ok_or_else(|| format!("{} is not a positive integer", seconds))
    }

    pub fn seconds(&self) -> u64 {
        self.0
    }

    pub fn as_duration(&self) -> Duration {
        Duration::from_secs(self.0)
    }
}

impl Default for CollectionPeriod {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for CollectionPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Splits a comma separated list of build parameter names.
///
/// Whitespace around commas is dropped. Blank input yields an empty list.
pub fn parse_parameter_names(raw: &str) -> Vec<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }
    trimmed.split(',').map(|name| name.trim().to_string()).collect()
}

/// One consistent view of every setting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub(crate) endpoint: EndpointPath,
    pub(crate) default_namespace: String,
    pub(crate) job_attribute_name: String,
    pub(crate) use_authenticated_endpoint: bool,
    pub(crate) collecting_metrics_period: CollectionPeriod,

    pub(crate) count_successful_builds: bool,
    pub(crate) count_unstable_builds: bool,
    pub(crate) count_failed_builds: bool,
    pub(crate) count_not_built_builds: bool,
    pub(crate) count_aborted_builds: bool,
    pub(crate) processing_disabled_builds: bool,
    pub(crate) fetch_test_results: bool,

    pub(crate) append_param_label: bool,
    pub(crate) append_status_label: bool,
    pub(crate) per_build_metrics: bool,

    pub(crate) labeled_build_parameter_names: String,
    pub(crate) labeled_parameter_names: Vec<String>,

    pub(crate) collect_disk_usage: bool,
    pub(crate) collect_node_status: bool,
    pub(crate) collect_stage_metrics: bool,

    /// Set when `COLLECT_DISK_USAGE` decided `collect_disk_usage` at startup.
    pub(crate) environment_overrode_disk_usage: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint: EndpointPath::default(),
            default_namespace: DEFAULT_NAMESPACE.to_string(),
            job_attribute_name: DEFAULT_JOB_ATTRIBUTE_NAME.to_string(),
            use_authenticated_endpoint: false,
            collecting_metrics_period: CollectionPeriod::DEFAULT,
            count_successful_builds: true,
            count_unstable_builds: true,
            count_failed_builds: true,
            count_not_built_builds: true,
            count_aborted_builds: true,
            processing_disabled_builds: false,
            fetch_test_results: true,
            append_param_label: false,
            append_status_label: false,
            per_build_metrics: false,
            labeled_build_parameter_names: String::new(),
            labeled_parameter_names: Vec::new(),
            collect_disk_usage: true,
            collect_node_status: true,
            collect_stage_metrics: true,
            environment_overrode_disk_usage: false,
        }
    }
}

impl Settings {
    /// Builds settings from a persisted record, using the given values for the
    /// three environment-aware fields.
    pub(crate) fn from_record(
        record: &SettingsRecord,
        endpoint: EndpointPath,
        collecting_metrics_period: CollectionPeriod,
        collect_disk_usage: bool,
        environment_overrode_disk_usage: bool,
    ) -> Self {
        Self {
            endpoint,
            default_namespace: record.default_namespace.clone(),
            job_attribute_name: record.job_attribute_name.clone(),
            use_authenticated_endpoint: record.use_authenticated_endpoint,
            collecting_metrics_period,
            count_successful_builds: record.count_successful_builds,
            count_unstable_builds: record.count_unstable_builds,
            count_failed_builds: record.count_failed_builds,
            count_not_built_builds: record.count_not_built_builds,
            count_aborted_builds: record.count_aborted_builds,
            processing_disabled_builds: record.processing_disabled_builds,
            fetch_test_results: record.fetch_test_results,
            append_param_label: record.append_param_label,
            append_status_label: record.append_status_label,
            per_build_metrics: record.per_build_metrics,
            labeled_build_parameter_names: record.labeled_build_parameter_names.clone(),
            labeled_parameter_names: parse_parameter_names(&record.labeled_build_parameter_names),
            collect_disk_usage,
            collect_node_status: record.collect_node_status,
            collect_stage_metrics: record.collect_stage_metrics,
            environment_overrode_disk_usage,
        }
    }

    /// The record written back to the persistence backend.
    pub fn to_record(&self) -> SettingsRecord {
        SettingsRecord {
            url_name: Some(self.endpoint.url_name().to_string()),
            additional_path: Some(self.endpoint.additional_path().to_string()),
            default_namespace: self.default_namespace.clone(),
            job_attribute_name: self.job_attribute_name.clone(),
            use_authenticated_endpoint: self.use_authenticated_endpoint,
            collecting_metrics_period_in_seconds: Some(self.collecting_metrics_period.seconds()),
            count_successful_builds: self.count_successful_builds,
            count_unstable_builds: self.count_unstable_builds,
            count_failed_builds: self.count_failed_builds,
            count_not_built_builds: self.count_not_built_builds,
            count_aborted_builds: self.count_aborted_builds,
            processing_disabled_builds: self.processing_disabled_builds,
            fetch_test_results: self.fetch_test_results,
            append_param_label: self.append_param_label,
            append_status_label: self.append_status_label,
            per_build_metrics: self.per_build_metrics,
            labeled_build_parameter_names: self.labeled_build_parameter_names.clone(),
            collect_disk_usage: self.collect_disk_usage,
            collect_node_status: self.collect_node_status,
            collect_stage_metrics: self.collect_stage_metrics,
        }
    }

    pub fn endpoint(&self) -> &EndpointPath {
        &self.endpoint
    }

    pub fn url_name(&self) -> &str {
        self.endpoint.url_name()
    }

    pub fn additional_path(&self) -> &str {
        self.endpoint.additional_path()
    }

    /// `url_name + additional_path`, the path the metrics router serves.
    pub fn effective_path(&self) -> String {
        self.endpoint.effective()
    }

    pub fn default_namespace(&self) -> &str {
        &self.default_namespace
    }

    pub fn job_attribute_name(&self) -> &str {
        &self.job_attribute_name
    }

    pub fn use_authenticated_endpoint(&self) -> bool {
        self.use_authenticated_endpoint
    }

    pub fn collecting_metrics_period(&self) -> CollectionPeriod {
        self.collecting_metrics_period
    }

    pub fn collecting_metrics_period_in_seconds(&self) -> u64 {
        self.collecting_metrics_period.seconds()
    }

    pub fn count_successful_builds(&self) -> bool {
        self.count_successful_builds
    }

    pub fn count_unstable_builds(&self) -> bool {
        self.count_unstable_builds
    }

    pub fn count_failed_builds(&self) -> bool {
        self.count_failed_builds
    }

    pub fn count_not_built_builds(&self) -> bool {
        self.count_not_built_builds
    }

    pub fn count_aborted_builds(&self) -> bool {
        self.count_aborted_builds
    }

    pub fn processing_disabled_builds(&self) -> bool {
        self.processing_disabled_builds
    }

    pub fn fetch_test_results(&self) -> bool {
        self.fetch_test_results
    }

    pub fn append_param_label(&self) -> bool {
        self.append_param_label
    }

    pub fn append_status_label(&self) -> bool {
        self.append_status_label
    }

    pub fn per_build_metrics(&self) -> bool {
        self.per_build_metrics
    }

    /// The comma separated list as the administrator entered it.
    pub fn labeled_build_parameter_names(&self) -> &str {
        &self.labeled_build_parameter_names
    }

    /// Parsed parameter names, in the order they were entered.
    pub fn labeled_parameter_names(&self) -> &[String] {
        &self.labeled_parameter_names
    }

    pub fn collect_disk_usage(&self) -> bool {
        self.collect_disk_usage
    }

    pub fn collect_node_status(&self) -> bool {
        self.collect_node_status
    }

    pub fn collect_stage_metrics(&self) -> bool {
        self.collect_stage_metrics
    }

    pub fn environment_overrode_disk_usage(&self) -> bool {
        self.environment_overrode_disk_usage
    }
}
