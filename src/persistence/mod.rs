//! Durable storage of the settings record.
//!
//! The store only sees the [`PersistenceBackend`] trait. Two backends ship with
//! the crate:
//!
//! - `JsonFileBackend`: a JSON file replaced atomically on every save.
//! - `MemoryBackend`: keeps the record in memory, for tests and embedding.
//!
//! Author: kelexine (<https://github.com/kelexine>)

mod file;
mod memory;

pub use file::JsonFileBackend;
pub use memory::MemoryBackend;

use crate::settings::{DEFAULT_JOB_ATTRIBUTE_NAME, DEFAULT_NAMESPACE};
use serde::{Deserialize, Serialize};
use std::io;

/// Load/save of the settings as one serialized record.
pub trait PersistenceBackend: Send + Sync {
    /// Returns `Ok(None)` when nothing has been saved yet.
    fn load(&self) -> io::Result<Option<SettingsRecord>>;

    fn save(&self, record: &SettingsRecord) -> io::Result<()>;

    /// Human readable location, for log messages.
    fn describe(&self) -> String;
}

/// The persisted form of the settings.
///
/// `url_name` and `collecting_metrics_period_in_seconds` are optional so that a
/// record written before those fields were configured lets the environment
/// seed them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsRecord {
    #[serde(default)]
    pub url_name: Option<String>,
    #[serde(default)]
    pub additional_path: Option<String>,

    #[serde(default = "default_namespace")]
    pub default_namespace: String,
    #[serde(default = "default_job_attribute_name")]
    pub job_attribute_name: String,
    #[serde(default)]
    pub use_authenticated_endpoint: bool,
    #[serde(default)]
    pub collecting_metrics_period_in_seconds: Option<u64>,

    #[serde(default = "default_true")]
    pub count_successful_builds: bool,
    #[serde(default = "default_true")]
    pub count_unstable_builds: bool,
    #[serde(default = "default_true")]
    pub count_failed_builds: bool,
    #[serde(default = "default_true")]
    pub count_not_built_builds: bool,
    #[serde(default = "default_true")]
    pub count_aborted_builds: bool,
    #[serde(default)]
    pub processing_disabled_builds: bool,
    #[serde(default = "default_true")]
    pub fetch_test_results: bool,

    #[serde(default)]
    pub append_param_label: bool,
    #[serde(default)]
    pub append_status_label: bool,
    #[serde(default)]
    pub per_build_metrics: bool,

    #[serde(default)]
    pub labeled_build_parameter_names: String,

    #[serde(default = "default_true")]
    pub collect_disk_usage: bool,
    #[serde(default = "default_true")]
    pub collect_node_status: bool,
    #[serde(default = "default_true")]
    pub collect_stage_metrics: bool,
}

impl Default for SettingsRecord {
    fn default() -> Self {
        Self {
            url_name: None,
            additional_path: None,
            default_namespace: default_namespace(),
            job_attribute_name: default_job_attribute_name(),
            use_authenticated_endpoint: false,
            collecting_metrics_period_in_seconds: None,
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
            collect_disk_usage: true,
            collect_node_status: true,
            collect_stage_metrics: true,
        }
    }
}

fn default_namespace() -> String {
    DEFAULT_NAMESPACE.to_string()
}

fn default_job_attribute_name() -> String {
    DEFAULT_JOB_ATTRIBUTE_NAME.to_string()
}

fn default_true() -> bool {
    true
}
