//! The configuration store.
//!
//! [`ConfigurationStore`] owns the effective [`Settings`]. It resolves them once
//! at construction from the persisted record and the environment, hands out
//! immutable snapshots to readers, and applies validated administrator updates.
//!
//! # Concurrency
//!
//! Readers clone an `Arc<Settings>` under a read lock held only for the
//! pointer copy. Writers build a complete new snapshot and swap it in, so a
//! reader sees either the old settings or the new ones, never a mix. Updates
//! are serialized by a separate mutex held across swap and save.
//!
//! Author: kelexine (<https://github.com/kelexine>)

pub mod registry;
mod request;

pub use request::{ConfigureRequest, PERIOD_FIELD};

use crate::env::{EnvironmentReader, PROMETHEUS_ENDPOINT};
use crate::error::{Result, SettingsError};
use crate::persistence::{PersistenceBackend, SettingsRecord};
use crate::resolve::{
    resolve, RejectedValue, Source, COLLECTION_PERIOD, DISK_USAGE, ENDPOINT_PATH,
};
use crate::settings::{CollectionPeriod, EndpointPath, Settings};
use parking_lot::{Mutex, RwLock};
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Where each environment-aware setting came from at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartupReport {
    /// Whether the backend returned a saved record.
    pub loaded_record: bool,
    pub path: Source,
    pub collecting_metrics_period: Source,
    pub collect_disk_usage: Source,
    /// Environment values that were set but unusable.
    pub rejected: Vec<RejectedValue>,
}

/// Advisory result of checking a candidate endpoint path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "message", rename_all = "lowercase")]
pub enum PathCheck {
    Ok,
    Warning(String),
    Error(String),
}

pub struct ConfigurationStore {
    current: RwLock<Arc<Settings>>,
    /// Serializes updates. Readers never take it.
    update_lock: Mutex<()>,
    env: Arc<dyn EnvironmentReader>,
    backend: Arc<dyn PersistenceBackend>,
    report: StartupReport,
}

impl ConfigurationStore {
    /// Loads the saved record and applies environment overrides.
    ///
    /// Never fails: an unreadable record or a malformed environment value is
    /// logged and the affected settings fall back to their defaults. Nothing is
    /// written to the backend.
    pub fn open(env: Arc<dyn EnvironmentReader>, backend: Arc<dyn PersistenceBackend>) -> Self {
        let loaded = match backend.load() {
            Ok(record) => record,
            Err(e) => {
                warn!(
                    "Failed to load settings from {}: {}. Starting from defaults",
                    backend.describe(),
                    e
                );
                None
            }
        };
        let loaded_record = loaded.is_some();
        let record = loaded.unwrap_or_default();

        let persisted_path = record.url_name.as_deref().and_then(|url_name| {
            EndpointPath::from_parts(url_name, record.additional_path.as_deref()).ok()
        });
        let path = resolve(&ENDPOINT_PATH, persisted_path, env.as_ref());

        let persisted_period = record
            .collecting_metrics_period_in_seconds
            .and_then(|seconds| i64::try_from(seconds).ok())
            .and_then(CollectionPeriod::new);
        let period = resolve(&COLLECTION_PERIOD, persisted_period, env.as_ref());

        // A missing record means the flag was never saved, not that it was saved as true.
        let persisted_disk_usage = loaded_record.then_some(record.collect_disk_usage);
        let disk_usage = resolve(&DISK_USAGE, persisted_disk_usage, env.as_ref());
        let environment_overrode_disk_usage = matches!(disk_usage.source, Source::Environment(_));

        let settings = Settings::from_record(
            &record,
            path.value,
            period.value,
            disk_usage.value,
            environment_overrode_disk_usage,
        );

        info!(
            "Metrics endpoint '{}', collecting every {}s, disk usage {}",
            settings.effective_path(),
            settings.collecting_metrics_period(),
            if settings.collect_disk_usage() { "enabled" } else { "disabled" },
        );

        let report = StartupReport {
            loaded_record,
            path: path.source,
            collecting_metrics_period: period.source,
            collect_disk_usage: disk_usage.source,
            rejected: [path.rejected, period.rejected, disk_usage.rejected].concat(),
        };

        Self {
            current: RwLock::new(Arc::new(settings)),
            update_lock: Mutex::new(()),
            env,
            backend,
            report,
        }
    }

    /// The current settings. The snapshot never changes after it is returned.
    pub fn snapshot(&self) -> Arc<Settings> {
        Arc::clone(&self.current.read())
    }

    pub fn effective_path(&self) -> String {
        self.snapshot().effective_path()
    }

    pub fn report(&self) -> &StartupReport {
        &self.report
    }

    /// Validates and applies an administrator update, then persists it.
    ///
    /// A missing or non-positive period rejects the whole request: nothing is
    /// applied and nothing is saved. If saving fails the new settings stay in
    /// effect in memory and the error is returned.
    pub fn apply_update(&self, request: ConfigureRequest) -> Result<Arc<Settings>> {
        let _guard = self.update_lock.lock();

        let period = request.validated_period().map_err(|e| {
            warn!("Rejected settings update: {}", e);
            e
        })?;

        let overrode = self.current.read().environment_overrode_disk_usage();
        let next = Arc::new(request.into_settings(period, overrode));
        self.swap_and_persist(Arc::clone(&next))?;

        info!(
            "Settings updated: endpoint '{}', period {}s",
            next.effective_path(),
            next.collecting_metrics_period()
        );
        Ok(next)
    }

    /// Changes only the stage metrics flag and saves immediately.
    pub fn set_collect_stage_metrics(&self, enabled: bool) -> Result<()> {
        let _guard = self.update_lock.lock();

        let mut next = Settings::clone(&self.current.read());
        next.collect_stage_metrics = enabled;
        self.swap_and_persist(Arc::new(next))
    }

    /// Advisory check of a candidate path. Never blocks a save.
    pub fn check_path(&self, candidate: &str) -> PathCheck {
        if candidate.is_empty() {
            return PathCheck::Error("Path is required".to_string());
        }
        match self.env.get(PROMETHEUS_ENDPOINT) {
            Some(value) => PathCheck::Warning(format!(
                "The path is overridden by the environment variable {}={} on a fresh start",
                PROMETHEUS_ENDPOINT, value
            )),
            None => PathCheck::Ok,
        }
    }

    /// Caller must hold `update_lock`.
    fn swap_and_persist(&self, next: Arc<Settings>) -> Result<()> {
        let record: SettingsRecord = next.to_record();
        *self.current.write() = next;

        self.backend.save(&record).map_err(|e| {
            error!("Failed to save settings to {}: {}", self.backend.describe(), e);
            SettingsError::Persistence(e)
        })
    }
}

impl std::fmt::Debug for ConfigurationStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigurationStore")
            .field("settings", &self.snapshot())
            .field("backend", &self.backend.describe())
            .field("report", &self.report)
            .finish()
    }
}
