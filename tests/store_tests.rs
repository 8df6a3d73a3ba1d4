// Configuration store lifecycle tests
// Author: kelexine (https://github.com/kelexine)

use promconf::env::{MapEnvironment, COLLECT_DISK_USAGE};
use promconf::error::SettingsError;
use promconf::persistence::{JsonFileBackend, MemoryBackend, PersistenceBackend, SettingsRecord};
use promconf::store::{ConfigurationStore, ConfigureRequest, PERIOD_FIELD};
use serde_json::json;
use std::sync::Arc;
use std::thread;

fn open_with(backend: &Arc<MemoryBackend>) -> ConfigurationStore {
    ConfigurationStore::open(Arc::new(MapEnvironment::new()), backend.clone())
}

fn full_form() -> ConfigureRequest {
    serde_json::from_value(json!({
        "path": "metrics/jenkins",
        "collectDiskUsage": false,
        "useAuthenticatedEndpoint": true,
        "defaultNamespace": "ci",
        "jobAttributeName": "job",
        "countSuccessfulBuilds": true,
        "countUnstableBuilds": false,
        "countFailedBuilds": true,
        "countNotBuiltBuilds": false,
        "countAbortedBuilds": true,
        "fetchTestResults": false,
        "collectingMetricsPeriodInSeconds": "30",
        "processingDisabledBuilds": true,
        "appendParamLabel": true,
        "appendStatusLabel": true,
        "perBuildMetrics": true,
        "collectNodeStatus": false,
        "collectStageMetrics": false,
        "labeledBuildParameterNames": " branch , env,region ",
    }))
    .unwrap()
}

#[test]
fn test_update_applies_every_field_and_persists() {
    let backend = Arc::new(MemoryBackend::new());
    let store = open_with(&backend);

    let settings = store.apply_update(full_form()).unwrap();

    assert_eq!(settings.url_name(), "metrics");
    assert_eq!(settings.additional_path(), "/jenkins");
    assert_eq!(settings.effective_path(), "metrics/jenkins");
    assert!(!settings.collect_disk_usage());
    assert!(settings.use_authenticated_endpoint());
    assert_eq!(settings.default_namespace(), "ci");
    assert_eq!(settings.job_attribute_name(), "job");
    assert!(settings.count_successful_builds());
    assert!(!settings.count_unstable_builds());
    assert!(settings.count_failed_builds());
    assert!(!settings.count_not_built_builds());
    assert!(settings.count_aborted_builds());
    assert!(!settings.fetch_test_results());
    assert_eq!(settings.collecting_metrics_period_in_seconds(), 30);
    assert!(settings.processing_disabled_builds());
    assert!(settings.append_param_label());
    assert!(settings.append_status_label());
    assert!(settings.per_build_metrics());
    assert!(!settings.collect_node_status());
    assert!(!settings.collect_stage_metrics());
    assert_eq!(settings.labeled_build_parameter_names(), " branch , env,region ");
    assert_eq!(settings.labeled_parameter_names(), ["branch", "env", "region"]);

    assert_eq!(*store.snapshot(), *settings);
    assert_eq!(backend.save_count(), 1);
    assert_eq!(backend.record().unwrap(), settings.to_record());
}

#[test]
fn test_zero_period_rejects_whole_update() {
    let backend = Arc::new(MemoryBackend::new());
    let store = open_with(&backend);
    let before = store.snapshot();

    let err = store.apply_update(full_form().with_period(0)).unwrap_err();

    assert!(matches!(err, SettingsError::Validation { .. }));
    assert_eq!(err.field(), Some(PERIOD_FIELD));
    assert_eq!(*store.snapshot(), *before);
    assert_eq!(store.snapshot().effective_path(), "prometheus");
    assert_eq!(store.snapshot().default_namespace(), "default");
    assert_eq!(backend.save_count(), 0);
    assert_eq!(backend.record(), None);
}

#[test]
fn test_malformed_and_missing_period_rejected() {
    let backend = Arc::new(MemoryBackend::new());
    let store = open_with(&backend);

    let malformed = store.apply_update(full_form().with_period("two minutes"));
    assert_eq!(malformed.unwrap_err().field(), Some(PERIOD_FIELD));

    let mut missing = full_form();
    missing.collecting_metrics_period_in_seconds = None;
    assert_eq!(store.apply_update(missing).unwrap_err().field(), Some(PERIOD_FIELD));

    assert_eq!(backend.save_count(), 0);
}

#[test]
fn test_empty_free_text_and_parameter_list_are_legal() {
    let backend = Arc::new(MemoryBackend::new());
    let store = open_with(&backend);

    let mut form = full_form();
    form.default_namespace = String::new();
    form.labeled_build_parameter_names = "   ".to_string();

    let settings = store.apply_update(form).unwrap();
    assert_eq!(settings.default_namespace(), "");
    assert!(settings.labeled_parameter_names().is_empty());
}

#[test]
fn test_empty_path_falls_back_to_default_endpoint() {
    let backend = Arc::new(MemoryBackend::new());
    let store = open_with(&backend);

    let mut form = full_form();
    form.path = String::new();

    let settings = store.apply_update(form).unwrap();
    assert_eq!(settings.url_name(), "prometheus");
    assert_eq!(settings.additional_path(), "");
}

#[test]
fn test_persistence_failure_keeps_new_values_in_memory() {
    let backend = Arc::new(MemoryBackend::new());
    let store = open_with(&backend);
    backend.fail_saves(true);

    let err = store.apply_update(full_form()).unwrap_err();

    assert!(matches!(err, SettingsError::Persistence(_)));
    assert_eq!(store.snapshot().effective_path(), "metrics/jenkins");
    assert_eq!(backend.record(), None);
}

#[test]
fn test_update_keeps_startup_disk_usage_override_flag() {
    let backend = Arc::new(MemoryBackend::new());
    let env = MapEnvironment::new().with(COLLECT_DISK_USAGE, "true");
    let store = ConfigurationStore::open(Arc::new(env), backend.clone());
    assert!(store.snapshot().environment_overrode_disk_usage());

    let settings = store.apply_update(full_form()).unwrap();
    assert!(settings.environment_overrode_disk_usage());
    assert!(!settings.collect_disk_usage());
}

#[test]
fn test_saved_settings_survive_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");

    let store = ConfigurationStore::open(
        Arc::new(MapEnvironment::new()),
        Arc::new(JsonFileBackend::new(&path)),
    );
    let saved = store.apply_update(full_form()).unwrap();

    let reopened = ConfigurationStore::open(
        Arc::new(MapEnvironment::new()),
        Arc::new(JsonFileBackend::new(&path)),
    );
    assert!(reopened.report().loaded_record);
    assert_eq!(*reopened.snapshot(), *saved);
}

#[test]
fn test_corrupt_settings_file_starts_from_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, "<xml/>").unwrap();

    let store = ConfigurationStore::open(
        Arc::new(MapEnvironment::new()),
        Arc::new(JsonFileBackend::new(&path)),
    );

    assert!(!store.report().loaded_record);
    assert_eq!(store.snapshot().effective_path(), "prometheus");
    assert_eq!(store.snapshot().collecting_metrics_period_in_seconds(), 120);
}

#[test]
fn test_prefilled_form_round_trips_through_store() {
    let record = SettingsRecord {
        url_name: Some("metrics".to_string()),
        additional_path: Some("/ci".to_string()),
        collecting_metrics_period_in_seconds: Some(15),
        labeled_build_parameter_names: "a,b".to_string(),
        ..SettingsRecord::default()
    };
    let backend = Arc::new(MemoryBackend::with_record(record.clone()));
    let store = open_with(&backend);

    let form = ConfigureRequest::from_settings(&store.snapshot());
    store.apply_update(form).unwrap();

    assert_eq!(backend.record().unwrap(), record);
}

#[test]
fn test_readers_never_observe_partial_update() {
    let backend = Arc::new(MemoryBackend::new());
    let store = Arc::new(open_with(&backend));

    // Two complete configurations; every field differs between them.
    let mut first = full_form();
    first.path = "first".to_string();
    first.default_namespace = "first".to_string();
    first.collecting_metrics_period_in_seconds = Some(json!(10));
    first.per_build_metrics = false;

    let mut second = full_form();
    second.path = "second".to_string();
    second.default_namespace = "second".to_string();
    second.collecting_metrics_period_in_seconds = Some(json!(20));
    second.per_build_metrics = true;

    store.apply_update(first.clone()).unwrap();

    let writer = {
        let store = Arc::clone(&store);
        thread::spawn(move || {
            for i in 0..500 {
                let form = if i % 2 == 0 { second.clone() } else { first.clone() };
                store.apply_update(form).unwrap();
            }
        })
    };

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for _ in 0..2_000 {
                    let s = store.snapshot();
                    let consistent = match s.url_name() {
                        "first" => {
                            s.default_namespace() == "first"
                                && s.collecting_metrics_period_in_seconds() == 10
                                && !s.per_build_metrics()
                        }
                        "second" => {
                            s.default_namespace() == "second"
                                && s.collecting_metrics_period_in_seconds() == 20
                                && s.per_build_metrics()
                        }
                        _ => false,
                    };
                    assert!(consistent, "torn snapshot: {:?}", s);
                }
            })
        })
        .collect();

    writer.join().unwrap();
    for reader in readers {
        reader.join().unwrap();
    }

    assert_eq!(backend.save_count(), 501);
    let saved = backend.record().unwrap();
    assert_eq!(saved, store.snapshot().to_record());
}

#[test]
fn test_store_does_not_save_on_open() {
    let backend = Arc::new(MemoryBackend::new());
    let _store = open_with(&backend);
    assert_eq!(backend.load().unwrap(), None);
}
