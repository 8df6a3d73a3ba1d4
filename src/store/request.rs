// Administrator form submission
// Author: kelexine (https://github.com/kelexine)

use crate::error::{Result, SettingsError};
use crate::settings::{parse_parameter_names, CollectionPeriod, EndpointPath, Settings};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const PERIOD_FIELD: &str = "collectingMetricsPeriodInSeconds";

/// One submitted settings form.
///
/// Missing booleans read as `false` (an unchecked box is not sent) and missing
/// strings as empty. The period stays untyped until [`validated_period`]
/// because the form may send it as a number or as text.
///
/// [`validated_period`]: ConfigureRequest::validated_period
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigureRequest {
    pub path: String,
    pub collect_disk_usage: bool,
    pub use_authenticated_endpoint: bool,
    pub default_namespace: String,
    pub job_attribute_name: String,
    pub count_successful_builds: bool,
    pub count_unstable_builds: bool,
    pub count_failed_builds: bool,
    pub count_not_built_builds: bool,
    pub count_aborted_builds: bool,
    pub fetch_test_results: bool,
    pub collecting_metrics_period_in_seconds: Option<Value>,
    pub processing_disabled_builds: bool,
    pub append_param_label: bool,
    pub append_status_label: bool,
    pub per_build_metrics: bool,
    pub collect_node_status: bool,
    pub collect_stage_metrics: bool,
    pub labeled_build_parameter_names: String,
}

impl ConfigureRequest {
    /// A form pre-filled with the current settings.
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            path: settings.effective_path(),
            collect_disk_usage: settings.collect_disk_usage,
            use_authenticated_endpoint: settings.use_authenticated_endpoint,
            default_namespace: settings.default_namespace.clone(),
            job_attribute_name: settings.job_attribute_name.clone(),
            count_successful_builds: settings.count_successful_builds,
            count_unstable_builds: settings.count_unstable_builds,
            count_failed_builds: settings.count_failed_builds,
            count_not_built_builds: settings.count_not_built_builds,
            count_aborted_builds: settings.count_aborted_builds,
            fetch_test_results: settings.fetch_test_results,
            collecting_metrics_period_in_seconds: Some(Value::from(
                settings.collecting_metrics_period.seconds(),
            )),
            processing_disabled_builds: settings.processing_disabled_builds,
            append_param_label: settings.append_param_label,
            append_status_label: settings.append_status_label,
            per_build_metrics: settings.per_build_metrics,
            collect_node_status: settings.collect_node_status,
            collect_stage_metrics: settings.collect_stage_metrics,
            labeled_build_parameter_names: settings.labeled_build_parameter_names.clone(),
        }
    }

    pub fn with_period(mut self, period: impl Into<Value>) -> Self {
        self.collecting_metrics_period_in_seconds = Some(period.into());
        self
    }

    /// The period must be present and an integer greater than zero.
    pub fn validated_period(&self) -> Result<CollectionPeriod> {
        let invalid = |reason: String| SettingsError::validation(PERIOD_FIELD, reason);

        match &self.collecting_metrics_period_in_seconds {
            None | Some(Value::Null) => Err(invalid("a value is required".to_string())),
            Some(Value::Number(number)) => {
                let seconds = number
                    .as_i64()
                    .or_else(|| integral_f64(number.as_f64()?))
                    .ok_or_else(|| invalid(format!("'{}' is not an integer", number)))?;
                CollectionPeriod::new(seconds)
                    .ok_or_else(|| invalid(format!("{} is not a positive integer", seconds)))
            }
            Some(Value::String(text)) => CollectionPeriod::parse(text).map_err(invalid),
            Some(other) => Err(invalid(format!("'{}' is not an integer", other))),
        }
    }

    /// Field-by-field mapping onto a new snapshot.
    pub(crate) fn into_settings(
        self,
        collecting_metrics_period: CollectionPeriod,
        environment_overrode_disk_usage: bool,
    ) -> Settings {
        let labeled_parameter_names = parse_parameter_names(&self.labeled_build_parameter_names);

        Settings {
            endpoint: EndpointPath::parse_or_default(&self.path),
            default_namespace: self.default_namespace,
            job_attribute_name: self.job_attribute_name,
            use_authenticated_endpoint: self.use_authenticated_endpoint,
            collecting_metrics_period,
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
            labeled_build_parameter_names: self.labeled_build_parameter_names,
            labeled_parameter_names,
            collect_disk_usage: self.collect_disk_usage,
            collect_node_status: self.collect_node_status,
            collect_stage_metrics: self.collect_stage_metrics,
            environment_overrode_disk_usage,
        }
    }
}

/// `60.0` is accepted as `60`; fractions and out-of-range values are not.
fn integral_f64(value: f64) -> Option<i64> {
    let in_range = value >= i64::MIN as f64 && value < i64::MAX as f64;
    (value.fract() == 0.0 && in_range).then_some(value as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(period: Value) -> ConfigureRequest {
        ConfigureRequest::default().with_period(period)
    }

    #[test]
    fn test_period_accepts_number_and_numeric_text() {
        assert_eq!(request(json!(30)).validated_period().unwrap().seconds(), 30);
        assert_eq!(request(json!("45")).validated_period().unwrap().seconds(), 45);
    }

    #[test]
    fn test_period_accepts_integral_float() {
        assert_eq!(request(json!(60.0)).validated_period().unwrap().seconds(), 60);

        let err = request(json!(-3.0)).validated_period().unwrap_err();
        assert!(err.to_string().contains("not a positive integer"));
    }

    #[test]
    fn test_period_rejects_zero_and_negative() {
        for value in [json!(0), json!(-1), json!("0"), json!("-5")] {
            let err = request(value).validated_period().unwrap_err();
            assert_eq!(err.field(), Some(PERIOD_FIELD));
            assert!(err.to_string().contains("not a positive integer"));
        }
    }

    #[test]
    fn test_period_rejects_malformed() {
        for value in [json!("abc"), json!(1.5), json!(true), json!([1])] {
            let err = request(value).validated_period().unwrap_err();
            assert_eq!(err.field(), Some(PERIOD_FIELD));
            assert!(err.to_string().contains("is not an integer"));
        }
    }

    #[test]
    fn test_period_is_required() {
        let err = ConfigureRequest::default().validated_period().unwrap_err();
        assert!(err.to_string().contains("required"));

        let err = request(Value::Null).validated_period().unwrap_err();
        assert!(err.to_string().contains("required"));
    }

    #[test]
    fn test_missing_form_fields_default() {
        let req: ConfigureRequest = serde_json::from_value(json!({
            "path": "metrics",
            "collectingMetricsPeriodInSeconds": "60",
        }))
        .unwrap();

        assert_eq!(req.path, "metrics");
        assert!(!req.count_successful_builds);
        assert_eq!(req.default_namespace, "");
    }

    #[test]
    fn test_prefilled_form_maps_back_to_same_settings() {
        let settings = Settings::default();
        let req = ConfigureRequest::from_settings(&settings);
        let period = req.validated_period().unwrap();

        assert_eq!(req.into_settings(period, false), settings);
    }
}
