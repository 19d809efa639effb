use chrono::DateTime;
use serde::{Deserialize, Serialize};

use crate::types::{deserialize_lenient_i64, deserialize_or_none, ObjectMeta};

use super::phase::AnalysisPhase;

/// A single measurement as reported by the rollouts api.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MeasurementRecord {
    pub metric_name: String,
    #[serde(deserialize_with = "deserialize_or_none")]
    pub started_at: Option<StartedAt>,
    #[serde(deserialize_with = "deserialize_or_none")]
    pub value: Option<MeasurementValue>,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StartedAt {
    Rfc3339(String),
    Seconds {
        #[serde(deserialize_with = "deserialize_lenient_i64")]
        seconds: i64,
    },
}

impl StartedAt {
    pub fn timestamp_millis(&self) -> Option<i64> {
        match self {
            Self::Rfc3339(datetime) => DateTime::parse_from_rfc3339(datetime)
                .ok()
                .map(|datetime| datetime.timestamp_millis()),
            Self::Seconds { seconds } => seconds.checked_mul(1000),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MeasurementValue {
    Number(f64),
    Text(String),
}

impl MeasurementValue {
    /// Non numeric values are `NaN` and show up as gaps in the chart.
    pub fn as_f64(&self) -> f64 {
        match self {
            Self::Number(value) => *value,
            Self::Text(text) => text.trim().parse().unwrap_or(f64::NAN),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DataPoint {
    /// `None` when the measurement has no usable start time.
    pub timestamp: Option<i64>,
    pub value: f64,
    pub phase: AnalysisPhase,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    pub name: String,
    pub points: Vec<DataPoint>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobInfo {
    pub object_meta: ObjectMeta,
    pub status: String,
    pub icon: String,
    pub metric_name: String,
    #[serde(deserialize_with = "deserialize_or_none")]
    pub started_at: Option<StartedAt>,
}

/// Metric definition of an analysis run, as shown on the metric cards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MetricInfo {
    pub name: String,
    pub success_condition: Option<String>,
    pub failure_condition: Option<String>,
    pub failure_limit: Option<serde_json::Value>,
    pub inconclusive_limit: Option<serde_json::Value>,
    pub consecutive_error_limit: Option<serde_json::Value>,
    pub count: Option<serde_json::Value>,
    pub interval: Option<String>,
    pub initial_delay: Option<String>,
    pub provider: Option<serde_json::Value>,
}

impl MetricInfo {
    /// Every set field except the name, in declaration order.
    pub fn descriptions(&self) -> Vec<(&'static str, String)> {
        let text = |label, value: &Option<String>| value.clone().map(|value| (label, value));
        let json = |label, value: &Option<serde_json::Value>| {
            value.as_ref().map(|value| (label, display_json(value)))
        };

        [
            text("successCondition", &self.success_condition),
            text("failureCondition", &self.failure_condition),
            json("failureLimit", &self.failure_limit),
            json("inconclusiveLimit", &self.inconclusive_limit),
            json("consecutiveErrorLimit", &self.consecutive_error_limit),
            json("count", &self.count),
            text("interval", &self.interval),
            text("initialDelay", &self.initial_delay),
            json("provider", &self.provider),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

fn display_json(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(text) => text.clone(),
        value => value.to_string(),
    }
}

/// AnalysisRun custom resource, trimmed to what the detail view shows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisRun {
    pub metadata: ObjectMeta,
    pub status: Option<AnalysisRunStatus>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalysisRunStatus {
    pub phase: String,
    pub message: Option<String>,
    pub started_at: Option<String>,
    pub metric_results: Vec<MetricResult>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MetricResult {
    pub name: String,
    pub phase: String,
    pub count: i32,
    pub successful: i32,
    pub failed: i32,
    pub inconclusive: i32,
    pub error: i32,
    pub message: Option<String>,
}

impl AnalysisRun {
    pub fn phase(&self) -> AnalysisPhase {
        self.status
            .as_ref()
            .map_or(AnalysisPhase::Pending, |status| {
                AnalysisPhase::from_label(&status.phase)
            })
    }

    pub fn metric_results(&self) -> &[MetricResult] {
        self.status
            .as_ref()
            .map(|status| status.metric_results.as_slice())
            .unwrap_or_default()
    }

    pub fn successful(&self) -> i32 {
        self.metric_results().iter().map(|result| result.successful).sum()
    }

    pub fn inconclusive(&self) -> i32 {
        self.metric_results().iter().map(|result| result.inconclusive).sum()
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn values_coerce_to_numbers() {
        assert_eq!(MeasurementValue::Number(1.5).as_f64(), 1.5);
        assert_eq!(MeasurementValue::Text("0.95".into()).as_f64(), 0.95);
        assert_eq!(MeasurementValue::Text(" 42 ".into()).as_f64(), 42.0);
        assert!(MeasurementValue::Text("[0.95]".into()).as_f64().is_nan());
        assert!(MeasurementValue::Text(String::new()).as_f64().is_nan());
    }

    #[test]
    fn started_at_accepts_both_encodings() {
        let record: MeasurementRecord = serde_json::from_value(json!({
            "metricName": "success-rate",
            "startedAt": "2024-01-01T00:01:00Z",
            "value": "0.80",
            "status": "Inconclusive",
        }))
        .unwrap();
        assert_eq!(
            record.started_at.and_then(|started_at| started_at.timestamp_millis()),
            Some(1_704_067_260_000)
        );
        assert_eq!(record.value, Some(MeasurementValue::Text("0.80".into())));

        let started_at: StartedAt = serde_json::from_value(json!({ "seconds": 60 })).unwrap();
        assert_eq!(started_at.timestamp_millis(), Some(60_000));
    }

    #[test]
    fn started_at_seconds_may_be_a_string() {
        let started_at: StartedAt =
            serde_json::from_value(json!({ "seconds": "1704067200" })).unwrap();
        assert_eq!(started_at.timestamp_millis(), Some(1_704_067_200_000));
    }

    #[test]
    fn unexpected_shapes_do_not_fail_the_record() {
        let record: MeasurementRecord = serde_json::from_value(json!({
            "metricName": "success-rate",
            "startedAt": { "nanos": 12 },
            "value": { "result": [0.95] },
            "status": "Successful",
        }))
        .unwrap();

        assert_eq!(record.metric_name, "success-rate");
        assert_eq!(record.started_at, None);
        assert_eq!(record.value, None);

        let job: JobInfo = serde_json::from_value(json!({
            "metricName": "smoke",
            "startedAt": true,
        }))
        .unwrap();
        assert_eq!(job.started_at, None);
    }

    #[test]
    fn metric_descriptions_skip_unset_fields() {
        let metric: MetricInfo = serde_json::from_value(json!({
            "name": "success-rate",
            "successCondition": "result[0] >= 0.95",
            "failureLimit": 3,
            "count": "5",
        }))
        .unwrap();

        assert_eq!(
            metric.descriptions(),
            vec![
                ("successCondition", "result[0] >= 0.95".to_string()),
                ("failureLimit", "3".to_string()),
                ("count", "5".to_string()),
            ]
        );
    }

    #[test]
    fn analysis_run_summary() {
        let run: AnalysisRun = serde_json::from_value(json!({
            "metadata": { "name": "guestbook-6c5d9b-2-1", "namespace": "default" },
            "status": {
                "phase": "Successful",
                "metricResults": [
                    { "name": "success-rate", "phase": "Successful", "count": 3, "successful": 2, "inconclusive": 1 },
                    { "name": "latency", "phase": "Successful", "count": 3, "successful": 3 },
                ],
            },
        }))
        .unwrap();

        assert_eq!(run.phase(), AnalysisPhase::Successful);
        assert_eq!(run.successful(), 5);
        assert_eq!(run.inconclusive(), 1);
        assert_eq!(AnalysisRun::default().phase(), AnalysisPhase::Pending);
        assert!(AnalysisRun::default().metric_results().is_empty());
    }
}
