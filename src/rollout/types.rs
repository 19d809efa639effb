use serde::{Deserialize, Serialize};

use crate::analysis::types::{JobInfo, MeasurementRecord, MetricInfo};
use crate::types::{deserialize_lenient_i64, ObjectMeta};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RolloutInfoList {
    pub rollouts: Vec<RolloutInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RolloutInfo {
    pub object_meta: ObjectMeta,
    pub status: String,
    pub message: String,
    pub strategy: String,
    pub step: String,
    pub set_weight: String,
    pub actual_weight: String,
    pub replica_sets: Vec<ReplicaSetInfo>,
    pub experiments: Vec<ExperimentInfo>,
    pub analysis_runs: Vec<AnalysisRunInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReplicaSetInfo {
    pub object_meta: ObjectMeta,
    pub status: String,
    pub icon: String,
    #[serde(deserialize_with = "deserialize_lenient_i64")]
    pub revision: i64,
    pub stable: bool,
    pub canary: bool,
    pub active: bool,
    pub preview: bool,
    pub replicas: i32,
    pub available: i32,
    pub images: Vec<String>,
    pub pods: Vec<PodInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PodInfo {
    pub object_meta: ObjectMeta,
    pub status: String,
    pub icon: String,
    pub ready: String,
    pub restarts: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExperimentInfo {
    pub object_meta: ObjectMeta,
    pub status: String,
    pub icon: String,
    pub message: String,
    #[serde(deserialize_with = "deserialize_lenient_i64")]
    pub revision: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalysisRunInfo {
    pub object_meta: ObjectMeta,
    pub status: String,
    pub icon: String,
    #[serde(deserialize_with = "deserialize_lenient_i64")]
    pub revision: i64,
    pub successful: i32,
    pub failed: i32,
    pub inconclusive: i32,
    pub error: i32,
    pub jobs: Vec<JobInfo>,
    pub non_job_info: Vec<MeasurementRecord>,
    pub metrics: Vec<MetricInfo>,
}

impl AnalysisRunInfo {
    /// Button label built from the last two dash separated segments of the run name.
    pub fn short_name(&self) -> String {
        let segments = self.object_meta.name.rsplit('-').take(2).collect::<Vec<_>>();
        match segments.as_slice() {
            [last, second_last] => format!("Analysis {second_last}-{last}"),
            [last] => format!("Analysis {last}"),
            _ => "Analysis".to_string(),
        }
    }

    /// Non zero measurement counters, in display order.
    pub fn counters(&self) -> Vec<(&'static str, i32)> {
        [
            ("Successful", self.successful),
            ("Failed", self.failed),
            ("Inconclusive", self.inconclusive),
            ("Error", self.error),
        ]
        .into_iter()
        .filter(|(_, count)| *count > 0)
        .collect()
    }
}
