// Per-family records already reduced to one per window bucket by an upstream sampler.
// Values use the chart sentinel for "not collected" since they are already chart-shaped.

use serde::{Deserialize, Serialize};

use super::HistogramSchemaType;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SampledJvmGc {
    pub timestamp: i64,
    pub gc_type: Option<String>,
    pub heap_used: i64,
    pub heap_max: i64,
    pub non_heap_used: i64,
    pub non_heap_max: i64,
    pub gc_old_count: i64,
    pub gc_old_time: i64,
}

/// CPU load in percent (0-100).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SampledCpuLoad {
    pub timestamp: i64,
    pub jvm_cpu_load: f64,
    pub system_cpu_load: f64,
}

/// Transactions per second.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SampledTransaction {
    pub timestamp: i64,
    pub sampled_new: f64,
    pub sampled_continuation: f64,
    pub unsampled_new: f64,
    pub unsampled_continuation: f64,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SampledActiveTrace {
    pub timestamp: i64,
    pub histogram_schema: HistogramSchemaType,
    pub fast: i32,
    pub normal: i32,
    pub slow: i32,
    pub very_slow: i32,
}
