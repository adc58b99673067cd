// One agent's telemetry sample as reported on the wire.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::sample::not_collected;
use super::{HistogramSchemaType, SlotType};

/// A single observation. Readings that were not collected are `None`
/// (the wire form is `-1`, `null` or an absent field).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentStat {
    #[serde(default)]
    pub agent_id: Option<String>,
    #[serde(default)]
    pub start_timestamp: i64,
    pub timestamp: i64,
    /// Milliseconds covered by this sample. Rate metrics are skipped when <= 0.
    #[serde(default)]
    pub collect_interval: i64,
    #[serde(default)]
    pub gc_type: Option<String>,

    #[serde(default, with = "not_collected")]
    pub heap_used: Option<i64>,
    #[serde(default, with = "not_collected")]
    pub heap_max: Option<i64>,
    #[serde(default, with = "not_collected")]
    pub non_heap_used: Option<i64>,
    #[serde(default, with = "not_collected")]
    pub non_heap_max: Option<i64>,
    #[serde(default, with = "not_collected")]
    pub gc_old_count: Option<i64>,
    #[serde(default, with = "not_collected")]
    pub gc_old_time: Option<i64>,

    /// CPU load as a fraction in [0, 1].
    #[serde(default, with = "not_collected")]
    pub jvm_cpu_usage: Option<f64>,
    #[serde(default, with = "not_collected")]
    pub system_cpu_usage: Option<f64>,

    #[serde(default, with = "not_collected")]
    pub sampled_new_count: Option<i64>,
    #[serde(default, with = "not_collected")]
    pub sampled_continuation_count: Option<i64>,
    #[serde(default, with = "not_collected")]
    pub unsampled_new_count: Option<i64>,
    #[serde(default, with = "not_collected")]
    pub unsampled_continuation_count: Option<i64>,

    #[serde(default)]
    pub histogram_schema: Option<HistogramSchemaType>,
    #[serde(default)]
    pub active_trace_counts: BTreeMap<SlotType, i32>,
}

impl AgentStat {
    pub fn new(timestamp: i64, collect_interval: i64) -> Self {
        Self {
            timestamp,
            collect_interval,
            ..Default::default()
        }
    }
}
