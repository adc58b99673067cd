// Upstream family samplers: reduce raw observations to one record per window bucket,
// each family with its own aggregation, for `AgentStatChartGroup::compose`.

use std::collections::BTreeMap;

use tracing::debug;

use crate::chart_group::FamilySamples;
use crate::downsampler::{DownSampler, Reducer, Reduction};
use crate::models::{
    AgentStat, HistogramSchemaType, Sample, SampledActiveTrace, SampledCpuLoad, SampledJvmGc,
    SampledTransaction, SlotType,
};
use crate::rate::calculate_tps;
use crate::time_window::TimeWindow;

/// Decimal places kept on averaged floating-point family values.
const AVERAGE_DECIMALS: u32 = 1;

const AVG_LONG: DownSampler<i64> = DownSampler::new(Reduction::Avg, 0);
const MAX_LONG: DownSampler<i64> = DownSampler::new(Reduction::Max, 0);
const AVG_DOUBLE: DownSampler<f64> = DownSampler::new(Reduction::Avg, AVERAGE_DECIMALS);
const MAX_INTEGER: DownSampler<i32> = DownSampler::new(Reduction::Max, 0);

/// Observations grouped by bucket index, input order kept within a bucket.
fn by_bucket<'a>(
    window: &TimeWindow,
    stats: &'a [Option<AgentStat>],
) -> BTreeMap<usize, Vec<&'a AgentStat>> {
    let mut buckets: BTreeMap<usize, Vec<&AgentStat>> = BTreeMap::new();
    for stat in stats.iter().flatten() {
        if let Some(index) = window.bucket_index(stat.timestamp) {
            buckets.entry(index).or_default().push(stat);
        }
    }
    buckets
}

fn reduce_with<T, F>(reducer: &impl Reducer<T>, stats: &[&AgentStat], reading: F) -> T
where
    T: Sample,
    F: Fn(&AgentStat) -> Option<T>,
{
    let values: Vec<T> = stats.iter().filter_map(|s| reading(s)).collect();
    reducer.reduce(&values)
}

/// Memory readings are averaged; GC counters keep the bucket maximum.
pub fn sample_jvm_gcs(window: &TimeWindow, stats: &[Option<AgentStat>]) -> Vec<SampledJvmGc> {
    by_bucket(window, stats)
        .into_iter()
        .map(|(index, bucket)| SampledJvmGc {
            timestamp: window.bucket_start(index),
            gc_type: bucket.last().and_then(|s| s.gc_type.clone()),
            heap_used: reduce_with(&AVG_LONG, &bucket, |s| s.heap_used),
            heap_max: reduce_with(&AVG_LONG, &bucket, |s| s.heap_max),
            non_heap_used: reduce_with(&AVG_LONG, &bucket, |s| s.non_heap_used),
            non_heap_max: reduce_with(&AVG_LONG, &bucket, |s| s.non_heap_max),
            gc_old_count: reduce_with(&MAX_LONG, &bucket, |s| s.gc_old_count),
            gc_old_time: reduce_with(&MAX_LONG, &bucket, |s| s.gc_old_time),
        })
        .collect()
}

/// Bucket average of the load in percent.
pub fn sample_cpu_loads(window: &TimeWindow, stats: &[Option<AgentStat>]) -> Vec<SampledCpuLoad> {
    by_bucket(window, stats)
        .into_iter()
        .map(|(index, bucket)| SampledCpuLoad {
            timestamp: window.bucket_start(index),
            jvm_cpu_load: reduce_with(&AVG_DOUBLE, &bucket, |s| {
                s.jvm_cpu_usage.map(|v| v * 100.0)
            }),
            system_cpu_load: reduce_with(&AVG_DOUBLE, &bucket, |s| {
                s.system_cpu_usage.map(|v| v * 100.0)
            }),
        })
        .collect()
}

/// Rates are computed per observation first, then averaged over the bucket.
/// Observations with a non-positive interval do not contribute.
pub fn sample_transactions(
    window: &TimeWindow,
    stats: &[Option<AgentStat>],
) -> Vec<SampledTransaction> {
    let tps = |count: Option<i64>, interval: i64| count.map(|c| calculate_tps(Some(c), interval));
    by_bucket(window, stats)
        .into_iter()
        .filter_map(|(index, bucket)| {
            let eligible: Vec<&AgentStat> = bucket
                .into_iter()
                .filter(|s| s.collect_interval > 0)
                .collect();
            if eligible.is_empty() {
                return None;
            }
            Some(SampledTransaction {
                timestamp: window.bucket_start(index),
                sampled_new: reduce_with(&AVG_DOUBLE, &eligible, |s| {
                    tps(s.sampled_new_count, s.collect_interval)
                }),
                sampled_continuation: reduce_with(&AVG_DOUBLE, &eligible, |s| {
                    tps(s.sampled_continuation_count, s.collect_interval)
                }),
                unsampled_new: reduce_with(&AVG_DOUBLE, &eligible, |s| {
                    tps(s.unsampled_new_count, s.collect_interval)
                }),
                unsampled_continuation: reduce_with(&AVG_DOUBLE, &eligible, |s| {
                    tps(s.unsampled_continuation_count, s.collect_interval)
                }),
                total: reduce_with(&AVG_DOUBLE, &eligible, |s| {
                    tps(total_count(s), s.collect_interval)
                }),
            })
        })
        .collect()
}

/// Sum of the collected transaction counters, or `None` when none was collected.
fn total_count(stat: &AgentStat) -> Option<i64> {
    [
        stat.sampled_new_count,
        stat.sampled_continuation_count,
        stat.unsampled_new_count,
        stat.unsampled_continuation_count,
    ]
    .into_iter()
    .flatten()
    .reduce(i64::saturating_add)
}

/// Per-slot bucket maximum; the bucket's last schema names the slots.
/// Observations without a schema do not contribute.
pub fn sample_active_traces(
    window: &TimeWindow,
    stats: &[Option<AgentStat>],
) -> Vec<SampledActiveTrace> {
    let count = |s: &AgentStat, slot: SlotType| s.active_trace_counts.get(&slot).copied();
    by_bucket(window, stats)
        .into_iter()
        .filter_map(|(index, bucket)| {
            let with_schema: Vec<&AgentStat> = bucket
                .into_iter()
                .filter(|s| s.histogram_schema.is_some())
                .collect();
            let schema: HistogramSchemaType = with_schema.last()?.histogram_schema?;
            Some(SampledActiveTrace {
                timestamp: window.bucket_start(index),
                histogram_schema: schema,
                fast: reduce_with(&MAX_INTEGER, &with_schema, |s| count(s, SlotType::Fast)),
                normal: reduce_with(&MAX_INTEGER, &with_schema, |s| count(s, SlotType::Normal)),
                slow: reduce_with(&MAX_INTEGER, &with_schema, |s| count(s, SlotType::Slow)),
                very_slow: reduce_with(&MAX_INTEGER, &with_schema, |s| {
                    count(s, SlotType::VerySlow)
                }),
            })
        })
        .collect()
}

impl FamilySamples {
    /// Runs all four family samplers over the same observations.
    pub fn from_agent_stats(window: &TimeWindow, stats: &[Option<AgentStat>]) -> Self {
        let samples = Self {
            jvm_gcs: sample_jvm_gcs(window, stats),
            cpu_loads: sample_cpu_loads(window, stats),
            transactions: sample_transactions(window, stats),
            active_traces: sample_active_traces(window, stats),
        };
        debug!(
            jvm_gcs = samples.jvm_gcs.len(),
            cpu_loads = samples.cpu_loads.len(),
            transactions = samples.transactions.len(),
            active_traces = samples.active_traces.len(),
            "family samples"
        );
        samples
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_count_sums_collected_counters() {
        let mut stat = AgentStat::new(0, 1000);
        assert_eq!(total_count(&stat), None);
        stat.sampled_new_count = Some(3);
        stat.unsampled_continuation_count = Some(4);
        assert_eq!(total_count(&stat), Some(7));
    }
}
