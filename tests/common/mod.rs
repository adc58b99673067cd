// Shared test helpers

#![allow(dead_code)]

use agentstat_charts::downsampler::{Reducers, Reduction};
use agentstat_charts::models::*;
use agentstat_charts::time_window::{Range, TimeWindow};

/// `buckets` one-second buckets starting at 0.
pub fn window(buckets: i64) -> TimeWindow {
    TimeWindow::with_window_size(Range::new(0, buckets * 1000).unwrap(), 1000).unwrap()
}

pub fn max_reducers() -> Reducers {
    Reducers::new(Reduction::Max, 1)
}

/// Observation with every reading collected.
pub fn full_stat(timestamp: i64) -> AgentStat {
    AgentStat {
        agent_id: Some("agent-1".into()),
        start_timestamp: 0,
        timestamp,
        collect_interval: 1000,
        gc_type: Some("G1".into()),
        heap_used: Some(512),
        heap_max: Some(1024),
        non_heap_used: Some(64),
        non_heap_max: Some(128),
        gc_old_count: Some(3),
        gc_old_time: Some(40),
        jvm_cpu_usage: Some(0.25),
        system_cpu_usage: Some(0.5),
        sampled_new_count: Some(10),
        sampled_continuation_count: Some(20),
        unsampled_new_count: Some(30),
        unsampled_continuation_count: Some(40),
        histogram_schema: Some(HistogramSchemaType::Normal),
        active_trace_counts: [
            (SlotType::Fast, 1),
            (SlotType::Normal, 2),
            (SlotType::Slow, 3),
            (SlotType::VerySlow, 4),
        ]
        .into_iter()
        .collect(),
    }
}
