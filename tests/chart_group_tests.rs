// Chart group tests: dispatch of observations into series, build-once semantics

mod common;

use agentstat_charts::AgentStatChartGroup;
use agentstat_charts::models::*;
use common::{full_stat, max_reducers, window};

fn built(buckets: i64, stats: Vec<Option<AgentStat>>) -> AgentStatChartGroup {
    let mut group = AgentStatChartGroup::new(window(buckets), &max_reducers());
    group.add_agent_stats(&stats);
    group.build_charts();
    group
}

fn longs(group: &AgentStatChartGroup, chart_type: ChartType) -> Vec<i64> {
    group.charts()[&chart_type].as_long().unwrap().values()
}

fn doubles(group: &AgentStatChartGroup, chart_type: ChartType) -> Vec<f64> {
    group.charts()[&chart_type].as_double().unwrap().values()
}

fn integers(group: &AgentStatChartGroup, chart_type: ChartType) -> Vec<i32> {
    group.charts()[&chart_type].as_integer().unwrap().values()
}

#[test]
fn heap_and_tps_follow_collected_readings() {
    let mut first = AgentStat::new(100, 1000);
    first.heap_used = Some(50);
    first.sampled_new_count = Some(10);
    let second = AgentStat::new(1500, 1000);

    let group = built(2, vec![Some(first), Some(second)]);

    assert_eq!(longs(&group, ChartType::JvmMemoryHeapUsed), vec![50, -1]);
    assert_eq!(doubles(&group, ChartType::TpsSampledNew), vec![10.0, -1.0]);
    assert_eq!(doubles(&group, ChartType::TpsTotal), vec![10.0, -1.0]);
}

#[test]
fn charts_are_empty_until_built() {
    let mut group = AgentStatChartGroup::new(window(3), &max_reducers());
    group.add_agent_stats(&[Some(full_stat(0))]);
    assert!(group.charts().is_empty());
    assert!(!group.is_built());

    group.build_charts();
    assert!(group.is_built());
    assert_eq!(group.charts().len(), 17);
}

#[test]
fn every_chart_spans_the_whole_window() {
    let group = built(5, vec![Some(full_stat(1200))]);
    for chart_type in ChartType::ALL {
        let chart = &group.charts()[&chart_type];
        assert_eq!(chart.len(), 5, "{:?}", chart_type);
        assert_eq!(chart.kind(), chart_type.kind(), "{:?}", chart_type);
    }
}

#[test]
fn built_without_observations_is_all_sentinel() {
    let group = built(2, vec![]);
    assert_eq!(group.charts().len(), 17);
    assert_eq!(longs(&group, ChartType::JvmGcOldTime), vec![-1, -1]);
    assert_eq!(doubles(&group, ChartType::CpuLoadSystem), vec![-1.0, -1.0]);
    assert_eq!(integers(&group, ChartType::ActiveTraceSlow), vec![-1, -1]);
}

#[test]
fn uncollected_heap_does_not_mask_collected_neighbour() {
    let mut missing = full_stat(100);
    missing.heap_used = None;
    let mut present = full_stat(200);
    present.heap_used = Some(7);

    let group = built(2, vec![Some(missing), Some(present)]);
    assert_eq!(longs(&group, ChartType::JvmMemoryHeapUsed), vec![7, -1]);
    assert_eq!(longs(&group, ChartType::JvmMemoryHeapMax), vec![1024, -1]);
}

#[test]
fn memory_gc_readings_land_in_their_charts() {
    let group = built(1, vec![Some(full_stat(0))]);
    assert_eq!(longs(&group, ChartType::JvmMemoryHeapUsed), vec![512]);
    assert_eq!(longs(&group, ChartType::JvmMemoryHeapMax), vec![1024]);
    assert_eq!(longs(&group, ChartType::JvmMemoryNonHeapUsed), vec![64]);
    assert_eq!(longs(&group, ChartType::JvmMemoryNonHeapMax), vec![128]);
    assert_eq!(longs(&group, ChartType::JvmGcOldCount), vec![3]);
    assert_eq!(longs(&group, ChartType::JvmGcOldTime), vec![40]);
}

#[test]
fn cpu_fraction_is_charted_as_percent() {
    let mut stat = AgentStat::new(0, 1000);
    stat.jvm_cpu_usage = Some(0.37);
    let group = built(1, vec![Some(stat)]);
    assert_eq!(doubles(&group, ChartType::CpuLoadJvm), vec![37.0]);
    assert_eq!(doubles(&group, ChartType::CpuLoadSystem), vec![-1.0]);
}

#[test]
fn transaction_rates_and_total() {
    let mut stat = full_stat(0);
    stat.collect_interval = 5000;
    let group = built(1, vec![Some(stat)]);
    assert_eq!(doubles(&group, ChartType::TpsSampledNew), vec![2.0]);
    assert_eq!(doubles(&group, ChartType::TpsSampledContinuation), vec![4.0]);
    assert_eq!(doubles(&group, ChartType::TpsUnsampledNew), vec![6.0]);
    assert_eq!(doubles(&group, ChartType::TpsUnsampledContinuation), vec![8.0]);
    assert_eq!(doubles(&group, ChartType::TpsTotal), vec![20.0]);
}

#[test]
fn total_only_counts_collected_counters() {
    let mut stat = AgentStat::new(0, 1000);
    stat.unsampled_new_count = Some(5);
    stat.unsampled_continuation_count = Some(2);
    let group = built(1, vec![Some(stat)]);
    assert_eq!(doubles(&group, ChartType::TpsTotal), vec![7.0]);
    assert_eq!(doubles(&group, ChartType::TpsSampledNew), vec![-1.0]);
}

#[test]
fn non_positive_interval_skips_transactions_only() {
    let mut zero = full_stat(0);
    zero.collect_interval = 0;
    let mut negative = full_stat(1000);
    negative.collect_interval = -5;

    let group = built(2, vec![Some(zero), Some(negative)]);
    for chart_type in ChartType::of_family(ChartFamily::Transaction) {
        assert_eq!(doubles(&group, chart_type), vec![-1.0, -1.0], "{:?}", chart_type);
    }
    assert_eq!(longs(&group, ChartType::JvmMemoryHeapUsed), vec![512, 512]);
    assert_eq!(doubles(&group, ChartType::CpuLoadJvm), vec![25.0, 25.0]);
}

#[test]
fn active_trace_points_carry_schema_titles() {
    let group = built(1, vec![Some(full_stat(0))]);
    let fast = group.charts()[&ChartType::ActiveTraceFast].as_integer().unwrap();
    assert_eq!(fast.points[0].title.as_deref(), Some("1s"));
    assert_eq!(fast.values(), vec![1]);

    let very_slow = group.charts()[&ChartType::ActiveTraceVerySlow]
        .as_integer()
        .unwrap();
    assert_eq!(very_slow.points[0].title.as_deref(), Some("Slow"));
    assert_eq!(very_slow.values(), vec![4]);
    assert_eq!(integers(&group, ChartType::ActiveTraceNormal), vec![2]);
    assert_eq!(integers(&group, ChartType::ActiveTraceSlow), vec![3]);
}

#[test]
fn active_trace_missing_slot_is_sentinel() {
    let mut stat = full_stat(0);
    stat.histogram_schema = Some(HistogramSchemaType::Fast);
    stat.active_trace_counts.remove(&SlotType::Slow);
    let group = built(1, vec![Some(stat)]);

    let slow = group.charts()[&ChartType::ActiveTraceSlow].as_integer().unwrap();
    assert_eq!(slow.values(), vec![-1]);
    assert_eq!(slow.points[0].title.as_deref(), Some("500ms"));
}

#[test]
fn active_trace_skipped_without_schema() {
    let mut stat = full_stat(0);
    stat.histogram_schema = None;
    let group = built(1, vec![Some(stat)]);
    let fast = group.charts()[&ChartType::ActiveTraceFast].as_integer().unwrap();
    assert_eq!(fast.values(), vec![-1]);
    assert_eq!(fast.points[0].title, None);
    assert_eq!(longs(&group, ChartType::JvmMemoryHeapUsed), vec![512]);
}

#[test]
fn none_observations_are_skipped() {
    let group = built(2, vec![None, Some(full_stat(1000)), None]);
    assert_eq!(longs(&group, ChartType::JvmMemoryHeapUsed), vec![-1, 512]);
}

#[test]
fn gc_type_is_last_observation_wins() {
    let mut cms = full_stat(0);
    cms.gc_type = Some("CMS".into());
    let g1 = full_stat(500);

    let mut group = AgentStatChartGroup::new(window(1), &max_reducers());
    group.add_agent_stats(&[Some(g1), Some(cms)]);
    assert_eq!(group.gc_type(), Some("CMS"));
}

#[test]
fn build_charts_twice_keeps_first_result() {
    let mut group = AgentStatChartGroup::new(window(2), &max_reducers());
    group.add_agent_stats(&[Some(full_stat(0))]);
    group.build_charts();
    let first = group.charts().clone();

    group.build_charts();
    assert_eq!(group.charts(), &first);
}

#[test]
fn observations_after_build_are_ignored() {
    let mut group = AgentStatChartGroup::new(window(2), &max_reducers());
    group.add_agent_stats(&[Some(full_stat(0))]);
    group.build_charts();
    let first = group.charts().clone();

    group.add_agent_stats(&[Some(full_stat(1000))]);
    group.build_charts();
    assert_eq!(group.charts(), &first);
    assert_eq!(longs(&group, ChartType::JvmMemoryHeapUsed), vec![512, -1]);
}

#[test]
fn same_input_builds_same_charts() {
    let stats = vec![Some(full_stat(0)), Some(full_stat(1500)), None];
    let a = built(2, stats.clone());
    let b = built(2, stats);
    assert_eq!(a.charts(), b.charts());
}

#[test]
fn bucket_reduction_uses_configured_reducer() {
    let mut low = full_stat(100);
    low.heap_used = Some(100);
    let mut high = full_stat(200);
    high.heap_used = Some(300);
    let group = built(1, vec![Some(low), Some(high)]);
    assert_eq!(longs(&group, ChartType::JvmMemoryHeapUsed), vec![300]);
}

#[test]
fn serializes_type_and_chart_keys() {
    let group = built(1, vec![Some(full_stat(0))]);
    let json = serde_json::to_value(&group).unwrap();
    assert_eq!(json["type"], "G1");
    assert_eq!(json["charts"]["JVM_MEMORY_HEAP_USED"][0]["y"], 512);
    assert_eq!(json["charts"]["ACTIVE_TRACE_FAST"][0]["title"], "1s");
    assert!(json["charts"]["CPU_LOAD_JVM"][0].get("title").is_none());
}
