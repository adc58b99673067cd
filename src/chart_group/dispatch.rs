// Routes the readings of one observation into the series builders of each chart type.

use std::collections::BTreeMap;

use crate::downsampler::Reducers;
use crate::models::{AgentStat, ChartMap, ChartType, DataPoint, Sample, SlotType, ValueKind};
use crate::rate::calculate_tps;
use crate::series_builder::SampledSeriesBuilder;
use crate::time_window::TimeWindow;

type LongReading = fn(&AgentStat) -> Option<i64>;
type FractionReading = fn(&AgentStat) -> Option<f64>;

const MEMORY_GC_READINGS: [(ChartType, LongReading); 6] = [
    (ChartType::JvmMemoryHeapUsed, |s| s.heap_used),
    (ChartType::JvmMemoryHeapMax, |s| s.heap_max),
    (ChartType::JvmMemoryNonHeapUsed, |s| s.non_heap_used),
    (ChartType::JvmMemoryNonHeapMax, |s| s.non_heap_max),
    (ChartType::JvmGcOldCount, |s| s.gc_old_count),
    (ChartType::JvmGcOldTime, |s| s.gc_old_time),
];

const CPU_READINGS: [(ChartType, FractionReading); 2] = [
    (ChartType::CpuLoadJvm, |s| s.jvm_cpu_usage),
    (ChartType::CpuLoadSystem, |s| s.system_cpu_usage),
];

const TRANSACTION_READINGS: [(ChartType, LongReading); 4] = [
    (ChartType::TpsSampledNew, |s| s.sampled_new_count),
    (ChartType::TpsSampledContinuation, |s| s.sampled_continuation_count),
    (ChartType::TpsUnsampledNew, |s| s.unsampled_new_count),
    (ChartType::TpsUnsampledContinuation, |s| s.unsampled_continuation_count),
];

pub(crate) const ACTIVE_TRACE_SLOTS: [(ChartType, SlotType); 4] = [
    (ChartType::ActiveTraceFast, SlotType::Fast),
    (ChartType::ActiveTraceNormal, SlotType::Normal),
    (ChartType::ActiveTraceSlow, SlotType::Slow),
    (ChartType::ActiveTraceVerySlow, SlotType::VerySlow),
];

/// Every chart type has a builder in the map of its kind, so a miss means a
/// reading table names a chart of the wrong kind.
fn add_to<T: Sample>(
    builders: &mut BTreeMap<ChartType, SampledSeriesBuilder<T>>,
    chart_type: ChartType,
    point: DataPoint<T>,
) {
    let builder = builders.get_mut(&chart_type);
    debug_assert!(
        builder.is_some(),
        "{chart_type:?} has no {} builder",
        std::any::type_name::<T>()
    );
    if let Some(builder) = builder {
        builder.add_data_point(point);
    }
}

/// One builder per chart type, held per value kind.
pub(crate) struct SeriesBuilders {
    longs: BTreeMap<ChartType, SampledSeriesBuilder<i64>>,
    doubles: BTreeMap<ChartType, SampledSeriesBuilder<f64>>,
    integers: BTreeMap<ChartType, SampledSeriesBuilder<i32>>,
}

impl SeriesBuilders {
    pub(crate) fn new(window: TimeWindow, reducers: &Reducers) -> Self {
        let mut builders = Self {
            longs: BTreeMap::new(),
            doubles: BTreeMap::new(),
            integers: BTreeMap::new(),
        };
        for chart_type in ChartType::ALL {
            match chart_type.kind() {
                ValueKind::Long => {
                    builders.longs.insert(
                        chart_type,
                        SampledSeriesBuilder::new(reducers.long.clone(), window),
                    );
                }
                ValueKind::Double => {
                    builders.doubles.insert(
                        chart_type,
                        SampledSeriesBuilder::new(reducers.double.clone(), window),
                    );
                }
                ValueKind::Integer => {
                    builders.integers.insert(
                        chart_type,
                        SampledSeriesBuilder::new(reducers.integer.clone(), window),
                    );
                }
            }
        }
        builders
    }

    fn add_long(&mut self, chart_type: ChartType, point: DataPoint<i64>) {
        add_to(&mut self.longs, chart_type, point);
    }

    fn add_double(&mut self, chart_type: ChartType, point: DataPoint<f64>) {
        add_to(&mut self.doubles, chart_type, point);
    }

    fn add_integer(&mut self, chart_type: ChartType, point: DataPoint<i32>) {
        add_to(&mut self.integers, chart_type, point);
    }

    /// Points accumulated for `chart_type` so far.
    pub(crate) fn point_count(&self, chart_type: ChartType) -> usize {
        match chart_type.kind() {
            ValueKind::Long => self.longs.get(&chart_type).map_or(0, |b| b.len()),
            ValueKind::Double => self.doubles.get(&chart_type).map_or(0, |b| b.len()),
            ValueKind::Integer => self.integers.get(&chart_type).map_or(0, |b| b.len()),
        }
    }

    pub(crate) fn build(&self) -> ChartMap {
        let mut charts = ChartMap::new();
        for (chart_type, builder) in &self.longs {
            charts.insert(*chart_type, builder.build_chart().into());
        }
        for (chart_type, builder) in &self.doubles {
            charts.insert(*chart_type, builder.build_chart().into());
        }
        for (chart_type, builder) in &self.integers {
            charts.insert(*chart_type, builder.build_chart().into());
        }
        charts
    }

    pub(crate) fn add_memory_gc(&mut self, stat: &AgentStat) {
        for (chart_type, reading) in MEMORY_GC_READINGS {
            if let Some(value) = reading(stat) {
                self.add_long(chart_type, DataPoint::new(stat.timestamp, value));
            }
        }
    }

    /// Fractions are charted as percentages.
    pub(crate) fn add_cpu_load(&mut self, stat: &AgentStat) {
        for (chart_type, reading) in CPU_READINGS {
            if let Some(fraction) = reading(stat) {
                self.add_double(chart_type, DataPoint::new(stat.timestamp, fraction * 100.0));
            }
        }
    }

    /// Skipped when the collection interval is not positive. The total is only
    /// charted if at least one counter was collected.
    pub(crate) fn add_transaction(&mut self, stat: &AgentStat) {
        let interval = stat.collect_interval;
        if interval <= 0 {
            return;
        }
        let mut total: Option<i64> = None;
        for (chart_type, reading) in TRANSACTION_READINGS {
            let Some(count) = reading(stat) else {
                continue;
            };
            let tps = calculate_tps(Some(count), interval);
            self.add_double(chart_type, DataPoint::new(stat.timestamp, tps));
            total = Some(total.unwrap_or(0).saturating_add(count));
        }
        if total.is_some() {
            let total_tps = calculate_tps(total, interval);
            self.add_double(ChartType::TpsTotal, DataPoint::new(stat.timestamp, total_tps));
        }
    }

    /// Skipped when the observation carries no histogram schema. A slot without a
    /// count is added as the sentinel, which the reducer then treats as absent.
    pub(crate) fn add_active_trace(&mut self, stat: &AgentStat) {
        let Some(schema_type) = stat.histogram_schema else {
            return;
        };
        let schema = schema_type.schema();
        for (chart_type, slot_type) in ACTIVE_TRACE_SLOTS {
            let count = stat
                .active_trace_counts
                .get(&slot_type)
                .copied()
                .unwrap_or(i32::UNCOLLECTED);
            let title = schema.slot(slot_type).slot_name;
            self.add_integer(
                chart_type,
                DataPoint::titled(title, stat.timestamp, count),
            );
        }
    }
}
