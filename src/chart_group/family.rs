// Chart groups for a single metric family, built from records that an upstream
// sampler already reduced per bucket. Each group always emits every chart of its family.

use std::sync::Arc;

use crate::downsampler::{Reducer, Reducers};
use crate::models::{
    Chart, ChartMap, ChartType, DataPoint, Sample, SampledActiveTrace, SampledCpuLoad,
    SampledJvmGc, SampledTransaction, TimeSeries,
};
use crate::series_builder::SampledSeriesBuilder;
use crate::time_window::TimeWindow;

type Column<S, T> = (ChartType, fn(&S) -> DataPoint<T>);

fn build_family<S, T>(
    window: TimeWindow,
    reducer: &Arc<dyn Reducer<T>>,
    samples: &[S],
    columns: &[Column<S, T>],
) -> ChartMap
where
    T: Sample,
    Chart: From<TimeSeries<T>>,
{
    let mut charts = ChartMap::new();
    for (chart_type, point) in columns {
        let mut builder = SampledSeriesBuilder::new(reducer.clone(), window);
        for sample in samples {
            builder.add_data_point(point(sample));
        }
        charts.insert(*chart_type, builder.build_chart().into());
    }
    charts
}

pub struct JvmGcChartGroup {
    charts: ChartMap,
}

impl JvmGcChartGroup {
    const COLUMNS: [Column<SampledJvmGc, i64>; 6] = [
        (ChartType::JvmMemoryHeapUsed, |s| DataPoint::new(s.timestamp, s.heap_used)),
        (ChartType::JvmMemoryHeapMax, |s| DataPoint::new(s.timestamp, s.heap_max)),
        (ChartType::JvmMemoryNonHeapUsed, |s| DataPoint::new(s.timestamp, s.non_heap_used)),
        (ChartType::JvmMemoryNonHeapMax, |s| DataPoint::new(s.timestamp, s.non_heap_max)),
        (ChartType::JvmGcOldCount, |s| DataPoint::new(s.timestamp, s.gc_old_count)),
        (ChartType::JvmGcOldTime, |s| DataPoint::new(s.timestamp, s.gc_old_time)),
    ];

    pub fn new(window: TimeWindow, reducers: &Reducers, samples: &[SampledJvmGc]) -> Self {
        Self {
            charts: build_family(window, &reducers.long, samples, &Self::COLUMNS),
        }
    }

    pub fn charts(&self) -> &ChartMap {
        &self.charts
    }

    pub fn into_charts(self) -> ChartMap {
        self.charts
    }
}

pub struct CpuLoadChartGroup {
    charts: ChartMap,
}

impl CpuLoadChartGroup {
    const COLUMNS: [Column<SampledCpuLoad, f64>; 2] = [
        (ChartType::CpuLoadJvm, |s| DataPoint::new(s.timestamp, s.jvm_cpu_load)),
        (ChartType::CpuLoadSystem, |s| DataPoint::new(s.timestamp, s.system_cpu_load)),
    ];

    pub fn new(window: TimeWindow, reducers: &Reducers, samples: &[SampledCpuLoad]) -> Self {
        Self {
            charts: build_family(window, &reducers.double, samples, &Self::COLUMNS),
        }
    }

    pub fn charts(&self) -> &ChartMap {
        &self.charts
    }

    pub fn into_charts(self) -> ChartMap {
        self.charts
    }
}

pub struct TransactionChartGroup {
    charts: ChartMap,
}

impl TransactionChartGroup {
    const COLUMNS: [Column<SampledTransaction, f64>; 5] = [
        (ChartType::TpsSampledNew, |s| DataPoint::new(s.timestamp, s.sampled_new)),
        (ChartType::TpsSampledContinuation, |s| {
            DataPoint::new(s.timestamp, s.sampled_continuation)
        }),
        (ChartType::TpsUnsampledNew, |s| DataPoint::new(s.timestamp, s.unsampled_new)),
        (ChartType::TpsUnsampledContinuation, |s| {
            DataPoint::new(s.timestamp, s.unsampled_continuation)
        }),
        (ChartType::TpsTotal, |s| DataPoint::new(s.timestamp, s.total)),
    ];

    pub fn new(window: TimeWindow, reducers: &Reducers, samples: &[SampledTransaction]) -> Self {
        Self {
            charts: build_family(window, &reducers.double, samples, &Self::COLUMNS),
        }
    }

    pub fn charts(&self) -> &ChartMap {
        &self.charts
    }

    pub fn into_charts(self) -> ChartMap {
        self.charts
    }
}

pub struct ActiveTraceChartGroup {
    charts: ChartMap,
}

impl ActiveTraceChartGroup {
    const COLUMNS: [Column<SampledActiveTrace, i32>; 4] = [
        (ChartType::ActiveTraceFast, |s| {
            DataPoint::titled(s.histogram_schema.schema().fast.slot_name, s.timestamp, s.fast)
        }),
        (ChartType::ActiveTraceNormal, |s| {
            DataPoint::titled(s.histogram_schema.schema().normal.slot_name, s.timestamp, s.normal)
        }),
        (ChartType::ActiveTraceSlow, |s| {
            DataPoint::titled(s.histogram_schema.schema().slow.slot_name, s.timestamp, s.slow)
        }),
        (ChartType::ActiveTraceVerySlow, |s| {
            DataPoint::titled(
                s.histogram_schema.schema().very_slow.slot_name,
                s.timestamp,
                s.very_slow,
            )
        }),
    ];

    pub fn new(window: TimeWindow, reducers: &Reducers, samples: &[SampledActiveTrace]) -> Self {
        Self {
            charts: build_family(window, &reducers.integer, samples, &Self::COLUMNS),
        }
    }

    pub fn charts(&self) -> &ChartMap {
        &self.charts
    }

    pub fn into_charts(self) -> ChartMap {
        self.charts
    }
}
