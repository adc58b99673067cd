// Agent stat chart group: every chart of one agent over one time window.
//
// Two ways in: `new` + `add_agent_stats` + `build_charts` accumulates raw observations
// and finalizes once; `compose` assembles already-sampled family records in one step.
// Either way the chart map is empty until built and holds all 17 charts afterwards.

mod dispatch;
mod family;

pub use family::{
    ActiveTraceChartGroup, CpuLoadChartGroup, JvmGcChartGroup, TransactionChartGroup,
};

use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::downsampler::Reducers;
use crate::models::{
    AgentStat, ChartMap, ChartType, SampledActiveTrace, SampledCpuLoad, SampledJvmGc,
    SampledTransaction,
};
use crate::time_window::TimeWindow;
use dispatch::SeriesBuilders;

/// Per-family records for [`AgentStatChartGroup::compose`].
#[derive(Debug, Clone, Default)]
pub struct FamilySamples {
    pub jvm_gcs: Vec<SampledJvmGc>,
    pub cpu_loads: Vec<SampledCpuLoad>,
    pub transactions: Vec<SampledTransaction>,
    pub active_traces: Vec<SampledActiveTrace>,
}

enum BuildState {
    Collecting(Box<SeriesBuilders>),
    Built,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentStatChartGroup {
    #[serde(skip)]
    window: TimeWindow,
    #[serde(skip)]
    state: BuildState,
    #[serde(rename = "type")]
    gc_type: Option<String>,
    charts: ChartMap,
}

impl AgentStatChartGroup {
    /// Empty group collecting observations for `window`. Range and size errors
    /// surface when the [`TimeWindow`] is built, so this cannot fail.
    pub fn new(window: TimeWindow, reducers: &Reducers) -> Self {
        Self {
            window,
            state: BuildState::Collecting(Box::new(SeriesBuilders::new(window, reducers))),
            gc_type: None,
            charts: ChartMap::new(),
        }
    }

    /// Built group assembled from per-family records sampled upstream.
    #[instrument(skip_all, fields(
        jvm_gcs = samples.jvm_gcs.len(),
        cpu_loads = samples.cpu_loads.len(),
        transactions = samples.transactions.len(),
        active_traces = samples.active_traces.len(),
    ))]
    pub fn compose(
        window: TimeWindow,
        reducers: &Reducers,
        samples: &FamilySamples,
    ) -> Self {
        let mut charts = ChartMap::new();
        charts.extend(JvmGcChartGroup::new(window, reducers, &samples.jvm_gcs).into_charts());
        charts.extend(CpuLoadChartGroup::new(window, reducers, &samples.cpu_loads).into_charts());
        charts.extend(
            TransactionChartGroup::new(window, reducers, &samples.transactions).into_charts(),
        );
        charts.extend(
            ActiveTraceChartGroup::new(window, reducers, &samples.active_traces).into_charts(),
        );
        debug_assert_eq!(charts.len(), ChartType::ALL.len());
        debug!(charts = charts.len(), "composed chart group");

        let gc_type = samples.jvm_gcs.last().and_then(|s| s.gc_type.clone());
        Self {
            window,
            state: BuildState::Built,
            gc_type,
            charts,
        }
    }

    /// Feeds observations in order; `None` entries are skipped.
    /// Ignored (with a warning) once the charts are built.
    #[instrument(skip_all, fields(observations = stats.len()))]
    pub fn add_agent_stats(&mut self, stats: &[Option<AgentStat>]) {
        if matches!(self.state, BuildState::Built) {
            warn!("charts already built; observations ignored");
            return;
        }
        let mut added = 0usize;
        for stat in stats.iter().flatten() {
            self.add_agent_stat(stat);
            added += 1;
        }
        debug!(added, skipped = stats.len() - added, "agent stats added");
    }

    pub fn add_agent_stat(&mut self, stat: &AgentStat) {
        let BuildState::Collecting(builders) = &mut self.state else {
            warn!(timestamp = stat.timestamp, "charts already built; observation ignored");
            return;
        };
        self.gc_type = stat.gc_type.clone();
        builders.add_memory_gc(stat);
        builders.add_cpu_load(stat);
        builders.add_transaction(stat);
        builders.add_active_trace(stat);
    }

    /// Finalizes every series. Only the first call has an effect.
    #[instrument(skip(self), fields(buckets = self.window.bucket_count()))]
    pub fn build_charts(&mut self) {
        let BuildState::Collecting(builders) = &self.state else {
            debug!("charts already built");
            return;
        };
        let charts = builders.build();
        debug_assert_eq!(charts.len(), ChartType::ALL.len());
        for chart_type in ChartType::ALL {
            tracing::trace!(?chart_type, points = builders.point_count(chart_type), "chart built");
        }
        self.charts = charts;
        self.state = BuildState::Built;
        debug!(charts = self.charts.len(), "charts built");
    }

    pub fn is_built(&self) -> bool {
        matches!(self.state, BuildState::Built)
    }

    /// Empty until built.
    pub fn charts(&self) -> &ChartMap {
        &self.charts
    }

    /// GC type label of the last observation added.
    pub fn gc_type(&self) -> Option<&str> {
        self.gc_type.as_deref()
    }

    pub fn window(&self) -> &TimeWindow {
        &self.window
    }
}
