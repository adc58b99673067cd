// Chart output: data points, finalized series and the chart identities they are keyed by.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::Sample;

/// Finalized charts of one agent over one time window.
pub type ChartMap = BTreeMap<ChartType, Chart>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChartType {
    JvmMemoryHeapUsed,
    JvmMemoryHeapMax,
    JvmMemoryNonHeapUsed,
    JvmMemoryNonHeapMax,
    JvmGcOldCount,
    JvmGcOldTime,
    CpuLoadJvm,
    CpuLoadSystem,
    TpsSampledNew,
    TpsSampledContinuation,
    TpsUnsampledNew,
    TpsUnsampledContinuation,
    TpsTotal,
    ActiveTraceFast,
    ActiveTraceNormal,
    ActiveTraceSlow,
    ActiveTraceVerySlow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartFamily {
    JvmGc,
    CpuLoad,
    Transaction,
    ActiveTrace,
}

/// Numeric kind of a chart's values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Integer,
    Long,
    Double,
}

impl ChartType {
    pub const ALL: [ChartType; 17] = [
        ChartType::JvmMemoryHeapUsed,
        ChartType::JvmMemoryHeapMax,
        ChartType::JvmMemoryNonHeapUsed,
        ChartType::JvmMemoryNonHeapMax,
        ChartType::JvmGcOldCount,
        ChartType::JvmGcOldTime,
        ChartType::CpuLoadJvm,
        ChartType::CpuLoadSystem,
        ChartType::TpsSampledNew,
        ChartType::TpsSampledContinuation,
        ChartType::TpsUnsampledNew,
        ChartType::TpsUnsampledContinuation,
        ChartType::TpsTotal,
        ChartType::ActiveTraceFast,
        ChartType::ActiveTraceNormal,
        ChartType::ActiveTraceSlow,
        ChartType::ActiveTraceVerySlow,
    ];

    pub fn family(self) -> ChartFamily {
        use ChartType::*;
        match self {
            JvmMemoryHeapUsed | JvmMemoryHeapMax | JvmMemoryNonHeapUsed | JvmMemoryNonHeapMax
            | JvmGcOldCount | JvmGcOldTime => ChartFamily::JvmGc,
            CpuLoadJvm | CpuLoadSystem => ChartFamily::CpuLoad,
            TpsSampledNew | TpsSampledContinuation | TpsUnsampledNew | TpsUnsampledContinuation
            | TpsTotal => ChartFamily::Transaction,
            ActiveTraceFast | ActiveTraceNormal | ActiveTraceSlow | ActiveTraceVerySlow => {
                ChartFamily::ActiveTrace
            }
        }
    }

    pub fn kind(self) -> ValueKind {
        match self.family() {
            ChartFamily::JvmGc => ValueKind::Long,
            ChartFamily::CpuLoad | ChartFamily::Transaction => ValueKind::Double,
            ChartFamily::ActiveTrace => ValueKind::Integer,
        }
    }

    pub fn of_family(family: ChartFamily) -> impl Iterator<Item = ChartType> {
        Self::ALL.into_iter().filter(move |t| t.family() == family)
    }
}

/// One point of a series. `title` is only set on active-trace series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint<Y> {
    pub x: i64,
    pub y: Y,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl<Y> DataPoint<Y> {
    pub fn new(x: i64, y: Y) -> Self {
        Self { x, y, title: None }
    }

    pub fn titled(title: impl Into<String>, x: i64, y: Y) -> Self {
        Self {
            x,
            y,
            title: Some(title.into()),
        }
    }
}

/// One point per window bucket, ascending by time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeSeries<Y> {
    pub points: Vec<DataPoint<Y>>,
}

impl<Y: Sample> TimeSeries<Y> {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Values only, in bucket order.
    pub fn values(&self) -> Vec<Y> {
        self.points.iter().map(|p| p.y).collect()
    }
}

/// Serialized untagged; the value kind is implied by the chart type it is keyed by.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Chart {
    Integer(TimeSeries<i32>),
    Long(TimeSeries<i64>),
    Double(TimeSeries<f64>),
}

impl Chart {
    pub fn kind(&self) -> ValueKind {
        match self {
            Chart::Integer(_) => ValueKind::Integer,
            Chart::Long(_) => ValueKind::Long,
            Chart::Double(_) => ValueKind::Double,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Chart::Integer(s) => s.len(),
            Chart::Long(s) => s.len(),
            Chart::Double(s) => s.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_integer(&self) -> Option<&TimeSeries<i32>> {
        match self {
            Chart::Integer(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_long(&self) -> Option<&TimeSeries<i64>> {
        match self {
            Chart::Long(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_double(&self) -> Option<&TimeSeries<f64>> {
        match self {
            Chart::Double(s) => Some(s),
            _ => None,
        }
    }
}

impl From<TimeSeries<i32>> for Chart {
    fn from(s: TimeSeries<i32>) -> Self {
        Chart::Integer(s)
    }
}

impl From<TimeSeries<i64>> for Chart {
    fn from(s: TimeSeries<i64>) -> Self {
        Chart::Long(s)
    }
}

impl From<TimeSeries<f64>> for Chart {
    fn from(s: TimeSeries<f64>) -> Self {
        Chart::Double(s)
    }
}
