// Domain models: observations in, charts out.

mod agent_stat;
mod chart;
mod histogram;
pub mod sample;
mod sampled;

pub use agent_stat::AgentStat;
pub use chart::{Chart, ChartFamily, ChartMap, ChartType, DataPoint, TimeSeries, ValueKind};
pub use histogram::{HistogramSchema, HistogramSchemaType, HistogramSlot, SlotType};
pub use sample::{NOT_COLLECTED, Sample, round_half_up};
pub use sampled::{SampledActiveTrace, SampledCpuLoad, SampledJvmGc, SampledTransaction};
