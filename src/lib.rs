// Downsamples per-agent telemetry into time-window aligned chart series.

pub mod chart_group;
pub mod config;
pub mod downsampler;
pub mod error;
pub mod models;
pub mod rate;
pub mod sampler;
pub mod series_builder;
pub mod time_window;

pub use chart_group::{AgentStatChartGroup, FamilySamples};
pub use error::ChartError;
