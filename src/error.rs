// Library error type. Configuration and the binary use anyhow on top of this.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChartError {
    #[error("invalid time range: to ({to}) must be after from ({from})")]
    InvalidRange { from: i64, to: i64 },
    #[error("window size must be > 0, got {0}")]
    InvalidWindowSize(i64),
}
