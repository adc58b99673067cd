// Per-second rates derived from counters and the sample's collection interval.

use crate::models::{Sample, round_half_up};

/// Decimal places kept on transactions-per-second values.
pub const TPS_DECIMALS: u32 = 1;

/// `count / (interval_ms / 1000)`, rounded half-up to `decimals`.
/// An uncollected count yields the sentinel. Callers skip non-positive intervals.
pub fn calculate_rate(count: Option<i64>, interval_ms: i64, decimals: u32) -> f64 {
    let Some(count) = count else {
        return f64::UNCOLLECTED;
    };
    debug_assert!(interval_ms > 0, "rate requested for interval {interval_ms}");
    let rate = count as f64 * 1000.0 / interval_ms as f64;
    round_half_up(rate, decimals)
}

pub fn calculate_tps(count: Option<i64>, interval_ms: i64) -> f64 {
    calculate_rate(count, interval_ms, TPS_DECIMALS)
}
