// Numeric kinds carried by charts, and the "not collected" marker for each.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::Debug;

/// Wire value an agent reports for a reading it did not collect.
pub const NOT_COLLECTED: i64 = -1;

/// A chart value kind. `UNCOLLECTED` fills buckets that have no data.
pub trait Sample: Copy + PartialEq + PartialOrd + Debug + Serialize + Send + Sync + 'static {
    const UNCOLLECTED: Self;

    fn is_collected(self) -> bool {
        self != Self::UNCOLLECTED
    }

    fn add(self, other: Self) -> Self;

    /// Mean of `sum` over `count` values. Integer kinds truncate.
    fn mean(sum: Self, count: usize) -> Self;

    /// Rounds to `decimals` places. No-op for integer kinds.
    fn round_to(self, _decimals: u32) -> Self {
        self
    }
}

impl Sample for i32 {
    const UNCOLLECTED: Self = NOT_COLLECTED as i32;

    fn add(self, other: Self) -> Self {
        self.saturating_add(other)
    }

    fn mean(sum: Self, count: usize) -> Self {
        sum / count as i32
    }
}

impl Sample for i64 {
    const UNCOLLECTED: Self = NOT_COLLECTED;

    fn add(self, other: Self) -> Self {
        self.saturating_add(other)
    }

    fn mean(sum: Self, count: usize) -> Self {
        sum / count as i64
    }
}

impl Sample for f64 {
    const UNCOLLECTED: Self = NOT_COLLECTED as f64;

    fn add(self, other: Self) -> Self {
        self + other
    }

    fn mean(sum: Self, count: usize) -> Self {
        sum / count as f64
    }

    fn round_to(self, decimals: u32) -> Self {
        round_half_up(self, decimals)
    }
}

/// Rounds half away from zero at `decimals` places.
pub fn round_half_up(value: f64, decimals: u32) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    (value * scale).round() / scale
}

/// serde adapter for optional readings: `-1`, `null` and a missing field all mean "not collected".
pub mod not_collected {
    use super::*;

    pub fn serialize<T, S>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Sample,
        S: Serializer,
    {
        value.unwrap_or(T::UNCOLLECTED).serialize(serializer)
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        T: Sample + Deserialize<'de>,
        D: Deserializer<'de>,
    {
        let raw = Option::<T>::deserialize(deserializer)?;
        Ok(raw.filter(|v| v.is_collected()))
    }
}
