// Fixed-width partition of a time range into buckets (the unit of downsampling).

use crate::error::ChartError;

/// Half-open millisecond range `[from, to)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range {
    pub from: i64,
    pub to: i64,
}

impl Range {
    pub fn new(from: i64, to: i64) -> Result<Self, ChartError> {
        if to <= from {
            return Err(ChartError::InvalidRange { from, to });
        }
        Ok(Self { from, to })
    }

    /// Width of the range, saturating at `i64::MAX`.
    pub fn span(&self) -> i64 {
        self.to.saturating_sub(self.from)
    }
}

/// Picks a bucket width for a range.
pub trait TimeWindowSampler {
    fn window_size(&self, range: &Range) -> i64;
}

/// Aims for `ideal_slot_count` buckets, never narrower than `min_slot_ms`,
/// and always a multiple of `min_slot_ms`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotCentricSampler {
    pub min_slot_ms: i64,
    pub ideal_slot_count: i64,
}

pub const DEFAULT_MIN_SLOT_MS: i64 = 5_000;
pub const DEFAULT_IDEAL_SLOT_COUNT: i64 = 200;

impl Default for SlotCentricSampler {
    fn default() -> Self {
        Self {
            min_slot_ms: DEFAULT_MIN_SLOT_MS,
            ideal_slot_count: DEFAULT_IDEAL_SLOT_COUNT,
        }
    }
}

impl TimeWindowSampler for SlotCentricSampler {
    fn window_size(&self, range: &Range) -> i64 {
        let ideal = range.span() / self.ideal_slot_count.max(1);
        if ideal <= self.min_slot_ms {
            return self.min_slot_ms;
        }
        let slots = (ideal - 1) / self.min_slot_ms + 1;
        slots.saturating_mul(self.min_slot_ms)
    }
}

/// Buckets of `window_size` ms starting at `window_start` (the range start floored
/// to a multiple of the size). Read-only once built; safe to share between chart groups.
///
/// A successfully built window always has at least one bucket, and its end fits in `i64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    window_start: i64,
    window_end: i64,
    window_size: i64,
    bucket_count: usize,
}

impl TimeWindow {
    pub fn new(range: Range, sampler: &impl TimeWindowSampler) -> Result<Self, ChartError> {
        Self::with_window_size(range, sampler.window_size(&range))
    }

    pub fn with_window_size(range: Range, window_size: i64) -> Result<Self, ChartError> {
        if range.to <= range.from {
            return Err(ChartError::InvalidRange {
                from: range.from,
                to: range.to,
            });
        }
        if window_size <= 0 {
            return Err(ChartError::InvalidWindowSize(window_size));
        }
        let overflow = ChartError::InvalidWindowSize(window_size);
        let window_start = range
            .from
            .div_euclid(window_size)
            .checked_mul(window_size)
            .ok_or(overflow.clone())?;
        // window_start <= from < to, so span > 0 and there is at least one bucket
        let span = range.to.checked_sub(window_start).ok_or(overflow.clone())?;
        let buckets = (span - 1) / window_size + 1;
        let window_end = window_size
            .checked_mul(buckets)
            .and_then(|width| window_start.checked_add(width))
            .ok_or(overflow)?;
        Ok(Self {
            window_start,
            window_end,
            window_size,
            bucket_count: buckets as usize,
        })
    }

    pub fn window_start(&self) -> i64 {
        self.window_start
    }

    /// Exclusive end of the last bucket.
    pub fn window_end(&self) -> i64 {
        self.window_end
    }

    pub fn window_size(&self) -> i64 {
        self.window_size
    }

    pub fn bucket_count(&self) -> usize {
        self.bucket_count
    }

    /// Bucket holding `timestamp`, or `None` if it falls outside the window.
    pub fn bucket_index(&self, timestamp: i64) -> Option<usize> {
        if timestamp < self.window_start || timestamp >= self.window_end {
            return None;
        }
        Some(((timestamp - self.window_start) / self.window_size) as usize)
    }

    pub fn bucket_start(&self, index: usize) -> i64 {
        self.window_start + self.window_size * index as i64
    }

    pub fn bucket_starts(&self) -> impl Iterator<Item = i64> + '_ {
        (0..self.bucket_count).map(|i| self.bucket_start(i))
    }
}
