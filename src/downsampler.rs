// Reduces the raw values of one bucket to a single representative value.
// Uncollected values are skipped; a bucket with nothing collected reduces to the sentinel.

use serde::Deserialize;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::config::SamplingConfig;
use crate::models::Sample;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Reduction {
    Min,
    #[default]
    Max,
    Avg,
    Sum,
}

pub trait Reducer<T: Sample>: Send + Sync {
    fn reduce(&self, values: &[T]) -> T;
}

/// Reducer for one numeric kind. `decimals` only affects floating-point kinds.
#[derive(Debug, Clone, Copy)]
pub struct DownSampler<T> {
    reduction: Reduction,
    decimals: u32,
    _kind: PhantomData<T>,
}

impl<T: Sample> DownSampler<T> {
    pub const fn new(reduction: Reduction, decimals: u32) -> Self {
        Self {
            reduction,
            decimals,
            _kind: PhantomData,
        }
    }
}

impl<T: Sample> Reducer<T> for DownSampler<T> {
    fn reduce(&self, values: &[T]) -> T {
        let mut collected = values.iter().copied().filter(|v| v.is_collected());
        let Some(first) = collected.next() else {
            return T::UNCOLLECTED;
        };
        let reduced = match self.reduction {
            Reduction::Min => collected.fold(first, |acc, v| if v < acc { v } else { acc }),
            Reduction::Max => collected.fold(first, |acc, v| if v > acc { v } else { acc }),
            Reduction::Sum => collected.fold(first, T::add),
            Reduction::Avg => {
                let (sum, count) = collected.fold((first, 1usize), |(s, n), v| (s.add(v), n + 1));
                T::mean(sum, count)
            }
        };
        reduced.round_to(self.decimals)
    }
}

/// One reducer per numeric kind, shared by every series of a chart group.
#[derive(Clone)]
pub struct Reducers {
    pub integer: Arc<dyn Reducer<i32>>,
    pub long: Arc<dyn Reducer<i64>>,
    pub double: Arc<dyn Reducer<f64>>,
}

impl Reducers {
    pub fn new(reduction: Reduction, decimals: u32) -> Self {
        Self {
            integer: Arc::new(DownSampler::<i32>::new(reduction, decimals)),
            long: Arc::new(DownSampler::<i64>::new(reduction, decimals)),
            double: Arc::new(DownSampler::<f64>::new(reduction, decimals)),
        }
    }

    pub fn from_config(config: &SamplingConfig) -> Self {
        Self::new(config.reduction, config.decimals)
    }
}

impl Default for Reducers {
    fn default() -> Self {
        Self::from_config(&SamplingConfig::default())
    }
}

impl std::fmt::Debug for Reducers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reducers").finish_non_exhaustive()
    }
}
