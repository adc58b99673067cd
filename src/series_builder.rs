// Accumulates points for one chart and finalizes them into a gap-filled series.

use std::sync::Arc;

use tracing::trace;

use crate::downsampler::Reducer;
use crate::models::{DataPoint, Sample, TimeSeries};
use crate::time_window::TimeWindow;

pub struct SampledSeriesBuilder<T: Sample> {
    reducer: Arc<dyn Reducer<T>>,
    window: TimeWindow,
    points: Vec<DataPoint<T>>,
}

impl<T: Sample> SampledSeriesBuilder<T> {
    pub fn new(reducer: Arc<dyn Reducer<T>>, window: TimeWindow) -> Self {
        Self {
            reducer,
            window,
            points: Vec::new(),
        }
    }

    pub fn add_data_point(&mut self, point: DataPoint<T>) {
        self.points.push(point);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// One point per bucket, ascending. Buckets without a collected value hold
    /// `T::UNCOLLECTED`. A titled bucket keeps the title of the last point added to it.
    /// Pure with respect to the accumulated points; may be called repeatedly.
    pub fn build_chart(&self) -> TimeSeries<T> {
        let bucket_count = self.window.bucket_count();
        let mut buckets: Vec<Vec<T>> = vec![Vec::new(); bucket_count];
        let mut titles: Vec<Option<&str>> = vec![None; bucket_count];
        let mut skipped = 0usize;

        for point in &self.points {
            let Some(index) = self.window.bucket_index(point.x) else {
                skipped += 1;
                continue;
            };
            buckets[index].push(point.y);
            if let Some(title) = point.title.as_deref() {
                titles[index] = Some(title);
            }
        }
        if skipped > 0 {
            trace!(skipped, "points outside time window ignored");
        }

        let points = buckets
            .iter()
            .zip(titles)
            .enumerate()
            .map(|(index, (values, title))| {
                let y = if values.is_empty() {
                    T::UNCOLLECTED
                } else {
                    self.reducer.reduce(values)
                };
                DataPoint {
                    x: self.window.bucket_start(index),
                    y,
                    title: title.map(str::to_owned),
                }
            })
            .collect();
        TimeSeries { points }
    }
}
