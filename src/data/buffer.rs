//! Time-bounded sample history owned by one chart widget.

use std::collections::VecDeque;

/// One ingest tick: monotonic timestamp (seconds) plus one value per series,
/// in the chart's selector order.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub t: f64,
    pub values: Vec<f64>,
}

impl Sample {
    pub fn new(t: f64, values: Vec<f64>) -> Self {
        Self { t, values }
    }

    pub fn value(&self, series: usize) -> Option<f64> {
        self.values.get(series).copied()
    }
}

/// Ordered history bounded by duration, not by count.
///
/// After every accepted append `latest.t - front.t <= span`. Stored samples
/// are never reordered or edited; a span change converges on the next append.
#[derive(Debug, Clone)]
pub struct SampleBuffer {
    samples: VecDeque<Sample>,
    span: f64,
}

impl Default for SampleBuffer {
    fn default() -> Self {
        Self::new(10.0)
    }
}

impl SampleBuffer {
    pub fn new(span: f64) -> Self {
        Self {
            samples: VecDeque::new(),
            span,
        }
    }

    pub fn span(&self) -> f64 {
        self.span
    }

    pub fn set_span(&mut self, span: f64) {
        self.span = span;
    }

    /// Insert at the back, then evict from the front until the window fits.
    ///
    /// Samples that do not advance time are dropped and `false` is returned.
    pub fn append(&mut self, sample: Sample) -> bool {
        if let Some(last) = self.samples.back() {
            if !(sample.t > last.t) {
                return false;
            }
        }
        let latest = sample.t;
        self.samples.push_back(sample);
        while let Some(front) = self.samples.front() {
            if latest - front.t > self.span {
                self.samples.pop_front();
            } else {
                break;
            }
        }
        true
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sample> + '_ {
        self.samples.iter()
    }

    pub fn front(&self) -> Option<&Sample> {
        self.samples.front()
    }

    pub fn latest(&self) -> Option<&Sample> {
        self.samples.back()
    }

    /// `(first.t, last.t)` of the retained window.
    pub fn time_bounds(&self) -> Option<(f64, f64)> {
        Some((self.samples.front()?.t, self.samples.back()?.t))
    }

    /// `[t, value]` points of one series in buffer order; samples without
    /// that series (width changed mid-stream) are skipped.
    pub fn series_points(&self, series: usize) -> Vec<[f64; 2]> {
        self.samples
            .iter()
            .filter_map(|s| s.value(series).map(|v| [s.t, v]))
            .collect()
    }

    /// Min/max of the first `series` values across all buffered samples.
    pub fn value_bounds(&self, series: usize) -> Option<(f64, f64)> {
        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        for s in &self.samples {
            for &v in s.values.iter().take(series) {
                if v.is_finite() {
                    lo = lo.min(v);
                    hi = hi.max(v);
                }
            }
        }
        (lo <= hi).then_some((lo, hi))
    }

    /// Sample closest in time to `t`.
    pub fn nearest(&self, t: f64) -> Option<&Sample> {
        let idx = self.samples.partition_point(|s| s.t < t);
        let after = self.samples.get(idx);
        let before = idx.checked_sub(1).and_then(|i| self.samples.get(i));
        match (before, after) {
            (Some(b), Some(a)) => Some(if (t - b.t) <= (a.t - t) { b } else { a }),
            (b, a) => b.or(a),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evicts_beyond_span() {
        let mut buf = SampleBuffer::new(2.0);
        for i in 0..10 {
            buf.append(Sample::new(i as f64 * 0.5, vec![i as f64]));
        }
        let (t0, t1) = buf.time_bounds().unwrap();
        assert_eq!(t1, 4.5);
        assert_eq!(t0, 2.5);
        assert_eq!(buf.len(), 5);
    }

    #[test]
    fn rejects_non_increasing_time() {
        let mut buf = SampleBuffer::new(5.0);
        assert!(buf.append(Sample::new(1.0, vec![0.0])));
        assert!(!buf.append(Sample::new(1.0, vec![1.0])));
        assert!(!buf.append(Sample::new(0.5, vec![1.0])));
        assert_eq!(buf.len(), 1);
    }

    #[test]
    fn span_change_applies_on_next_append() {
        let mut buf = SampleBuffer::new(100.0);
        for i in 0..50 {
            buf.append(Sample::new(i as f64, vec![0.0]));
        }
        buf.set_span(5.0);
        assert_eq!(buf.len(), 50);
        buf.append(Sample::new(50.0, vec![0.0]));
        let (t0, t1) = buf.time_bounds().unwrap();
        assert!(t1 - t0 <= 5.0);
    }

    #[test]
    fn nearest_picks_closest_sample() {
        let mut buf = SampleBuffer::new(10.0);
        for t in [1.0, 2.0, 4.0] {
            buf.append(Sample::new(t, vec![t * 10.0]));
        }
        assert_eq!(buf.nearest(2.9).unwrap().t, 2.0);
        assert_eq!(buf.nearest(3.1).unwrap().t, 4.0);
        assert_eq!(buf.nearest(-5.0).unwrap().t, 1.0);
        assert_eq!(buf.nearest(50.0).unwrap().t, 4.0);
    }

    #[test]
    fn value_bounds_ignores_extra_columns() {
        let mut buf = SampleBuffer::new(10.0);
        buf.append(Sample::new(0.0, vec![1.0, 100.0]));
        buf.append(Sample::new(1.0, vec![-2.0]));
        assert_eq!(buf.value_bounds(1), Some((-2.0, 1.0)));
        assert_eq!(buf.value_bounds(2), Some((-2.0, 100.0)));
        assert_eq!(buf.value_bounds(0), None);
    }
}
