//! First-order low-pass stage applied to chart series before buffering.

use std::f64::consts::PI;

/// Smallest interval used in the smoothing factor; keeps `alpha` finite when
/// two ticks share a timestamp.
pub const MIN_DT: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq)]
struct SeriesState {
    output: f64,
    updated_at: f64,
}

/// Per-series exponential filter state for one chart widget.
///
/// Each series is seeded lazily with its first raw value, so there is no
/// warm-up ramp from zero.
#[derive(Debug, Clone, Default)]
pub struct LowPassFilter {
    series: Vec<Option<SeriesState>>,
}

impl LowPassFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// `alpha = dt / (RC + dt)` with `RC = 1 / (2π·fc)`.
    pub fn alpha(cutoff_hz: f64, dt: f64) -> f64 {
        let rc = 1.0 / (2.0 * PI * cutoff_hz);
        let dt = dt.max(MIN_DT);
        dt / (rc + dt)
    }

    /// Filter one tick of raw values taken at `now` (seconds).
    ///
    /// A cutoff of zero (or any non-positive / non-finite cutoff) passes the
    /// raw values through and leaves the state untouched.
    pub fn apply(&mut self, raw: &[f64], now: f64, cutoff_hz: f64) -> Vec<f64> {
        if !(cutoff_hz > 0.0) || !cutoff_hz.is_finite() {
            return raw.to_vec();
        }
        if self.series.len() < raw.len() {
            self.series.resize(raw.len(), None);
        }
        raw.iter()
            .zip(self.series.iter_mut())
            .map(|(&value, state)| {
                if !value.is_finite() {
                    return value;
                }
                let next = match *state {
                    None => value,
                    Some(prev) => {
                        let alpha = Self::alpha(cutoff_hz, now - prev.updated_at);
                        prev.output + alpha * (value - prev.output)
                    }
                };
                *state = Some(SeriesState {
                    output: next,
                    updated_at: now,
                });
                next
            })
            .collect()
    }

    /// Last filtered output of a series, if it has been seeded.
    pub fn last_output(&self, series: usize) -> Option<f64> {
        self.series.get(series).copied().flatten().map(|s| s.output)
    }

    pub fn reset(&mut self) {
        self.series.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeds_with_first_value() {
        let mut f = LowPassFilter::new();
        assert_eq!(f.apply(&[7.0, -3.0], 0.0, 1.0), vec![7.0, -3.0]);
    }

    #[test]
    fn step_moves_by_alpha() {
        let mut f = LowPassFilter::new();
        f.apply(&[0.0], 0.0, 1.0);
        let out = f.apply(&[1.0], 0.1, 1.0)[0];
        let expected = LowPassFilter::alpha(1.0, 0.1);
        assert!((out - expected).abs() < 1e-12);
    }

    #[test]
    fn zero_cutoff_does_not_touch_state() {
        let mut f = LowPassFilter::new();
        assert_eq!(f.apply(&[5.0], 0.0, 0.0), vec![5.0]);
        assert_eq!(f.last_output(0), None);
    }

    #[test]
    fn irregular_intervals_weight_by_elapsed_time() {
        let mut short = LowPassFilter::new();
        let mut long = LowPassFilter::new();
        short.apply(&[0.0], 0.0, 2.0);
        long.apply(&[0.0], 0.0, 2.0);
        let a = short.apply(&[1.0], 0.01, 2.0)[0];
        let b = long.apply(&[1.0], 0.5, 2.0)[0];
        assert!(b > a);
    }
}
