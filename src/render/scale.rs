//! Axis ranges and value-to-geometry mappings shared by the painters.

use std::f64::consts::PI;

use crate::data::buffer::SampleBuffer;
use crate::layout::options::{ChartOptions, ScaleMode};

/// Number of labelled ticks on a gauge scale.
pub const GAUGE_TICKS: usize = 5;

/// Make `(lo, hi)` usable as an axis: non-finite bounds fall back to
/// `[-1, 1]`, a zero-width range is widened by one on each side and
/// reversed bounds are swapped. The result always has `lo < hi`.
pub fn usable_range(lo: f64, hi: f64) -> (f64, f64) {
    if !(lo.is_finite() && hi.is_finite()) {
        return (-1.0, 1.0);
    }
    if lo == hi {
        return (lo - 1.0, hi + 1.0);
    }
    if lo > hi {
        (hi, lo)
    } else {
        (lo, hi)
    }
}

/// Y range of a chart: configured bounds in manual mode, otherwise the
/// min/max over every buffered value of every series.
pub fn chart_range(opts: &ChartOptions, buffer: &SampleBuffer) -> (f64, f64) {
    match opts.scale {
        ScaleMode::Manual => usable_range(opts.min, opts.max),
        ScaleMode::Auto => match buffer.value_bounds(opts.series.len()) {
            Some((lo, hi)) => usable_range(lo, hi),
            None => (-1.0, 1.0),
        },
    }
}

/// Range for instantaneous widgets (gauge, bars). Auto mode always keeps
/// 0 and 1 inside the range.
pub fn instant_range(scale: ScaleMode, min: f64, max: f64, values: &[f64]) -> (f64, f64) {
    match scale {
        ScaleMode::Manual => usable_range(min, max),
        ScaleMode::Auto => {
            let lo = values.iter().copied().filter(|v| v.is_finite()).fold(0.0, f64::min);
            let hi = values.iter().copied().filter(|v| v.is_finite()).fold(1.0, f64::max);
            usable_range(lo, hi)
        }
    }
}

/// Position of `value` inside `[lo, hi]`, clamped to `[0, 1]`.
pub fn fraction(value: f64, lo: f64, hi: f64) -> f64 {
    if !value.is_finite() || hi <= lo {
        return 0.0;
    }
    ((value - lo) / (hi - lo)).clamp(0.0, 1.0)
}

/// Needle angle in radians: `π` at the left end (min), `0` at the right end (max).
pub fn needle_angle(value: f64, lo: f64, hi: f64) -> f64 {
    PI - fraction(value, lo, hi) * PI
}

/// `(angle, value)` of the equally spaced gauge ticks, left to right.
pub fn gauge_ticks(lo: f64, hi: f64) -> [(f64, f64); GAUGE_TICKS] {
    std::array::from_fn(|i| {
        let frac = i as f64 / (GAUGE_TICKS - 1) as f64;
        (PI - frac * PI, lo + frac * (hi - lo))
    })
}

/// Bar height in pixels for a plot area `height` pixels tall.
pub fn bar_height(value: f64, lo: f64, hi: f64, height: f32) -> f32 {
    fraction(value, lo, hi) as f32 * height
}
