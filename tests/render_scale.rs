use std::f64::consts::PI;

use daqboard::data::buffer::{Sample, SampleBuffer};
use daqboard::data::selector::{ChannelKind, Selector};
use daqboard::layout::options::{ChartOptions, ScaleMode};
use daqboard::render::scale::{bar_height, chart_range, gauge_ticks, instant_range, needle_angle, usable_range};

#[test]
fn flat_signal_still_has_a_range() {
    let opts = ChartOptions {
        series: vec![Selector::new(ChannelKind::Ai, 0), Selector::new(ChannelKind::Ai, 1)],
        ..Default::default()
    };
    let mut buffer = SampleBuffer::new(10.0);
    for i in 0..20 {
        buffer.append(Sample::new(i as f64 * 0.1, vec![5.0, 5.0]));
    }
    let (lo, hi) = chart_range(&opts, &buffer);
    assert!(lo < hi);
    assert!(lo <= 5.0 && 5.0 <= hi);
}

#[test]
fn manual_range_is_used_as_given() {
    let opts = ChartOptions {
        scale: ScaleMode::Manual,
        min: -2.0,
        max: 8.0,
        ..Default::default()
    };
    assert_eq!(chart_range(&opts, &SampleBuffer::new(10.0)), (-2.0, 8.0));
}

#[test]
fn empty_chart_uses_unit_range() {
    let opts = ChartOptions::default();
    assert_eq!(chart_range(&opts, &SampleBuffer::new(10.0)), (-1.0, 1.0));
}

#[test]
fn degenerate_bounds_are_repaired() {
    assert_eq!(usable_range(3.0, 3.0), (2.0, 4.0));
    assert_eq!(usable_range(4.0, 1.0), (1.0, 4.0));
    assert_eq!(usable_range(f64::NAN, 1.0), (-1.0, 1.0));
}

#[test]
fn auto_instant_range_contains_zero_and_one() {
    assert_eq!(instant_range(ScaleMode::Auto, 0.0, 0.0, &[0.4, 0.6]), (0.0, 1.0));
    assert_eq!(instant_range(ScaleMode::Auto, 0.0, 0.0, &[-3.0, 7.5]), (-3.0, 7.5));
    assert_eq!(instant_range(ScaleMode::Manual, 0.0, 10.0, &[50.0]), (0.0, 10.0));
}

#[test]
fn gauge_geometry() {
    let ticks = gauge_ticks(0.0, 100.0);
    assert_eq!(ticks[0], (PI, 0.0));
    assert_eq!(ticks[2].1, 50.0);
    assert!((ticks[4].0).abs() < 1e-12);
    assert_eq!(ticks[4].1, 100.0);
    assert_eq!(needle_angle(-20.0, 0.0, 100.0), PI);
    assert!(needle_angle(500.0, 0.0, 100.0).abs() < 1e-12);
}

#[test]
fn bars_clamp_to_plot_area() {
    assert_eq!(bar_height(5.0, 0.0, 10.0, 200.0), 100.0);
    assert_eq!(bar_height(15.0, 0.0, 10.0, 200.0), 200.0);
    assert_eq!(bar_height(-1.0, 0.0, 10.0, 200.0), 0.0);
}
