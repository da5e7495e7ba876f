use daqboard::data::buffer::{Sample, SampleBuffer};
use daqboard::data::filter::LowPassFilter;

#[test]
fn window_never_exceeds_span() {
    let mut buffer = SampleBuffer::new(2.0);
    let mut t = 0.0;
    for i in 0..500 {
        // Irregular spacing, including bursts of closely spaced ticks.
        t += if i % 7 == 0 { 0.35 } else { 0.013 };
        assert!(buffer.append(Sample::new(t, vec![i as f64])));
        let (first, last) = buffer.time_bounds().unwrap();
        assert!(last - first <= 2.0, "window {first}..{last} wider than span");
    }
    assert!(buffer.len() > 1);
}

#[test]
fn non_advancing_samples_are_dropped() {
    let mut buffer = SampleBuffer::new(10.0);
    assert!(buffer.append(Sample::new(1.0, vec![1.0])));
    assert!(!buffer.append(Sample::new(1.0, vec![2.0])));
    assert!(!buffer.append(Sample::new(0.5, vec![3.0])));
    assert_eq!(buffer.len(), 1);
    assert_eq!(buffer.latest().unwrap().values, vec![1.0]);
}

#[test]
fn shrinking_span_applies_on_next_append() {
    let mut buffer = SampleBuffer::new(10.0);
    for i in 0..10 {
        buffer.append(Sample::new(i as f64, vec![0.0]));
    }
    assert_eq!(buffer.len(), 10);
    buffer.set_span(3.0);
    assert_eq!(buffer.len(), 10, "stored samples are untouched until the next append");
    buffer.append(Sample::new(10.0, vec![0.0]));
    assert_eq!(buffer.time_bounds(), Some((7.0, 10.0)));
}

#[test]
fn constant_input_is_a_fixed_point() {
    let mut filter = LowPassFilter::new();
    for i in 0..50 {
        let out = filter.apply(&[3.3, -1.0], i as f64 * 0.05, 5.0);
        assert!((out[0] - 3.3).abs() < 1e-12);
        assert!((out[1] + 1.0).abs() < 1e-12);
    }
}

#[test]
fn step_converges_towards_input() {
    let mut filter = LowPassFilter::new();
    filter.apply(&[0.0], 0.0, 1.0);
    let mut last = 0.0;
    for i in 1..=200 {
        let out = filter.apply(&[1.0], i as f64 * 0.05, 1.0)[0];
        assert!(out >= last, "output must rise monotonically on a step");
        assert!(out <= 1.0);
        last = out;
    }
    assert!(last > 0.99);
}

#[test]
fn zero_cutoff_is_identity() {
    let mut filter = LowPassFilter::new();
    for (i, v) in [5.0, -2.0, 9.5, 0.0].into_iter().enumerate() {
        assert_eq!(filter.apply(&[v], i as f64, 0.0), vec![v]);
    }
}

#[test]
fn alpha_stays_finite_for_repeated_timestamps() {
    let alpha = LowPassFilter::alpha(10.0, 0.0);
    assert!(alpha.is_finite());
    assert!(alpha > 0.0 && alpha < 1.0);
}
