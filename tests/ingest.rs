use daqboard::data::selector::{ChannelKind, Selector};
use daqboard::data::snapshot::{resolve, Snapshot};
use daqboard::layout::model::{Page, Widget, WidgetKind, WidgetOptions};
use daqboard::render::RenderLoopManager;
use daqboard::telemetry::ingest::TelemetryIngest;
use daqboard::telemetry::message::{TelemetryMessage, TimedMessage};

fn frame(text: &str, t: f64) -> TimedMessage {
    TimedMessage {
        received_at: t,
        message: TelemetryMessage::parse(text).expect("valid frame"),
    }
}

fn chart_page(series: Vec<Selector>) -> (Page, String) {
    let mut widget = Widget::new(WidgetKind::Chart, [0.0, 0.0], [300.0, 200.0]);
    if let WidgetOptions::Chart(opts) = &mut widget.options {
        opts.series = series;
    }
    let id = widget.id.clone();
    let mut page = Page::new("Page 1");
    page.widgets.push(widget);
    (page, id)
}

#[test]
fn tick_without_do_keeps_previous_bits() {
    let page = Page::new("empty");
    let mut loops = RenderLoopManager::new();
    let mut ingest = TelemetryIngest::new();
    ingest.apply(&frame(r#"{"type":"tick","do":[1,0,1]}"#, 0.1), &page, &mut loops);
    ingest.apply(&frame(r#"{"type":"tick","ai":[1,2,3,4,5,6,7,8]}"#, 0.2), &page, &mut loops);
    let snapshot = ingest.snapshot();
    assert_eq!(snapshot.do_bits, vec![true, false, true]);
    assert_eq!(snapshot.ai[7], 8.0);
    assert_eq!(ingest.tick_count(), 2);
    assert_eq!(ingest.last_tick_at(), Some(0.2));
}

#[test]
fn session_frame_records_directory() {
    let page = Page::new("empty");
    let mut loops = RenderLoopManager::new();
    let mut ingest = TelemetryIngest::new();
    ingest.apply(&frame(r#"{"type":"session","dir":"run_0042"}"#, 0.0), &page, &mut loops);
    assert_eq!(ingest.session_dir(), Some("run_0042"));
    assert_eq!(ingest.tick_count(), 0);
}

#[test]
fn each_tick_appends_one_sample_per_chart() {
    let (page, id) = chart_page(vec![Selector::new(ChannelKind::Ai, 0), Selector::new(ChannelKind::Tc, 3)]);
    let mut loops = RenderLoopManager::new();
    let mut ingest = TelemetryIngest::new();
    loops.sync_page(&page, ingest.snapshot());
    for i in 1..=5 {
        let text = format!(r#"{{"type":"tick","ai":[{i},0,0,0,0,0,0,0]}}"#);
        ingest.apply(&frame(&text, i as f64 * 0.1), &page, &mut loops);
    }
    let chart = loops.get_mut(&id).and_then(|l| l.chart_mut()).expect("chart runtime");
    assert_eq!(chart.buffer.len(), 5);
    let latest = chart.buffer.latest().unwrap();
    // TC3 is out of range and reads as zero.
    assert_eq!(latest.values, vec![5.0, 0.0]);
}

#[test]
fn resolver_boundaries() {
    let snapshot = Snapshot {
        ai: vec![0.25; 8],
        ..Default::default()
    };
    assert_eq!(resolve(&Selector::new(ChannelKind::Ai, 7), &snapshot), 0.25);
    assert_eq!(resolve(&Selector::new(ChannelKind::Ai, 8), &snapshot), 0.0);
    assert_eq!(resolve(&Selector::new(ChannelKind::Do, 99), &snapshot), 0.0);
}
