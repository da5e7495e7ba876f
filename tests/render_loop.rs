use daqboard::data::selector::{ChannelKind, Selector};
use daqboard::data::snapshot::Snapshot;
use daqboard::layout::model::{Page, Widget, WidgetKind, WidgetOptions};
use daqboard::render::{RenderLoopManager, WidgetRuntime};

fn chart(series: Vec<Selector>) -> Widget {
    let mut widget = Widget::new(WidgetKind::Chart, [0.0, 0.0], [300.0, 200.0]);
    if let WidgetOptions::Chart(opts) = &mut widget.options {
        opts.series = series;
    }
    widget
}

fn page_with(widgets: Vec<Widget>) -> Page {
    let mut page = Page::new("Page 1");
    page.widgets = widgets;
    page
}

#[test]
fn remount_leaves_a_single_loop_and_cancels_the_old_one() {
    let widget = chart(vec![Selector::new(ChannelKind::Ai, 0)]);
    let snapshot = Snapshot::default();
    let mut manager = RenderLoopManager::new();
    let first = manager.mount(&widget, &snapshot);
    let second = manager.mount(&widget, &snapshot);
    assert_eq!(manager.len(), 1);
    assert!(first.is_cancelled());
    assert!(!second.is_cancelled());
    assert!(second.generation() > first.generation());
    assert_eq!(manager.handle(&widget.id).map(|h| h.generation()), Some(second.generation()));
}

#[test]
fn unmount_only_touches_its_own_widget() {
    let a = chart(vec![Selector::new(ChannelKind::Ai, 0)]);
    let b = Widget::new(WidgetKind::Gauge, [0.0, 0.0], [200.0, 200.0]);
    let snapshot = Snapshot::default();
    let mut manager = RenderLoopManager::new();
    let ha = manager.mount(&a, &snapshot);
    let hb = manager.mount(&b, &snapshot);
    assert!(manager.unmount(&a.id));
    assert!(!manager.unmount(&a.id));
    assert!(ha.is_cancelled());
    assert!(!hb.is_cancelled());
    assert!(manager.frame(&b.id).is_some());
}

#[test]
fn sync_page_remounts_on_series_change_only() {
    let mut widget = chart(vec![Selector::new(ChannelKind::Ai, 0)]);
    let snapshot = Snapshot::default();
    let mut manager = RenderLoopManager::new();
    manager.sync_page(&page_with(vec![widget.clone()]), &snapshot);
    let original = manager.handle(&widget.id).unwrap();

    // Renaming a series or changing the span keeps the running loop.
    if let WidgetOptions::Chart(opts) = &mut widget.options {
        opts.series[0].name = Some("Flow".into());
        opts.span = 60.0;
    }
    manager.sync_page(&page_with(vec![widget.clone()]), &snapshot);
    assert!(!original.is_cancelled());

    if let WidgetOptions::Chart(opts) = &mut widget.options {
        opts.series.push(Selector::new(ChannelKind::Tc, 1));
    }
    manager.sync_page(&page_with(vec![widget.clone()]), &snapshot);
    assert!(original.is_cancelled());
    assert_eq!(manager.len(), 1);
    match manager.get(&widget.id).map(|l| &l.runtime) {
        Some(WidgetRuntime::Chart(c)) => assert!(c.buffer.is_empty()),
        other => panic!("unexpected runtime {other:?}"),
    }
}

#[test]
fn switching_pages_unmounts_widgets_of_the_old_page() {
    let a = chart(Vec::new());
    let b = Widget::new(WidgetKind::DoButton, [0.0, 0.0], [200.0, 100.0]);
    let snapshot = Snapshot::default();
    let mut manager = RenderLoopManager::new();
    manager.sync_page(&page_with(vec![a.clone()]), &snapshot);
    let ha = manager.handle(&a.id).unwrap();
    manager.sync_page(&page_with(vec![b.clone()]), &snapshot);
    assert!(ha.is_cancelled());
    assert!(!manager.is_mounted(&a.id));
    assert!(manager.is_mounted(&b.id));
}
