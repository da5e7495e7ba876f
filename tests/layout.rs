use daqboard::error::DashError;
use daqboard::layout::model::{Layout, Widget, WidgetKind, WidgetOptions};
use daqboard::layout::persistence::{export_layout, import_layout, load_layout, save_layout};

#[test]
fn last_page_cannot_be_removed() {
    let mut layout = Layout::new();
    assert!(matches!(layout.remove_active_page(), Err(DashError::LastPage)));
    layout.add_page();
    assert_eq!(layout.active_index(), 1);
    assert!(layout.remove_active_page().is_ok());
    assert_eq!(layout.pages().len(), 1);
    assert_eq!(layout.active_index(), 0);
}

#[test]
fn file_round_trip_keeps_pages_and_widgets() {
    let mut layout = Layout::new();
    let chart = layout.add_widget(WidgetKind::Chart, [10.0, 20.0], [400.0, 250.0]);
    layout
        .update_options(&chart, |opts| {
            if let WidgetOptions::Chart(c) = opts {
                c.span = 30.0;
                c.filter_hz = 2.5;
            }
        })
        .unwrap();
    layout.add_page();
    layout.rename_page(1, "Controls").unwrap();
    layout.add_widget(WidgetKind::DoButton, [0.0, 0.0], [200.0, 120.0]);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("layout.json");
    save_layout(&layout, &path).unwrap();
    let restored = load_layout(&path).unwrap();
    assert_eq!(restored.pages(), layout.pages());

    assert_eq!(restored.pages().len(), 2);
    assert_eq!(restored.pages()[1].name, "Controls");
    let widget = restored.pages()[0].widget(&chart).expect("chart kept its id");
    assert_eq!((widget.x, widget.y, widget.w, widget.h), (10.0, 20.0, 400.0, 250.0));
    match &widget.options {
        WidgetOptions::Chart(c) => {
            assert_eq!(c.span, 30.0);
            assert_eq!(c.filter_hz, 2.5);
        }
        other => panic!("unexpected options {other:?}"),
    }
    assert_eq!(restored.pages()[1].widgets[0].kind(), WidgetKind::DoButton);
}

#[test]
fn export_uses_file_keys() {
    let mut layout = Layout::new();
    layout.add_widget(WidgetKind::AoSlider, [0.0, 0.0], [300.0, 150.0]);
    let text = export_layout(&layout).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    let widget = &value["pages"][0]["widgets"][0];
    assert!(widget.get("type").is_some());
    assert!(widget["opts"].get("aoIndex").is_some());
}

#[test]
fn invalid_imports_are_rejected() {
    for text in [
        "not json",
        r#"{"widgets":[]}"#,
        r#"{"pages":{}}"#,
        r#"{"pages":[]}"#,
        r#"{"pages":[{"name":"p","widgets":[{"type":"teapot"}]}]}"#,
    ] {
        assert!(
            matches!(import_layout(text), Err(DashError::InvalidLayout(_))),
            "accepted {text}"
        );
    }
}

#[test]
fn import_fills_missing_fields() {
    let layout = import_layout(r#"{"pages":[{"widgets":[{"type":"gauge"}]}]}"#).unwrap();
    let widget = &layout.active_page().widgets[0];
    assert!(!widget.id.is_empty());
    assert_eq!(widget.kind(), WidgetKind::Gauge);
}

#[test]
fn duplicate_widget_ids_are_rejected() {
    let text = r#"{"pages":[{"name":"P","widgets":[
        {"id":"w","type":"chart","opts":{"series":[{"kind":"ai","index":0}]}},
        {"id":"w","type":"chart","opts":{"series":[{"kind":"ai","index":1}]}}
    ]}]}"#;
    assert!(matches!(import_layout(text), Err(DashError::InvalidLayout(_))));

    let across_pages = r#"{"pages":[
        {"name":"A","widgets":[{"id":"w","type":"gauge"}]},
        {"name":"B","widgets":[{"id":"w","type":"bars"}]}
    ]}"#;
    assert!(matches!(import_layout(across_pages), Err(DashError::InvalidLayout(_))));
}

#[test]
fn imported_sizes_are_raised_to_the_floor() {
    let mut layout =
        import_layout(r#"{"pages":[{"name":"P","widgets":[{"type":"gauge","w":-50,"h":0},{"type":"bars","w":500,"h":400}]}]}"#)
            .unwrap();
    layout.enforce_min_size([280.0, 180.0]);
    let sizes: Vec<(f32, f32)> = layout.active_page().widgets.iter().map(|w| (w.w, w.h)).collect();
    assert_eq!(sizes, vec![(280.0, 180.0), (500.0, 400.0)]);
}

#[test]
fn inserted_widget_keeps_prepared_options() {
    let mut layout = Layout::new();
    let mut widget = Widget::new(WidgetKind::Chart, [40.0, 40.0], [460.0, 280.0]);
    if let WidgetOptions::Chart(c) = &mut widget.options {
        c.span = 25.0;
    }
    let id = layout.insert_widget(widget);
    match layout.widget(&id).map(|w| &w.options) {
        Some(WidgetOptions::Chart(c)) => assert_eq!(c.span, 25.0),
        other => panic!("unexpected {other:?}"),
    }
}
