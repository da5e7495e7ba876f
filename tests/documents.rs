use daqboard::control::documents::{
    apply_pid_loop, normalize_do_modes, parse_script, PidLoopDraft, PID_FIELDS,
};
use serde_json::json;

#[test]
fn pid_write_back_only_touches_editable_fields() {
    let mut doc = json!({
        "version": 3,
        "loops": [
            {"name": "heater", "kp": 1.0, "vendor_tuning": {"x": 1}, "enabled": false}
        ]
    });
    let mut draft = PidLoopDraft::from_document(&doc, 0);
    assert_eq!(draft.name, "heater");
    assert_eq!(draft.kp, 1.0);
    draft.kp = 2.5;
    draft.enabled = true;
    apply_pid_loop(&mut doc, 0, &draft);

    let entry = &doc["loops"][0];
    assert_eq!(entry["kp"], json!(2.5));
    assert_eq!(entry["enabled"], json!(true));
    assert_eq!(entry["vendor_tuning"], json!({"x": 1}));
    assert_eq!(doc["version"], json!(3));
    for key in entry.as_object().unwrap().keys() {
        assert!(PID_FIELDS.contains(&key.as_str()) || key == "vendor_tuning", "unexpected key {key}");
    }
}

#[test]
fn pid_write_back_creates_missing_entries() {
    let mut doc = json!({});
    let draft = PidLoopDraft {
        name: "third".into(),
        ..Default::default()
    };
    apply_pid_loop(&mut doc, 2, &draft);
    let loops = doc["loops"].as_array().unwrap();
    assert_eq!(loops.len(), 3);
    assert_eq!(loops[0], json!({}));
    assert_eq!(loops[2]["name"], json!("third"));
}

#[test]
fn mistyped_pid_fields_keep_defaults() {
    let doc = json!({"loops": [{"kp": "fast", "ki": 0.5}]});
    let draft = PidLoopDraft::from_document(&doc, 0);
    assert_eq!(draft.kp, PidLoopDraft::default().kp);
    assert_eq!(draft.ki, 0.5);
    assert_eq!(PidLoopDraft::from_document(&doc, 7), PidLoopDraft::default());
}

#[test]
fn legacy_momentary_flag_becomes_mode() {
    let mut config = json!({
        "digitalOutputs": [
            {"name": "pump", "momentary": true},
            {"name": "valve"},
            {"name": "horn", "mode": "buzz"}
        ]
    });
    normalize_do_modes(&mut config);
    let modes: Vec<&str> = config["digitalOutputs"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["mode"].as_str().unwrap())
        .collect();
    assert_eq!(modes, vec!["momentary", "toggle", "buzz"]);
}

#[test]
fn script_must_be_json() {
    assert!(parse_script(r#"{"steps": []}"#).is_ok());
    assert!(parse_script("// Paste your script JSON here").is_err());
}
