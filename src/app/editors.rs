//! Editors for the server-owned documents.
//!
//! Each editor works on the document exactly as the server returned it and
//! only writes the keys it shows. A failed save leaves the editor open with
//! the edits intact.

use eframe::egui;
use serde_json::{Map, Value};

use crate::control::documents::{
    apply_pid_loop, parse_script, set_do_mode, DocumentKind, PidLoopDraft, PID_KINDS, PID_SOURCES, TC_TYPES,
};
use crate::control::DocumentPurpose;
use crate::layout::options::DoMode;

use super::DashboardApp;

const SCRIPT_PLACEHOLDER: &str = "// Paste your script JSON here";

#[derive(Debug)]
pub(super) struct ConfigEditor {
    doc: Value,
    saving: bool,
}

#[derive(Debug)]
pub(super) struct PidEditor {
    doc: Value,
    loops: Vec<PidLoopDraft>,
    saving: bool,
}

#[derive(Debug)]
pub(super) struct ScriptEditor {
    text: String,
    /// False when the server has no script endpoint.
    available: bool,
    saving: bool,
}

#[derive(Debug, Default)]
pub(super) struct Editors {
    config: Option<ConfigEditor>,
    pid: Option<PidEditor>,
    script: Option<ScriptEditor>,
}

impl Editors {
    pub(super) fn open_config(&mut self, doc: Value) {
        self.config = Some(ConfigEditor { doc, saving: false });
    }

    pub(super) fn open_pid(&mut self, doc: Value) {
        let count = doc.get("loops").and_then(Value::as_array).map_or(0, Vec::len);
        let loops = (0..count).map(|i| PidLoopDraft::from_document(&doc, i)).collect();
        self.pid = Some(PidEditor {
            doc,
            loops,
            saving: false,
        });
    }

    pub(super) fn open_script(&mut self, doc: Option<Value>) {
        let (text, available) = match doc {
            Some(doc) => (serde_json::to_string_pretty(&doc).unwrap_or_default(), true),
            None => (SCRIPT_PLACEHOLDER.to_string(), false),
        };
        self.script = Some(ScriptEditor {
            text,
            available,
            saving: false,
        });
    }

    pub(super) fn config_document(&self) -> Option<&Value> {
        self.config.as_ref().map(|e| &e.doc)
    }

    pub(super) fn is_open(&self, kind: DocumentKind) -> bool {
        match kind {
            DocumentKind::Config => self.config.is_some(),
            DocumentKind::Pid => self.pid.is_some(),
            DocumentKind::Script => self.script.is_some(),
            DocumentKind::Layout => false,
        }
    }

    pub(super) fn close(&mut self, kind: DocumentKind) {
        match kind {
            DocumentKind::Config => self.config = None,
            DocumentKind::Pid => self.pid = None,
            DocumentKind::Script => self.script = None,
            DocumentKind::Layout => {}
        }
    }

    pub(super) fn save_failed(&mut self, kind: DocumentKind) {
        match kind {
            DocumentKind::Config => self.config.iter_mut().for_each(|e| e.saving = false),
            DocumentKind::Pid => self.pid.iter_mut().for_each(|e| e.saving = false),
            DocumentKind::Script => self.script.iter_mut().for_each(|e| e.saving = false),
            DocumentKind::Layout => {}
        }
    }
}

impl DashboardApp {
    pub(super) fn open_editor(&mut self, kind: DocumentKind) {
        self.client.fetch_document(kind, DocumentPurpose::Edit);
    }

    pub(super) fn show_editors(&mut self, ctx: &egui::Context) {
        self.show_config_editor(ctx);
        self.show_pid_editor(ctx);
        self.show_script_editor(ctx);
    }

    fn show_config_editor(&mut self, ctx: &egui::Context) {
        let Some(editor) = self.editors.config.as_mut() else {
            return;
        };
        let mut open = true;
        let mut save = false;
        egui::Window::new(DocumentKind::Config.title())
            .open(&mut open)
            .default_size([720.0, 560.0])
            .vscroll(true)
            .show(ctx, |ui| {
                config_form(ui, &mut editor.doc);
                ui.separator();
                save = ui.add_enabled(!editor.saving, egui::Button::new("Save")).clicked();
            });
        if save {
            editor.saving = true;
            self.client.put_document(DocumentKind::Config, editor.doc.clone());
        }
        if !open {
            self.editors.config = None;
        }
    }

    fn show_pid_editor(&mut self, ctx: &egui::Context) {
        let Some(editor) = self.editors.pid.as_mut() else {
            return;
        };
        let mut open = true;
        let mut save = false;
        egui::Window::new(DocumentKind::Pid.title())
            .open(&mut open)
            .default_size([720.0, 520.0])
            .vscroll(true)
            .show(ctx, |ui| {
                for (i, draft) in editor.loops.iter_mut().enumerate() {
                    egui::CollapsingHeader::new(format!("Loop {i}"))
                        .id_salt(("pid_loop", i))
                        .default_open(i == 0)
                        .show(ui, |ui| pid_loop_form(ui, draft, ("pid_editor", i)));
                }
                if ui.button("+ Loop").clicked() {
                    editor.loops.push(PidLoopDraft::default());
                }
                ui.separator();
                save = ui.add_enabled(!editor.saving, egui::Button::new("Save")).clicked();
            });
        if save {
            for (i, draft) in editor.loops.iter().enumerate() {
                apply_pid_loop(&mut editor.doc, i, draft);
            }
            editor.saving = true;
            self.client.put_document(DocumentKind::Pid, editor.doc.clone());
        }
        if !open {
            self.editors.pid = None;
        }
    }

    fn show_script_editor(&mut self, ctx: &egui::Context) {
        let Some(editor) = self.editors.script.as_mut() else {
            return;
        };
        let mut open = true;
        let mut save = false;
        egui::Window::new(DocumentKind::Script.title())
            .open(&mut open)
            .default_size([640.0, 520.0])
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().max_height(440.0).show(ui, |ui| {
                    ui.add(
                        egui::TextEdit::multiline(&mut editor.text)
                            .code_editor()
                            .desired_width(f32::INFINITY)
                            .desired_rows(24),
                    );
                });
                save = ui.add_enabled(!editor.saving, egui::Button::new("Save")).clicked();
            });
        if save {
            if !editor.available {
                self.notifications.error("No /api/script endpoint on the server");
            } else {
                match parse_script(&editor.text) {
                    Ok(doc) => {
                        editor.saving = true;
                        self.client.put_document(DocumentKind::Script, doc);
                    }
                    Err(e) => self.notifications.error(format!("Script is not valid JSON: {e}")),
                }
            }
        }
        if !open {
            self.editors.script = None;
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Form helpers over raw JSON objects
// ─────────────────────────────────────────────────────────────────────────────

fn edit_text(ui: &mut egui::Ui, obj: &mut Map<String, Value>, key: &str, width: f32) {
    let mut text = obj.get(key).and_then(Value::as_str).unwrap_or_default().to_string();
    if ui.add(egui::TextEdit::singleline(&mut text).desired_width(width)).changed() {
        obj.insert(key.into(), Value::String(text));
    }
}

fn edit_number(ui: &mut egui::Ui, obj: &mut Map<String, Value>, key: &str, speed: f64) {
    let mut value = obj.get(key).and_then(Value::as_f64).unwrap_or(0.0);
    if ui.add(egui::DragValue::new(&mut value).speed(speed)).changed() {
        let number = serde_json::Number::from_f64(value).map_or(Value::Null, Value::Number);
        obj.insert(key.into(), number);
    }
}

fn edit_integer(ui: &mut egui::Ui, obj: &mut Map<String, Value>, key: &str) {
    let mut value = obj.get(key).and_then(Value::as_i64).unwrap_or(0);
    if ui.add(egui::DragValue::new(&mut value)).changed() {
        obj.insert(key.into(), Value::from(value));
    }
}

fn edit_bool(ui: &mut egui::Ui, obj: &mut Map<String, Value>, key: &str) {
    let mut value = obj.get(key).and_then(Value::as_bool).unwrap_or(false);
    if ui.checkbox(&mut value, key).changed() {
        obj.insert(key.into(), Value::Bool(value));
    }
}

fn choice(ui: &mut egui::Ui, salt: impl std::hash::Hash, current: &mut String, options: &[&str]) -> bool {
    let mut changed = false;
    egui::ComboBox::from_id_salt(salt)
        .selected_text(current.as_str())
        .show_ui(ui, |ui| {
            for opt in options {
                if ui.selectable_label(current == opt, *opt).clicked() {
                    *current = (*opt).to_string();
                    changed = true;
                }
            }
        });
    changed
}

fn object_list<'a>(doc: &'a mut Value, key: &str) -> impl Iterator<Item = &'a mut Map<String, Value>> {
    doc.get_mut(key)
        .and_then(Value::as_array_mut)
        .into_iter()
        .flatten()
        .filter_map(Value::as_object_mut)
}

fn config_form(ui: &mut egui::Ui, doc: &mut Value) {
    ui.heading("Boards");
    for (key, label) in [("board1608", "E-1608"), ("boardetc", "E-TC")] {
        if let Some(board) = doc.get_mut(key).and_then(Value::as_object_mut) {
            ui.horizontal(|ui| {
                ui.label(label);
                ui.label("boardNum");
                edit_integer(ui, board, "boardNum");
                ui.label("sampleRateHz");
                edit_number(ui, board, "sampleRateHz", 1.0);
                ui.label("blockSize");
                edit_integer(ui, board, "blockSize");
            });
        }
    }

    ui.separator();
    ui.heading("Analogs");
    for (i, a) in object_list(doc, "analogs").enumerate() {
        ui.horizontal(|ui| {
            ui.label(format!("AI{i}"));
            edit_text(ui, a, "name", 100.0);
            ui.label("slope");
            edit_number(ui, a, "slope", 0.000001);
            ui.label("offset");
            edit_number(ui, a, "offset", 0.000001);
            ui.label("cutoffHz");
            edit_number(ui, a, "cutoffHz", 0.1);
            ui.label("units");
            edit_text(ui, a, "units", 50.0);
            edit_bool(ui, a, "include");
        });
    }

    ui.separator();
    ui.heading("Digital Outputs");
    for (i, d) in object_list(doc, "digitalOutputs").enumerate() {
        ui.horizontal(|ui| {
            ui.label(format!("DO{i}"));
            edit_text(ui, d, "name", 100.0);
            let mut mode = d.get("mode").and_then(Value::as_str).unwrap_or("toggle").to_string();
            let modes = DoMode::ALL.map(DoMode::as_str);
            if choice(ui, ("do_mode", i), &mut mode, &modes) {
                set_do_mode(d, &mode);
            }
            edit_bool(ui, d, "normallyOpen");
            ui.label("actuationTime");
            edit_number(ui, d, "actuationTime", 0.1);
            edit_bool(ui, d, "include");
        });
    }

    ui.separator();
    ui.heading("Analog Outputs");
    for (i, a) in object_list(doc, "analogOutputs").enumerate() {
        ui.horizontal(|ui| {
            ui.label(format!("AO{i}"));
            edit_text(ui, a, "name", 100.0);
            ui.label("minV");
            edit_number(ui, a, "minV", 0.001);
            ui.label("maxV");
            edit_number(ui, a, "maxV", 0.001);
            ui.label("startupV");
            edit_number(ui, a, "startupV", 0.001);
            edit_bool(ui, a, "include");
        });
    }

    ui.separator();
    ui.heading("Thermocouples");
    for (i, t) in object_list(doc, "thermocouples").enumerate() {
        ui.horizontal(|ui| {
            ui.label(format!("TC{i}"));
            edit_bool(ui, t, "include");
            ui.label("ch");
            edit_integer(ui, t, "ch");
            edit_text(ui, t, "name", 100.0);
            let mut tc_type = t.get("type").and_then(Value::as_str).unwrap_or("K").to_string();
            if choice(ui, ("tc_type", i), &mut tc_type, &TC_TYPES) {
                t.insert("type".into(), Value::String(tc_type));
            }
            ui.label("offset");
            edit_number(ui, t, "offset", 0.001);
        });
    }
}

/// Form over the editable fields of one PID loop.
pub(super) fn pid_loop_form(ui: &mut egui::Ui, draft: &mut PidLoopDraft, salt: impl std::hash::Hash + Copy) {
    egui::Grid::new(("pid_form", salt)).num_columns(4).show(ui, |ui| {
        ui.checkbox(&mut draft.enabled, "enabled");
        ui.label("name");
        ui.text_edit_singleline(&mut draft.name);
        ui.end_row();

        ui.label("kind");
        choice(ui, ("pid_kind", salt), &mut draft.kind, &PID_KINDS);
        ui.label("src");
        choice(ui, ("pid_src", salt), &mut draft.src, &PID_SOURCES);
        ui.end_row();

        ui.label("ai_ch");
        ui.add(egui::DragValue::new(&mut draft.ai_ch).range(0..=63));
        ui.label("out_ch");
        ui.add(egui::DragValue::new(&mut draft.out_ch).range(0..=63));
        ui.end_row();

        let rows: [(&str, &mut f64, &str, &mut f64); 5] = [
            ("target", &mut draft.target, "kp", &mut draft.kp),
            ("ki", &mut draft.ki, "kd", &mut draft.kd),
            ("out_min", &mut draft.out_min, "out_max", &mut draft.out_max),
            ("err_min", &mut draft.err_min, "err_max", &mut draft.err_max),
            ("i_min", &mut draft.i_min, "i_max", &mut draft.i_max),
        ];
        for (left, lv, right, rv) in rows {
            ui.label(left);
            ui.add(egui::DragValue::new(lv).speed(0.0001));
            ui.label(right);
            ui.add(egui::DragValue::new(rv).speed(0.0001));
            ui.end_row();
        }
    });
}
