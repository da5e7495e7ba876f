//! Server-owned JSON documents (device config, PID loops, script, layout).
//!
//! Documents are edited as opaque `serde_json::Value`s and written back whole.
//! Only the fields the dashboard knows about are touched; everything else the
//! server returned is preserved as is.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{DashError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    Config,
    Pid,
    Script,
    Layout,
}

impl DocumentKind {
    pub fn path(self) -> &'static str {
        match self {
            DocumentKind::Config => "/api/config",
            DocumentKind::Pid => "/api/pid",
            DocumentKind::Script => "/api/script",
            DocumentKind::Layout => "/api/layout",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            DocumentKind::Config => "Configuration",
            DocumentKind::Pid => "PID Loops",
            DocumentKind::Script => "Script",
            DocumentKind::Layout => "Layout",
        }
    }
}

/// Keys of a PID loop entry the dashboard may write.
pub const PID_FIELDS: [&str; 16] = [
    "target", "kp", "ki", "kd", "out_min", "out_max", "err_min", "err_max", "i_min", "i_max", "enabled",
    "name", "kind", "src", "ai_ch", "out_ch",
];

pub const PID_KINDS: [&str; 4] = ["analog", "digital", "tc", "calc"];
pub const PID_SOURCES: [&str; 3] = ["ai", "tc", "calc"];
pub const TC_TYPES: [&str; 9] = ["K", "J", "T", "E", "R", "S", "B", "N", "C"];

/// Editable copy of one PID loop, restricted to [`PID_FIELDS`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PidLoopDraft {
    pub enabled: bool,
    pub name: String,
    pub kind: String,
    pub src: String,
    pub ai_ch: i64,
    pub out_ch: i64,
    pub target: f64,
    pub kp: f64,
    pub ki: f64,
    pub kd: f64,
    pub out_min: f64,
    pub out_max: f64,
    pub err_min: f64,
    pub err_max: f64,
    pub i_min: f64,
    pub i_max: f64,
}

impl Default for PidLoopDraft {
    fn default() -> Self {
        Self {
            enabled: false,
            name: String::new(),
            kind: "analog".into(),
            src: "ai".into(),
            ai_ch: 0,
            out_ch: 0,
            target: 0.0,
            kp: 0.0,
            ki: 0.0,
            kd: 0.0,
            out_min: 0.0,
            out_max: 1.0,
            err_min: -1.0,
            err_max: 1.0,
            i_min: -1.0,
            i_max: 1.0,
        }
    }
}

impl PidLoopDraft {
    /// Draft for `loops[index]` of a PID document, overlaying what the server
    /// has on top of the defaults. Fields of an unexpected type keep their default.
    pub fn from_document(doc: &Value, index: usize) -> Self {
        let mut draft = Self::default();
        let Some(entry) = doc.get("loops").and_then(|l| l.get(index)).and_then(Value::as_object) else {
            return draft;
        };
        let mut merged = match serde_json::to_value(&draft) {
            Ok(Value::Object(map)) => map,
            _ => return draft,
        };
        for key in PID_FIELDS {
            if let Some(v) = entry.get(key) {
                let mut candidate = merged.clone();
                candidate.insert(key.to_string(), v.clone());
                if serde_json::from_value::<PidLoopDraft>(Value::Object(candidate.clone())).is_ok() {
                    merged = candidate;
                }
            }
        }
        if let Ok(parsed) = serde_json::from_value(Value::Object(merged)) {
            draft = parsed;
        }
        draft
    }

    fn to_fields(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }
}

fn as_object_or_reset(value: &mut Value) -> Option<&mut Map<String, Value>> {
    if !value.is_object() {
        *value = Value::Object(Map::new());
    }
    value.as_object_mut()
}

/// Write the enumerated fields of `draft` into `loops[index]`, creating the
/// list and intermediate entries as needed. Other keys are left alone.
pub fn apply_pid_loop(doc: &mut Value, index: usize, draft: &PidLoopDraft) {
    let Some(root) = as_object_or_reset(doc) else {
        return;
    };
    let loops = root.entry("loops").or_insert_with(|| Value::Array(Vec::new()));
    if !loops.is_array() {
        *loops = Value::Array(Vec::new());
    }
    let Some(list) = loops.as_array_mut() else {
        return;
    };
    while list.len() <= index {
        list.push(Value::Object(Map::new()));
    }
    let Some(entry) = as_object_or_reset(&mut list[index]) else {
        return;
    };
    let fields = draft.to_fields();
    for key in PID_FIELDS {
        if let Some(v) = fields.get(key) {
            entry.insert(key.to_string(), v.clone());
        }
    }
}

/// Give every digital output an explicit `mode`, deriving it from the
/// legacy `momentary` flag where missing.
pub fn normalize_do_modes(config: &mut Value) {
    let Some(outputs) = config.get_mut("digitalOutputs").and_then(Value::as_array_mut) else {
        return;
    };
    for entry in outputs.iter_mut().filter_map(Value::as_object_mut) {
        let has_mode = entry.get("mode").and_then(Value::as_str).is_some_and(|m| !m.is_empty());
        if !has_mode {
            let momentary = entry.get("momentary").and_then(Value::as_bool).unwrap_or(false);
            let mode = if momentary { "momentary" } else { "toggle" };
            entry.insert("mode".into(), Value::String(mode.into()));
        }
    }
}

/// Set a digital output's mode and keep the legacy flag in step.
pub fn set_do_mode(entry: &mut Map<String, Value>, mode: &str) {
    entry.insert("mode".into(), Value::String(mode.into()));
    entry.insert("momentary".into(), Value::Bool(mode == "momentary"));
}

/// Parse script editor text; it must be JSON before it is sent.
pub fn parse_script(text: &str) -> Result<Value> {
    Ok(serde_json::from_str(text)?)
}

/// Versions and hardware availability reported by `/api/diag`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diagnostics {
    pub server: Option<String>,
    pub bridge: Option<String>,
    pub hardware_ready: bool,
}

impl Diagnostics {
    pub fn from_value(value: &Value) -> Self {
        let text = |key: &str| match value.get(key) {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Null) | None => None,
            Some(other) => Some(other.to_string()),
        };
        let hardware_ready = value
            .get("have_mcculw")
            .or_else(|| value.get("mcculw"))
            .map(|v| match v {
                Value::Bool(b) => *b,
                Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
                _ => false,
            })
            .unwrap_or(false);
        Self {
            server: text("server"),
            bridge: text("bridge"),
            hardware_ready,
        }
    }

    /// `UI 0.6.3 • Server 0.6.0 • Bridge ...`
    pub fn versions_line(&self, ui_version: &str) -> String {
        let mut parts = vec![format!("UI {ui_version}")];
        if let Some(s) = &self.server {
            parts.push(format!("Server {s}"));
        }
        if let Some(b) = &self.bridge {
            parts.push(format!("Bridge {b}"));
        }
        parts.join(" • ")
    }
}

/// Check a server answer before treating it as a document.
pub fn expect_document(kind: DocumentKind, value: Value) -> Result<Value> {
    match value {
        Value::Object(_) | Value::Array(_) => Ok(value),
        other => Err(DashError::InvalidDocument(format!(
            "{} document is not an object: {other}",
            kind.title()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn draft_overlays_server_values() {
        let doc = json!({ "loops": [ { "kp": 2.5, "name": "oven", "kind": 7, "extra": true } ] });
        let d = PidLoopDraft::from_document(&doc, 0);
        assert_eq!(d.kp, 2.5);
        assert_eq!(d.name, "oven");
        assert_eq!(d.kind, "analog");
        assert_eq!(d.out_max, 1.0);
        assert_eq!(PidLoopDraft::from_document(&doc, 3), PidLoopDraft::default());
    }

    #[test]
    fn legacy_momentary_flag_becomes_mode() {
        let mut cfg = json!({ "digitalOutputs": [
            { "momentary": true }, { "momentary": false }, { "mode": "buzz" }
        ]});
        normalize_do_modes(&mut cfg);
        let modes: Vec<_> = cfg["digitalOutputs"]
            .as_array()
            .unwrap()
            .iter()
            .map(|d| d["mode"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(modes, ["momentary", "toggle", "buzz"]);
    }

    #[test]
    fn diagnostics_versions_line() {
        let d = Diagnostics::from_value(&json!({ "server": "0.6.0", "bridge": "b1", "have_mcculw": true }));
        assert!(d.hardware_ready);
        assert_eq!(d.versions_line("0.6.3"), "UI 0.6.3 • Server 0.6.0 • Bridge b1");
    }
}
