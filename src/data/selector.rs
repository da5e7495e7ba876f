//! Channel selectors: which input/output a widget series reads from.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The four channel families published in every telemetry tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelKind {
    #[default]
    Ai,
    Ao,
    Do,
    Tc,
}

impl ChannelKind {
    pub const ALL: [ChannelKind; 4] = [ChannelKind::Ai, ChannelKind::Ao, ChannelKind::Do, ChannelKind::Tc];

    /// Upper-case prefix used for fallback labels (`AI3`, `TC0`, ...).
    pub fn prefix(self) -> &'static str {
        match self {
            ChannelKind::Ai => "AI",
            ChannelKind::Ao => "AO",
            ChannelKind::Do => "DO",
            ChannelKind::Tc => "TC",
        }
    }

    /// Key of the matching channel list inside the device configuration document.
    pub fn config_key(self) -> &'static str {
        match self {
            ChannelKind::Ai => "analogs",
            ChannelKind::Ao => "analogOutputs",
            ChannelKind::Do => "digitalOutputs",
            ChannelKind::Tc => "thermocouples",
        }
    }
}

impl fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ChannelKind::Ai => "ai",
            ChannelKind::Ao => "ao",
            ChannelKind::Do => "do",
            ChannelKind::Tc => "tc",
        })
    }
}

/// A `(kind, index)` pair with an optional display name.
///
/// Identity is the pair; the name is presentation only and may change freely.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Selector {
    pub kind: ChannelKind,
    pub index: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Selector {
    pub fn new(kind: ChannelKind, index: usize) -> Self {
        Self { kind, index, name: None }
    }

    pub fn named(kind: ChannelKind, index: usize, name: impl Into<String>) -> Self {
        Self {
            kind,
            index,
            name: Some(name.into()),
        }
    }

    pub fn identity(&self) -> (ChannelKind, usize) {
        (self.kind, self.index)
    }

    /// `KIND+INDEX` label, e.g. `AI3`.
    pub fn fallback_label(&self) -> String {
        format!("{}{}", self.kind.prefix(), self.index)
    }

    /// Effective label: explicit name, then the channel name from the device
    /// configuration document (if cached), then `KIND+INDEX`.
    pub fn label(&self, device_config: Option<&serde_json::Value>) -> String {
        if let Some(name) = self.name.as_deref().filter(|n| !n.is_empty()) {
            return name.to_string();
        }
        device_config
            .and_then(|cfg| cfg.get(self.kind.config_key()))
            .and_then(|list| list.get(self.index))
            .and_then(|entry| entry.get("name"))
            .and_then(|name| name.as_str())
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| self.fallback_label())
    }
}
