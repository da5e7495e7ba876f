//! Strongly-typed option records, one per widget type.
//!
//! JSON keys follow the layout file format (`filterHz`, `doIndex`, ...).

use serde::{Deserialize, Serialize};

use crate::data::selector::Selector;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleMode {
    #[default]
    Auto,
    Manual,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChartOptions {
    pub title: String,
    pub series: Vec<Selector>,
    /// Retained window in seconds.
    pub span: f64,
    pub paused: bool,
    pub scale: ScaleMode,
    pub min: f64,
    pub max: f64,
    /// Low-pass cutoff; `0` disables filtering.
    pub filter_hz: f64,
    /// Show live / cursor values next to the legend.
    pub readout: bool,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            title: "Chart".into(),
            series: Vec::new(),
            span: 10.0,
            paused: false,
            scale: ScaleMode::Auto,
            min: 0.0,
            max: 10.0,
            filter_hz: 0.0,
            readout: true,
        }
    }
}

impl ChartOptions {
    /// Span used for buffering; never below one second.
    pub fn effective_span(&self) -> f64 {
        if self.span.is_finite() {
            self.span.max(1.0)
        } else {
            10.0
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GaugeOptions {
    pub title: String,
    pub needles: Vec<Selector>,
    pub scale: ScaleMode,
    pub min: f64,
    pub max: f64,
}

impl Default for GaugeOptions {
    fn default() -> Self {
        Self {
            title: "Gauge".into(),
            needles: Vec::new(),
            scale: ScaleMode::Manual,
            min: 0.0,
            max: 10.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BarsOptions {
    pub title: String,
    pub series: Vec<Selector>,
    pub scale: ScaleMode,
    pub min: f64,
    pub max: f64,
}

impl Default for BarsOptions {
    fn default() -> Self {
        Self {
            title: "Bars".into(),
            series: Vec::new(),
            scale: ScaleMode::Manual,
            min: 0.0,
            max: 10.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DoMode {
    #[default]
    Toggle,
    Momentary,
    Buzz,
}

impl DoMode {
    pub const ALL: [DoMode; 3] = [DoMode::Toggle, DoMode::Momentary, DoMode::Buzz];

    pub fn as_str(self) -> &'static str {
        match self {
            DoMode::Toggle => "toggle",
            DoMode::Momentary => "momentary",
            DoMode::Buzz => "buzz",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DoButtonOptions {
    pub title: String,
    pub do_index: usize,
    pub active_high: bool,
    pub mode: DoMode,
    pub buzz_hz: f64,
}

impl Default for DoButtonOptions {
    fn default() -> Self {
        Self {
            title: "DO".into(),
            do_index: 0,
            active_high: true,
            mode: DoMode::Toggle,
            buzz_hz: 2.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PidPanelOptions {
    pub title: String,
    pub loop_index: usize,
    pub show_controls: bool,
}

impl Default for PidPanelOptions {
    fn default() -> Self {
        Self {
            title: "PID".into(),
            loop_index: 0,
            show_controls: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AoSliderOptions {
    pub title: String,
    pub ao_index: usize,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    /// Send on every slider move rather than only on commit.
    pub live: bool,
}

impl Default for AoSliderOptions {
    fn default() -> Self {
        Self {
            title: "AO".into(),
            ao_index: 0,
            min: 0.0,
            max: 10.0,
            step: 0.0025,
            live: true,
        }
    }
}
