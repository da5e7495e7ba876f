//! Dashboard settings loaded at startup.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "DAQBOARD_CONFIG";
/// Config file looked up in the working directory when [`CONFIG_ENV`] is unset.
pub const DEFAULT_CONFIG_FILE: &str = "daqboard.yaml";

// ─────────────────────────────────────────────────────────────────────────────
// DashboardConfig
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Base URL of the control server.
    pub server: String,
    pub title: String,
    pub window_size: [f32; 2],
    pub connect_on_start: bool,
    /// Span given to newly added charts, in seconds.
    pub default_span: f64,
    /// Resize floor for every widget.
    pub widget_min_size: [f32; 2],
    pub default_widget_size: [f32; 2],
    /// Keep DO buttons neutral until the server reports hardware present.
    pub hw_ready_required: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            server: "http://127.0.0.1:8000".into(),
            title: "DAQ Dashboard".into(),
            window_size: [1400.0, 900.0],
            connect_on_start: true,
            default_span: 10.0,
            widget_min_size: [280.0, 180.0],
            default_widget_size: [460.0, 280.0],
            hw_ready_required: true,
        }
    }
}

impl DashboardConfig {
    /// Telemetry socket URL derived from [`Self::server`].
    pub fn ws_url(&self) -> String {
        let base = self.server.trim_end_matches('/');
        let base = if let Some(rest) = base.strip_prefix("https://") {
            format!("wss://{rest}")
        } else if let Some(rest) = base.strip_prefix("http://") {
            format!("ws://{rest}")
        } else {
            base.to_string()
        };
        format!("{base}/ws")
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&text)?)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        let text = serde_yaml::to_string(self)?;
        std::fs::write(path, text)?;
        Ok(())
    }

    /// Path the config is read from: `$DAQBOARD_CONFIG`, else `./daqboard.yaml`.
    pub fn default_path() -> PathBuf {
        std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
    }

    /// Load from [`Self::default_path`]; a missing file yields the defaults.
    pub fn load() -> Result<Self> {
        let path = Self::default_path();
        if !path.exists() {
            tracing::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        tracing::info!("loading config from {}", path.display());
        Self::load_from_path(&path)
    }
}
