//! daqboard crate root: re-exports and module wiring.
//!
//! A native dashboard for a data-acquisition / PID control server. Telemetry
//! arrives over a WebSocket, is merged into a single snapshot and buffered per
//! chart; a page of freely placed widgets repaints at display rate and sends
//! control requests back over HTTP.
//!
//! Modules:
//! - `data`: sample buffer, low-pass filter, selectors, snapshot and resolver
//! - `telemetry`: socket client, message decoding, ingest
//! - `layout`: pages, widgets, typed options, layout files
//! - `render`: per-widget frame loops and painters
//! - `interaction`: drag/resize and DO button state machines
//! - `control`: control requests, server documents, HTTP client
//! - `config`: startup settings
//! - `app`: the eframe application

pub mod app;
pub mod config;
pub mod control;
pub mod data;
pub mod error;
pub mod interaction;
pub mod layout;
pub mod render;
pub mod telemetry;

// Public re-exports for a compact external API
pub use app::{run_dashboard, DashboardApp};
pub use config::DashboardConfig;
pub use control::{ControlRequest, ControlSink};
pub use data::buffer::{Sample, SampleBuffer};
pub use data::filter::LowPassFilter;
pub use data::selector::{ChannelKind, Selector};
pub use data::snapshot::{resolve, Snapshot};
pub use error::{DashError, Result};
pub use layout::{Layout, Page, Widget, WidgetKind, WidgetOptions};
pub use render::RenderLoopManager;
