//! The dashboard window.
//!
//! [`DashboardApp`] owns the layout, the telemetry connection, the control
//! client and every widget's frame loop. Its behaviour is split across
//! sub-modules, each adding an `impl DashboardApp` block:
//!
//! | Sub-module        | Responsibility |
//! | ----------------- | -------------- |
//! | [`update`]        | Per-frame draining of telemetry and server replies, loop sync |
//! | [`top_bar`]       | Toolbar: connection, rate, editors, layout files, pages, add widget |
//! | [`widgets`]       | Widget chrome, drag/resize, per-type widget bodies |
//! | [`settings`]      | Widget settings window |
//! | [`editors`]       | Device config, PID and script document editors |
//! | [`notifications`] | Non-blocking message log |
//! | [`run`]           | [`run_dashboard()`] entry point |

mod editors;
mod notifications;
mod run;
mod settings;
mod top_bar;
mod update;
mod widgets;

pub use notifications::{Level, Notice, Notifications};
pub use run::run_dashboard;

use eframe::egui;
use serde_json::Value;
use tokio::runtime::Handle;

use crate::config::DashboardConfig;
use crate::control::client::HttpControlClient;
use crate::control::documents::{DocumentKind, Diagnostics};
use crate::control::DocumentPurpose;
use crate::interaction::drag::DragResize;
use crate::layout::model::{Layout, WidgetId};
use crate::render::loop_manager::RenderLoopManager;
use crate::telemetry::connection::TelemetryConnection;
use crate::telemetry::ingest::TelemetryIngest;

use editors::Editors;

pub struct DashboardApp {
    config: DashboardConfig,
    runtime: Handle,
    ctx: egui::Context,

    layout: Layout,
    loops: RenderLoopManager,
    ingest: TelemetryIngest,
    connection: Option<TelemetryConnection>,
    client: HttpControlClient,
    drag: DragResize,

    /// Cached device configuration used for channel labels.
    device_config: Option<Value>,
    diagnostics: Option<Diagnostics>,
    rate_hz: f64,

    settings_for: Option<WidgetId>,
    editors: Editors,
    notifications: Notifications,
}

impl DashboardApp {
    pub fn new(config: DashboardConfig, runtime: Handle, ctx: egui::Context) -> Self {
        let client = HttpControlClient::new(runtime.clone(), config.server.clone(), ctx.clone());
        let min = egui::vec2(config.widget_min_size[0], config.widget_min_size[1]);
        let mut app = Self {
            runtime,
            ctx,
            layout: Layout::new(),
            loops: RenderLoopManager::new(),
            ingest: TelemetryIngest::new(),
            connection: None,
            client,
            drag: DragResize::new(min),
            device_config: None,
            diagnostics: None,
            rate_hz: 100.0,
            settings_for: None,
            editors: Editors::default(),
            notifications: Notifications::default(),
            config,
        };
        app.client.fetch_document(DocumentKind::Config, DocumentPurpose::Labels);
        app.client.fetch_diag();
        if app.config.connect_on_start {
            app.connect();
        }
        app
    }

    /// Drop any current connection and open a fresh one.
    pub(crate) fn connect(&mut self) {
        self.connection = None;
        self.client.set_base_url(self.config.server.clone());
        self.connection = Some(TelemetryConnection::open(
            &self.runtime,
            self.config.ws_url(),
            self.ctx.clone(),
        ));
    }

    pub(crate) fn is_connected(&self) -> bool {
        self.connection.as_ref().is_some_and(TelemetryConnection::is_connected)
    }

    /// DO buttons show a logical state only when connected and, if required,
    /// the server reports the acquisition hardware as present.
    pub(crate) fn hardware_ready(&self) -> bool {
        if !self.config.hw_ready_required {
            return true;
        }
        self.diagnostics.as_ref().is_some_and(|d| d.hardware_ready)
    }

    /// Swap in a new layout and remount everything on its first page.
    pub(crate) fn replace_layout(&mut self, layout: Layout) {
        self.layout = layout;
        self.layout.enforce_min_size(self.config.widget_min_size);
        self.layout.set_active(0);
        self.loops.unmount_all();
        self.drag.release();
        self.settings_for = None;
        self.loops.sync_page(self.layout.active_page(), self.ingest.snapshot());
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.run_frame(ctx);
    }
}
