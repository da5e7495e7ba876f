//! Per-frame driving of [`DashboardApp`].
//!
//! Every frame: bring the frame loops in line with the active page, drain
//! telemetry and server replies, then paint. Painting never waits for the
//! network and ingest never waits for a paint; both read whatever state is
//! current.

use eframe::egui;
use serde_json::Value;

use crate::control::client::{DocumentPurpose, ServerReply};
use crate::control::documents::{normalize_do_modes, DocumentKind, PidLoopDraft};
use crate::layout::model::WidgetOptions;
use crate::layout::persistence::import_layout_value;
use crate::render::loop_manager::WidgetRuntime;
use crate::telemetry::connection::ConnectionEvent;

use super::DashboardApp;

impl DashboardApp {
    pub(super) fn run_frame(&mut self, ctx: &egui::Context) {
        self.loops.sync_page(self.layout.active_page(), self.ingest.snapshot());
        self.drain_telemetry();
        self.drain_replies();

        self.show_top_bar(ctx);
        self.notifications.show(ctx);
        self.show_editors(ctx);
        self.show_settings(ctx);
        self.show_page(ctx);

        // Paint at display rate regardless of telemetry cadence.
        ctx.request_repaint();
    }

    fn drain_telemetry(&mut self) {
        let Some(connection) = self.connection.as_mut() else {
            return;
        };
        for event in connection.poll() {
            match event {
                ConnectionEvent::Connected => self.notifications.info("Telemetry connected"),
                ConnectionEvent::Disconnected(reason) => {
                    let reason = reason.unwrap_or_else(|| "closed".into());
                    self.notifications.warn(format!("Telemetry disconnected: {reason}"));
                }
                ConnectionEvent::Message(timed) => {
                    self.ingest.apply(&timed, self.layout.active_page(), &mut self.loops);
                }
            }
        }
    }

    fn drain_replies(&mut self) {
        for reply in self.client.poll() {
            self.on_reply(reply);
        }
    }

    fn on_reply(&mut self, reply: ServerReply) {
        match reply {
            ServerReply::Control { request, origin, result } => match result {
                Ok(()) => {
                    let runtime = origin.as_deref().and_then(|id| self.loops.get_mut(id)).map(|l| &mut l.runtime);
                    if let Some(WidgetRuntime::DoButton(button)) = runtime {
                        button.confirm(&request);
                    }
                }
                Err(e) => self.notifications.error(format!("{} failed: {e}", request.path())),
            },
            ServerReply::Document { kind, purpose, result } => self.on_document(kind, purpose, result),
            ServerReply::Saved { kind, result } => self.on_saved(kind, result),
            ServerReply::PidLoopSaved { origin, index, result } => self.on_pid_loop_saved(&origin, index, result),
            ServerReply::Diag(Ok(diag)) => self.diagnostics = Some(diag),
            ServerReply::Diag(Err(_)) => {}
        }
    }

    /// Panel saves only notify; an open PID editor keeps its edits.
    fn on_pid_loop_saved(&mut self, origin: &str, index: usize, result: crate::Result<()>) {
        let title = self.layout.widget(origin).map(|w| w.title().to_string());
        let title = title.as_deref().unwrap_or("PID panel");
        match result {
            Ok(()) => self.notifications.info(format!("{title}: loop {index} applied")),
            Err(e) => self.notifications.error(format!("{title}: applying loop {index} failed: {e}")),
        }
    }

    fn on_document(&mut self, kind: DocumentKind, purpose: DocumentPurpose, result: crate::Result<Value>) {
        match purpose {
            DocumentPurpose::Labels => match result {
                Ok(doc) => self.device_config = Some(doc),
                Err(e) => tracing::debug!("channel labels unavailable: {e}"),
            },
            DocumentPurpose::Edit => match (kind, result) {
                (DocumentKind::Config, Ok(mut doc)) => {
                    normalize_do_modes(&mut doc);
                    self.device_config = Some(doc.clone());
                    self.editors.open_config(doc);
                }
                (DocumentKind::Pid, Ok(doc)) => self.editors.open_pid(doc),
                (DocumentKind::Script, Ok(doc)) => self.editors.open_script(Some(doc)),
                (DocumentKind::Script, Err(e)) => {
                    self.notifications.warn(format!("Script unavailable: {e}"));
                    self.editors.open_script(None);
                }
                (kind, Err(e)) => self.notifications.error(format!("Loading {} failed: {e}", kind.title())),
                (DocumentKind::Layout, Ok(_)) => {}
            },
            DocumentPurpose::PidPanel(id) => {
                let loop_index = match self.layout.widget(&id).map(|w| &w.options) {
                    Some(WidgetOptions::PidPanel(o)) => o.loop_index,
                    _ => return,
                };
                let draft = match result {
                    Ok(doc) => PidLoopDraft::from_document(&doc, loop_index),
                    Err(e) => {
                        self.notifications.warn(format!("PID loop {loop_index} unavailable: {e}"));
                        PidLoopDraft::default()
                    }
                };
                if let Some(WidgetRuntime::PidPanel(panel)) = self.loops.get_mut(&id).map(|l| &mut l.runtime) {
                    panel.draft = Some(draft);
                    panel.loaded_for = Some(loop_index);
                    panel.loading = false;
                }
            }
            DocumentPurpose::LayoutLoad => match result.and_then(import_layout_value) {
                Ok(layout) => {
                    self.replace_layout(layout);
                    self.notifications.info("Layout loaded from server");
                }
                Err(e) => {
                    tracing::warn!("server layout rejected: {e}");
                    self.notifications.error(format!("Layout load failed: {e}"));
                }
            },
        }
    }

    fn on_saved(&mut self, kind: DocumentKind, result: crate::Result<()>) {
        match result {
            Ok(()) => {
                self.notifications.info(format!("{} saved", kind.title()));
                if kind == DocumentKind::Config {
                    if let Some(doc) = self.editors.config_document() {
                        self.device_config = Some(doc.clone());
                    }
                }
                self.editors.close(kind);
            }
            Err(e) => {
                self.editors.save_failed(kind);
                self.notifications.error(format!("Saving {} failed: {e}", kind.title()));
            }
        }
    }
}
