//! Toolbar and page tabs.

use eframe::egui;
use egui_phosphor::regular::{CIRCLE, DOWNLOAD_SIMPLE, MINUS, PLUS, PLUGS_CONNECTED, UPLOAD_SIMPLE};

use crate::control::client::{ControlSink, DocumentPurpose};
use crate::control::documents::DocumentKind;
use crate::control::request::ControlRequest;
use crate::layout::model::{Widget, WidgetKind, WidgetOptions};
use crate::layout::persistence::{load_layout, save_layout, LayoutFile};
use crate::render::palette;
use crate::telemetry::connection::LinkState;

use super::DashboardApp;

/// Where new widgets are dropped.
const NEW_WIDGET_POS: [f32; 2] = [40.0, 40.0];

impl DashboardApp {
    pub(super) fn show_top_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal_wrapped(|ui| {
                self.connection_controls(ui);
                ui.separator();
                self.rate_controls(ui);
                ui.separator();
                for kind in [DocumentKind::Config, DocumentKind::Pid, DocumentKind::Script] {
                    if ui.button(kind.title()).clicked() {
                        self.open_editor(kind);
                    }
                }
                ui.separator();
                self.layout_menu(ui);
                self.add_widget_menu(ui);
            });
            ui.horizontal_wrapped(|ui| {
                self.page_tabs(ui);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let versions = self
                        .diagnostics
                        .clone()
                        .unwrap_or_default()
                        .versions_line(env!("CARGO_PKG_VERSION"));
                    ui.weak(versions);
                    if let Some(dir) = self.ingest.session_dir() {
                        ui.label(format!("Session: {dir}"));
                    }
                });
            });
        });
    }

    fn connection_controls(&mut self, ui: &mut egui::Ui) {
        let state = self.connection.as_ref().map(|c| c.state());
        let (color, text) = match state {
            Some(LinkState::Connected) => (palette::ACTIVE, "connected"),
            Some(LinkState::Connecting) => (ui.visuals().warn_fg_color, "connecting"),
            _ => (palette::INACTIVE, "disconnected"),
        };
        ui.colored_label(color, CIRCLE).on_hover_text(text);
        ui.add(egui::TextEdit::singleline(&mut self.config.server).desired_width(180.0));
        if ui
            .button(format!("{PLUGS_CONNECTED} Connect"))
            .on_hover_text("Reset and reconnect")
            .clicked()
        {
            self.connect();
            self.client.fetch_diag();
            self.client.fetch_document(DocumentKind::Config, DocumentPurpose::Labels);
        }
    }

    fn rate_controls(&mut self, ui: &mut egui::Ui) {
        ui.label("Rate");
        ui.add(egui::DragValue::new(&mut self.rate_hz).range(0.0..=100_000.0).suffix(" Hz"));
        if ui.button("Set").clicked() {
            match ControlRequest::rate(self.rate_hz) {
                Some(request) if self.is_connected() => self.client.send(request, None),
                Some(_) => self.notifications.warn(crate::DashError::Disconnected.to_string()),
                None => self.notifications.warn("Acquisition rate must be at least 1 Hz"),
            }
        }
    }

    fn layout_menu(&mut self, ui: &mut egui::Ui) {
        ui.menu_button("Layout", |ui| {
            if ui.button(format!("{DOWNLOAD_SIMPLE} Export to file…")).clicked() {
                ui.close();
                self.export_layout_file();
            }
            if ui.button(format!("{UPLOAD_SIMPLE} Import from file…")).clicked() {
                ui.close();
                self.import_layout_file();
            }
            ui.separator();
            if ui.button("Save to server").clicked() {
                ui.close();
                match LayoutFile::from_layout(&self.layout).and_then(|f| Ok(serde_json::to_value(f)?)) {
                    Ok(doc) => self.client.put_document(DocumentKind::Layout, doc),
                    Err(e) => self.notifications.error(format!("Layout export failed: {e}")),
                }
            }
            if ui.button("Load from server").clicked() {
                ui.close();
                self.client.fetch_document(DocumentKind::Layout, DocumentPurpose::LayoutLoad);
            }
        });
    }

    fn export_layout_file(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .set_file_name("layout.json")
            .add_filter("JSON", &["json"])
            .save_file()
        else {
            return;
        };
        match save_layout(&self.layout, &path) {
            Ok(()) => self.notifications.info(format!("Layout saved to {}", path.display())),
            Err(e) => self.notifications.error(format!("Layout save failed: {e}")),
        }
    }

    fn import_layout_file(&mut self) {
        let Some(path) = rfd::FileDialog::new().add_filter("JSON", &["json"]).pick_file() else {
            return;
        };
        match load_layout(&path) {
            Ok(layout) => {
                self.replace_layout(layout);
                self.notifications.info(format!("Layout loaded from {}", path.display()));
            }
            Err(e) => {
                tracing::warn!("layout import rejected: {e}");
                self.notifications.error(format!("Load failed: {e}"));
            }
        }
    }

    fn add_widget_menu(&mut self, ui: &mut egui::Ui) {
        ui.menu_button(format!("{PLUS} Widget"), |ui| {
            for kind in WidgetKind::ALL {
                if ui.button(kind.display_name()).clicked() {
                    ui.close();
                    self.add_widget(kind);
                }
            }
        });
    }

    pub(super) fn add_widget(&mut self, kind: WidgetKind) {
        let size = self.config.default_widget_size;
        let span = self.config.default_span;
        let mut widget = Widget::new(kind, NEW_WIDGET_POS, size);
        if let WidgetOptions::Chart(chart) = &mut widget.options {
            chart.span = span.max(1.0);
        }
        self.layout.insert_widget(widget);
    }

    fn page_tabs(&mut self, ui: &mut egui::Ui) {
        let active = self.layout.active_index();
        let mut select = None;
        for (i, page) in self.layout.pages().iter().enumerate() {
            if ui.selectable_label(i == active, &page.name).clicked() {
                select = Some(i);
            }
        }
        if let Some(i) = select {
            self.layout.set_active(i);
            self.drag.release();
            self.settings_for = None;
        }
        if ui.small_button(PLUS).on_hover_text("Add page").clicked() {
            self.layout.add_page();
        }
        if ui.small_button(MINUS).on_hover_text("Remove page").clicked() {
            if let Err(e) = self.layout.remove_active_page() {
                self.notifications.warn(e.to_string());
            }
        }
        let mut name = self.layout.active_page().name.clone();
        if ui
            .add(egui::TextEdit::singleline(&mut name).desired_width(120.0))
            .on_hover_text("Page name")
            .changed()
        {
            let index = self.layout.active_index();
            if let Err(e) = self.layout.rename_page(index, name) {
                self.notifications.error(e.to_string());
            }
        }
    }
}
