//! Per-widget settings window.
//!
//! Options are edited in place on the layout model. The loop manager notices
//! on the next frame when a chart's series identities changed and remounts it;
//! every other edit is simply picked up by the running loop.

use eframe::egui;
use egui_phosphor::regular::MINUS;

use crate::data::selector::{ChannelKind, Selector};
use crate::layout::model::WidgetOptions;
use crate::layout::options::{DoMode, ScaleMode};

use super::DashboardApp;

fn selector_list(ui: &mut egui::Ui, heading: &str, selectors: &mut Vec<Selector>, device_config: Option<&serde_json::Value>) {
    ui.strong(heading);
    let mut remove = None;
    for (i, sel) in selectors.iter_mut().enumerate() {
        ui.horizontal(|ui| {
            egui::ComboBox::from_id_salt(("selector_kind", i))
                .width(60.0)
                .selected_text(sel.kind.to_string())
                .show_ui(ui, |ui| {
                    for kind in ChannelKind::ALL {
                        ui.selectable_value(&mut sel.kind, kind, kind.to_string());
                    }
                });
            ui.add(egui::DragValue::new(&mut sel.index).range(0..=63));
            let mut name = sel.name.clone().unwrap_or_default();
            let hint = sel.label(device_config);
            if ui
                .add(egui::TextEdit::singleline(&mut name).hint_text(hint).desired_width(120.0))
                .changed()
            {
                sel.name = (!name.is_empty()).then_some(name);
            }
            if ui.small_button(MINUS).on_hover_text("Remove").clicked() {
                remove = Some(i);
            }
        });
    }
    if let Some(i) = remove {
        selectors.remove(i);
    }
    if ui.button("+ Add").clicked() {
        selectors.push(Selector::new(ChannelKind::Ai, 0));
    }
}

fn scale_controls(ui: &mut egui::Ui, scale: &mut ScaleMode, min: &mut f64, max: &mut f64) {
    ui.horizontal(|ui| {
        ui.label("Scale");
        ui.selectable_value(scale, ScaleMode::Auto, "auto");
        ui.selectable_value(scale, ScaleMode::Manual, "manual");
    });
    ui.add_enabled_ui(*scale == ScaleMode::Manual, |ui| {
        ui.horizontal(|ui| {
            ui.label("Min");
            ui.add(egui::DragValue::new(min).speed(0.1));
            ui.label("Max");
            ui.add(egui::DragValue::new(max).speed(0.1));
        });
    });
}

fn options_form(ui: &mut egui::Ui, options: &mut WidgetOptions, device_config: Option<&serde_json::Value>) {
    ui.horizontal(|ui| {
        ui.label("Title");
        ui.text_edit_singleline(options.title_mut());
    });
    ui.separator();
    match options {
        WidgetOptions::Chart(o) => {
            selector_list(ui, "Series", &mut o.series, device_config);
            ui.separator();
            scale_controls(ui, &mut o.scale, &mut o.min, &mut o.max);
            ui.horizontal(|ui| {
                ui.label("Span (s)");
                ui.add(egui::DragValue::new(&mut o.span).range(1.0..=3600.0).speed(0.5));
                ui.label("Filter (Hz)");
                ui.add(egui::DragValue::new(&mut o.filter_hz).range(0.0..=1000.0).speed(0.1))
                    .on_hover_text("0 disables filtering");
            });
            ui.checkbox(&mut o.paused, "Paused");
            ui.checkbox(&mut o.readout, "Value readout");
        }
        WidgetOptions::Gauge(o) => {
            selector_list(ui, "Needles", &mut o.needles, device_config);
            ui.separator();
            scale_controls(ui, &mut o.scale, &mut o.min, &mut o.max);
        }
        WidgetOptions::Bars(o) => {
            selector_list(ui, "Series", &mut o.series, device_config);
            ui.separator();
            scale_controls(ui, &mut o.scale, &mut o.min, &mut o.max);
        }
        WidgetOptions::DoButton(o) => {
            egui::Grid::new("do_settings").num_columns(2).show(ui, |ui| {
                ui.label("DO index");
                ui.add(egui::DragValue::new(&mut o.do_index).range(0..=63));
                ui.end_row();
                ui.label("Active high");
                ui.checkbox(&mut o.active_high, "");
                ui.end_row();
                ui.label("Mode");
                ui.horizontal(|ui| {
                    for mode in DoMode::ALL {
                        ui.selectable_value(&mut o.mode, mode, mode.as_str());
                    }
                });
                ui.end_row();
                ui.label("Buzz Hz");
                ui.add(egui::DragValue::new(&mut o.buzz_hz).range(0.1..=100.0).speed(0.1));
                ui.end_row();
            });
        }
        WidgetOptions::PidPanel(o) => {
            ui.horizontal(|ui| {
                ui.label("Loop index");
                ui.add(egui::DragValue::new(&mut o.loop_index).range(0..=15));
            });
            ui.checkbox(&mut o.show_controls, "Show controls");
        }
        WidgetOptions::AoSlider(o) => {
            egui::Grid::new("ao_settings").num_columns(2).show(ui, |ui| {
                ui.label("AO index");
                ui.add(egui::DragValue::new(&mut o.ao_index).range(0..=15));
                ui.end_row();
                ui.label("Min (V)");
                ui.add(egui::DragValue::new(&mut o.min).speed(0.01));
                ui.end_row();
                ui.label("Max (V)");
                ui.add(egui::DragValue::new(&mut o.max).speed(0.01));
                ui.end_row();
                ui.label("Step (V)");
                ui.add(egui::DragValue::new(&mut o.step).range(0.0..=10.0).speed(0.0005));
                ui.end_row();
                ui.label("Live");
                ui.checkbox(&mut o.live, "send while dragging");
                ui.end_row();
            });
        }
    }
}

impl DashboardApp {
    pub(super) fn show_settings(&mut self, ctx: &egui::Context) {
        let Some(id) = self.settings_for.clone() else {
            return;
        };
        let device_config = self.device_config.clone();
        let Some(widget) = self.layout.widget_mut(&id) else {
            self.settings_for = None;
            return;
        };
        let mut open = true;
        egui::Window::new(format!("{} settings", widget.title()))
            .id(egui::Id::new(("widget_settings", &id)))
            .open(&mut open)
            .resizable(true)
            .default_width(380.0)
            .show(ctx, |ui| {
                options_form(ui, &mut widget.options, device_config.as_ref());
            });
        if !open {
            self.settings_for = None;
        }
    }
}
