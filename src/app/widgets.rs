//! Widget chrome, move/resize and the per-type widget bodies.

use eframe::egui;
use egui::{Align, CornerRadius, CursorIcon, Layout, Rect, Response, RichText, Sense, Stroke, StrokeKind, UiBuilder, Vec2};
use egui_phosphor::regular::{GEAR, X};
use serde_json::Value;

use crate::control::client::{ControlSink, DocumentPurpose};
use crate::control::documents::DocumentKind;
use crate::control::request::ControlRequest;
use crate::data::selector::Selector;
use crate::data::snapshot::resolve_all;
use crate::interaction::do_button::{logical_active, PointerFrame};
use crate::layout::model::{Widget, WidgetId, WidgetOptions};
use crate::render::loop_manager::WidgetRuntime;
use crate::render::{bars, chart, gauge, palette, scale};

use super::editors::pid_loop_form;
use super::DashboardApp;

const HEADER_HEIGHT: f32 = 28.0;
const HANDLE_SIZE: f32 = 14.0;

enum ChromeAction {
    Settings(WidgetId),
    Remove(WidgetId),
}

fn labels(selectors: &[Selector], device_config: Option<&Value>) -> Vec<String> {
    selectors.iter().map(|s| s.label(device_config)).collect()
}

fn fmt_reading(value: Option<f64>) -> String {
    value.map_or_else(|| "—".to_string(), |v| format!("{v:.3}"))
}

/// This frame's pointer activity on a DO button.
fn pointer_frame(response: &Response) -> PointerFrame {
    let (went_down, went_up) = response
        .ctx
        .input(|i| (i.pointer.primary_pressed(), i.pointer.primary_released()));
    PointerFrame {
        clicked: response.clicked(),
        went_down,
        went_up,
        hovered: response.contains_pointer(),
    }
}

impl DashboardApp {
    pub(super) fn show_page(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let origin = ui.max_rect().min;
            let widgets = self.layout.active_page().widgets.clone();
            let mut actions = Vec::new();
            for widget in &widgets {
                self.show_widget(ui, origin, widget, &mut actions);
            }
            self.apply_gesture(ui.ctx());

            for action in actions {
                match action {
                    ChromeAction::Settings(id) => self.settings_for = Some(id),
                    ChromeAction::Remove(id) => {
                        if let Err(e) = self.layout.remove_widget(&id) {
                            self.notifications.error(e.to_string());
                        }
                        self.loops.unmount(&id);
                        if self.settings_for.as_deref() == Some(id.as_str()) {
                            self.settings_for = None;
                        }
                    }
                }
            }
        });
    }

    fn apply_gesture(&mut self, ctx: &egui::Context) {
        let Some(target) = self.drag.target().map(str::to_string) else {
            return;
        };
        let (pointer, down) = ctx.input(|i| (i.pointer.latest_pos(), i.pointer.primary_down()));
        if let (Some(pointer), Some(widget)) = (pointer, self.layout.widget_mut(&target)) {
            self.drag.pointer_moved(widget, pointer);
        }
        if !down {
            self.drag.release();
        }
    }

    fn show_widget(&mut self, ui: &mut egui::Ui, origin: egui::Pos2, widget: &Widget, actions: &mut Vec<ChromeAction>) {
        let rect = Rect::from_min_size(origin + Vec2::new(widget.x, widget.y), Vec2::new(widget.w, widget.h));
        let visuals = ui.visuals().clone();
        ui.painter().rect_filled(rect, CornerRadius::same(6), visuals.extreme_bg_color);
        ui.painter()
            .rect_stroke(rect, CornerRadius::same(6), visuals.widgets.noninteractive.bg_stroke, StrokeKind::Inside);

        // Header background is the drag area; the buttons added after it take precedence.
        let header = Rect::from_min_size(rect.min, Vec2::new(rect.width(), HEADER_HEIGHT));
        let header_resp = ui
            .interact(header, ui.id().with(("header", &widget.id)), Sense::drag())
            .on_hover_cursor(CursorIcon::Grab);
        if header_resp.drag_started() {
            if let Some(pointer) = header_resp.interact_pointer_pos() {
                self.drag.begin_drag(widget, pointer);
            }
        }
        ui.scope_builder(
            UiBuilder::new()
                .max_rect(header.shrink2(Vec2::new(8.0, 2.0)))
                .layout(Layout::left_to_right(Align::Center)),
            |ui| {
                ui.add(egui::Label::new(RichText::new(widget.title()).strong()).selectable(false));
                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    if ui.small_button(X).on_hover_text("Remove widget").clicked() {
                        actions.push(ChromeAction::Remove(widget.id.clone()));
                    }
                    if ui.small_button(GEAR).on_hover_text("Settings").clicked() {
                        actions.push(ChromeAction::Settings(widget.id.clone()));
                    }
                });
            },
        );

        let body = Rect::from_min_max(header.left_bottom(), rect.max).shrink(6.0);
        ui.scope_builder(UiBuilder::new().max_rect(body).id_salt(("body", &widget.id)), |ui| {
            ui.set_clip_rect(body.intersect(ui.clip_rect()));
            self.widget_body(ui, widget);
        });

        let handle = Rect::from_min_size(rect.max - Vec2::splat(HANDLE_SIZE), Vec2::splat(HANDLE_SIZE));
        let handle_resp = ui
            .interact(handle, ui.id().with(("resize", &widget.id)), Sense::drag())
            .on_hover_cursor(CursorIcon::ResizeNwSe);
        let stroke = Stroke::new(1.0, visuals.widgets.inactive.fg_stroke.color);
        for inset in [3.0, 7.0] {
            ui.painter().line_segment(
                [handle.right_top() + Vec2::new(-2.0, inset), handle.left_bottom() + Vec2::new(inset, -2.0)],
                stroke,
            );
        }
        if handle_resp.drag_started() {
            if let Some(pointer) = handle_resp.interact_pointer_pos() {
                self.drag.begin_resize(widget, pointer);
            }
        }
    }

    fn widget_body(&mut self, ui: &mut egui::Ui, widget: &Widget) {
        let snapshot = self.ingest.snapshot_cell().load();
        let connected = self.is_connected();
        let hardware_ready = self.hardware_ready();
        let Some(frame) = self.loops.frame(&widget.id) else {
            ui.weak("…");
            return;
        };
        match (&widget.options, &mut frame.runtime) {
            (WidgetOptions::Chart(opts), WidgetRuntime::Chart(runtime)) => {
                runtime.sync_pause(opts.paused);
                let labels = labels(&opts.series, self.device_config.as_ref());
                chart::paint_chart(ui, &format!("chart_{}", widget.id), opts, runtime, &labels);
            }
            (WidgetOptions::Gauge(opts), WidgetRuntime::Gauge) => {
                let values = resolve_all(&opts.needles, &snapshot);
                let labels = labels(&opts.needles, self.device_config.as_ref());
                gauge::paint_gauge(ui, opts, &values, &labels);
            }
            (WidgetOptions::Bars(opts), WidgetRuntime::Bars) => {
                let values = resolve_all(&opts.series, &snapshot);
                let labels = labels(&opts.series, self.device_config.as_ref());
                bars::paint_bars(ui, opts, &values, &labels);
            }
            (WidgetOptions::DoButton(opts), WidgetRuntime::DoButton(button)) => {
                let raw = snapshot.do_bit(opts.do_index);
                let active = logical_active(raw, opts.active_high);
                let fill = if !(connected && hardware_ready) {
                    ui.visuals().widgets.inactive.bg_fill
                } else if active {
                    palette::ACTIVE
                } else {
                    palette::INACTIVE
                };
                let size = Vec2::new(ui.available_width(), (ui.available_height() - 22.0).max(28.0));
                let response = ui.add_sized(
                    size,
                    egui::Button::new(RichText::new(widget.title()).size(18.0))
                        .fill(fill)
                        .sense(Sense::click_and_drag()),
                );
                for event in pointer_frame(&response).events(button.is_pressed()) {
                    if let Some(request) = button.handle(event, opts, raw, connected) {
                        self.client.send(request, Some(widget.id.clone()));
                    }
                }
                ui.horizontal(|ui| {
                    ui.weak(format!("DO{} · {}", opts.do_index, opts.mode.as_str()));
                    if button.is_buzzing() {
                        ui.colored_label(palette::ACTIVE, format!("buzzing {:.1} Hz", opts.buzz_hz));
                    }
                });
            }
            (WidgetOptions::PidPanel(opts), WidgetRuntime::PidPanel(panel)) => {
                let telemetry = snapshot.pid_loop(opts.loop_index).unwrap_or_default();
                ui.horizontal(|ui| {
                    ui.label(format!("Loop {}", opts.loop_index));
                    ui.monospace(format!("pv {}", fmt_reading(telemetry.pv)));
                    ui.monospace(format!("err {}", fmt_reading(telemetry.err)));
                    ui.monospace(format!("out {}", fmt_reading(telemetry.out)));
                });
                if !opts.show_controls {
                    return;
                }
                ui.separator();
                if panel.loaded_for != Some(opts.loop_index) && !panel.loading {
                    panel.loading = true;
                    self.client
                        .fetch_document(DocumentKind::Pid, DocumentPurpose::PidPanel(widget.id.clone()));
                }
                let loaded = panel.loaded_for == Some(opts.loop_index);
                match panel.draft.as_mut().filter(|_| loaded) {
                    Some(draft) => {
                        let height = (ui.available_height() - 28.0).max(40.0);
                        egui::ScrollArea::vertical().max_height(height).show(ui, |ui| {
                            pid_loop_form(ui, draft, ("pid_panel", widget.id.as_str()));
                        });
                        if ui.button("Apply").clicked() {
                            self.client.save_pid_loop(widget.id.clone(), opts.loop_index, draft.clone());
                        }
                    }
                    None => {
                        ui.spinner();
                    }
                }
            }
            (WidgetOptions::AoSlider(opts), WidgetRuntime::AoSlider(ao)) => {
                let (lo, hi) = scale::usable_range(opts.min, opts.max);
                let index = opts.ao_index;
                let client = &mut self.client;
                ui.add_enabled_ui(connected, |ui| {
                    ui.label(format!("AO{index}"));
                    let slider = ui.add(
                        egui::Slider::new(&mut ao.value, lo..=hi)
                            .step_by(opts.step.max(0.0))
                            .show_value(false),
                    );
                    if slider.changed() && opts.live {
                        client.send(ControlRequest::SetAnalog { index, volts: ao.value }, Some(widget.id.clone()));
                    }
                    ui.horizontal(|ui| {
                        let entry = ui.add(
                            egui::DragValue::new(&mut ao.value)
                                .range(lo..=hi)
                                .speed(opts.step.max(0.0001))
                                .suffix(" V"),
                        );
                        let commit = entry.lost_focus() || entry.drag_stopped() || ui.button("Set").clicked();
                        if commit {
                            client.send(ControlRequest::SetAnalog { index, volts: ao.value }, Some(widget.id.clone()));
                        }
                    });
                });
            }
            _ => {
                ui.weak("…");
            }
        }
    }
}
