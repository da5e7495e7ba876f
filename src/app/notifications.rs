//! Non-blocking message log shown at the bottom of the window.

use std::collections::VecDeque;

use chrono::{DateTime, Local};
use eframe::egui;

const CAPACITY: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Warn,
    Error,
}

#[derive(Debug, Clone)]
pub struct Notice {
    pub at: DateTime<Local>,
    pub level: Level,
    pub text: String,
}

#[derive(Debug, Default)]
pub struct Notifications {
    entries: VecDeque<Notice>,
    expanded: bool,
}

impl Notifications {
    pub fn push(&mut self, level: Level, text: impl Into<String>) {
        if self.entries.len() == CAPACITY {
            self.entries.pop_front();
        }
        self.entries.push_back(Notice {
            at: Local::now(),
            level,
            text: text.into(),
        });
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.push(Level::Info, text);
    }

    pub fn warn(&mut self, text: impl Into<String>) {
        self.push(Level::Warn, text);
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.push(Level::Error, text);
    }

    pub fn latest(&self) -> Option<&Notice> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub(super) fn show(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("notifications").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let arrow = if self.expanded {
                    egui_phosphor::regular::CARET_DOWN
                } else {
                    egui_phosphor::regular::CARET_UP
                };
                if ui.small_button(arrow).clicked() {
                    self.expanded = !self.expanded;
                }
                match self.latest() {
                    Some(n) => notice_row(ui, n),
                    None => {
                        ui.weak("No messages");
                    }
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.small_button("Clear").clicked() {
                        self.clear();
                    }
                });
            });
            if self.expanded {
                egui::ScrollArea::vertical()
                    .max_height(160.0)
                    .stick_to_bottom(true)
                    .show(ui, |ui| {
                        for n in &self.entries {
                            ui.horizontal(|ui| notice_row(ui, n));
                        }
                    });
            }
        });
    }
}

fn notice_row(ui: &mut egui::Ui, notice: &Notice) {
    let color = match notice.level {
        Level::Info => ui.visuals().text_color(),
        Level::Warn => ui.visuals().warn_fg_color,
        Level::Error => ui.visuals().error_fg_color,
    };
    ui.monospace(notice.at.format("%H:%M:%S").to_string());
    ui.colored_label(color, &notice.text);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oldest_entries_drop_at_capacity() {
        let mut log = Notifications::default();
        for i in 0..CAPACITY + 5 {
            log.info(format!("msg {i}"));
        }
        assert_eq!(log.len(), CAPACITY);
        assert_eq!(log.latest().map(|n| n.text.as_str()), Some("msg 204"));
        log.error("boom");
        assert_eq!(log.latest().map(|n| n.level), Some(Level::Error));
    }
}
