//! Bar meter painter.

use egui::{Align2, CornerRadius, FontId, Pos2, Rect, Sense, Stroke, StrokeKind, Vec2};

use crate::layout::options::BarsOptions;
use crate::render::palette;
use crate::render::scale;

const LABEL_HEIGHT: f32 = 16.0;

/// Paint one vertical bar per value.
pub fn paint_bars(ui: &mut egui::Ui, opts: &BarsOptions, values: &[f64], labels: &[String]) {
    let size = Vec2::new(ui.available_width(), ui.available_height().max(40.0));
    let (rect, _) = ui.allocate_exact_size(size, Sense::hover());
    let painter = ui.painter_at(rect);

    let (lo, hi) = scale::instant_range(opts.scale, opts.min, opts.max, values);
    let plot_area = Rect::from_min_max(
        rect.min + Vec2::new(0.0, LABEL_HEIGHT),
        rect.max - Vec2::new(0.0, LABEL_HEIGHT),
    );
    painter.rect_stroke(plot_area, CornerRadius::same(2), Stroke::new(1.0, palette::AXIS), StrokeKind::Inside);
    painter.text(plot_area.left_top(), Align2::LEFT_BOTTOM, format!("{hi:.2}"), FontId::proportional(10.0), palette::LABEL);
    painter.text(plot_area.left_bottom(), Align2::LEFT_TOP, format!("{lo:.2}"), FontId::proportional(10.0), palette::LABEL);

    if values.is_empty() {
        return;
    }
    let slot = plot_area.width() / values.len() as f32;
    let bar_width = (slot * 0.6).max(2.0);
    for (i, &value) in values.iter().enumerate() {
        let x = plot_area.left() + slot * (i as f32 + 0.5);
        let height = scale::bar_height(value, lo, hi, plot_area.height());
        let bar = Rect::from_min_max(
            Pos2::new(x - bar_width / 2.0, plot_area.bottom() - height),
            Pos2::new(x + bar_width / 2.0, plot_area.bottom()),
        );
        painter.rect_filled(bar, CornerRadius::same(2), palette::series_color(i));
        painter.text(
            Pos2::new(x, bar.top() - 2.0),
            Align2::CENTER_BOTTOM,
            format!("{value:.2}"),
            FontId::proportional(10.0),
            palette::LABEL,
        );
        let label = labels.get(i).map(String::as_str).unwrap_or_default();
        painter.text(
            Pos2::new(x, rect.bottom()),
            Align2::CENTER_BOTTOM,
            label,
            FontId::proportional(11.0),
            palette::LABEL,
        );
    }
}
