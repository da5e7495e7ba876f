//! Half-circle gauge painter.

use egui::{Align2, FontId, Pos2, Sense, Shape, Stroke, Vec2};

use crate::layout::options::GaugeOptions;
use crate::render::palette;
use crate::render::scale;

const ARC_SEGMENTS: usize = 64;

fn polar(center: Pos2, radius: f32, angle: f64) -> Pos2 {
    // Screen y grows downwards; angle 0 points right, π/2 points up.
    center + Vec2::new(angle.cos() as f32, -(angle.sin() as f32)) * radius
}

/// Paint the gauge scale and one needle per value.
pub fn paint_gauge(ui: &mut egui::Ui, opts: &GaugeOptions, values: &[f64], labels: &[String]) {
    let legend_rows = labels.len() as f32 * 16.0;
    let size = Vec2::new(ui.available_width(), (ui.available_height() - legend_rows).max(60.0));
    let (rect, _) = ui.allocate_exact_size(size, Sense::hover());
    let painter = ui.painter_at(rect);

    let (lo, hi) = scale::instant_range(opts.scale, opts.min, opts.max, values);
    let radius = (rect.width() / 2.0).min(rect.height() - 24.0).max(10.0) - 8.0;
    let center = Pos2::new(rect.center().x, rect.bottom() - 12.0);

    let arc: Vec<Pos2> = (0..=ARC_SEGMENTS)
        .map(|i| {
            let angle = std::f64::consts::PI * (1.0 - i as f64 / ARC_SEGMENTS as f64);
            polar(center, radius, angle)
        })
        .collect();
    painter.add(Shape::line(arc, Stroke::new(3.0, palette::AXIS)));

    for (angle, value) in scale::gauge_ticks(lo, hi) {
        painter.line_segment(
            [polar(center, radius - 6.0, angle), polar(center, radius, angle)],
            Stroke::new(1.5, palette::AXIS),
        );
        painter.text(
            polar(center, radius - 18.0, angle),
            Align2::CENTER_CENTER,
            format!("{value:.1}"),
            FontId::proportional(11.0),
            palette::LABEL,
        );
    }

    for (i, &value) in values.iter().enumerate() {
        let tip = polar(center, radius - 10.0, scale::needle_angle(value, lo, hi));
        painter.line_segment([center, tip], Stroke::new(2.5, palette::series_color(i)));
    }
    painter.circle_filled(center, 4.0, palette::LABEL);

    for (i, label) in labels.iter().enumerate() {
        let value = values.get(i).copied().unwrap_or(0.0);
        ui.colored_label(palette::series_color(i), format!("{label}: {value:.3}"));
    }
}
