//! Line chart painter.

use std::collections::HashSet;

use egui::RichText;
use egui_plot::{Legend, Line, Plot, VLine};

use crate::data::buffer::SampleBuffer;
use crate::layout::options::ChartOptions;
use crate::render::loop_manager::ChartRuntime;
use crate::render::palette;
use crate::render::scale;

const READOUT_HEIGHT: f32 = 18.0;

/// Paint one chart frame from `runtime`'s buffer.
///
/// `labels` holds the effective label of every series, in series order.
pub fn paint_chart(ui: &mut egui::Ui, plot_id: &str, opts: &ChartOptions, runtime: &ChartRuntime, labels: &[String]) {
    let buffer = runtime.display_buffer();
    let labels = legend_labels(labels);
    let (y_min, y_max) = scale::chart_range(opts, buffer);
    let t_latest = buffer.latest().map(|s| s.t).unwrap_or(0.0);
    let span = opts.effective_span();

    let plot_height = if opts.readout {
        (ui.available_height() - READOUT_HEIGHT).max(40.0)
    } else {
        ui.available_height()
    };

    let plot = Plot::new(plot_id)
        .height(plot_height)
        .legend(Legend::default())
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .allow_double_click_reset(false)
        .x_axis_formatter(move |mark, _range| format!("{:.1}s", mark.value - t_latest));

    let response = plot.show(ui, |plot_ui| {
        plot_ui.set_plot_bounds_x(t_latest - span..=t_latest);
        plot_ui.set_plot_bounds_y(y_min..=y_max);

        for (index, label) in labels.iter().enumerate() {
            let points = buffer.series_points(index);
            plot_ui.line(Line::new(label.clone(), points).color(palette::series_color(index)));
        }

        let cursor = plot_ui.pointer_coordinate().map(|p| p.x);
        if let Some(t) = cursor {
            plot_ui.vline(VLine::new("", t).color(palette::AXIS));
        }
        cursor
    });

    if opts.readout {
        let text = readout_text(buffer, &labels, response.inner);
        ui.label(RichText::new(text).monospace().small());
    }
}

/// Make series labels unique: the plot legend merges lines that share a
/// name. Repeats get a ` (2)`, ` (3)`, ... suffix.
pub fn legend_labels(labels: &[String]) -> Vec<String> {
    let mut taken: HashSet<String> = HashSet::new();
    labels
        .iter()
        .map(|label| {
            let mut candidate = label.clone();
            let mut n = 1;
            while taken.contains(&candidate) {
                n += 1;
                candidate = format!("{label} ({n})");
            }
            taken.insert(candidate.clone());
            candidate
        })
        .collect()
}

/// `AI0 1.234  AI1 0.500`: values at the cursor time, or the latest sample.
pub fn readout_text(buffer: &SampleBuffer, labels: &[String], cursor: Option<f64>) -> String {
    let sample = match cursor {
        Some(t) => buffer.nearest(t),
        None => buffer.latest(),
    };
    let Some(sample) = sample else {
        return "—".into();
    };
    labels
        .iter()
        .enumerate()
        .map(|(i, label)| match sample.value(i) {
            Some(v) => format!("{label} {v:.3}"),
            None => format!("{label} —"),
        })
        .collect::<Vec<_>>()
        .join("  ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::buffer::Sample;

    #[test]
    fn readout_prefers_cursor_sample() {
        let mut buffer = SampleBuffer::new(10.0);
        buffer.append(Sample::new(1.0, vec![1.0, 2.0]));
        buffer.append(Sample::new(2.0, vec![3.0]));
        let labels = vec!["AI0".to_string(), "AI1".to_string()];
        assert_eq!(readout_text(&buffer, &labels, None), "AI0 3.000  AI1 —");
        assert_eq!(readout_text(&buffer, &labels, Some(1.1)), "AI0 1.000  AI1 2.000");
        assert_eq!(readout_text(&SampleBuffer::new(1.0), &labels, None), "—");
    }

    #[test]
    fn repeated_series_labels_stay_distinct() {
        let labels: Vec<String> = ["AI0", "AI0", "Temp", "AI0 (2)", "AI0"].iter().map(|s| s.to_string()).collect();
        assert_eq!(legend_labels(&labels), vec!["AI0", "AI0 (2)", "Temp", "AI0 (2) (2)", "AI0 (3)"]);
        let unique = vec!["AI0".to_string(), "AI1".to_string()];
        assert_eq!(legend_labels(&unique), unique);
    }
}
