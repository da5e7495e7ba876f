//! Native window entry point.

use eframe::egui;
use tokio::runtime::Handle;

use crate::config::DashboardConfig;

use super::DashboardApp;

/// Open the dashboard window and block until it is closed.
///
/// `runtime` drives the telemetry socket and the control calls; it must stay
/// alive for as long as the window is open.
pub fn run_dashboard(config: DashboardConfig, runtime: Handle) -> eframe::Result<()> {
    let title = config.title.clone();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(title.clone())
            .with_inner_size(egui::vec2(config.window_size[0], config.window_size[1])),
        ..Default::default()
    };

    eframe::run_native(
        &title,
        options,
        Box::new(move |cc| {
            // Phosphor icons are used for the widget chrome and toolbar.
            let mut fonts = egui::FontDefinitions::default();
            egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
            cc.egui_ctx.set_fonts(fonts);
            Ok(Box::new(DashboardApp::new(config, runtime, cc.egui_ctx.clone())))
        }),
    )
}
