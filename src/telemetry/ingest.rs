//! Applies received frames to the snapshot and the mounted charts.

use crate::data::snapshot::{resolve_all, Snapshot, SnapshotCell};
use crate::layout::model::{Page, WidgetOptions};
use crate::render::loop_manager::RenderLoopManager;
use crate::telemetry::message::{TelemetryMessage, TimedMessage};

/// Sole writer of the telemetry snapshot.
#[derive(Debug, Default)]
pub struct TelemetryIngest {
    snapshot: SnapshotCell,
    session_dir: Option<String>,
    last_tick_at: Option<f64>,
    ticks: u64,
}

impl TelemetryIngest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> &Snapshot {
        self.snapshot.get()
    }

    pub fn snapshot_cell(&self) -> &SnapshotCell {
        &self.snapshot
    }

    pub fn session_dir(&self) -> Option<&str> {
        self.session_dir.as_deref()
    }

    /// Receipt time of the most recent tick.
    pub fn last_tick_at(&self) -> Option<f64> {
        self.last_tick_at
    }

    pub fn tick_count(&self) -> u64 {
        self.ticks
    }

    /// Apply one frame. Ticks replace the snapshot and append one sample to
    /// every chart mounted from `page`; charts on other pages are not mounted
    /// and so buffer nothing.
    pub fn apply(&mut self, timed: &TimedMessage, page: &Page, loops: &mut RenderLoopManager) {
        match &timed.message {
            TelemetryMessage::Session { dir } => {
                tracing::info!("logging session {dir}");
                self.session_dir = Some(dir.clone());
            }
            TelemetryMessage::Tick(tick) => {
                let next = self.snapshot.get().merged(tick);
                self.snapshot.replace(next);
                self.last_tick_at = Some(timed.received_at);
                self.ticks += 1;
                let snapshot = self.snapshot.load();
                for widget in &page.widgets {
                    let WidgetOptions::Chart(opts) = &widget.options else {
                        continue;
                    };
                    let Some(chart) = loops.get_mut(&widget.id).and_then(|l| l.chart_mut()) else {
                        continue;
                    };
                    let raw = resolve_all(&opts.series, &snapshot);
                    chart.ingest(opts, &raw, timed.received_at);
                }
            }
        }
    }
}
