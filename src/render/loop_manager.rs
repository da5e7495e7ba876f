//! One cancellable frame loop per mounted widget.
//!
//! eframe calls `update` once per display frame; every mounted widget owns a
//! [`FrameLoop`] that is driven from there. A loop carries the widget's
//! per-mount state (chart buffer and filter, DO button controller, ...), so
//! unmounting a widget drops everything it buffered.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::control::documents::PidLoopDraft;
use crate::data::buffer::{Sample, SampleBuffer};
use crate::data::filter::LowPassFilter;
use crate::data::snapshot::Snapshot;
use crate::interaction::do_button::DoButtonController;
use crate::layout::model::{Page, Widget, WidgetId, WidgetOptions};
use crate::layout::options::ChartOptions;

/// Cancellation token of one frame loop.
///
/// Clones share the flag; the generation tells successive loops of the same
/// widget apart.
#[derive(Debug, Clone)]
pub struct LoopHandle {
    cancelled: Arc<AtomicBool>,
    generation: u64,
}

impl LoopHandle {
    fn new(generation: u64) -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
            generation,
        }
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Buffered history of a chart widget.
#[derive(Debug, Clone, Default)]
pub struct ChartRuntime {
    pub buffer: SampleBuffer,
    pub filter: LowPassFilter,
    /// Copy of `buffer` taken when the chart was paused.
    frozen: Option<SampleBuffer>,
}

impl ChartRuntime {
    pub fn new(span: f64) -> Self {
        Self {
            buffer: SampleBuffer::new(span),
            filter: LowPassFilter::new(),
            frozen: None,
        }
    }

    /// Filter one tick of raw series values and buffer the result.
    pub fn ingest(&mut self, opts: &ChartOptions, raw: &[f64], t: f64) -> bool {
        let values = self.filter.apply(raw, t, opts.filter_hz);
        self.buffer.set_span(opts.effective_span());
        self.buffer.append(Sample::new(t, values))
    }

    /// Bring the frozen copy in line with the `paused` option.
    pub fn sync_pause(&mut self, paused: bool) {
        match (paused, self.frozen.is_some()) {
            (true, false) => self.frozen = Some(self.buffer.clone()),
            (false, true) => self.frozen = None,
            _ => {}
        }
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen.is_some()
    }

    /// Buffer to draw: the frozen copy while paused, else the live one.
    pub fn display_buffer(&self) -> &SampleBuffer {
        self.frozen.as_ref().unwrap_or(&self.buffer)
    }
}

/// Editor state of a PID panel.
#[derive(Debug, Clone, Default)]
pub struct PidPanelRuntime {
    pub draft: Option<PidLoopDraft>,
    /// Loop index the draft was loaded for.
    pub loaded_for: Option<usize>,
    pub loading: bool,
}

#[derive(Debug, Clone, Default)]
pub struct AoSliderRuntime {
    pub value: f64,
}

/// Per-mount state, one variant per widget type.
#[derive(Debug, Clone)]
pub enum WidgetRuntime {
    Chart(ChartRuntime),
    Gauge,
    Bars,
    DoButton(DoButtonController),
    PidPanel(PidPanelRuntime),
    AoSlider(AoSliderRuntime),
}

impl WidgetRuntime {
    fn for_widget(widget: &Widget, snapshot: &Snapshot) -> Self {
        match &widget.options {
            WidgetOptions::Chart(opts) => WidgetRuntime::Chart(ChartRuntime::new(opts.effective_span())),
            WidgetOptions::Gauge(_) => WidgetRuntime::Gauge,
            WidgetOptions::Bars(_) => WidgetRuntime::Bars,
            WidgetOptions::DoButton(_) => WidgetRuntime::DoButton(DoButtonController::new()),
            WidgetOptions::PidPanel(_) => WidgetRuntime::PidPanel(PidPanelRuntime::default()),
            WidgetOptions::AoSlider(opts) => WidgetRuntime::AoSlider(AoSliderRuntime {
                value: snapshot.ao.get(opts.ao_index).copied().unwrap_or(opts.min),
            }),
        }
    }
}

/// A mounted widget's loop.
#[derive(Debug)]
pub struct FrameLoop {
    handle: LoopHandle,
    signature: u64,
    frames: u64,
    pub runtime: WidgetRuntime,
}

impl FrameLoop {
    pub fn handle(&self) -> &LoopHandle {
        &self.handle
    }

    /// Frames painted since mount.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn chart_mut(&mut self) -> Option<&mut ChartRuntime> {
        match &mut self.runtime {
            WidgetRuntime::Chart(c) => Some(c),
            _ => None,
        }
    }
}

/// Registry of live frame loops, keyed by widget id.
#[derive(Debug, Default)]
pub struct RenderLoopManager {
    loops: HashMap<WidgetId, FrameLoop>,
    next_generation: u64,
}

impl RenderLoopManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a loop for `widget`, cancelling the one it replaces first.
    pub fn mount(&mut self, widget: &Widget, snapshot: &Snapshot) -> LoopHandle {
        self.unmount(&widget.id);
        self.next_generation += 1;
        let handle = LoopHandle::new(self.next_generation);
        tracing::debug!(widget = %widget.id, generation = handle.generation, "mounting {}", widget.kind().tag());
        self.loops.insert(
            widget.id.clone(),
            FrameLoop {
                handle: handle.clone(),
                signature: widget.mount_signature(),
                frames: 0,
                runtime: WidgetRuntime::for_widget(widget, snapshot),
            },
        );
        handle
    }

    /// Cancel and drop a widget's loop. Returns whether one was running.
    pub fn unmount(&mut self, id: &str) -> bool {
        match self.loops.remove(id) {
            Some(frame_loop) => {
                frame_loop.handle.cancel();
                true
            }
            None => false,
        }
    }

    pub fn unmount_all(&mut self) {
        for (_, frame_loop) in self.loops.drain() {
            frame_loop.handle.cancel();
        }
    }

    /// Make the set of loops match the widgets of `page`: new widgets are
    /// mounted, removed ones unmounted and widgets whose mount signature
    /// changed are remounted. Loops of unchanged widgets keep running.
    pub fn sync_page(&mut self, page: &Page, snapshot: &Snapshot) {
        let stale: Vec<WidgetId> = self
            .loops
            .keys()
            .filter(|id| page.widget(id).is_none())
            .cloned()
            .collect();
        for id in stale {
            self.unmount(&id);
        }
        for widget in &page.widgets {
            let current = self.loops.get(&widget.id).map(|l| l.signature);
            if current != Some(widget.mount_signature()) {
                self.mount(widget, snapshot);
            }
        }
    }

    /// Advance a widget's loop by one frame and hand out its state for painting.
    pub fn frame(&mut self, id: &str) -> Option<&mut FrameLoop> {
        let frame_loop = self.loops.get_mut(id)?;
        if frame_loop.handle.is_cancelled() {
            return None;
        }
        frame_loop.frames += 1;
        Some(frame_loop)
    }

    pub fn get(&self, id: &str) -> Option<&FrameLoop> {
        self.loops.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut FrameLoop> {
        self.loops.get_mut(id)
    }

    pub fn handle(&self, id: &str) -> Option<LoopHandle> {
        self.loops.get(id).map(|l| l.handle.clone())
    }

    pub fn is_mounted(&self, id: &str) -> bool {
        self.loops.contains_key(id)
    }

    /// Number of live loops.
    pub fn len(&self) -> usize {
        self.loops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loops.is_empty()
    }
}
