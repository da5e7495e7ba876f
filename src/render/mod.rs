//! Per-widget frame loops and the painters they drive.

pub mod bars;
pub mod chart;
pub mod gauge;
pub mod loop_manager;
pub mod palette;
pub mod scale;

pub use loop_manager::{ChartRuntime, FrameLoop, LoopHandle, RenderLoopManager, WidgetRuntime};
