//! Page/widget model and its file format.

pub mod model;
pub mod options;
pub mod persistence;

pub use model::{Layout, Page, Widget, WidgetId, WidgetKind, WidgetOptions};
pub use options::{
    AoSliderOptions, BarsOptions, ChartOptions, DoButtonOptions, DoMode, GaugeOptions, PidPanelOptions,
    ScaleMode,
};
