//! Pages of freely positioned widgets.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::data::selector::Selector;
use crate::error::{DashError, Result};
use crate::layout::options::{
    AoSliderOptions, BarsOptions, ChartOptions, DoButtonOptions, GaugeOptions, PidPanelOptions,
};

pub type WidgetId = String;

fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetKind {
    Chart,
    Gauge,
    Bars,
    DoButton,
    PidPanel,
    AoSlider,
}

impl WidgetKind {
    pub const ALL: [WidgetKind; 6] = [
        WidgetKind::Chart,
        WidgetKind::Gauge,
        WidgetKind::Bars,
        WidgetKind::DoButton,
        WidgetKind::PidPanel,
        WidgetKind::AoSlider,
    ];

    /// Tag used in layout files.
    pub fn tag(self) -> &'static str {
        match self {
            WidgetKind::Chart => "chart",
            WidgetKind::Gauge => "gauge",
            WidgetKind::Bars => "bars",
            WidgetKind::DoButton => "dobutton",
            WidgetKind::PidPanel => "pidpanel",
            WidgetKind::AoSlider => "aoslider",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            WidgetKind::Chart => "Chart",
            WidgetKind::Gauge => "Gauge",
            WidgetKind::Bars => "Bars",
            WidgetKind::DoButton => "DO Button",
            WidgetKind::PidPanel => "PID Panel",
            WidgetKind::AoSlider => "AO Slider",
        }
    }
}

/// Type-specific options; the variant is the widget's type and never changes.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetOptions {
    Chart(ChartOptions),
    Gauge(GaugeOptions),
    Bars(BarsOptions),
    DoButton(DoButtonOptions),
    PidPanel(PidPanelOptions),
    AoSlider(AoSliderOptions),
}

impl WidgetOptions {
    pub fn defaults_for(kind: WidgetKind) -> Self {
        match kind {
            WidgetKind::Chart => WidgetOptions::Chart(ChartOptions::default()),
            WidgetKind::Gauge => WidgetOptions::Gauge(GaugeOptions::default()),
            WidgetKind::Bars => WidgetOptions::Bars(BarsOptions::default()),
            WidgetKind::DoButton => WidgetOptions::DoButton(DoButtonOptions::default()),
            WidgetKind::PidPanel => WidgetOptions::PidPanel(PidPanelOptions::default()),
            WidgetKind::AoSlider => WidgetOptions::AoSlider(AoSliderOptions::default()),
        }
    }

    pub fn kind(&self) -> WidgetKind {
        match self {
            WidgetOptions::Chart(_) => WidgetKind::Chart,
            WidgetOptions::Gauge(_) => WidgetKind::Gauge,
            WidgetOptions::Bars(_) => WidgetKind::Bars,
            WidgetOptions::DoButton(_) => WidgetKind::DoButton,
            WidgetOptions::PidPanel(_) => WidgetKind::PidPanel,
            WidgetOptions::AoSlider(_) => WidgetKind::AoSlider,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            WidgetOptions::Chart(o) => &o.title,
            WidgetOptions::Gauge(o) => &o.title,
            WidgetOptions::Bars(o) => &o.title,
            WidgetOptions::DoButton(o) => &o.title,
            WidgetOptions::PidPanel(o) => &o.title,
            WidgetOptions::AoSlider(o) => &o.title,
        }
    }

    pub fn title_mut(&mut self) -> &mut String {
        match self {
            WidgetOptions::Chart(o) => &mut o.title,
            WidgetOptions::Gauge(o) => &mut o.title,
            WidgetOptions::Bars(o) => &mut o.title,
            WidgetOptions::DoButton(o) => &mut o.title,
            WidgetOptions::PidPanel(o) => &mut o.title,
            WidgetOptions::AoSlider(o) => &mut o.title,
        }
    }

    /// Channel list for widget types that plot selectors.
    pub fn selectors(&self) -> Option<&[Selector]> {
        match self {
            WidgetOptions::Chart(o) => Some(&o.series),
            WidgetOptions::Gauge(o) => Some(&o.needles),
            WidgetOptions::Bars(o) => Some(&o.series),
            _ => None,
        }
    }

    pub fn selectors_mut(&mut self) -> Option<&mut Vec<Selector>> {
        match self {
            WidgetOptions::Chart(o) => Some(&mut o.series),
            WidgetOptions::Gauge(o) => Some(&mut o.needles),
            WidgetOptions::Bars(o) => Some(&mut o.series),
            _ => None,
        }
    }

    /// Decode the `opts` object of a layout entry with the schema of `kind`.
    pub fn from_json(kind: WidgetKind, opts: serde_json::Value) -> Result<Self> {
        let opts = if opts.is_null() {
            serde_json::Value::Object(Default::default())
        } else {
            opts
        };
        Ok(match kind {
            WidgetKind::Chart => WidgetOptions::Chart(serde_json::from_value(opts)?),
            WidgetKind::Gauge => WidgetOptions::Gauge(serde_json::from_value(opts)?),
            WidgetKind::Bars => WidgetOptions::Bars(serde_json::from_value(opts)?),
            WidgetKind::DoButton => WidgetOptions::DoButton(serde_json::from_value(opts)?),
            WidgetKind::PidPanel => WidgetOptions::PidPanel(serde_json::from_value(opts)?),
            WidgetKind::AoSlider => WidgetOptions::AoSlider(serde_json::from_value(opts)?),
        })
    }

    pub fn to_json(&self) -> Result<serde_json::Value> {
        Ok(match self {
            WidgetOptions::Chart(o) => serde_json::to_value(o)?,
            WidgetOptions::Gauge(o) => serde_json::to_value(o)?,
            WidgetOptions::Bars(o) => serde_json::to_value(o)?,
            WidgetOptions::DoButton(o) => serde_json::to_value(o)?,
            WidgetOptions::PidPanel(o) => serde_json::to_value(o)?,
            WidgetOptions::AoSlider(o) => serde_json::to_value(o)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Widget {
    pub id: WidgetId,
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub options: WidgetOptions,
}

impl Widget {
    pub fn new(kind: WidgetKind, pos: [f32; 2], size: [f32; 2]) -> Self {
        Self {
            id: new_id(),
            x: pos[0],
            y: pos[1],
            w: size[0],
            h: size[1],
            options: WidgetOptions::defaults_for(kind),
        }
    }

    pub fn kind(&self) -> WidgetKind {
        self.options.kind()
    }

    pub fn title(&self) -> &str {
        let title = self.options.title();
        if title.is_empty() {
            self.kind().tag()
        } else {
            title
        }
    }

    /// Hash of everything that requires fresh per-mount state when it changes:
    /// the widget type and, for charts, the identities of its series.
    pub fn mount_signature(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.kind().hash(&mut hasher);
        if let WidgetOptions::Chart(chart) = &self.options {
            for sel in &chart.series {
                sel.identity().hash(&mut hasher);
            }
        }
        hasher.finish()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub id: String,
    pub name: String,
    pub widgets: Vec<Widget>,
}

impl Page {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            name: name.into(),
            widgets: Vec::new(),
        }
    }

    pub fn widget(&self, id: &str) -> Option<&Widget> {
        self.widgets.iter().find(|w| w.id == id)
    }

    pub fn widget_mut(&mut self, id: &str) -> Option<&mut Widget> {
        self.widgets.iter_mut().find(|w| w.id == id)
    }
}

/// All pages plus the active-page cursor. Always holds at least one page.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pages: Vec<Page>,
    active: usize,
}

impl Default for Layout {
    fn default() -> Self {
        Self::new()
    }
}

impl Layout {
    /// Starter layout with a single empty page.
    pub fn new() -> Self {
        Self {
            pages: vec![Page::new("Page 1")],
            active: 0,
        }
    }

    /// Build from imported pages; an empty list is refused.
    pub fn from_pages(pages: Vec<Page>) -> Result<Self> {
        if pages.is_empty() {
            return Err(DashError::InvalidLayout("layout has no pages".into()));
        }
        Ok(Self { pages, active: 0 })
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active_page(&self) -> &Page {
        &self.pages[self.active]
    }

    pub fn active_page_mut(&mut self) -> &mut Page {
        &mut self.pages[self.active]
    }

    /// Activate a page; out-of-range indices are clamped.
    pub fn set_active(&mut self, index: usize) {
        self.active = index.min(self.pages.len() - 1);
    }

    /// Append a page named `Page N` and make it active.
    pub fn add_page(&mut self) -> &Page {
        let name = format!("Page {}", self.pages.len() + 1);
        self.pages.push(Page::new(name));
        self.active = self.pages.len() - 1;
        &self.pages[self.active]
    }

    /// Remove a page. The last remaining page cannot be removed.
    pub fn remove_page(&mut self, index: usize) -> Result<Page> {
        if self.pages.len() <= 1 {
            return Err(DashError::LastPage);
        }
        if index >= self.pages.len() {
            return Err(DashError::UnknownPage(index.to_string()));
        }
        let removed = self.pages.remove(index);
        if self.active >= index {
            self.active = self.active.saturating_sub(1);
        }
        self.active = self.active.min(self.pages.len() - 1);
        Ok(removed)
    }

    pub fn remove_active_page(&mut self) -> Result<Page> {
        self.remove_page(self.active)
    }

    pub fn rename_page(&mut self, index: usize, name: impl Into<String>) -> Result<()> {
        let page = self
            .pages
            .get_mut(index)
            .ok_or_else(|| DashError::UnknownPage(index.to_string()))?;
        page.name = name.into();
        Ok(())
    }

    /// Add a widget with default options to the active page; returns its id.
    pub fn add_widget(&mut self, kind: WidgetKind, pos: [f32; 2], size: [f32; 2]) -> WidgetId {
        self.insert_widget(Widget::new(kind, pos, size))
    }

    /// Append a prepared widget to the active page; returns its id.
    pub fn insert_widget(&mut self, widget: Widget) -> WidgetId {
        let id = widget.id.clone();
        self.active_page_mut().widgets.push(widget);
        id
    }

    /// Grow every widget to at least `min` and reset non-finite positions.
    ///
    /// Sizes from layout files are taken as written; this applies the floor
    /// that resize gestures enforce.
    pub fn enforce_min_size(&mut self, min: [f32; 2]) {
        for widget in self.pages.iter_mut().flat_map(|p| p.widgets.iter_mut()) {
            widget.w = widget.w.max(min[0]);
            widget.h = widget.h.max(min[1]);
            if !widget.x.is_finite() {
                widget.x = 0.0;
            }
            if !widget.y.is_finite() {
                widget.y = 0.0;
            }
        }
    }

    pub fn remove_widget(&mut self, id: &str) -> Result<Widget> {
        let page = self.active_page_mut();
        let idx = page
            .widgets
            .iter()
            .position(|w| w.id == id)
            .ok_or_else(|| DashError::UnknownWidget(id.to_string()))?;
        Ok(page.widgets.remove(idx))
    }

    pub fn widget(&self, id: &str) -> Option<&Widget> {
        self.active_page().widget(id)
    }

    pub fn widget_mut(&mut self, id: &str) -> Option<&mut Widget> {
        self.active_page_mut().widget_mut(id)
    }

    /// Edit a widget's options in place.
    pub fn update_options<F>(&mut self, id: &str, edit: F) -> Result<()>
    where
        F: FnOnce(&mut WidgetOptions),
    {
        let widget = self
            .widget_mut(id)
            .ok_or_else(|| DashError::UnknownWidget(id.to_string()))?;
        edit(&mut widget.options);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starter_layout_has_one_page() {
        let layout = Layout::new();
        assert_eq!(layout.pages().len(), 1);
        assert_eq!(layout.active_page().name, "Page 1");
    }

    #[test]
    fn removing_page_activates_previous() {
        let mut layout = Layout::new();
        layout.add_page();
        layout.add_page();
        assert_eq!(layout.active_index(), 2);
        layout.remove_active_page().unwrap();
        assert_eq!(layout.active_index(), 1);
        layout.set_active(0);
        layout.remove_active_page().unwrap();
        assert_eq!(layout.active_index(), 0);
        assert_eq!(layout.pages().len(), 1);
    }

    #[test]
    fn signature_tracks_series_identity_only() {
        let mut w = Widget::new(WidgetKind::Chart, [0.0, 0.0], [300.0, 200.0]);
        let base = w.mount_signature();
        if let WidgetOptions::Chart(o) = &mut w.options {
            o.title = "Renamed".into();
            o.span = 30.0;
        }
        assert_eq!(w.mount_signature(), base);
        if let WidgetOptions::Chart(o) = &mut w.options {
            o.series.push(Selector::new(crate::data::selector::ChannelKind::Ai, 0));
        }
        assert_ne!(w.mount_signature(), base);
    }

    #[test]
    fn options_decode_against_declared_kind() {
        let opts = serde_json::json!({ "doIndex": 3, "mode": "buzz" });
        let decoded = WidgetOptions::from_json(WidgetKind::DoButton, opts).unwrap();
        match decoded {
            WidgetOptions::DoButton(o) => {
                assert_eq!(o.do_index, 3);
                assert!(o.active_high);
            }
            other => panic!("unexpected {other:?}"),
        }
        let bad = serde_json::json!({ "series": "nope" });
        assert!(WidgetOptions::from_json(WidgetKind::Chart, bad).is_err());
    }
}
