//! Layout export/import.
//!
//! Serializable mirror types keep the on-disk shape
//! `{pages:[{id,name,widgets:[{id,type,x,y,w,h,opts}]}]}` separate from the
//! in-memory model, whose options are a typed enum.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{DashError, Result};
use crate::layout::model::{Layout, Page, Widget, WidgetKind, WidgetOptions};

fn fresh_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

fn default_w() -> f32 {
    300.0
}

fn default_h() -> f32 {
    200.0
}

/// Serializable version of a widget.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WidgetSerde {
    #[serde(default = "fresh_id")]
    pub id: String,
    #[serde(rename = "type")]
    pub kind: WidgetKind,
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
    #[serde(default = "default_w")]
    pub w: f32,
    #[serde(default = "default_h")]
    pub h: f32,
    #[serde(default)]
    pub opts: serde_json::Value,
}

impl WidgetSerde {
    fn from_widget(w: &Widget) -> Result<Self> {
        Ok(Self {
            id: w.id.clone(),
            kind: w.kind(),
            x: w.x,
            y: w.y,
            w: w.w,
            h: w.h,
            opts: w.options.to_json()?,
        })
    }

    fn into_widget(self) -> Result<Widget> {
        let options = WidgetOptions::from_json(self.kind, self.opts).map_err(|e| {
            DashError::InvalidLayout(format!("widget {}: bad {} options: {e}", self.id, self.kind.tag()))
        })?;
        Ok(Widget {
            id: self.id,
            x: self.x,
            y: self.y,
            w: self.w,
            h: self.h,
            options,
        })
    }
}

/// Serializable version of a page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageSerde {
    #[serde(default = "fresh_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub widgets: Vec<WidgetSerde>,
}

/// Top-level layout document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutFile {
    pub pages: Vec<PageSerde>,
}

impl LayoutFile {
    pub fn from_layout(layout: &Layout) -> Result<Self> {
        let pages = layout
            .pages()
            .iter()
            .map(|p| {
                Ok(PageSerde {
                    id: p.id.clone(),
                    name: p.name.clone(),
                    widgets: p.widgets.iter().map(WidgetSerde::from_widget).collect::<Result<_>>()?,
                })
            })
            .collect::<Result<_>>()?;
        Ok(Self { pages })
    }

    /// Widget ids must be unique across the layout: frame loops, drag state
    /// and settings windows are all keyed by id.
    pub fn into_layout(self) -> Result<Layout> {
        let mut seen = HashSet::new();
        for widget in self.pages.iter().flat_map(|p| &p.widgets) {
            if !seen.insert(widget.id.as_str()) {
                return Err(DashError::InvalidLayout(format!("duplicate widget id {}", widget.id)));
            }
        }
        let pages = self
            .pages
            .into_iter()
            .map(|p| {
                Ok(Page {
                    id: p.id,
                    name: p.name,
                    widgets: p
                        .widgets
                        .into_iter()
                        .map(WidgetSerde::into_widget)
                        .collect::<Result<_>>()?,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Layout::from_pages(pages)
    }
}

/// Pretty JSON of the whole layout.
pub fn export_layout(layout: &Layout) -> Result<String> {
    Ok(serde_json::to_string_pretty(&LayoutFile::from_layout(layout)?)?)
}

/// Validate and decode a layout document.
///
/// Nothing is mutated here; callers swap the returned layout in only on `Ok`.
pub fn import_layout(text: &str) -> Result<Layout> {
    let value: serde_json::Value =
        serde_json::from_str(text).map_err(|e| DashError::InvalidLayout(format!("not JSON: {e}")))?;
    import_layout_value(value)
}

pub fn import_layout_value(value: serde_json::Value) -> Result<Layout> {
    match value.get("pages") {
        Some(serde_json::Value::Array(_)) => {}
        Some(_) => return Err(DashError::InvalidLayout("`pages` is not a list".into())),
        None => return Err(DashError::InvalidLayout("missing `pages`".into())),
    }
    let file: LayoutFile =
        serde_json::from_value(value).map_err(|e| DashError::InvalidLayout(e.to_string()))?;
    file.into_layout()
}

pub fn save_layout(layout: &Layout, path: &Path) -> Result<()> {
    std::fs::write(path, export_layout(layout)?)?;
    Ok(())
}

pub fn load_layout(path: &Path) -> Result<Layout> {
    let text = std::fs::read_to_string(path)?;
    import_layout(&text)
}
