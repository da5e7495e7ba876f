//! Pointer-driven move and resize of widgets.

use egui::{Pos2, Vec2};

use crate::layout::model::{Widget, WidgetId};

#[derive(Debug, Clone, PartialEq)]
enum Gesture {
    Idle,
    Dragging {
        target: WidgetId,
        pointer_origin: Pos2,
        widget_origin: Pos2,
    },
    Resizing {
        target: WidgetId,
        pointer_origin: Pos2,
        size_origin: Vec2,
    },
}

/// Move/resize state machine shared by all widgets of a page.
///
/// Only one gesture runs at a time. Geometry is written straight into the
/// widget; the next frame draws it at its new place.
#[derive(Debug, Clone, PartialEq)]
pub struct DragResize {
    gesture: Gesture,
    min_size: Vec2,
}

impl DragResize {
    pub fn new(min_size: Vec2) -> Self {
        Self {
            gesture: Gesture::Idle,
            min_size,
        }
    }

    pub fn min_size(&self) -> Vec2 {
        self.min_size
    }

    pub fn is_idle(&self) -> bool {
        self.gesture == Gesture::Idle
    }

    /// Widget currently being moved or resized.
    pub fn target(&self) -> Option<&str> {
        match &self.gesture {
            Gesture::Idle => None,
            Gesture::Dragging { target, .. } | Gesture::Resizing { target, .. } => Some(target),
        }
    }

    /// Pointer went down on a header background.
    pub fn begin_drag(&mut self, widget: &Widget, pointer: Pos2) {
        self.gesture = Gesture::Dragging {
            target: widget.id.clone(),
            pointer_origin: pointer,
            widget_origin: Pos2::new(widget.x, widget.y),
        };
    }

    /// Pointer went down on a resize handle.
    pub fn begin_resize(&mut self, widget: &Widget, pointer: Pos2) {
        self.gesture = Gesture::Resizing {
            target: widget.id.clone(),
            pointer_origin: pointer,
            size_origin: Vec2::new(widget.w, widget.h),
        };
    }

    /// Apply the cumulative pointer delta to the captured widget.
    /// Returns `true` if `widget` was the gesture target.
    pub fn pointer_moved(&mut self, widget: &mut Widget, pointer: Pos2) -> bool {
        match &self.gesture {
            Gesture::Dragging {
                target,
                pointer_origin,
                widget_origin,
            } if *target == widget.id => {
                let pos = *widget_origin + (pointer - *pointer_origin);
                widget.x = pos.x;
                widget.y = pos.y;
                true
            }
            Gesture::Resizing {
                target,
                pointer_origin,
                size_origin,
            } if *target == widget.id => {
                let size = *size_origin + (pointer - *pointer_origin);
                widget.w = size.x.max(self.min_size.x);
                widget.h = size.y.max(self.min_size.y);
                true
            }
            _ => false,
        }
    }

    pub fn release(&mut self) {
        self.gesture = Gesture::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::model::WidgetKind;

    fn widget() -> Widget {
        Widget::new(WidgetKind::Gauge, [40.0, 40.0], [460.0, 280.0])
    }

    #[test]
    fn drag_uses_cumulative_delta() {
        let mut w = widget();
        let mut dr = DragResize::new(Vec2::new(280.0, 180.0));
        dr.begin_drag(&w, Pos2::new(100.0, 100.0));
        dr.pointer_moved(&mut w, Pos2::new(110.0, 105.0));
        dr.pointer_moved(&mut w, Pos2::new(130.0, 90.0));
        assert_eq!((w.x, w.y), (70.0, 30.0));
        dr.release();
        assert!(!dr.pointer_moved(&mut w, Pos2::new(500.0, 500.0)));
        assert_eq!((w.x, w.y), (70.0, 30.0));
    }

    #[test]
    fn resize_respects_floor() {
        let mut w = widget();
        let mut dr = DragResize::new(Vec2::new(280.0, 180.0));
        dr.begin_resize(&w, Pos2::new(0.0, 0.0));
        dr.pointer_moved(&mut w, Pos2::new(-1000.0, 20.0));
        assert_eq!((w.w, w.h), (280.0, 300.0));
    }

    #[test]
    fn other_widgets_are_untouched() {
        let mut a = widget();
        let mut b = widget();
        let mut dr = DragResize::new(Vec2::new(10.0, 10.0));
        dr.begin_drag(&a, Pos2::ZERO);
        assert!(!dr.pointer_moved(&mut b, Pos2::new(5.0, 5.0)));
        assert!(dr.pointer_moved(&mut a, Pos2::new(5.0, 5.0)));
        assert_eq!((b.x, b.y), (40.0, 40.0));
    }
}
