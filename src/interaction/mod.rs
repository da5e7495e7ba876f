//! Pointer interaction state machines.

pub mod do_button;
pub mod drag;

pub use do_button::{logical_active, ButtonEvent, DoButtonController, PointerFrame};
pub use drag::DragResize;
