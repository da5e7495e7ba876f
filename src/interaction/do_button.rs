//! Press/release state machine for digital-output buttons.

use crate::control::request::ControlRequest;
use crate::layout::options::{DoButtonOptions, DoMode};

/// Pointer events a DO button reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonEvent {
    /// Full press-and-release on the button.
    Click,
    Press,
    Release,
    /// Pointer left the button; treated as a release while pressed.
    Leave,
}

/// Primary-button activity on a DO button during one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PointerFrame {
    pub clicked: bool,
    pub went_down: bool,
    pub went_up: bool,
    /// Pointer is over the button.
    pub hovered: bool,
}

impl PointerFrame {
    /// Events for one frame. `pressed` is the controller's held state, so a
    /// held button that loses the pointer yields [`ButtonEvent::Leave`].
    pub fn events(self, pressed: bool) -> Vec<ButtonEvent> {
        let mut events = Vec::new();
        if self.clicked {
            events.push(ButtonEvent::Click);
        }
        let pressing = self.went_down && self.hovered;
        if pressing {
            events.push(ButtonEvent::Press);
        }
        if pressed || pressing {
            if self.went_up {
                events.push(ButtonEvent::Release);
            } else if !self.hovered {
                events.push(ButtonEvent::Leave);
            }
        }
        events
    }
}

/// Logical on/off state after applying output polarity.
pub fn logical_active(raw_bit: bool, active_high: bool) -> bool {
    if active_high {
        raw_bit
    } else {
        !raw_bit
    }
}

/// Per-widget runtime state of a DO button.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DoButtonController {
    pressed: bool,
    buzzing: bool,
}

impl DoButtonController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// True between a confirmed buzz start and a confirmed buzz stop.
    pub fn is_buzzing(&self) -> bool {
        self.buzzing
    }

    /// Feed one pointer event; returns the request to send, if any.
    ///
    /// Nothing is ever issued while disconnected.
    pub fn handle(
        &mut self,
        event: ButtonEvent,
        opts: &DoButtonOptions,
        raw_bit: bool,
        connected: bool,
    ) -> Option<ControlRequest> {
        if !connected {
            if matches!(event, ButtonEvent::Release | ButtonEvent::Leave) {
                self.pressed = false;
            }
            return None;
        }
        let index = opts.do_index;
        let active_high = opts.active_high;
        match (opts.mode, event) {
            (DoMode::Toggle, ButtonEvent::Click) => Some(ControlRequest::SetDigital {
                index,
                state: !logical_active(raw_bit, active_high),
                active_high,
            }),
            (DoMode::Momentary, ButtonEvent::Press) if !self.pressed => {
                self.pressed = true;
                Some(ControlRequest::SetDigital {
                    index,
                    state: true,
                    active_high,
                })
            }
            (DoMode::Momentary, ButtonEvent::Release | ButtonEvent::Leave) if self.pressed => {
                self.pressed = false;
                Some(ControlRequest::SetDigital {
                    index,
                    state: false,
                    active_high,
                })
            }
            (DoMode::Buzz, ButtonEvent::Press) if !self.pressed => {
                self.pressed = true;
                Some(ControlRequest::BuzzStart {
                    index,
                    hz: opts.buzz_hz,
                    active_high,
                })
            }
            (DoMode::Buzz, ButtonEvent::Release | ButtonEvent::Leave) if self.pressed => {
                self.pressed = false;
                Some(ControlRequest::BuzzStop {
                    index,
                    hz: opts.buzz_hz,
                    active_high,
                })
            }
            _ => None,
        }
    }

    /// Record a request the server acknowledged.
    pub fn confirm(&mut self, request: &ControlRequest) {
        match request {
            ControlRequest::BuzzStart { .. } => self.buzzing = true,
            ControlRequest::BuzzStop { .. } => self.buzzing = false,
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts(mode: DoMode) -> DoButtonOptions {
        DoButtonOptions {
            mode,
            do_index: 4,
            ..Default::default()
        }
    }

    #[test]
    fn toggle_ignores_press_and_release() {
        let mut c = DoButtonController::new();
        let o = opts(DoMode::Toggle);
        assert_eq!(c.handle(ButtonEvent::Press, &o, false, true), None);
        assert_eq!(c.handle(ButtonEvent::Release, &o, false, true), None);
    }

    #[test]
    fn release_after_leave_is_not_repeated() {
        let mut c = DoButtonController::new();
        let o = opts(DoMode::Buzz);
        assert!(matches!(
            c.handle(ButtonEvent::Press, &o, false, true),
            Some(ControlRequest::BuzzStart { index: 4, .. })
        ));
        assert!(matches!(
            c.handle(ButtonEvent::Leave, &o, false, true),
            Some(ControlRequest::BuzzStop { index: 4, .. })
        ));
        assert_eq!(c.handle(ButtonEvent::Release, &o, false, true), None);
    }

    #[test]
    fn buzzing_follows_confirmations() {
        let mut c = DoButtonController::new();
        let o = opts(DoMode::Buzz);
        let start = c.handle(ButtonEvent::Press, &o, false, true).unwrap();
        assert!(!c.is_buzzing());
        c.confirm(&start);
        assert!(c.is_buzzing());
        let stop = c.handle(ButtonEvent::Release, &o, false, true).unwrap();
        c.confirm(&stop);
        assert!(!c.is_buzzing());
    }
}
