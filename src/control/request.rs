//! Outbound control calls and their JSON bodies.

use serde::Serialize;

/// A fire-and-forget mutation request for the control server.
///
/// Serializes to exactly the request body (`{index, state, active_high}`, ...).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ControlRequest {
    SetDigital { index: usize, state: bool, active_high: bool },
    BuzzStart { index: usize, hz: f64, active_high: bool },
    BuzzStop { index: usize, hz: f64, active_high: bool },
    SetAnalog { index: usize, volts: f64 },
    SetRate { hz: f64 },
}

impl ControlRequest {
    pub fn path(&self) -> &'static str {
        match self {
            ControlRequest::SetDigital { .. } => "/api/do/set",
            ControlRequest::BuzzStart { .. } => "/api/do/buzz/start",
            ControlRequest::BuzzStop { .. } => "/api/do/buzz/stop",
            ControlRequest::SetAnalog { .. } => "/api/ao/set",
            ControlRequest::SetRate { .. } => "/api/acq/rate",
        }
    }

    pub fn body(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }

    /// Acquisition rate request; rates below 1 Hz are not sent.
    pub fn rate(hz: f64) -> Option<Self> {
        (hz >= 1.0 && hz.is_finite()).then_some(ControlRequest::SetRate { hz })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bodies_match_server_contract() {
        let req = ControlRequest::SetDigital {
            index: 2,
            state: true,
            active_high: false,
        };
        assert_eq!(req.path(), "/api/do/set");
        assert_eq!(req.body(), json!({ "index": 2, "state": true, "active_high": false }));

        let req = ControlRequest::BuzzStop {
            index: 1,
            hz: 2.0,
            active_high: true,
        };
        assert_eq!(req.body(), json!({ "index": 1, "hz": 2.0, "active_high": true }));

        let req = ControlRequest::SetAnalog { index: 0, volts: 2.5 };
        assert_eq!(req.body(), json!({ "index": 0, "volts": 2.5 }));
    }

    #[test]
    fn rate_below_one_hz_is_not_sent() {
        assert_eq!(ControlRequest::rate(0.5), None);
        assert_eq!(ControlRequest::rate(f64::NAN), None);
        assert_eq!(
            ControlRequest::rate(100.0).map(|r| r.body()),
            Some(json!({ "hz": 100.0 }))
        );
    }
}
