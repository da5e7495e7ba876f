//! Inbound telemetry frames.

use serde::{Deserialize, Deserializer};

use crate::data::snapshot::PidTelemetry;

/// One decoded frame from the telemetry socket.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TelemetryMessage {
    /// Informational: name of the server-side logging session.
    Session { dir: String },
    /// New reading. Omitted fields keep their previous values.
    Tick(TickMessage),
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct TickMessage {
    #[serde(default, deserialize_with = "lenient_numbers")]
    pub ai: Option<Vec<f64>>,
    #[serde(default, deserialize_with = "lenient_numbers")]
    pub ao: Option<Vec<f64>>,
    #[serde(default, rename = "do", deserialize_with = "lenient_bits")]
    pub do_bits: Option<Vec<bool>>,
    #[serde(default, deserialize_with = "lenient_numbers")]
    pub tc: Option<Vec<f64>>,
    #[serde(default)]
    pub pid: Option<Vec<Option<PidTelemetry>>>,
}

/// A frame together with the monotonic time it was received.
#[derive(Debug, Clone, PartialEq)]
pub struct TimedMessage {
    pub received_at: f64,
    pub message: TelemetryMessage,
}

impl TelemetryMessage {
    /// Decode a text frame. Anything malformed is dropped.
    pub fn parse(text: &str) -> Option<TelemetryMessage> {
        match serde_json::from_str(text) {
            Ok(msg) => Some(msg),
            Err(e) => {
                tracing::debug!("discarding malformed telemetry frame: {e}");
                None
            }
        }
    }
}

// Unreadable channels (`null`) read as zero so indices keep lining up.
fn lenient_numbers<'de, D>(deserializer: D) -> Result<Option<Vec<f64>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<Option<f64>>> = Option::deserialize(deserializer)?;
    Ok(raw.map(|values| values.into_iter().map(|v| v.unwrap_or(0.0)).collect()))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Bit {
    Bool(bool),
    Number(f64),
}

fn lenient_bits<'de, D>(deserializer: D) -> Result<Option<Vec<bool>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<Option<Bit>>> = Option::deserialize(deserializer)?;
    Ok(raw.map(|bits| {
        bits.into_iter()
            .map(|b| match b {
                Some(Bit::Bool(b)) => b,
                Some(Bit::Number(n)) => n != 0.0,
                None => false,
            })
            .collect()
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_session() {
        let msg = TelemetryMessage::parse(r#"{"type":"session","dir":"2025-01-01_120000"}"#);
        assert_eq!(
            msg,
            Some(TelemetryMessage::Session {
                dir: "2025-01-01_120000".into()
            })
        );
    }

    #[test]
    fn parses_full_tick() {
        let text = r#"{"type":"tick","t":1.0,"ai":[1,2.5],"ao":[0.5],"do":[0,1,true],
            "tc":[20.5,null],"pid":[{"pv":1.0,"err":0.1,"out":0.3},null]}"#;
        let Some(TelemetryMessage::Tick(tick)) = TelemetryMessage::parse(text) else {
            panic!("expected tick");
        };
        assert_eq!(tick.ai, Some(vec![1.0, 2.5]));
        assert_eq!(tick.do_bits, Some(vec![false, true, true]));
        assert_eq!(tick.tc, Some(vec![20.5, 0.0]));
        let pid = tick.pid.unwrap();
        assert_eq!(pid[0].unwrap().out, Some(0.3));
        assert!(pid[1].is_none());
    }

    #[test]
    fn missing_fields_stay_none() {
        let Some(TelemetryMessage::Tick(tick)) =
            TelemetryMessage::parse(r#"{"type":"tick","ai":[1,2,3,4,5,6,7,8]}"#)
        else {
            panic!("expected tick");
        };
        assert!(tick.do_bits.is_none());
        assert!(tick.ao.is_none());
        assert!(tick.pid.is_none());
    }

    #[test]
    fn malformed_frames_are_dropped() {
        assert_eq!(TelemetryMessage::parse("not json"), None);
        assert_eq!(TelemetryMessage::parse(r#"{"type":"hello"}"#), None);
        assert_eq!(TelemetryMessage::parse(r#"{"type":"tick","ai":"x"}"#), None);
    }
}
