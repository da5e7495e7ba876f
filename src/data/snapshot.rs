//! The process-wide telemetry snapshot and the value resolver.

use std::sync::Arc;

use serde::Deserialize;

use crate::data::selector::{ChannelKind, Selector};
use crate::telemetry::message::TickMessage;

/// Live readout of one PID loop as published in a tick.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct PidTelemetry {
    pub pv: Option<f64>,
    pub err: Option<f64>,
    pub out: Option<f64>,
}

/// Latest full reading across all channel kinds.
///
/// Never mutated in place: every tick builds a new value with [`Snapshot::merged`].
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub ai: Vec<f64>,
    pub ao: Vec<f64>,
    pub do_bits: Vec<bool>,
    pub tc: Vec<f64>,
    pub pid: Vec<Option<PidTelemetry>>,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            ai: vec![0.0; 8],
            ao: vec![0.0; 2],
            do_bits: vec![false; 8],
            tc: Vec::new(),
            pid: Vec::new(),
        }
    }
}

impl Snapshot {
    /// Build the successor snapshot: fields present in `tick` replace, absent ones carry over.
    pub fn merged(&self, tick: &TickMessage) -> Snapshot {
        Snapshot {
            ai: tick.ai.clone().unwrap_or_else(|| self.ai.clone()),
            ao: tick.ao.clone().unwrap_or_else(|| self.ao.clone()),
            do_bits: tick.do_bits.clone().unwrap_or_else(|| self.do_bits.clone()),
            tc: tick.tc.clone().unwrap_or_else(|| self.tc.clone()),
            pid: tick.pid.clone().unwrap_or_else(|| self.pid.clone()),
        }
    }

    /// Raw electrical bit of a digital output; out of range reads low.
    pub fn do_bit(&self, index: usize) -> bool {
        self.do_bits.get(index).copied().unwrap_or(false)
    }

    pub fn pid_loop(&self, index: usize) -> Option<PidTelemetry> {
        self.pid.get(index).copied().flatten()
    }
}

/// Map a selector to its latest scalar. Out-of-range indices read as `0.0`.
pub fn resolve(selector: &Selector, snapshot: &Snapshot) -> f64 {
    let index = selector.index;
    match selector.kind {
        ChannelKind::Ai => snapshot.ai.get(index).copied().unwrap_or(0.0),
        ChannelKind::Ao => snapshot.ao.get(index).copied().unwrap_or(0.0),
        ChannelKind::Tc => snapshot.tc.get(index).copied().unwrap_or(0.0),
        ChannelKind::Do => {
            if snapshot.do_bit(index) {
                1.0
            } else {
                0.0
            }
        }
    }
}

/// Resolve every selector of a widget, in selector order.
pub fn resolve_all(selectors: &[Selector], snapshot: &Snapshot) -> Vec<f64> {
    selectors.iter().map(|s| resolve(s, snapshot)).collect()
}

/// Single-writer cell holding the current snapshot.
///
/// Only telemetry ingest calls [`SnapshotCell::replace`]; readers take a cheap
/// `Arc` clone and never observe a half-applied tick.
#[derive(Debug, Default)]
pub struct SnapshotCell {
    current: Arc<Snapshot>,
}

impl SnapshotCell {
    pub fn new(snapshot: Snapshot) -> Self {
        Self {
            current: Arc::new(snapshot),
        }
    }

    pub fn load(&self) -> Arc<Snapshot> {
        Arc::clone(&self.current)
    }

    pub fn get(&self) -> &Snapshot {
        &self.current
    }

    pub(crate) fn replace(&mut self, snapshot: Snapshot) {
        self.current = Arc::new(snapshot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> Snapshot {
        Snapshot {
            ai: vec![1.5, 2.5],
            ao: vec![3.0],
            do_bits: vec![false, true],
            tc: vec![21.0],
            pid: Vec::new(),
        }
    }

    #[test]
    fn resolves_each_kind() {
        let s = snapshot();
        assert_eq!(resolve(&Selector::new(ChannelKind::Ai, 1), &s), 2.5);
        assert_eq!(resolve(&Selector::new(ChannelKind::Ao, 0), &s), 3.0);
        assert_eq!(resolve(&Selector::new(ChannelKind::Tc, 0), &s), 21.0);
        assert_eq!(resolve(&Selector::new(ChannelKind::Do, 0), &s), 0.0);
        assert_eq!(resolve(&Selector::new(ChannelKind::Do, 1), &s), 1.0);
    }

    #[test]
    fn out_of_range_is_zero_for_every_kind() {
        let s = snapshot();
        for kind in ChannelKind::ALL {
            for index in [2, 3, 100, usize::MAX] {
                assert_eq!(resolve(&Selector::new(kind, index), &s), 0.0);
            }
        }
    }

    #[test]
    fn cell_hands_out_stable_arcs() {
        let mut cell = SnapshotCell::new(snapshot());
        let before = cell.load();
        let mut next = snapshot();
        next.ai = vec![9.0];
        cell.replace(next);
        assert_eq!(before.ai, vec![1.5, 2.5]);
        assert_eq!(cell.get().ai, vec![9.0]);
    }
}
