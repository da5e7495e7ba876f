//! Process-relative monotonic clock used to stamp telemetry.

use std::time::Instant;

use once_cell::sync::Lazy;

static EPOCH: Lazy<Instant> = Lazy::new(Instant::now);

/// Seconds since the first call in this process. Never goes backwards.
pub fn monotonic_seconds() -> f64 {
    EPOCH.elapsed().as_secs_f64()
}
