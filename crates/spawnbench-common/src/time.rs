//! ---
//! sb_section: "01-core-functionality"
//! sb_subsection: "module"
//! sb_type: "source"
//! sb_scope: "code"
//! sb_description: "Clock helpers for benchmark timing."
//! sb_version: "v0.0.0-prealpha"
//! sb_owner: "tbd"
//! ---
use std::time::{Duration, Instant};

use chrono::Utc;

/// Capture an instant suitable for elapsed-time measurement.
pub fn monotonic_now() -> Instant {
    Instant::now()
}

/// Wall-clock time as fractional seconds since the Unix epoch.
pub fn unix_timestamp() -> f64 {
    Utc::now().timestamp_micros() as f64 / 1_000_000.0
}

/// Convert a duration into microseconds, saturating at `u64::MAX`.
pub fn duration_to_micros(duration: Duration) -> u64 {
    duration
        .as_secs()
        .saturating_mul(1_000_000)
        .saturating_add(u64::from(duration.subsec_micros()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unix_timestamp_is_after_2020() {
        assert!(unix_timestamp() > 1_577_836_800.0);
    }

    #[test]
    fn micros_conversion() {
        assert_eq!(duration_to_micros(Duration::from_millis(1500)), 1_500_000);
        assert_eq!(duration_to_micros(Duration::MAX), u64::MAX);
    }

    #[test]
    fn monotonic_clock_does_not_go_backwards() {
        let start = monotonic_now();
        assert!(monotonic_now() >= start);
    }
}
