//! Millisecond clock and track identifier assignment.
//!
//! Identifiers double as the insertion-order sort key, so there is exactly
//! one counter per process and it only ever moves forward. The wall clock is
//! used for request processing telemetry and uptime, never for identity.

use std::sync::atomic::{AtomicI64, Ordering};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Returns the current wall-clock time as signed milliseconds since the Unix
/// epoch. Wall-clock non-monotonicity is an accepted limitation; callers use
/// this for elapsed-time telemetry, not ordering.
pub fn millis_since_epoch() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

/// Hands out dense, strictly increasing track identifiers starting at 0.
///
/// Shared across request handlers behind an `Arc`; the atomic is the only
/// synchronization the counter needs. Identifiers are never reused, even
/// when the ingestion that claimed one fails before the record is stored.
#[derive(Debug, Default)]
pub struct IdGenerator {
    next: AtomicI64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self {
            next: AtomicI64::new(0),
        }
    }

    /// Claims the next identifier.
    pub fn next_id(&self) -> i64 {
        self.next.fetch_add(1, Ordering::SeqCst)
    }

    /// The identifier the next successful ingestion will receive.
    pub fn peek(&self) -> i64 {
        self.next.load(Ordering::SeqCst)
    }
}

/// Formats an elapsed duration as `P{days}D{hours}H{minutes}M{seconds}S`.
///
/// Hours, minutes and seconds wrap at their natural period; days do not.
pub fn format_uptime(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!(
        "P{}D{}H{}M{}S",
        secs / 86_400,
        (secs / 3_600) % 24,
        (secs / 60) % 60,
        secs % 60,
    )
}
