use std::time::{SystemTime, UNIX_EPOCH};

/// Default transaction lifetime, in seconds.
pub const DEFAULT_DEADLINE_FROM_NOW: u64 = 60 * 30;

pub fn transaction_deadline(now: u64, ttl: u64) -> u64 {
    now.saturating_add(ttl)
}

/// Seconds since the unix epoch, `None` if the clock is before it.
pub fn unix_now() -> Option<u64> {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .ok()
        .map(|d| d.as_secs())
}
