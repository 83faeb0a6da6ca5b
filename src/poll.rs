//! Shared call-with-timeout capability. Both the connectivity and the
//! time-sync adapters block on external state changing; they poll it at a
//! fine interval inside a hard budget instead of blocking indefinitely.

use std::thread;
use std::time::{Duration, Instant};

/// Poll `probe` every `interval` until it yields a value or `timeout`
/// elapses. The probe is always tried at least once, immediately.
pub fn poll_until<T>(
    timeout: Duration,
    interval: Duration,
    mut probe: impl FnMut() -> Option<T>,
) -> Option<T> {
    let deadline = Instant::now() + timeout;
    loop {
        if let Some(v) = probe() {
            return Some(v);
        }
        if Instant::now() >= deadline {
            return None;
        }
        thread::sleep(interval);
    }
}
