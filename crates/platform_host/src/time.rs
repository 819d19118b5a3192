//! Clock helpers shared by the runtime and host adapters.

use std::cell::Cell;
#[cfg(not(target_arch = "wasm32"))]
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{DateTime, Local, NaiveDateTime, Utc};

thread_local! {
    static LAST_ISSUED_TIMESTAMP_MS: Cell<u64> = const { Cell::new(0) };
}

/// Returns the current unix timestamp in milliseconds.
pub fn unix_time_ms_now() -> u64 {
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Date::now().max(0.0) as u64
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64
    }
}

/// Returns a unix millisecond timestamp that is strictly greater than every value it returned
/// before in this thread, even when the wall clock stalls or steps backwards.
///
/// Used for command-slot envelopes and record ids, which must never collide.
pub fn next_monotonic_timestamp_ms() -> u64 {
    let now = unix_time_ms_now();
    LAST_ISSUED_TIMESTAMP_MS.with(|last| {
        let next = now.max(last.get().saturating_add(1));
        last.set(next);
        next
    })
}

/// Current time in UTC, used for record creation and modification stamps.
pub fn utc_now() -> DateTime<Utc> {
    Utc::now()
}

/// Current local wall-clock time, used to resolve "today", "tomorrow" and weekday phrases.
pub fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}
