//! Uniform random numbers for cosmetic jitter.

#[cfg(not(target_arch = "wasm32"))]
use std::cell::Cell;

#[cfg(not(target_arch = "wasm32"))]
thread_local! {
    static XORSHIFT_STATE: Cell<u64> = Cell::new(crate::time::unix_time_ms_now() | 1);
}

/// Returns a value in `[0, 1)`. Not suitable for anything security related.
pub fn random_unit() -> f64 {
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Math::random()
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        XORSHIFT_STATE.with(|state| {
            let mut x = state.get();
            x ^= x << 13;
            x ^= x >> 7;
            x ^= x << 17;
            state.set(x);
            (x >> 11) as f64 / (1u64 << 53) as f64
        })
    }
}

/// Returns an integer offset in `[-span, span)`.
pub fn random_offset(span: i32) -> i32 {
    if span <= 0 {
        return 0;
    }
    let width = f64::from(span) * 2.0;
    (random_unit() * width).floor() as i32 - span
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_stay_in_range() {
        for _ in 0..500 {
            let offset = random_offset(20);
            assert!((-20..20).contains(&offset), "{offset}");
            let unit = random_unit();
            assert!((0.0..1.0).contains(&unit));
        }
        assert_eq!(random_offset(0), 0);
    }
}
