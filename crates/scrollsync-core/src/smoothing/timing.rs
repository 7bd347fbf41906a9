//! L4 Atomic Layer: Time calculation utilities for progress smoothing
//!
//! All functions take the current instant explicitly so frame timestamps
//! supplied by the host drive the animation.

use std::time::{Duration, Instant};

/// Fraction (0.0 to 1.0) of `duration` elapsed between `start` and `now`
///
/// A zero duration is always complete. An instant before `start` counts as
/// no time elapsed.
#[inline]
pub fn progress_at(start: Instant, now: Instant, duration: Duration) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    let elapsed = now.saturating_duration_since(start);
    let ratio = elapsed.as_secs_f64() / duration.as_secs_f64();
    ratio.clamp(0.0, 1.0)
}

/// Check if an animation started at `start` has finished by `now`
#[inline]
pub fn is_complete_at(start: Instant, now: Instant, duration: Duration) -> bool {
    now.saturating_duration_since(start) >= duration
}

/// Linear interpolation between two values
#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}
