//! L3 Molecular Layer: Progress animation controller
//!
//! Combines easing functions and timing utilities to ease a reported
//! progress value toward the raw one. Call `retarget()` when the raw value
//! changes, then `sample()` once per frame.

use std::time::{Duration, Instant};

use super::easing::{EasingType, EasingTypeExt};
use super::timing::{is_complete_at, lerp, progress_at};
use crate::config::ProgressConfig;

/// Active smoothing run
#[derive(Debug, Clone)]
struct ActiveAnimation {
    start: Instant,
    from: f64,
    to: f64,
    duration: Duration,
    easing: EasingType,
}

/// Eases a value in [0, 1] toward a target over a fixed window
#[derive(Debug, Clone)]
pub struct ProgressAnimator {
    animation: Option<ActiveAnimation>,
    duration: Duration,
    easing: EasingType,
    /// Last sampled value (always up-to-date after `sample`)
    current: f64,
}

impl Default for ProgressAnimator {
    fn default() -> Self {
        Self::from_config(&ProgressConfig::default())
    }
}

impl ProgressAnimator {
    pub fn new(duration: Duration, easing: EasingType) -> Self {
        Self {
            animation: None,
            duration,
            easing,
            current: 0.0,
        }
    }

    pub fn from_config(config: &ProgressConfig) -> Self {
        Self::new(config.smoothing_duration(), config.easing)
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Value the current run ends at
    pub fn target(&self) -> f64 {
        self.animation
            .as_ref()
            .map(|a| a.to)
            .unwrap_or(self.current)
    }

    #[inline]
    pub fn current(&self) -> f64 {
        self.current
    }

    /// Jump to `value` with no animation
    pub fn set(&mut self, value: f64) {
        self.animation = None;
        self.current = clamp_unit(value);
    }

    /// Start easing toward `target` from wherever the value is at `now`
    ///
    /// Retargeting to the value an active run already heads for keeps that
    /// run, so a burst of identical targets does not restart the curve. A
    /// new target picks up from the old run's position at `now`, so a run
    /// retargeted every frame keeps moving.
    pub fn retarget(&mut self, target: f64, now: Instant) {
        let target = clamp_unit(target);

        if self.duration.is_zero() {
            self.set(target);
            return;
        }

        if let Some(anim) = &self.animation {
            if anim.to == target {
                return;
            }
        }

        let from = self.sample(now);
        if from == target {
            self.animation = None;
            return;
        }

        self.animation = Some(ActiveAnimation {
            start: now,
            from,
            to: target,
            duration: self.duration,
            easing: self.easing,
        });
    }

    /// Advance to `now` and return the eased value
    pub fn sample(&mut self, now: Instant) -> f64 {
        if let Some(ref anim) = self.animation {
            if is_complete_at(anim.start, now, anim.duration) {
                self.current = anim.to;
                self.animation = None;
            } else {
                let t = progress_at(anim.start, now, anim.duration);
                let eased_t = anim.easing.apply(t);
                self.current = clamp_unit(lerp(anim.from, anim.to, eased_t));
            }
        }

        self.current
    }

}

#[inline]
fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}
