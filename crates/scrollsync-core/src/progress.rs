//! Pure scroll progress computation
//!
//! Maps a raw scroll offset and scrollable range to a normalized value in
//! [0, 1]. Nothing here touches a surface; the tracker feeds it measurements.

use serde::{Deserialize, Serialize};

/// Raw measurements read from a scroll surface
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScrollMetrics {
    /// Distance scrolled from the origin
    pub scroll_offset: f64,
    /// Full extent of the document along the scroll axis
    pub content_extent: f64,
    /// Visible extent along the scroll axis
    pub viewport_extent: f64,
}

impl ScrollMetrics {
    pub fn new(scroll_offset: f64, content_extent: f64, viewport_extent: f64) -> Self {
        Self {
            scroll_offset,
            content_extent,
            viewport_extent,
        }
    }

    /// Maximum reachable scroll offset for these extents
    pub fn scrollable_range(&self) -> f64 {
        scrollable_range(self.content_extent, self.viewport_extent)
    }
}

/// Snapshot of scroll position and its normalized progress
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScrollState {
    pub scroll_offset: f64,
    pub scrollable_range: f64,
    pub progress: f64,
}

impl ScrollState {
    pub fn new(scroll_offset: f64, scrollable_range: f64) -> Self {
        let scroll_offset = sanitize(scroll_offset);
        let scrollable_range = sanitize(scrollable_range);
        Self {
            scroll_offset,
            scrollable_range,
            progress: compute_progress(scroll_offset, scrollable_range),
        }
    }

    pub fn from_metrics(metrics: ScrollMetrics) -> Self {
        Self::new(metrics.scroll_offset, metrics.scrollable_range())
    }

    /// Progress as a whole percentage, for display
    pub fn percent(&self) -> u8 {
        progress_percent(self.progress)
    }

    /// True when there is nothing to scroll
    pub fn is_unscrollable(&self) -> bool {
        self.scrollable_range == 0.0
    }

    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Normalized progress for a scroll offset within a scrollable range
///
/// Returns 0 when the range is zero (or not a positive finite number) so the
/// result is never NaN. Offsets past either end clamp to 0 or 1.
#[inline]
pub fn compute_progress(scroll_offset: f64, scrollable_range: f64) -> f64 {
    let range = sanitize(scrollable_range);
    if range == 0.0 {
        return 0.0;
    }
    (sanitize(scroll_offset) / range).clamp(0.0, 1.0)
}

/// Progress in [0, 1] as a whole percentage in 0..=100
#[inline]
pub fn progress_percent(progress: f64) -> u8 {
    (sanitize(progress).min(1.0) * 100.0).round() as u8
}

/// Distance a document can scroll beyond one viewport
#[inline]
pub fn scrollable_range(content_extent: f64, viewport_extent: f64) -> f64 {
    sanitize(sanitize(content_extent) - sanitize(viewport_extent))
}

/// Negative, NaN and infinite measurements count as zero
#[inline]
fn sanitize(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_concrete_values() {
        assert!((compute_progress(150.0, 300.0) - 0.5).abs() < f64::EPSILON);
        assert_eq!(compute_progress(0.0, 0.0), 0.0);
        assert!((compute_progress(300.0, 300.0) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zero_range_is_zero_not_nan() {
        for offset in [0.0, 1.0, 150.0, f64::MAX] {
            let p = compute_progress(offset, 0.0);
            assert_eq!(p, 0.0, "offset {}", offset);
            assert!(!p.is_nan());
        }
    }

    #[test]
    fn test_ratio_and_clamp() {
        for range in [1.0, 7.5, 300.0, 12_345.0] {
            for step in 0..=20 {
                let offset = range * step as f64 / 10.0;
                let expected = (offset / range).clamp(0.0, 1.0);
                let p = compute_progress(offset, range);
                assert!((p - expected).abs() < 1e-12, "{} / {}", offset, range);
                assert!((0.0..=1.0).contains(&p));
            }
        }
    }

    #[test]
    fn test_monotonic_for_increasing_offsets() {
        let range = 480.0;
        let mut prev = 0.0;
        for offset in (0..600).map(|i| i as f64 * 1.3) {
            let p = compute_progress(offset, range);
            assert!(p >= prev, "not monotonic at offset {}", offset);
            prev = p;
        }
    }

    #[test]
    fn test_garbage_measurements() {
        assert_eq!(compute_progress(f64::NAN, 100.0), 0.0);
        assert_eq!(compute_progress(-20.0, 100.0), 0.0);
        assert_eq!(compute_progress(50.0, f64::NAN), 0.0);
        assert_eq!(compute_progress(50.0, f64::INFINITY), 0.0);
        assert_eq!(compute_progress(50.0, -100.0), 0.0);
    }

    #[test]
    fn test_progress_percent() {
        assert_eq!(progress_percent(0.0), 0);
        assert_eq!(progress_percent(0.054), 5);
        assert_eq!(progress_percent(0.996), 100);
        assert_eq!(progress_percent(1.0), 100);
        assert_eq!(progress_percent(f64::NAN), 0);
        assert_eq!(progress_percent(3.0), 100);
    }

    #[test]
    fn test_scrollable_range() {
        assert_eq!(scrollable_range(1000.0, 700.0), 300.0);
        // Content exactly the viewport height
        assert_eq!(scrollable_range(700.0, 700.0), 0.0);
        // Content shorter than the viewport
        assert_eq!(scrollable_range(200.0, 700.0), 0.0);
    }

    #[test]
    fn test_state_from_metrics() {
        let state = ScrollState::from_metrics(ScrollMetrics::new(150.0, 1000.0, 700.0));
        assert_eq!(state.scrollable_range, 300.0);
        assert!((state.progress - 0.5).abs() < f64::EPSILON);
        assert_eq!(state.percent(), 50);

        let flat = ScrollState::from_metrics(ScrollMetrics::new(0.0, 700.0, 700.0));
        assert!(flat.is_unscrollable());
        assert_eq!(flat.progress, 0.0);
    }

    #[test]
    fn test_state_serializes() {
        let state = ScrollState::new(150.0, 300.0);
        let json = state.to_json().unwrap();
        assert!(json.contains("\"progress\": 0.5"));
    }
}
