//! Scroll surface abstraction
//!
//! A surface is whatever the host scrolls: a browser document, a terminal
//! pager, a list widget. Trackers only need two things from it: a metrics
//! query and a place to hang a listener.

use std::cell::Cell;
use std::time::Instant;

use tracing::debug;

use crate::listener::ListenerRegistry;
use crate::progress::ScrollMetrics;

/// Event a surface dispatches to its listeners
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceEvent {
    /// Scroll offset changed
    Scroll,
    /// Content or viewport extent changed
    Resize,
    /// Animation frame boundary, stamped with the frame time
    Frame(Instant),
}

/// Host-side source of scroll measurements
pub trait ScrollSurface {
    /// Current measurements, or `None` when the host platform is absent
    /// (e.g. the surface was detached or torn down)
    fn metrics(&self) -> Option<ScrollMetrics>;

    /// Listener registry for this surface's events
    fn events(&self) -> &ListenerRegistry<SurfaceEvent>;
}

/// In-memory scroll surface
///
/// Offsets are kept within `[0, scrollable_range]` the same way a browser
/// clamps `scrollTop`. Mutators take `&self` so the surface can be shared
/// behind an `Rc` with the trackers observing it.
#[derive(Debug)]
pub struct VirtualSurface {
    metrics: Cell<ScrollMetrics>,
    attached: Cell<bool>,
    events: ListenerRegistry<SurfaceEvent>,
}

impl Default for VirtualSurface {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl VirtualSurface {
    pub fn new(content_extent: f64, viewport_extent: f64) -> Self {
        Self {
            metrics: Cell::new(ScrollMetrics::new(0.0, content_extent, viewport_extent)),
            attached: Cell::new(true),
            events: ListenerRegistry::new(),
        }
    }

    pub fn scroll_offset(&self) -> f64 {
        self.metrics.get().scroll_offset
    }

    pub fn scrollable_range(&self) -> f64 {
        self.metrics.get().scrollable_range()
    }

    /// Move to `offset`, clamped to the scrollable range
    ///
    /// Dispatches `Scroll` only if the position actually changed.
    pub fn scroll_to(&self, offset: f64) {
        let mut metrics = self.metrics.get();
        let clamped = clamp_offset(offset, metrics.scrollable_range());
        if clamped == metrics.scroll_offset {
            return;
        }
        metrics.scroll_offset = clamped;
        self.metrics.set(metrics);
        self.events.dispatch(&SurfaceEvent::Scroll);
    }

    pub fn scroll_by(&self, delta: f64) {
        self.scroll_to(self.scroll_offset() + delta);
    }

    /// Change content and viewport extents
    ///
    /// Dispatches `Resize`, followed by `Scroll` when the new extents pushed
    /// the offset back inside the range.
    pub fn resize(&self, content_extent: f64, viewport_extent: f64) {
        let previous = self.metrics.get();
        let mut metrics = ScrollMetrics::new(previous.scroll_offset, content_extent, viewport_extent);
        metrics.scroll_offset = clamp_offset(metrics.scroll_offset, metrics.scrollable_range());
        self.metrics.set(metrics);

        self.events.dispatch(&SurfaceEvent::Resize);
        if metrics.scroll_offset != previous.scroll_offset {
            self.events.dispatch(&SurfaceEvent::Scroll);
        }
    }

    /// Signal an animation frame at `now`
    pub fn frame(&self, now: Instant) {
        self.events.dispatch(&SurfaceEvent::Frame(now));
    }

    /// Simulate the host platform going away; `metrics()` returns `None`
    pub fn detach(&self) {
        debug!("virtual surface detached");
        self.attached.set(false);
    }

    pub fn attach(&self) {
        self.attached.set(true);
    }

    pub fn is_attached(&self) -> bool {
        self.attached.get()
    }
}

impl ScrollSurface for VirtualSurface {
    fn metrics(&self) -> Option<ScrollMetrics> {
        self.attached.get().then(|| self.metrics.get())
    }

    fn events(&self) -> &ListenerRegistry<SurfaceEvent> {
        &self.events
    }
}

fn clamp_offset(offset: f64, range: f64) -> f64 {
    if offset.is_nan() {
        0.0
    } else {
        offset.clamp(0.0, range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listener::ListenerOptions;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn record(surface: &VirtualSurface) -> (Rc<RefCell<Vec<SurfaceEvent>>>, crate::Subscription) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        let sub = surface
            .events()
            .subscribe(ListenerOptions::passive(), move |e| sink.borrow_mut().push(*e));
        (log, sub)
    }

    #[test]
    fn test_scroll_clamps_to_range() {
        let surface = VirtualSurface::new(1000.0, 700.0);
        surface.scroll_to(5000.0);
        assert_eq!(surface.scroll_offset(), 300.0);
        surface.scroll_by(-10_000.0);
        assert_eq!(surface.scroll_offset(), 0.0);
    }

    #[test]
    fn test_scroll_event_only_on_change() {
        let surface = VirtualSurface::new(1000.0, 700.0);
        let (log, _sub) = record(&surface);

        surface.scroll_to(0.0);
        surface.scroll_to(100.0);
        surface.scroll_to(100.0);
        assert_eq!(*log.borrow(), vec![SurfaceEvent::Scroll]);
    }

    #[test]
    fn test_shrinking_content_clamps_offset() {
        let surface = VirtualSurface::new(1000.0, 700.0);
        surface.scroll_to(300.0);
        let (log, _sub) = record(&surface);

        surface.resize(800.0, 700.0);
        assert_eq!(surface.scroll_offset(), 100.0);
        assert_eq!(*log.borrow(), vec![SurfaceEvent::Resize, SurfaceEvent::Scroll]);
    }

    #[test]
    fn test_detached_surface_has_no_metrics() {
        let surface = VirtualSurface::new(1000.0, 700.0);
        assert!(surface.metrics().is_some());
        surface.detach();
        assert!(surface.metrics().is_none());
        surface.attach();
        assert!(surface.is_attached());
    }
}
