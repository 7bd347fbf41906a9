//! Scroll-progress tracker
//!
//! `ProgressTracker::observe` attaches one passive listener to a surface and
//! keeps a normalized progress value current for as long as the returned
//! `Observation` lives. Each observation owns its own snapshot; two trackers
//! on the same surface never share state.
//!
//! # Usage
//!
//! ```
//! use std::rc::Rc;
//! use scrollsync_core::{ProgressConfig, ProgressTracker, ScrollSurface, VirtualSurface};
//!
//! let surface = Rc::new(VirtualSurface::new(1000.0, 700.0));
//! let observation = ProgressTracker::new(ProgressConfig::default()).observe(&surface);
//!
//! surface.scroll_to(150.0);
//! assert_eq!(observation.progress(), 0.5);
//!
//! observation.stop();
//! assert_eq!(surface.events().listener_count(), 0);
//! ```

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use tracing::{debug, trace};

use crate::config::{ProgressConfig, SyncMode};
use crate::listener::{ListenerOptions, ListenerRegistry, Subscription};
use crate::progress::ScrollState;
use crate::smoothing::ProgressAnimator;
use crate::surface::{ScrollSurface, SurfaceEvent};

/// Factory for observations sharing one configuration
#[derive(Debug, Clone, Default)]
pub struct ProgressTracker {
    config: ProgressConfig,
}

impl ProgressTracker {
    pub fn new(config: ProgressConfig) -> Self {
        Self { config }
    }

    /// Start observing `surface`
    ///
    /// Reads the surface once immediately, then registers a single passive
    /// listener. The listener is released when the observation is stopped or
    /// dropped.
    pub fn observe<S>(&self, surface: &Rc<S>) -> Observation
    where
        S: ScrollSurface + 'static,
    {
        let weak_surface: Weak<dyn ScrollSurface> = Rc::downgrade(surface) as Weak<dyn ScrollSurface>;
        let state = Rc::new(RefCell::new(TrackerState::new(self.config.clone())));
        let changes: Rc<ListenerRegistry<f64>> = Rc::new(ListenerRegistry::new());

        state
            .borrow_mut()
            .prime(surface.metrics().map(ScrollState::from_metrics));

        // The listener holds the surface weakly; the surface owns the listener
        let subscription = {
            let state = Rc::clone(&state);
            let changes = Rc::clone(&changes);
            let listener_surface = weak_surface.clone();
            surface
                .events()
                .subscribe(ListenerOptions::passive(), move |event| {
                    handle_event(&state, &changes, &listener_surface, event);
                })
        };

        debug!(
            sync_mode = ?self.config.sync_mode,
            smoothing = self.config.is_smooth(),
            "scroll progress observation started"
        );

        Observation {
            state,
            changes,
            surface: weak_surface,
            subscription: Some(subscription),
        }
    }
}

/// Per-observation state; never shared between observations
#[derive(Debug)]
struct TrackerState {
    config: ProgressConfig,
    snapshot: Option<ScrollState>,
    reported: f64,
    dirty: bool,
    /// Smoothing run waits for the next frame timestamp to start
    retarget_pending: bool,
    animator: ProgressAnimator,
}

impl TrackerState {
    fn new(config: ProgressConfig) -> Self {
        let animator = ProgressAnimator::from_config(&config);
        Self {
            config,
            snapshot: None,
            reported: 0.0,
            dirty: false,
            retarget_pending: false,
            animator,
        }
    }

    /// Initial read; reported without smoothing
    fn prime(&mut self, snapshot: Option<ScrollState>) {
        match snapshot {
            Some(snapshot) => {
                self.snapshot = Some(snapshot);
                self.reported = snapshot.progress;
                self.animator.set(snapshot.progress);
            }
            None => debug!("scroll surface unavailable, progress not computed"),
        }
    }

    /// Apply one surface event; returns the new reported value if it changed
    fn on_event<F>(&mut self, event: SurfaceEvent, read: F) -> Option<f64>
    where
        F: FnOnce() -> Option<ScrollState>,
    {
        let before = self.reported;

        match event {
            SurfaceEvent::Scroll | SurfaceEvent::Resize => match self.config.sync_mode {
                SyncMode::Immediate => self.recompute(read()),
                SyncMode::Frame => self.dirty = true,
            },
            SurfaceEvent::Frame(now) => {
                if self.dirty {
                    self.dirty = false;
                    self.recompute(read());
                }
                if self.config.is_smooth() {
                    if self.retarget_pending {
                        self.retarget_pending = false;
                        if let Some(snapshot) = self.snapshot {
                            self.animator.retarget(snapshot.progress, now);
                        }
                    }
                    self.reported = self.animator.sample(now);
                }
            }
        }

        self.changed_since(before)
    }

    /// Synchronous re-read regardless of sync mode
    fn refresh<F>(&mut self, read: F) -> Option<f64>
    where
        F: FnOnce() -> Option<ScrollState>,
    {
        let before = self.reported;
        self.dirty = false;
        self.recompute(read());
        self.changed_since(before)
    }

    /// Smoothing only ever runs on the host's frame clock; a new raw value
    /// is picked up by the next `Frame`
    fn recompute(&mut self, snapshot: Option<ScrollState>) {
        let Some(snapshot) = snapshot else {
            trace!("scroll surface unavailable, keeping last progress");
            return;
        };

        trace!(
            offset = snapshot.scroll_offset,
            range = snapshot.scrollable_range,
            progress = snapshot.progress,
            "scroll progress recomputed"
        );
        self.snapshot = Some(snapshot);

        if self.config.is_smooth() {
            self.retarget_pending = true;
        } else {
            self.reported = snapshot.progress;
        }
    }

    fn changed_since(&self, before: f64) -> Option<f64> {
        (self.reported != before).then_some(self.reported)
    }

    fn is_settled(&self) -> bool {
        !self.dirty && !self.retarget_pending && !self.animator.is_animating()
    }
}

fn read_surface(surface: &Weak<dyn ScrollSurface>) -> Option<ScrollState> {
    surface
        .upgrade()
        .and_then(|s| s.metrics())
        .map(ScrollState::from_metrics)
}

fn handle_event(
    state: &RefCell<TrackerState>,
    changes: &ListenerRegistry<f64>,
    surface: &Weak<dyn ScrollSurface>,
    event: &SurfaceEvent,
) {
    // Borrow ends before notifying so change listeners can query the observation
    let changed = state.borrow_mut().on_event(*event, || read_surface(surface));
    if let Some(progress) = changed {
        changes.dispatch(&progress);
    }
}

/// A live observation of one surface
///
/// Holds the only listener registration the tracker made. Dropping the
/// observation (or calling `stop`) releases it.
pub struct Observation {
    state: Rc<RefCell<TrackerState>>,
    changes: Rc<ListenerRegistry<f64>>,
    surface: Weak<dyn ScrollSurface>,
    subscription: Option<Subscription>,
}

impl std::fmt::Debug for Observation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observation")
            .field("progress", &self.progress())
            .field("observing", &self.is_observing())
            .finish()
    }
}

impl Observation {
    /// Reported progress in [0, 1]; 0 until the surface has been read
    pub fn progress(&self) -> f64 {
        self.state.borrow().reported
    }

    /// Last raw snapshot, `None` if the surface could never be read
    pub fn snapshot(&self) -> Option<ScrollState> {
        self.state.borrow().snapshot
    }

    /// Unsmoothed progress from the last snapshot
    pub fn raw_progress(&self) -> f64 {
        self.snapshot().map(|s| s.progress).unwrap_or(0.0)
    }

    /// No pending frame recompute and no smoothing in flight
    pub fn is_settled(&self) -> bool {
        self.state.borrow().is_settled()
    }

    /// True while the surface listener is registered
    pub fn is_observing(&self) -> bool {
        self.subscription
            .as_ref()
            .is_some_and(Subscription::is_active)
    }

    /// Get notified each time the reported progress changes
    #[must_use = "dropping the subscription immediately removes the listener"]
    pub fn on_change<F>(&self, callback: F) -> Subscription
    where
        F: Fn(f64) + 'static,
    {
        self.changes
            .subscribe(ListenerOptions::passive(), move |progress| callback(*progress))
    }

    /// Re-read the surface now, bypassing frame synchronization
    pub fn refresh(&self) {
        let changed = self
            .state
            .borrow_mut()
            .refresh(|| read_surface(&self.surface));
        if let Some(progress) = changed {
            self.changes.dispatch(&progress);
        }
    }

    /// Stop observing and release the surface listener
    pub fn stop(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
            debug!("scroll progress observation stopped");
        }
    }
}

impl Drop for Observation {
    fn drop(&mut self) {
        self.release();
    }
}
