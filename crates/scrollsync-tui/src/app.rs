use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

use scrollsync_core::{progress_percent, AppConfig, Observation, ProgressTracker, Subscription};
use tracing::trace;

use crate::input::Action;
use crate::pager::PagerSurface;
use crate::theme::Theme;

/// Pager application state
pub struct App {
    pub config: AppConfig,
    pub theme: Theme,
    pub title: String,
    pub surface: Rc<PagerSurface>,
    pub should_quit: bool,
    /// First 'g' of a 'gg' sequence seen
    pub pending_g: bool,
    /// Number of progress change notifications received
    changes: Rc<Cell<u64>>,
    // Declared before `observation` so it is released first
    _change_subscription: Subscription,
    observation: Observation,
}

impl App {
    pub fn new(title: impl Into<String>, text: &str, config: AppConfig) -> Self {
        let surface = Rc::new(PagerSurface::new(text));
        let observation = ProgressTracker::new(config.progress.clone()).observe(&surface);

        let changes = Rc::new(Cell::new(0));
        let counter = Rc::clone(&changes);
        let change_subscription = observation.on_change(move |progress| {
            counter.set(counter.get() + 1);
            trace!(progress, "pager progress changed");
        });

        Self {
            config,
            theme: Theme::default(),
            title: title.into(),
            surface,
            should_quit: false,
            pending_g: false,
            changes,
            _change_subscription: change_subscription,
            observation,
        }
    }

    /// Reported progress in [0, 1]
    pub fn progress(&self) -> f64 {
        self.observation.progress()
    }

    pub fn percent(&self) -> u8 {
        progress_percent(self.progress())
    }

    pub fn change_count(&self) -> u64 {
        self.changes.get()
    }

    /// True while smoothing or a frame-synced recompute is pending
    pub fn needs_frame(&self) -> bool {
        !self.observation.is_settled()
    }

    /// Document area changed size
    pub fn resize(&mut self, width: u16, height: u16) {
        self.surface.set_viewport(width, height);
    }

    /// Animation frame boundary
    pub fn tick(&mut self, now: Instant) {
        self.surface.frame(now);
    }

    pub fn apply(&mut self, action: Action) {
        if action != Action::PendingG {
            self.pending_g = false;
        }

        let lines = self.config.pager.scroll_lines.max(1) as i64;
        match action {
            Action::Quit => self.should_quit = true,
            Action::LineDown => self.surface.scroll_by(lines),
            Action::LineUp => self.surface.scroll_by(-lines),
            Action::ScrollHalfPageDown => self.surface.scroll_by(self.surface.half_page()),
            Action::ScrollHalfPageUp => self.surface.scroll_by(-self.surface.half_page()),
            Action::ScrollPageDown => self.surface.scroll_by(self.surface.page()),
            Action::ScrollPageUp => self.surface.scroll_by(-self.surface.page()),
            Action::JumpToTop => self.surface.scroll_to_top(),
            Action::JumpToBottom => self.surface.scroll_to_bottom(),
            Action::PendingG => self.pending_g = true,
            Action::Refresh => self.observation.refresh(),
            Action::None => {}
        }
    }
}
