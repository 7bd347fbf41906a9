//! Text document as a scroll surface
//!
//! Offsets and extents are measured in wrapped display lines. The viewport is
//! the number of rows the document area has on screen.

use std::cell::{Cell, RefCell};
use std::time::Instant;

use scrollsync_core::{ListenerRegistry, ScrollMetrics, ScrollSurface, SurfaceEvent};
use tracing::debug;
use unicode_width::UnicodeWidthChar;

const TAB_WIDTH: usize = 4;

/// Wrapped text document with a line-based scroll position
#[derive(Debug)]
pub struct PagerSurface {
    source: Vec<String>,
    lines: RefCell<Vec<String>>,
    width: Cell<u16>,
    viewport_height: Cell<u16>,
    offset: Cell<usize>,
    events: ListenerRegistry<SurfaceEvent>,
}

impl PagerSurface {
    /// Create a pager for `text`; call `set_viewport` once the area is known
    pub fn new(text: &str) -> Self {
        let source: Vec<String> = text.lines().map(|l| l.replace('\t', &" ".repeat(TAB_WIDTH))).collect();
        let lines = source.clone();
        Self {
            source,
            lines: RefCell::new(lines),
            width: Cell::new(0),
            viewport_height: Cell::new(0),
            offset: Cell::new(0),
            events: ListenerRegistry::new(),
        }
    }

    pub fn line_count(&self) -> usize {
        self.lines.borrow().len()
    }

    pub fn offset(&self) -> usize {
        self.offset.get()
    }

    pub fn viewport_height(&self) -> u16 {
        self.viewport_height.get()
    }

    /// Largest offset that still fills the viewport
    pub fn max_offset(&self) -> usize {
        self.line_count()
            .saturating_sub(self.viewport_height.get() as usize)
    }

    /// Lines currently inside the viewport
    pub fn visible_lines(&self) -> Vec<String> {
        let lines = self.lines.borrow();
        let start = self.offset.get().min(lines.len());
        let end = (start + self.viewport_height.get() as usize).min(lines.len());
        lines[start..end].to_vec()
    }

    /// Update the document area; rewraps when the width changes
    ///
    /// Dispatches `Resize` when anything changed, plus `Scroll` if the offset
    /// had to be pulled back into range.
    pub fn set_viewport(&self, width: u16, height: u16) {
        let width_changed = self.width.get() != width;
        let height_changed = self.viewport_height.get() != height;
        if !width_changed && !height_changed {
            return;
        }

        if width_changed {
            self.width.set(width);
            *self.lines.borrow_mut() = wrap_lines(&self.source, width as usize);
        }
        self.viewport_height.set(height);
        debug!(width, height, lines = self.line_count(), "pager viewport changed");

        let previous = self.offset.get();
        let clamped = previous.min(self.max_offset());
        self.offset.set(clamped);

        self.events.dispatch(&SurfaceEvent::Resize);
        if clamped != previous {
            self.events.dispatch(&SurfaceEvent::Scroll);
        }
    }

    /// Move to `line`, clamped to the scrollable range
    pub fn scroll_to(&self, line: usize) {
        let target = line.min(self.max_offset());
        if target == self.offset.get() {
            return;
        }
        self.offset.set(target);
        self.events.dispatch(&SurfaceEvent::Scroll);
    }

    /// Scroll by a delta amount (positive = down, negative = up)
    pub fn scroll_by(&self, delta: i64) {
        let target = (self.offset.get() as i64 + delta).max(0) as usize;
        self.scroll_to(target);
    }

    pub fn half_page(&self) -> i64 {
        (self.viewport_height.get() / 2).max(1) as i64
    }

    pub fn page(&self) -> i64 {
        self.viewport_height.get().max(1) as i64
    }

    pub fn scroll_to_top(&self) {
        self.scroll_to(0);
    }

    pub fn scroll_to_bottom(&self) {
        self.scroll_to(self.max_offset());
    }

    /// Signal a rendered frame
    pub fn frame(&self, now: Instant) {
        self.events.dispatch(&SurfaceEvent::Frame(now));
    }
}

impl ScrollSurface for PagerSurface {
    fn metrics(&self) -> Option<ScrollMetrics> {
        Some(ScrollMetrics::new(
            self.offset.get() as f64,
            self.line_count() as f64,
            self.viewport_height.get() as f64,
        ))
    }

    fn events(&self) -> &ListenerRegistry<SurfaceEvent> {
        &self.events
    }
}

fn wrap_lines(source: &[String], width: usize) -> Vec<String> {
    source.iter().flat_map(|line| wrap_line(line, width)).collect()
}

/// Break `line` into rows no wider than `width` display columns
///
/// Breaks at the last space when one exists in the row, otherwise mid-word.
/// A zero width leaves the line untouched.
fn wrap_line(line: &str, width: usize) -> Vec<String> {
    if width == 0 || line.is_empty() {
        return vec![line.to_string()];
    }

    let mut rows = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    for ch in line.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if current_width + ch_width > width && !current.is_empty() {
            match current.rfind(' ') {
                Some(pos) if pos > 0 => {
                    let rest = current.split_off(pos + 1);
                    rows.push(current.trim_end().to_string());
                    current_width = rest.chars().map(|c| c.width().unwrap_or(0)).sum();
                    current = rest;
                }
                _ => {
                    rows.push(std::mem::take(&mut current));
                    current_width = 0;
                }
            }
        }
        current.push(ch);
        current_width += ch_width;
    }

    if !current.is_empty() {
        rows.push(current);
    }
    rows
}
