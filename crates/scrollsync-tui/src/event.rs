use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};

/// Event handler for terminal events
///
/// Polls at the idle tick rate, or at the frame rate while progress is
/// still catching up so smoothing gets its frames.
pub struct EventHandler {
    tick_rate: Duration,
    frame_rate: Duration,
}

impl EventHandler {
    pub fn new(tick_rate_ms: u64) -> Self {
        let tick_rate = Duration::from_millis(tick_rate_ms.max(1));
        Self {
            tick_rate,
            frame_rate: tick_rate,
        }
    }

    /// Poll interval used while animating; never slower than the tick rate
    pub fn with_frame_rate(mut self, frame_rate: Duration) -> Self {
        self.frame_rate = frame_rate.max(Duration::from_millis(1)).min(self.tick_rate);
        self
    }

    pub fn poll_timeout(&self, animating: bool) -> Duration {
        if animating {
            self.frame_rate
        } else {
            self.tick_rate
        }
    }

    /// Poll for the next event
    pub fn next(&self, animating: bool) -> Result<Option<AppEvent>> {
        if event::poll(self.poll_timeout(animating))? {
            match event::read()? {
                Event::Key(key) => {
                    // Only handle key press events, ignore release events
                    // (crossterm 0.27+ sends release events on some systems)
                    if key.kind == KeyEventKind::Press {
                        Ok(Some(AppEvent::Key(key)))
                    } else {
                        Ok(None)
                    }
                }
                Event::Resize(w, h) => Ok(Some(AppEvent::Resize(w, h))),
                _ => Ok(None),
            }
        } else {
            Ok(Some(AppEvent::Tick))
        }
    }
}

/// Application events
#[derive(Debug)]
pub enum AppEvent {
    /// A key was pressed
    Key(KeyEvent),
    /// Terminal was resized
    Resize(u16, u16),
    /// Tick event; doubles as the animation frame
    Tick,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poll_timeout_follows_animation() {
        let handler = EventHandler::new(250).with_frame_rate(Duration::from_millis(16));
        assert_eq!(handler.poll_timeout(false), Duration::from_millis(250));
        assert_eq!(handler.poll_timeout(true), Duration::from_millis(16));
    }

    #[test]
    fn test_frame_rate_never_slower_than_tick() {
        let handler = EventHandler::new(16).with_frame_rate(Duration::from_millis(100));
        assert_eq!(handler.poll_timeout(true), Duration::from_millis(16));

        let handler = EventHandler::new(0).with_frame_rate(Duration::ZERO);
        assert_eq!(handler.poll_timeout(true), Duration::from_millis(1));
        assert_eq!(handler.poll_timeout(false), Duration::from_millis(1));
    }
}
