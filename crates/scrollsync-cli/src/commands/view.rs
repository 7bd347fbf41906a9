use std::io;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use crossterm::{
    cursor::Show,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout},
    Terminal,
};
use tracing::{info, warn};

use scrollsync_core::AppConfig;
use scrollsync_tui::{
    event::{AppEvent, EventHandler},
    input::handle_key_event,
    widgets::{DocumentWidget, StatusBarWidget},
    App,
};

pub fn run(config: &AppConfig, file: &Path) -> Result<()> {
    let text = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let title = file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.display().to_string());

    let mut app = App::new(title.clone(), &text, config.clone());
    let event_handler = EventHandler::new(config.pager.tick_rate_ms)
        .with_frame_rate(config.progress.frame_interval());

    // Setup terminal; the guard undoes whatever part of it succeeded
    let guard = TerminalGuard::enter(&title)?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let result = main_loop(&mut terminal, &mut app, &event_handler);
    finish(result, guard.restore())?;

    info!(progress = app.progress(), "pager closed");
    Ok(())
}

/// Raw mode plus alternate screen, restored on drop if not restored explicitly
struct TerminalGuard {
    active: bool,
}

impl TerminalGuard {
    fn enter(title: &str) -> Result<Self> {
        enable_raw_mode()?;
        let guard = Self { active: true };
        execute!(
            io::stdout(),
            EnterAlternateScreen,
            SetTitle(format!("scrollsync - {}", title))
        )?;
        Ok(guard)
    }

    /// Run every restore step, then report the first failure
    fn restore(mut self) -> Result<()> {
        self.active = false;
        let raw = disable_raw_mode();
        let screen = execute!(io::stdout(), LeaveAlternateScreen, Show);
        raw?;
        screen?;
        Ok(())
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if self.active {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen, Show);
        }
    }
}

/// The loop's own error wins over a failed restore
fn finish(result: Result<()>, restored: Result<()>) -> Result<()> {
    match (result, restored) {
        (Err(err), Err(restore_err)) => {
            warn!(error = %restore_err, "failed to restore terminal");
            Err(err)
        }
        (Err(err), Ok(())) => Err(err),
        (Ok(()), restored) => restored,
    }
}

fn main_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    event_handler: &EventHandler,
) -> Result<()> {
    loop {
        // Draw UI
        terminal.draw(|frame| {
            let size = frame.area();

            // Main layout: document + status bar
            let main_layout = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(1), Constraint::Length(1)])
                .split(size);

            let inner = DocumentWidget::inner_area(main_layout[0]);
            app.resize(inner.width, inner.height);

            DocumentWidget::render(frame, main_layout[0], app);
            StatusBarWidget::render(frame, main_layout[1], app);
        })?;

        if let Some(event) = event_handler.next(app.needs_frame())? {
            match event {
                AppEvent::Key(key) => {
                    let action = handle_key_event(key, app);
                    app.apply(action);
                }
                // Layout is recomputed on the next draw
                AppEvent::Resize(_, _) => {}
                AppEvent::Tick => app.tick(Instant::now()),
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn test_loop_error_wins_over_restore_error() {
        let err = finish(Err(anyhow!("draw failed")), Err(anyhow!("raw mode"))).unwrap_err();
        assert_eq!(err.to_string(), "draw failed");
    }

    #[test]
    fn test_restore_error_reported_after_clean_loop() {
        let err = finish(Ok(()), Err(anyhow!("raw mode"))).unwrap_err();
        assert_eq!(err.to_string(), "raw mode");
        assert!(finish(Ok(()), Ok(())).is_ok());
    }
}
