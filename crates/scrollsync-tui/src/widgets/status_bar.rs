use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Gauge, Paragraph},
    Frame,
};

use crate::app::App;

const GAUGE_WIDTH: u16 = 24;

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let show_gauge = app.config.pager.show_gauge && area.width > GAUGE_WIDTH * 2;
        let chunks = if show_gauge {
            Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Min(1), Constraint::Length(GAUGE_WIDTH)])
                .split(area)
        } else {
            Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Min(1)])
                .split(area)
        };

        let status_text = format!(
            " {} | line {}/{} | {}%",
            app.title,
            app.surface.offset() + 1,
            app.surface.line_count().max(1),
            app.percent()
        );
        let help_hint = " q:quit j/k:line ^d/^u:half gg/G:ends ";

        let line = Line::from(vec![
            Span::styled(
                status_text,
                Style::default().fg(app.theme.fg0).bg(app.theme.bg2),
            ),
            Span::styled(
                help_hint,
                Style::default().fg(app.theme.grey2).bg(app.theme.bg2),
            ),
        ]);
        frame.render_widget(
            Paragraph::new(line).style(Style::default().bg(app.theme.bg2)),
            chunks[0],
        );

        if show_gauge {
            let gauge = Gauge::default()
                .gauge_style(Style::default().fg(app.theme.progress).bg(app.theme.grey0))
                .ratio(app.progress().clamp(0.0, 1.0))
                .label(format!("{}%", app.percent()));
            frame.render_widget(gauge, chunks[1]);
        }
    }
}
