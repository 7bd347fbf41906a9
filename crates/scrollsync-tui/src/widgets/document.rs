use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Text},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;

pub struct DocumentWidget;

impl DocumentWidget {
    /// Area left for text once the border is drawn
    pub fn inner_area(area: Rect) -> Rect {
        Block::default().borders(Borders::ALL).inner(area)
    }

    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let block = Block::default()
            .title(format!(" {} ", app.title))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.accent))
            .style(Style::default().bg(app.theme.bg0));

        let text: Text = app
            .surface
            .visible_lines()
            .into_iter()
            .map(Line::from)
            .collect::<Vec<_>>()
            .into();

        // Lines are pre-wrapped by the pager, so no Wrap here
        let paragraph = Paragraph::new(text)
            .block(block)
            .style(Style::default().fg(app.theme.fg0));
        frame.render_widget(paragraph, area);
    }
}
