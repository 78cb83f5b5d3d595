use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::AppState;

pub struct ShortcutsWidget;

impl ShortcutsWidget {
    pub fn render(frame: &mut Frame, area: Rect, _state: &AppState) {
        let keys = [
            ("q", " quit, "),
            ("↑↓", " select, "),
            ("←→", " adjust, "),
            ("[ ]", " month, "),
            ("p", " plans, "),
            ("s", " totals, "),
            ("l", " labels"),
        ];

        let mut spans = vec![Span::styled("Press ", Style::default().fg(Color::Gray))];
        for (key, action) in keys {
            spans.push(Span::styled(
                key,
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::styled(action, Style::default().fg(Color::Gray)));
        }

        let shortcuts = Paragraph::new(vec![Line::from(spans)]).alignment(Alignment::Center);

        frame.render_widget(shortcuts, area);
    }
}
