use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};

use super::format_currency;
use crate::AppState;

pub struct HeaderWidget;

impl HeaderWidget {
    pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
        let title = format!("Storage Forage - {} providers", state.registry.len());

        let mut spans = vec![Span::styled(
            title,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )];

        if let Some(error) = &state.error_message {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(
                format!("Error: {}", error),
                Style::default().fg(Color::Red),
            ));
        } else if let Some(cheapest) = state.cheapest() {
            spans.push(Span::styled("  Cheapest: ", Style::default().fg(Color::White)));
            spans.push(Span::styled(
                format!(
                    "{} ({})",
                    cheapest.provider_name(),
                    format_currency(cheapest.total_cost())
                ),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ));
        }

        spans.push(Span::styled(
            format!("  {}", state.last_update.format("%H:%M:%S UTC")),
            Style::default().fg(Color::Gray),
        ));

        let header = Paragraph::new(vec![Line::from(spans)])
            .block(Block::bordered().title("Status"))
            .alignment(Alignment::Center);

        frame.render_widget(header, area);
    }
}
