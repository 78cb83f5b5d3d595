use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph, Wrap},
    Frame,
};

use super::{centered_rect, format_currency, provider_color};
use crate::AppState;

/// Volume split and plan labels for the month under the cursor.
pub struct PopupWidget;

impl PopupWidget {
    pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
        let popup_area = centered_rect(70, 70, area);

        // Clear the area first
        frame.render_widget(Clear, popup_area);

        let detail_text = Self::create_period_detail_text(state);

        let popup = Paragraph::new(detail_text)
            .block(
                Block::bordered()
                    .title("Month Breakdown")
                    .title_alignment(Alignment::Center)
                    .style(Style::default().fg(Color::Cyan)),
            )
            .wrap(Wrap { trim: true })
            .alignment(Alignment::Left);

        frame.render_widget(popup, popup_area);
    }

    fn create_period_detail_text(state: &AppState) -> Vec<Line<'static>> {
        let Some(point) = state.current_point() else {
            return vec![
                Line::from(Span::styled(
                    "No month selected",
                    Style::default().fg(Color::Red),
                )),
                Self::close_hint(),
            ];
        };
        let period = point.period();

        let mut detail_text = vec![
            Line::from(vec![
                Span::styled("Month: ", Style::default().fg(Color::White)),
                Span::styled(
                    format!(
                        "{} (#{})",
                        period.calendar_label(),
                        period.period_index() + 1
                    ),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                Span::styled("Total: ", Style::default().fg(Color::White)),
                Span::styled(
                    format!("{:.1} GB", period.total_volume_gb()),
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled("  Hot: ", Style::default().fg(Color::White)),
                Span::styled(
                    format!("{:.2} GB", period.hot_volume_gb()),
                    Style::default().fg(Color::Red),
                ),
                Span::styled("  Cold: ", Style::default().fg(Color::White)),
                Span::styled(
                    format!("{:.1} GB", period.cold_volume_gb()),
                    Style::default().fg(Color::Blue),
                ),
            ]),
            Line::from(" "),
        ];

        for (i, quote) in point.quotes().iter().enumerate() {
            detail_text.push(Line::from(vec![
                Span::styled(
                    format!("{}: ", quote.provider_name()),
                    Style::default()
                        .fg(provider_color(i))
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("{}/month", format_currency(quote.monthly_cost())),
                    Style::default().fg(Color::Green),
                ),
            ]));
            detail_text.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(
                    quote.plan_label().to_string(),
                    Style::default().fg(Color::White),
                ),
            ]));
        }

        detail_text.push(Line::from(" "));
        detail_text.push(Self::close_hint());

        detail_text
    }

    fn close_hint() -> Line<'static> {
        Line::from(vec![
            Span::styled("Press ", Style::default().fg(Color::Gray)),
            Span::styled(
                "p",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" to close, ", Style::default().fg(Color::Gray)),
            Span::styled(
                "[ ]",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" to change month", Style::default().fg(Color::Gray)),
        ])
    }
}
