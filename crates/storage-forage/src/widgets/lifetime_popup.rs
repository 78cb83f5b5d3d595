use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph},
    Frame,
};

use super::{centered_rect, format_currency};
use crate::AppState;

pub struct LifetimePopupWidget;

impl LifetimePopupWidget {
    pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
        let popup_area = centered_rect(60, 70, area);

        // Clear the area first
        frame.render_widget(Clear, popup_area);

        let lifetime_text = Self::create_lifetime_stats_text(state);

        let popup = Paragraph::new(lifetime_text)
            .block(
                Block::bordered()
                    .title("Lifetime Ranking")
                    .title_alignment(Alignment::Center)
                    .style(Style::default().fg(Color::Cyan)),
            )
            .alignment(Alignment::Left);

        frame.render_widget(popup, popup_area);
    }

    fn create_lifetime_stats_text(state: &AppState) -> Vec<Line<'static>> {
        let Some(result) = &state.result else {
            return vec![Line::from(Span::styled(
                "No projection",
                Style::default().fg(Color::Red),
            ))];
        };

        let months = result.len();
        let mut lifetime_text = vec![
            Line::from(vec![
                Span::styled("Horizon: ", Style::default().fg(Color::White)),
                Span::styled(
                    format!(
                        "{} years ({} months)",
                        result.parameters().horizon_years(),
                        months
                    ),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                Span::styled("Final volume: ", Style::default().fg(Color::White)),
                Span::styled(
                    result
                        .final_period()
                        .map(|p| format!("{:.1} GB", p.total_volume_gb()))
                        .unwrap_or_else(|| "N/A".to_string()),
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(" "),
        ];

        let mut ranked: Vec<_> = result.lifetime_totals().iter().collect();
        ranked.sort_by(|a, b| a.total_cost().total_cmp(&b.total_cost()));
        let best = ranked.first().map(|t| t.total_cost()).unwrap_or(0.0);

        for (rank, total) in ranked.iter().enumerate() {
            let average = if months > 0 {
                total.total_cost() / months as f64
            } else {
                0.0
            };
            let extra = total.total_cost() - best;

            lifetime_text.push(Line::from(vec![
                Span::styled(
                    format!("{}. {}: ", rank + 1, total.provider_name()),
                    Style::default().fg(Color::White),
                ),
                Span::styled(
                    format_currency(total.total_cost()),
                    Style::default()
                        .fg(if rank == 0 { Color::Green } else { Color::Yellow })
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!(" (avg {}/month", format_currency(average)),
                    Style::default().fg(Color::Gray),
                ),
                Span::styled(
                    if rank == 0 {
                        ")".to_string()
                    } else {
                        format!(", +{})", format_currency(extra))
                    },
                    Style::default().fg(Color::Gray),
                ),
            ]));
        }

        lifetime_text.extend(vec![
            Line::from(" "),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "s",
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to close", Style::default().fg(Color::Gray)),
            ]),
        ]);

        lifetime_text
    }
}
