use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Cell, Paragraph, Row, Table},
    Frame,
};

use super::{format_currency, provider_color};
use crate::AppState;

/// One-row summary of lifetime cost per provider, plus the plan each provider
/// lands on at the cursor month when plan labels are enabled.
pub struct TotalsWidget;

impl TotalsWidget {
    pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
        let Some(result) = &state.result else {
            let empty = Paragraph::new(Line::from("No projection"))
                .block(Block::bordered().title("Lifetime cost"));
            frame.render_widget(empty, area);
            return;
        };

        let cheapest = state.cheapest().map(|t| t.provider_name().to_string());

        let header = Row::new(result.provider_names().enumerate().map(|(i, name)| {
            Cell::from(name.to_string()).style(
                Style::default()
                    .fg(provider_color(i))
                    .add_modifier(Modifier::BOLD),
            )
        }));

        let totals = Row::new(result.lifetime_totals().iter().map(|total| {
            let style = if cheapest.as_deref() == Some(total.provider_name()) {
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            Cell::from(format_currency(total.total_cost())).style(style)
        }));

        let mut rows = vec![totals];
        if state.show_plan_labels {
            if let Some(point) = state.current_point() {
                rows.push(Row::new(point.quotes().iter().map(|quote| {
                    Cell::from(quote.plan_label().to_string())
                        .style(Style::default().fg(Color::Gray))
                })));
            }
        }

        let columns = result.lifetime_totals().len().max(1) as u32;
        let widths = (0..columns).map(|_| Constraint::Ratio(1, columns));

        let title = format!(
            "Lifetime cost over {} years",
            result.parameters().horizon_years()
        );
        let table = Table::new(rows, widths)
            .header(header)
            .column_spacing(1)
            .block(Block::bordered().title(title));

        frame.render_widget(table, area);
    }
}
