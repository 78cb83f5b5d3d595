use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Chart, Dataset, GraphType, Paragraph},
    Frame,
};
use storage_forage_model::ProjectionResult;

use super::provider_color;
use crate::AppState;

pub struct ChartsWidget;

impl ChartsWidget {
    pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
        let Some(result) = state.result.as_ref().filter(|r| !r.is_empty()) else {
            Self::render_empty(frame, area, state);
            return;
        };

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(area);

        Self::render_volume(frame, chunks[0], state, result);
        Self::render_costs(frame, chunks[1], state, result);
    }

    fn render_volume(frame: &mut Frame, area: Rect, state: &AppState, result: &ProjectionResult) {
        let total: Vec<(f64, f64)> = result
            .series()
            .iter()
            .map(|p| (years(p.period().period_index()), p.period().total_volume_gb()))
            .collect();
        let hot: Vec<(f64, f64)> = result
            .series()
            .iter()
            .map(|p| (years(p.period().period_index()), p.period().hot_volume_gb()))
            .collect();
        let cursor: Vec<(f64, f64)> = state
            .current_point()
            .map(|p| vec![(years(p.period().period_index()), p.period().total_volume_gb())])
            .unwrap_or_default();

        let max_volume = total.iter().map(|(_, v)| *v).fold(0.0, f64::max);

        let datasets = vec![
            Dataset::default()
                .name("Total")
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(Color::Cyan))
                .data(&total),
            Dataset::default()
                .name("Hot")
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(Color::Red))
                .data(&hot),
            Dataset::default()
                .marker(symbols::Marker::Dot)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(Color::White))
                .data(&cursor),
        ];

        let chart = Chart::new(datasets)
            .block(Block::bordered().title("Volume (GB)"))
            .x_axis(x_axis(state, result))
            .y_axis(y_axis(max_volume, |v| format!("{:.0}", v)));

        frame.render_widget(chart, area);
    }

    fn render_costs(frame: &mut Frame, area: Rect, state: &AppState, result: &ProjectionResult) {
        let names: Vec<&str> = result.provider_names().collect();
        let series: Vec<Vec<(f64, f64)>> = names
            .iter()
            .map(|name| {
                result
                    .series()
                    .iter()
                    .filter_map(|p| {
                        p.quote(name)
                            .map(|q| (years(p.period().period_index()), q.monthly_cost()))
                    })
                    .collect()
            })
            .collect();

        let max_cost = series
            .iter()
            .flatten()
            .map(|(_, cost)| *cost)
            .fold(0.0, f64::max);

        let datasets = names
            .iter()
            .zip(&series)
            .enumerate()
            .map(|(i, (name, points))| {
                Dataset::default()
                    .name(name.to_string())
                    .marker(symbols::Marker::Braille)
                    .graph_type(GraphType::Line)
                    .style(Style::default().fg(provider_color(i)))
                    .data(points)
            })
            .collect::<Vec<_>>();

        let chart = Chart::new(datasets)
            .block(Block::bordered().title("Monthly cost (USD)"))
            .x_axis(x_axis(state, result))
            .y_axis(y_axis(max_cost, |v| format!("${:.0}", v)));

        frame.render_widget(chart, area);
    }

    fn render_empty(frame: &mut Frame, area: Rect, state: &AppState) {
        let message = match &state.error_message {
            Some(error) => Span::styled(error.clone(), Style::default().fg(Color::Red)),
            None => Span::styled(
                "Nothing to plot: set a horizon of at least one year",
                Style::default().fg(Color::Gray),
            ),
        };

        let paragraph = Paragraph::new(vec![Line::from(" "), Line::from(message)])
            .block(Block::bordered().title("Projection"))
            .alignment(Alignment::Center);

        frame.render_widget(paragraph, area);
    }
}

fn years(period_index: usize) -> f64 {
    period_index as f64 / 12.0
}

fn x_axis<'a>(state: &AppState, result: &ProjectionResult) -> Axis<'a> {
    let horizon = result.parameters().horizon_years();
    let start = state.engine.epoch_year();
    let labels = vec![
        start.to_string(),
        (start + horizon as i32 / 2).to_string(),
        (start + horizon as i32).to_string(),
    ];

    Axis::default()
        .style(Style::default().fg(Color::Gray))
        .bounds([0.0, horizon as f64])
        .labels(labels)
}

fn y_axis<'a>(max: f64, format: impl Fn(f64) -> String) -> Axis<'a> {
    let upper = if max > 0.0 { max * 1.05 } else { 1.0 };

    Axis::default()
        .style(Style::default().fg(Color::Gray))
        .bounds([0.0, upper])
        .labels(vec![format(0.0), format(upper / 2.0), format(upper)])
}
