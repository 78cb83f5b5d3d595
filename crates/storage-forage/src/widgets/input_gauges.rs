use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Gauge},
    Frame,
};

use crate::inputs::InputField;
use crate::AppState;

pub struct InputGaugesWidget;

impl InputGaugesWidget {
    pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Length(3)])
            .split(area);

        for (row, fields) in InputField::ALL.chunks(3).enumerate() {
            let cells = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([
                    Constraint::Ratio(1, 3),
                    Constraint::Ratio(1, 3),
                    Constraint::Ratio(1, 3),
                ])
                .split(rows[row]);

            for (cell, field) in cells.iter().zip(fields) {
                Self::render_field(frame, *cell, state, *field);
            }
        }
    }

    fn render_field(frame: &mut Frame, area: Rect, state: &AppState, field: InputField) {
        let selected = state.selected_input == field;
        let block = if selected {
            Block::bordered()
                .title(field.label())
                .border_style(
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )
        } else {
            Block::bordered().title(field.label())
        };

        let value = state.inputs.get(field);
        let label = match field {
            InputField::Horizon => format!("{}", value as u32),
            InputField::FileSize => format!("{:.3}", value),
            _ => format!("{:.0}", value),
        };

        let gauge = Gauge::default()
            .block(block)
            .gauge_style(if selected {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::Blue)
            })
            .ratio(state.inputs.ratio(field))
            .label(label);

        frame.render_widget(gauge, area);
    }
}
