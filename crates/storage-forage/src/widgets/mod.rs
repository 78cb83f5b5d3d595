//! TUI widget modules

pub mod charts;
pub mod header;
pub mod input_gauges;
pub mod lifetime_popup;
pub mod popup;
pub mod shortcuts;
pub mod totals;

pub use charts::*;
pub use header::*;
pub use input_gauges::*;
pub use lifetime_popup::*;
pub use popup::*;
pub use shortcuts::*;
pub use totals::*;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Color;

pub const PROVIDER_COLORS: [Color; 6] = [
    Color::Yellow,
    Color::Green,
    Color::Magenta,
    Color::Red,
    Color::Blue,
    Color::LightCyan,
];

pub fn provider_color(index: usize) -> Color {
    PROVIDER_COLORS[index % PROVIDER_COLORS.len()]
}

pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Above this, cents no longer fit the grouped form.
const SCIENTIFIC_ABOVE: f64 = 1e15;

/// `$1,234.56` style amounts; very large or non-finite amounts use
/// scientific notation instead.
pub fn format_currency(amount: f64) -> String {
    if !amount.is_finite() || amount.abs() >= SCIENTIFIC_ABOVE {
        return format!("${:.2e}", amount);
    }
    let cents = (amount * 100.0).round() as u64;
    let dollars = (cents / 100).to_string();
    let mut grouped = String::new();
    for (i, c) in dollars.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    let dollars: String = grouped.chars().rev().collect();
    format!("${}.{:02}", dollars, cents % 100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(2.346), "$2.35");
        assert_eq!(format_currency(1234567.891), "$1,234,567.89");
    }

    #[test]
    fn test_format_currency_huge_amounts() {
        assert_eq!(format_currency(999_999_999_999.0), "$999,999,999,999.00");
        assert_eq!(format_currency(1.234e30), "$1.23e30");
        assert_eq!(format_currency(4.0e20), "$4.00e20");
        assert_eq!(format_currency(f64::INFINITY), "$inf");
    }

    #[test]
    fn test_provider_colors_wrap() {
        assert_eq!(provider_color(0), provider_color(PROVIDER_COLORS.len()));
    }
}
