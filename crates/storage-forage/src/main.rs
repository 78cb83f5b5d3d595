use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::Parser;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    DefaultTerminal, Frame,
};
use std::time::Duration;
use storage_forage_model::{
    LifetimeTotal, ProjectionEngine, ProjectionParameters, ProjectionPoint, ProjectionResult,
    ProviderRegistry,
};
use tokio::time::interval;
use tracing::{debug, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;
mod inputs;
mod report;
mod widgets;

use config::ForageConfig;
use inputs::{InputField, Inputs};
use widgets::*;

#[derive(Debug, Clone, PartialEq)]
pub enum PopupType {
    PeriodDetail,
    LifetimeStats,
}

#[derive(Parser, Debug)]
#[clap(author = "Red", version, about)]
struct Args {
    #[arg(short = 'v')]
    verbose: bool,

    /// Data stored today, in GB
    #[arg(long = "starting-volume", default_value_t = 50.0, value_parser = parse_volume)]
    starting_volume: f64,

    /// Data generated per year, in GB
    #[arg(long = "annual-growth", default_value_t = 10.0, value_parser = parse_volume)]
    annual_growth: f64,

    /// Years to plan for (0-100)
    #[arg(
        short = 'y',
        long = "years",
        default_value_t = 50,
        value_parser = clap::value_parser!(u32).range(0..=100)
    )]
    years: u32,

    /// Yearly growth of the annual volume, in percent
    #[arg(long = "inflation", default_value_t = 1.0, value_parser = parse_percentage)]
    inflation: f64,

    /// Frequently accessed share, in percent per month
    #[arg(long = "hot", default_value_t = 1.0, value_parser = parse_percentage)]
    hot: f64,

    /// Average file size, in MB
    #[arg(long = "file-size", default_value_t = 5.0, value_parser = parse_file_size)]
    file_size: f64,

    /// Comma-separated provider columns; remembered for later runs
    #[arg(short = 'p', long = "providers", value_delimiter = ',')]
    providers: Option<Vec<String>>,

    /// Print a yearly table instead of starting the interface
    #[arg(short = 'r', long = "report")]
    report: bool,

    /// Print the full projection as JSON
    #[arg(long = "json", conflicts_with = "report")]
    json: bool,
}

fn parse_volume(raw: &str) -> std::result::Result<f64, String> {
    InputField::StartingVolume.parse(raw)
}

fn parse_percentage(raw: &str) -> std::result::Result<f64, String> {
    InputField::Inflation.parse(raw)
}

fn parse_file_size(raw: &str) -> std::result::Result<f64, String> {
    InputField::FileSize.parse(raw)
}

impl Args {
    fn parameters(&self) -> ProjectionParameters {
        ProjectionParameters::new(
            self.starting_volume,
            self.annual_growth,
            self.inflation,
            self.years,
            self.hot,
            self.file_size,
        )
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .init();
}

pub struct AppState {
    pub inputs: Inputs,
    pub selected_input: InputField,
    pub registry: ProviderRegistry,
    pub engine: ProjectionEngine,
    pub result: Option<ProjectionResult>,
    pub error_message: Option<String>,
    pub last_update: DateTime<Utc>,
    pub cursor: usize,
    pub show_plan_labels: bool,
    pub active_popup: Option<PopupType>,
}

impl AppState {
    fn new(
        parameters: ProjectionParameters,
        registry: ProviderRegistry,
        show_plan_labels: bool,
    ) -> Self {
        let mut state = Self {
            inputs: Inputs::from_parameters(&parameters),
            selected_input: InputField::StartingVolume,
            registry,
            engine: ProjectionEngine::new(),
            result: None,
            error_message: None,
            last_update: Utc::now(),
            cursor: usize::MAX,
            show_plan_labels,
            active_popup: None,
        };
        state.recompute();
        state
    }

    fn recompute(&mut self) {
        let parameters = self.inputs.parameters();

        match self.engine.run(&parameters, &self.registry) {
            Ok(result) => {
                debug!(periods = result.len(), "projection updated");
                self.cursor = self.cursor.min(result.len().saturating_sub(1));
                self.result = Some(result);
                self.error_message = None;
            }
            Err(e) => {
                warn!(error = %e, "projection rejected");
                self.result = None;
                self.error_message = Some(e.to_string());
            }
        }

        self.last_update = Utc::now();
    }

    fn adjust_selected(&mut self, steps: i32) {
        self.inputs.adjust(self.selected_input, steps);
        self.recompute();
    }

    fn move_cursor(&mut self, delta: i64) {
        let len = self.result.as_ref().map(|r| r.len()).unwrap_or(0);
        if len == 0 {
            self.cursor = 0;
            return;
        }
        let target = (self.cursor as i64 + delta).clamp(0, len as i64 - 1);
        self.cursor = target as usize;
    }

    pub fn current_point(&self) -> Option<&ProjectionPoint> {
        self.result.as_ref().and_then(|r| r.series().get(self.cursor))
    }

    pub fn cheapest(&self) -> Option<&LifetimeTotal> {
        self.result.as_ref().and_then(|r| r.cheapest_provider())
    }

    fn toggle_popup(&mut self, popup: PopupType) {
        self.active_popup = if self.active_popup.as_ref() == Some(&popup) {
            None
        } else {
            Some(popup)
        };
    }
}

pub struct App {
    state: AppState,
    exit: bool,
}

impl App {
    pub fn new(state: AppState) -> Self {
        Self { state, exit: false }
    }

    pub async fn run(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        let mut tick_interval = interval(Duration::from_millis(100));

        loop {
            tick_interval.tick().await;
            terminal.draw(|frame| self.draw(frame))?;

            while event::poll(Duration::from_millis(0))? {
                let event = event::read()?;
                self.handle_event(event);
            }

            if self.exit {
                break;
            }
        }

        Ok(())
    }

    fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let totals_height = if self.state.show_plan_labels { 5 } else { 4 };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(6),
                Constraint::Min(10),
                Constraint::Length(totals_height),
                Constraint::Length(1),
            ])
            .split(area);

        HeaderWidget::render(frame, chunks[0], &self.state);
        InputGaugesWidget::render(frame, chunks[1], &self.state);
        ChartsWidget::render(frame, chunks[2], &self.state);
        TotalsWidget::render(frame, chunks[3], &self.state);
        ShortcutsWidget::render(frame, chunks[4], &self.state);

        match &self.state.active_popup {
            Some(PopupType::PeriodDetail) => {
                PopupWidget::render(frame, area, &self.state);
            }
            Some(PopupType::LifetimeStats) => {
                LifetimePopupWidget::render(frame, area, &self.state);
            }
            None => {}
        }
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key_event) = event {
            if key_event.kind != KeyEventKind::Press {
                return;
            }
            let state = &mut self.state;
            match key_event.code {
                KeyCode::Char('q') => self.exit = true,
                KeyCode::Up => state.selected_input = state.selected_input.previous(),
                KeyCode::Down | KeyCode::Tab => {
                    state.selected_input = state.selected_input.next()
                }
                KeyCode::Left => state.adjust_selected(-1),
                KeyCode::Right => state.adjust_selected(1),
                KeyCode::PageDown => state.adjust_selected(-10),
                KeyCode::PageUp => state.adjust_selected(10),
                KeyCode::Char('[') => state.move_cursor(-1),
                KeyCode::Char(']') => state.move_cursor(1),
                KeyCode::Char('{') => state.move_cursor(-12),
                KeyCode::Char('}') => state.move_cursor(12),
                KeyCode::Char('p') => state.toggle_popup(PopupType::PeriodDetail),
                KeyCode::Char('s') => state.toggle_popup(PopupType::LifetimeStats),
                KeyCode::Char('l') => state.show_plan_labels = !state.show_plan_labels,
                KeyCode::Esc => state.active_popup = None,
                _ => {}
            }
        }
    }
}

/// Applies `--providers` to the stored preferences, saving them only once
/// every name resolves.
fn resolve_config(args: &Args) -> Result<ForageConfig> {
    let config_path = config::get_config_path();
    let mut config = config::load_config(&config_path).unwrap_or_else(|e| {
        warn!(error = %e, "ignoring unreadable config");
        ForageConfig::default()
    });

    if let Some(providers) = &args.providers {
        config.providers = providers.iter().map(|p| p.trim().to_string()).collect();
        config.registry()?;
        if let Err(e) = config::save_config(&config_path, &config) {
            warn!(error = %e, path = %config_path.display(), "could not save config");
        }
    }

    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = resolve_config(&args)?;
    let registry = config.registry()?;
    let parameters = args.parameters();
    info!(providers = registry.len(), ?parameters, "starting projection");

    if args.report || args.json {
        let result = ProjectionEngine::new().run(&parameters, &registry)?;
        if args.json {
            println!("{}", report::render_json(&result)?);
        } else {
            print!("{}", report::render_table(&result)?);
            if config.show_plan_labels {
                print!("\n{}", report::render_final_plans(&result)?);
            }
        }
        return Ok(());
    }

    let mut terminal = ratatui::init();
    let mut app = App::new(AppState::new(parameters, registry, config.show_plan_labels));

    let result = app.run(&mut terminal).await;

    ratatui::restore();

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyModifiers};

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn app() -> App {
        let state = AppState::new(
            ProjectionParameters::new(50.0, 10.0, 0.0, 2, 1.0, 5.0),
            ProviderRegistry::standard().clone(),
            true,
        );
        App::new(state)
    }

    #[test]
    fn test_initial_cursor_is_last_period() {
        let app = app();
        assert_eq!(app.state.cursor, 23);
        assert!(app.state.current_point().is_some());
    }

    #[test]
    fn test_adjust_recomputes() {
        let mut app = app();
        app.handle_event(key(KeyCode::Down));
        app.handle_event(key(KeyCode::Down));
        app.handle_event(key(KeyCode::Down));
        assert_eq!(app.state.selected_input, InputField::Horizon);

        app.handle_event(key(KeyCode::Left));
        assert_eq!(app.state.result.as_ref().unwrap().len(), 12);
        assert_eq!(app.state.cursor, 11);
    }

    #[test]
    fn test_zero_horizon_keeps_cursor_in_range() {
        let mut app = app();
        app.state.selected_input = InputField::Horizon;
        app.handle_event(key(KeyCode::PageDown));

        assert!(app.state.result.as_ref().unwrap().is_empty());
        assert!(app.state.current_point().is_none());
        app.handle_event(key(KeyCode::Char(']')));
        assert_eq!(app.state.cursor, 0);
    }

    #[test]
    fn test_cursor_moves_within_series() {
        let mut app = app();
        app.handle_event(key(KeyCode::Char('{')));
        assert_eq!(app.state.cursor, 11);
        app.handle_event(key(KeyCode::Char('}')));
        app.handle_event(key(KeyCode::Char('}')));
        assert_eq!(app.state.cursor, 23);
    }

    #[test]
    fn test_popup_toggles() {
        let mut app = app();
        app.handle_event(key(KeyCode::Char('p')));
        assert_eq!(app.state.active_popup, Some(PopupType::PeriodDetail));
        app.handle_event(key(KeyCode::Char('s')));
        assert_eq!(app.state.active_popup, Some(PopupType::LifetimeStats));
        app.handle_event(key(KeyCode::Char('s')));
        assert_eq!(app.state.active_popup, None);
        app.handle_event(key(KeyCode::Char('p')));
        app.handle_event(key(KeyCode::Esc));
        assert_eq!(app.state.active_popup, None);
    }

    #[test]
    fn test_quit() {
        let mut app = app();
        app.handle_event(key(KeyCode::Char('q')));
        assert!(app.exit);
    }

    #[test]
    fn test_args_defaults() {
        let args = Args::parse_from(["storage-forage"]);
        assert_eq!(args.parameters(), ProjectionParameters::default());
        assert!(args.providers.is_none());

        let args = Args::parse_from(["storage-forage", "-p", "Google One,Backblaze B2", "-r"]);
        assert_eq!(
            args.providers.unwrap(),
            vec!["Google One".to_string(), "Backblaze B2".to_string()]
        );
        assert!(Args::try_parse_from(["storage-forage", "--years", "101"]).is_err());
    }

    #[test]
    fn test_args_reject_out_of_range_values() {
        for (flag, value) in [
            ("--starting-volume", "1e21"),
            ("--annual-growth", "2000000"),
            ("--inflation", "500"),
            ("--hot", "101"),
            ("--file-size", "1e9"),
        ] {
            assert!(
                Args::try_parse_from(["storage-forage", flag, value]).is_err(),
                "{} {} should be rejected",
                flag,
                value
            );
        }

        let args = Args::try_parse_from([
            "storage-forage",
            "--starting-volume",
            "1048576",
            "--inflation",
            "100",
            "--file-size",
            "0.125",
        ])
        .unwrap();
        assert_eq!(args.parameters().starting_volume_gb(), 1_048_576.0);
        assert_eq!(args.parameters().inflation_rate_pct(), 100.0);
    }
}
