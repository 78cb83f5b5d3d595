use crate::data_structures::{
    CostQuote, LifetimeTotal, ProjectionParameters, ProjectionPoint, ProjectionResult,
};
use crate::error::Result;
use crate::growth::{default_epoch_year, GrowthSimulator};
use crate::registry::ProviderRegistry;

/// Runs the growth simulation and prices every period with every provider.
#[derive(Debug, Clone)]
pub struct ProjectionEngine {
    epoch_year: i32,
}

impl ProjectionEngine {
    pub fn new() -> Self {
        Self {
            epoch_year: default_epoch_year(),
        }
    }

    pub fn with_epoch_year(epoch_year: i32) -> Self {
        Self { epoch_year }
    }

    pub fn epoch_year(&self) -> i32 {
        self.epoch_year
    }

    pub fn run(
        &self,
        parameters: &ProjectionParameters,
        registry: &ProviderRegistry,
    ) -> Result<ProjectionResult> {
        parameters.validate()?;

        let simulator = GrowthSimulator::with_epoch_year(*parameters, self.epoch_year);
        let file_size = parameters.avg_file_size_mb();

        let mut totals: Vec<f64> = vec![0.0; registry.len()];
        let mut series = Vec::with_capacity(parameters.total_periods());

        for period in simulator.periods() {
            let quotes: Vec<CostQuote> = registry
                .iter()
                .zip(totals.iter_mut())
                .map(|((name, provider), total)| {
                    let (cost, label) = provider
                        .quote(period.total_volume_gb(), period.hot_volume_gb(), file_size)
                        .into_parts();
                    *total += cost;
                    CostQuote::new(name.to_string(), cost, label)
                })
                .collect();

            series.push(ProjectionPoint::new(period, quotes));
        }

        let lifetime_totals = registry
            .iter()
            .zip(totals)
            .map(|((name, _), total)| LifetimeTotal::new(name.to_string(), total))
            .collect();

        Ok(ProjectionResult::new(*parameters, series, lifetime_totals))
    }
}

impl Default for ProjectionEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Projects with the standard providers, labelling periods from January of
/// next year.
pub fn project(
    starting_volume_gb: f64,
    annual_growth_gb: f64,
    horizon_years: u32,
    inflation_rate_pct: f64,
    hot_data_pct: f64,
    avg_file_size_mb: f64,
) -> Result<ProjectionResult> {
    let parameters = ProjectionParameters::new(
        starting_volume_gb,
        annual_growth_gb,
        inflation_rate_pct,
        horizon_years,
        hot_data_pct,
        avg_file_size_mb,
    );
    ProjectionEngine::new().run(&parameters, ProviderRegistry::standard())
}
