use crate::error::{ForageError, Result};
use serde::Serialize;

pub const MAX_HORIZON_YEARS: u32 = 100;
pub const MONTHS_PER_YEAR: u32 = 12;

/// Inputs for a single projection run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProjectionParameters {
    starting_volume_gb: f64,
    annual_growth_gb: f64,
    inflation_rate_pct: f64,
    horizon_years: u32,
    hot_data_pct: f64,
    avg_file_size_mb: f64,
}

impl ProjectionParameters {
    pub fn new(
        starting_volume_gb: f64,
        annual_growth_gb: f64,
        inflation_rate_pct: f64,
        horizon_years: u32,
        hot_data_pct: f64,
        avg_file_size_mb: f64,
    ) -> Self {
        Self {
            starting_volume_gb,
            annual_growth_gb,
            inflation_rate_pct,
            horizon_years,
            hot_data_pct,
            avg_file_size_mb,
        }
    }

    pub fn starting_volume_gb(&self) -> f64 {
        self.starting_volume_gb
    }

    pub fn annual_growth_gb(&self) -> f64 {
        self.annual_growth_gb
    }

    pub fn inflation_rate_pct(&self) -> f64 {
        self.inflation_rate_pct
    }

    pub fn horizon_years(&self) -> u32 {
        self.horizon_years
    }

    pub fn hot_data_pct(&self) -> f64 {
        self.hot_data_pct
    }

    pub fn avg_file_size_mb(&self) -> f64 {
        self.avg_file_size_mb
    }

    pub fn total_periods(&self) -> usize {
        (self.horizon_years * MONTHS_PER_YEAR) as usize
    }

    /// Rejects negative or non-finite reals, a hot percentage outside
    /// `[0, 100]` and horizons longer than [`MAX_HORIZON_YEARS`].
    pub fn validate(&self) -> Result<()> {
        let reals = [
            ("starting_volume_gb", self.starting_volume_gb),
            ("annual_growth_gb", self.annual_growth_gb),
            ("inflation_rate_pct", self.inflation_rate_pct),
            ("hot_data_pct", self.hot_data_pct),
            ("avg_file_size_mb", self.avg_file_size_mb),
        ];

        for (name, value) in reals {
            if !value.is_finite() {
                return Err(ForageError::invalid(name, value, "must be a finite number"));
            }
            if value < 0.0 {
                return Err(ForageError::invalid(name, value, "must not be negative"));
            }
        }

        if self.hot_data_pct > 100.0 {
            return Err(ForageError::invalid(
                "hot_data_pct",
                self.hot_data_pct,
                "must be between 0 and 100",
            ));
        }

        if self.horizon_years > MAX_HORIZON_YEARS {
            return Err(ForageError::invalid(
                "horizon_years",
                self.horizon_years as f64,
                "must be at most 100 years",
            ));
        }

        Ok(())
    }
}

impl Default for ProjectionParameters {
    fn default() -> Self {
        Self::new(50.0, 10.0, 1.0, 50, 1.0, 5.0)
    }
}

/// Simulated storage state for one month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodState {
    period_index: usize,
    calendar_label: String,
    total_volume_gb: f64,
    hot_volume_gb: f64,
}

impl PeriodState {
    pub fn new(
        period_index: usize,
        calendar_label: String,
        total_volume_gb: f64,
        hot_volume_gb: f64,
    ) -> Self {
        Self {
            period_index,
            calendar_label,
            total_volume_gb,
            hot_volume_gb,
        }
    }

    pub fn period_index(&self) -> usize {
        self.period_index
    }

    pub fn calendar_label(&self) -> &str {
        &self.calendar_label
    }

    pub fn total_volume_gb(&self) -> f64 {
        self.total_volume_gb
    }

    pub fn hot_volume_gb(&self) -> f64 {
        self.hot_volume_gb
    }

    pub fn cold_volume_gb(&self) -> f64 {
        (self.total_volume_gb - self.hot_volume_gb).max(0.0)
    }

    pub fn year_offset(&self) -> usize {
        self.period_index / MONTHS_PER_YEAR as usize
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostQuote {
    provider_name: String,
    monthly_cost: f64,
    plan_label: String,
}

impl CostQuote {
    pub fn new(provider_name: String, monthly_cost: f64, plan_label: String) -> Self {
        Self {
            provider_name,
            monthly_cost,
            plan_label,
        }
    }

    pub fn provider_name(&self) -> &str {
        &self.provider_name
    }

    pub fn monthly_cost(&self) -> f64 {
        self.monthly_cost
    }

    pub fn plan_label(&self) -> &str {
        &self.plan_label
    }
}

/// One month of the projection: the simulated state plus a quote from every
/// registered provider, in registry order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectionPoint {
    period: PeriodState,
    quotes: Vec<CostQuote>,
}

impl ProjectionPoint {
    pub fn new(period: PeriodState, quotes: Vec<CostQuote>) -> Self {
        Self { period, quotes }
    }

    pub fn period(&self) -> &PeriodState {
        &self.period
    }

    pub fn quotes(&self) -> &[CostQuote] {
        &self.quotes
    }

    pub fn quote(&self, provider_name: &str) -> Option<&CostQuote> {
        self.quotes
            .iter()
            .find(|quote| quote.provider_name == provider_name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LifetimeTotal {
    provider_name: String,
    total_cost: f64,
}

impl LifetimeTotal {
    pub fn new(provider_name: String, total_cost: f64) -> Self {
        Self {
            provider_name,
            total_cost,
        }
    }

    pub fn provider_name(&self) -> &str {
        &self.provider_name
    }

    pub fn total_cost(&self) -> f64 {
        self.total_cost
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectionResult {
    parameters: ProjectionParameters,
    series: Vec<ProjectionPoint>,
    lifetime_totals: Vec<LifetimeTotal>,
}

impl ProjectionResult {
    pub fn new(
        parameters: ProjectionParameters,
        series: Vec<ProjectionPoint>,
        lifetime_totals: Vec<LifetimeTotal>,
    ) -> Self {
        Self {
            parameters,
            series,
            lifetime_totals,
        }
    }

    pub fn parameters(&self) -> &ProjectionParameters {
        &self.parameters
    }

    pub fn series(&self) -> &[ProjectionPoint] {
        &self.series
    }

    pub fn lifetime_totals(&self) -> &[LifetimeTotal] {
        &self.lifetime_totals
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub fn provider_names(&self) -> impl Iterator<Item = &str> {
        self.lifetime_totals
            .iter()
            .map(|total| total.provider_name.as_str())
    }

    pub fn lifetime_total(&self, provider_name: &str) -> Result<f64> {
        self.lifetime_totals
            .iter()
            .find(|total| total.provider_name == provider_name)
            .map(|total| total.total_cost)
            .ok_or_else(|| ForageError::UnknownProvider(provider_name.to_string()))
    }

    /// Every monthly quote for one provider, in period order.
    pub fn provider_series(&self, provider_name: &str) -> Result<Vec<&CostQuote>> {
        self.ensure_known(provider_name)?;

        Ok(self
            .series
            .iter()
            .filter_map(|point| point.quote(provider_name))
            .collect())
    }

    /// Sums of monthly cost per simulated year for one provider.
    pub fn yearly_costs(&self, provider_name: &str) -> Result<Vec<f64>> {
        self.ensure_known(provider_name)?;

        let mut years = vec![0.0; self.parameters.horizon_years() as usize];
        for point in &self.series {
            if let Some(quote) = point.quote(provider_name) {
                years[point.period.year_offset()] += quote.monthly_cost;
            }
        }

        Ok(years)
    }

    pub fn cheapest_provider(&self) -> Option<&LifetimeTotal> {
        self.lifetime_totals.iter().fold(None, |best, candidate| match best {
            Some(current) if current.total_cost <= candidate.total_cost => Some(current),
            _ => Some(candidate),
        })
    }

    pub fn final_period(&self) -> Option<&PeriodState> {
        self.series.last().map(|point| &point.period)
    }

    fn ensure_known(&self, provider_name: &str) -> Result<()> {
        if self.provider_names().any(|name| name == provider_name) {
            Ok(())
        } else {
            Err(ForageError::UnknownProvider(provider_name.to_string()))
        }
    }
}
