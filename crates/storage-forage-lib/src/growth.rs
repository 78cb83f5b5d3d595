use crate::data_structures::{PeriodState, ProjectionParameters, MONTHS_PER_YEAR};
use chrono::{Datelike, Utc};

/// Month-by-month volume trajectory for a set of parameters.
///
/// Growth for a year is `annual_growth_gb * (1 + inflation)^year`, spread
/// evenly over its 12 months. Each month's increment is applied before the
/// month is recorded, so period 0 already includes one month of growth.
#[derive(Debug, Clone)]
pub struct GrowthSimulator {
    parameters: ProjectionParameters,
    epoch_year: i32,
}

impl GrowthSimulator {
    /// Labels start at January of next year.
    pub fn new(parameters: ProjectionParameters) -> Self {
        Self::with_epoch_year(parameters, default_epoch_year())
    }

    pub fn with_epoch_year(parameters: ProjectionParameters, epoch_year: i32) -> Self {
        Self {
            parameters,
            epoch_year,
        }
    }

    pub fn parameters(&self) -> &ProjectionParameters {
        &self.parameters
    }

    pub fn epoch_year(&self) -> i32 {
        self.epoch_year
    }

    /// A fresh pass over the trajectory, starting at period 0.
    pub fn periods(&self) -> GrowthPeriods {
        GrowthPeriods {
            parameters: self.parameters,
            epoch_year: self.epoch_year,
            current_volume: self.parameters.starting_volume_gb(),
            next_index: 0,
            total_periods: self.parameters.total_periods(),
        }
    }

    pub fn monthly_increment(&self, year_index: u32) -> f64 {
        monthly_increment(&self.parameters, year_index)
    }
}

pub fn default_epoch_year() -> i32 {
    Utc::now().year() + 1
}

fn monthly_increment(parameters: &ProjectionParameters, year_index: u32) -> f64 {
    let inflation = 1.0 + parameters.inflation_rate_pct() / 100.0;
    parameters.annual_growth_gb() * inflation.powi(year_index as i32) / MONTHS_PER_YEAR as f64
}

/// The `/ 1200` folds the percentage and a monthly fraction together; every
/// cost curve depends on this exact scaling.
pub fn hot_volume(total_volume_gb: f64, hot_data_pct: f64) -> f64 {
    total_volume_gb * hot_data_pct / 1200.0
}

pub fn calendar_label(epoch_year: i32, period_index: usize) -> String {
    let months = MONTHS_PER_YEAR as usize;
    let year = epoch_year as i64 + (period_index / months) as i64;
    let month = period_index % months + 1;
    format!("{:04}-{:02}-01", year, month)
}

#[derive(Debug, Clone)]
pub struct GrowthPeriods {
    parameters: ProjectionParameters,
    epoch_year: i32,
    current_volume: f64,
    next_index: usize,
    total_periods: usize,
}

impl Iterator for GrowthPeriods {
    type Item = PeriodState;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next_index >= self.total_periods {
            return None;
        }

        let index = self.next_index;
        let year_index = (index / MONTHS_PER_YEAR as usize) as u32;
        self.current_volume += monthly_increment(&self.parameters, year_index);
        self.next_index += 1;

        Some(PeriodState::new(
            index,
            calendar_label(self.epoch_year, index),
            self.current_volume,
            hot_volume(self.current_volume, self.parameters.hot_data_pct()),
        ))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.total_periods - self.next_index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for GrowthPeriods {}
