use storage_forage_model::{ProjectionParameters, MAX_HORIZON_YEARS};

pub const MAX_VOLUME_GB: f64 = 1_048_576.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputField {
    StartingVolume,
    AnnualGrowth,
    Inflation,
    Horizon,
    HotData,
    FileSize,
}

impl InputField {
    pub const ALL: [InputField; 6] = [
        InputField::StartingVolume,
        InputField::AnnualGrowth,
        InputField::Inflation,
        InputField::Horizon,
        InputField::HotData,
        InputField::FileSize,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            InputField::StartingVolume => "Current data (GB)",
            InputField::AnnualGrowth => "Generated annually (GB)",
            InputField::Inflation => "Annual size inflation (%)",
            InputField::Horizon => "Years to plan for",
            InputField::HotData => "Hot data (% per month)",
            InputField::FileSize => "Average file size (MB)",
        }
    }

    pub fn bounds(&self) -> (f64, f64) {
        match self {
            InputField::StartingVolume | InputField::AnnualGrowth => (0.0, MAX_VOLUME_GB),
            InputField::Inflation | InputField::HotData => (0.0, 100.0),
            InputField::Horizon => (0.0, MAX_HORIZON_YEARS as f64),
            InputField::FileSize => (0.0, 1024.0),
        }
    }

    /// Parses a command-line value, rejecting anything outside `bounds()`.
    pub fn parse(&self, raw: &str) -> Result<f64, String> {
        let value: f64 = raw
            .trim()
            .parse()
            .map_err(|_| format!("`{}` is not a number", raw))?;
        let (min, max) = self.bounds();
        if !(min..=max).contains(&value) {
            return Err(format!("must be between {} and {}", min, max));
        }
        Ok(value)
    }

    /// Volumes step proportionally so both ends of the range stay reachable.
    pub fn step(&self, value: f64) -> f64 {
        match self {
            InputField::StartingVolume | InputField::AnnualGrowth => (value * 0.1).max(1.0).round(),
            InputField::Inflation | InputField::Horizon | InputField::HotData => 1.0,
            InputField::FileSize => {
                if value < 1.0 {
                    0.125
                } else {
                    1.0
                }
            }
        }
    }

    fn index(&self) -> usize {
        Self::ALL
            .iter()
            .position(|field| field == self)
            .unwrap_or_default()
    }

    pub fn next(&self) -> InputField {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn previous(&self) -> InputField {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Slider values for the six projection inputs, kept within their bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct Inputs {
    values: [f64; 6],
}

impl Inputs {
    pub fn from_parameters(parameters: &ProjectionParameters) -> Self {
        let mut inputs = Self {
            values: [
                parameters.starting_volume_gb(),
                parameters.annual_growth_gb(),
                parameters.inflation_rate_pct(),
                parameters.horizon_years() as f64,
                parameters.hot_data_pct(),
                parameters.avg_file_size_mb(),
            ],
        };
        for field in InputField::ALL {
            inputs.set(field, inputs.get(field));
        }
        inputs
    }

    pub fn get(&self, field: InputField) -> f64 {
        self.values[field.index()]
    }

    /// Stores `value` clamped to the field's bounds; returns whether it had
    /// to be clamped.
    pub fn set(&mut self, field: InputField, value: f64) -> bool {
        let (min, max) = field.bounds();
        let value = if value.is_nan() { min } else { value };
        let mut clamped = value.clamp(min, max);
        if field == InputField::Horizon {
            clamped = clamped.round();
        }
        self.values[field.index()] = clamped;
        clamped != value
    }

    pub fn adjust(&mut self, field: InputField, steps: i32) {
        let current = self.get(field);
        let step = field.step(current);
        self.set(field, current + step * steps as f64);
    }

    /// Position of the value within its bounds, for gauges.
    pub fn ratio(&self, field: InputField) -> f64 {
        let (min, max) = field.bounds();
        ((self.get(field) - min) / (max - min)).clamp(0.0, 1.0)
    }

    pub fn parameters(&self) -> ProjectionParameters {
        ProjectionParameters::new(
            self.get(InputField::StartingVolume),
            self.get(InputField::AnnualGrowth),
            self.get(InputField::Inflation),
            self.get(InputField::Horizon) as u32,
            self.get(InputField::HotData),
            self.get(InputField::FileSize),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_defaults() {
        let params = ProjectionParameters::default();
        let inputs = Inputs::from_parameters(&params);
        assert_eq!(inputs.parameters(), params);
    }

    #[test]
    fn test_set_clamps_to_bounds() {
        let mut inputs = Inputs::from_parameters(&ProjectionParameters::default());
        assert!(inputs.set(InputField::HotData, 150.0));
        assert_eq!(inputs.get(InputField::HotData), 100.0);

        assert!(inputs.set(InputField::StartingVolume, -5.0));
        assert_eq!(inputs.get(InputField::StartingVolume), 0.0);

        assert!(!inputs.set(InputField::Horizon, 12.0));
        assert_eq!(inputs.parameters().horizon_years(), 12);
    }

    #[test]
    fn test_adjust_steps() {
        let mut inputs = Inputs::from_parameters(&ProjectionParameters::default());
        inputs.adjust(InputField::StartingVolume, 1);
        assert_eq!(inputs.get(InputField::StartingVolume), 55.0);

        inputs.adjust(InputField::Horizon, -100);
        assert_eq!(inputs.get(InputField::Horizon), 0.0);

        inputs.set(InputField::FileSize, 0.5);
        inputs.adjust(InputField::FileSize, -1);
        assert_eq!(inputs.get(InputField::FileSize), 0.375);
    }

    #[test]
    fn test_field_cycle() {
        assert_eq!(InputField::StartingVolume.previous(), InputField::FileSize);
        assert_eq!(InputField::FileSize.next(), InputField::StartingVolume);
        assert_eq!(InputField::Inflation.next(), InputField::Horizon);
    }

    #[test]
    fn test_parse_respects_bounds() {
        assert_eq!(InputField::StartingVolume.parse("1048576"), Ok(MAX_VOLUME_GB));
        assert!(InputField::StartingVolume.parse("1e21").is_err());
        assert!(InputField::Inflation.parse("500").is_err());
        assert!(InputField::HotData.parse("-1").is_err());
        assert!(InputField::FileSize.parse("NaN").is_err());
        assert!(InputField::FileSize.parse("five").is_err());
        assert_eq!(InputField::FileSize.parse(" 0.5 "), Ok(0.5));
    }

    #[test]
    fn test_ratio() {
        let mut inputs = Inputs::from_parameters(&ProjectionParameters::default());
        inputs.set(InputField::HotData, 25.0);
        assert_eq!(inputs.ratio(InputField::HotData), 0.25);
    }
}
