use anyhow::Result;
use std::fmt::Write;
use storage_forage_model::ProjectionResult;

/// Yearly view: end-of-year volume and each provider's spend for that year,
/// followed by lifetime totals.
pub fn render_table(result: &ProjectionResult) -> Result<String> {
    let names: Vec<&str> = result.provider_names().collect();
    let width = names.iter().map(|name| name.len()).max().unwrap_or(0).max(12);
    let mut out = String::new();

    write!(out, "{:<6} {:>14}", "Year", "Volume (GB)")?;
    for name in &names {
        write!(out, " {:>width$}", name, width = width)?;
    }
    writeln!(out)?;

    let yearly: Vec<Vec<f64>> = names
        .iter()
        .map(|name| result.yearly_costs(name))
        .collect::<storage_forage_model::Result<_>>()?;

    for point in result.series().iter().filter(|p| p.period().period_index() % 12 == 11) {
        let period = point.period();
        let year = &period.calendar_label()[..4];
        write!(out, "{:<6} {:>14.1}", year, period.total_volume_gb())?;
        for costs in &yearly {
            write!(out, " {:>width$.2}", costs[period.year_offset()], width = width)?;
        }
        writeln!(out)?;
    }

    write!(out, "{:<6} {:>14}", "Total", "")?;
    for total in result.lifetime_totals() {
        write!(out, " {:>width$.2}", total.total_cost(), width = width)?;
    }
    writeln!(out)?;

    if let Some(cheapest) = result.cheapest_provider() {
        writeln!(
            out,
            "\nCheapest over {} years: {} (${:.2})",
            result.parameters().horizon_years(),
            cheapest.provider_name(),
            cheapest.total_cost()
        )?;
    }

    Ok(out)
}

/// Plan labels for the final simulated month.
pub fn render_final_plans(result: &ProjectionResult) -> Result<String> {
    let mut out = String::new();
    if let Some(point) = result.series().last() {
        writeln!(out, "Plans in {}:", point.period().calendar_label())?;
        for quote in point.quotes() {
            writeln!(
                out,
                "  {}: ${:.2}/month - {}",
                quote.provider_name(),
                quote.monthly_cost(),
                quote.plan_label()
            )?;
        }
    }
    Ok(out)
}

pub fn render_json(result: &ProjectionResult) -> Result<String> {
    Ok(serde_json::to_string_pretty(result)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage_forage_model::{ProjectionEngine, ProjectionParameters, ProviderRegistry};

    fn sample() -> ProjectionResult {
        let params = ProjectionParameters::new(50.0, 10.0, 0.0, 2, 1.0, 5.0);
        ProjectionEngine::with_epoch_year(2030)
            .run(&params, ProviderRegistry::standard())
            .unwrap()
    }

    #[test]
    fn test_table_has_row_per_year() {
        let table = render_table(&sample()).unwrap();
        let lines: Vec<&str> = table.lines().collect();

        assert!(lines[0].starts_with("Year"));
        assert!(lines[0].contains("Google One"));
        assert!(lines[1].starts_with("2030"));
        assert!(lines[2].starts_with("2031"));
        assert!(lines[3].starts_with("Total"));
        assert!(table.contains("Cheapest over 2 years"));
    }

    #[test]
    fn test_empty_projection_table() {
        let params = ProjectionParameters::new(50.0, 10.0, 0.0, 0, 1.0, 5.0);
        let result = ProjectionEngine::with_epoch_year(2030)
            .run(&params, ProviderRegistry::standard())
            .unwrap();

        let table = render_table(&result).unwrap();
        assert_eq!(table.lines().filter(|l| l.starts_with("20")).count(), 0);
        assert!(render_final_plans(&result).unwrap().is_empty());
    }

    #[test]
    fn test_final_plans_list_every_provider() {
        let plans = render_final_plans(&sample()).unwrap();
        assert!(plans.starts_with("Plans in 2031-12-01:"));
        assert_eq!(plans.lines().count(), 6);
    }

    #[test]
    fn test_json_contains_series_and_totals() {
        let json = render_json(&sample()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["series"].as_array().unwrap().len(), 24);
        assert_eq!(value["lifetime_totals"].as_array().unwrap().len(), 5);
        assert_eq!(value["series"][0]["period"]["calendar_label"], "2030-01-01");
    }
}
