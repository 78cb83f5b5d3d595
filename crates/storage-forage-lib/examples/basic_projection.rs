use std::env;
use storage_forage_model::prelude::*;

fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

fn arg_or(args: &[String], index: usize, default: f64) -> anyhow::Result<f64> {
    match args.get(index) {
        Some(value) => Ok(value.parse()?),
        None => Ok(default),
    }
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();

    // Usage: basic_projection [start_gb] [annual_gb] [years]
    let starting_volume = arg_or(&args, 1, 50.0)?;
    let annual_growth = arg_or(&args, 2, 10.0)?;
    let years = arg_or(&args, 3, 10.0)? as u32;

    let result = project(starting_volume, annual_growth, years, 1.0, 1.0, 5.0)?;

    println!(
        "Projected {} months starting at {} GB",
        result.len(),
        format_number(starting_volume as u64)
    );

    if let Some(last) = result.final_period() {
        println!("\n--- Final Month ({}) ---", last.calendar_label());
        println!("Total volume: {:.1} GB", last.total_volume_gb());
        println!("Hot volume: {:.2} GB", last.hot_volume_gb());

        if let Some(point) = result.series().last() {
            for quote in point.quotes() {
                println!(
                    "{}: ${:.2}/month ({})",
                    quote.provider_name(),
                    quote.monthly_cost(),
                    quote.plan_label()
                );
            }
        }
    }

    println!("\n--- Lifetime Cost ---");
    for total in result.lifetime_totals() {
        println!("{}: ${:.2}", total.provider_name(), total.total_cost());
    }

    if let Some(cheapest) = result.cheapest_provider() {
        println!("\nCheapest overall: {}", cheapest.provider_name());
    }

    Ok(())
}
