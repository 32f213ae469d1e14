//! Evaluate every scenario in a CSV file
//!
//! Writes one summary row per scenario, invalid ones included with their validation messages.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use payoff_planner::loan::load_scenarios;
use payoff_planner::report::{format_currency, write_batch_summary, Currency};
use payoff_planner::ScenarioRunner;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug, Parser)]
#[command(name = "run_batch", about = "Evaluate a CSV of loan scenarios in parallel")]
struct Args {
    /// Scenario CSV (scenario_id, home_price, down_payment, ...)
    input: PathBuf,

    /// Summary CSV to write
    #[arg(short, long, default_value = "batch_summary.csv")]
    output: PathBuf,

    #[arg(long, value_enum, default_value_t = Currency::Usd)]
    currency: Currency,

    /// Count payoff dates from this date instead of today (YYYY-MM-DD)
    #[arg(long)]
    as_of: Option<NaiveDate>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let start = Instant::now();
    println!("Loading scenarios from {}...", args.input.display());

    let scenarios = load_scenarios(&args.input)
        .with_context(|| format!("failed to load scenarios from {}", args.input.display()))?;
    println!("Loaded {} scenarios in {:?}", scenarios.len(), start.elapsed());

    let runner = match args.as_of {
        Some(date) => ScenarioRunner::with_as_of(date),
        None => ScenarioRunner::new(),
    };

    println!("Evaluating...");
    let eval_start = Instant::now();
    let outcomes = runner.evaluate_batch(&scenarios);
    println!("Evaluations complete in {:?}", eval_start.elapsed());

    let file = File::create(&args.output)
        .with_context(|| format!("failed to create {}", args.output.display()))?;
    write_batch_summary(BufWriter::new(file), &outcomes, args.currency)?;
    println!("Output written to {}", args.output.display());

    let evaluations: Vec<_> = outcomes.iter().filter_map(|o| o.result.as_ref().ok()).collect();
    let invalid = outcomes.len() - evaluations.len();
    let total_interest_saved: f64 = evaluations.iter().map(|e| e.summary.interest_saved).sum();
    let favour_investing = evaluations
        .iter()
        .filter(|e| e.show_opportunity_cost && e.summary.opportunity_cost.difference > 0.0)
        .count();

    println!("\nBatch Summary:");
    println!("  Evaluated:            {}", evaluations.len());
    println!("  Invalid:              {}", invalid);
    println!(
        "  Total interest saved: {}",
        format_currency(total_interest_saved, args.currency, 0)
    );
    println!("  Investing ahead:      {}", favour_investing);

    println!("\nTotal time: {:?}", start.elapsed());
    Ok(())
}
