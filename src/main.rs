//! Payoff Planner CLI
//!
//! Evaluate one loan: standard schedule against extra payments, and the extra
//! payments against investing the same money.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use payoff_planner::loan::load_inputs_json;
use payoff_planner::report::{write_series, Currency, SummaryReport};
use payoff_planner::{CalculatorInputs, DownPaymentType, PaymentFrequency, PayoffStatus, ScenarioRunner};
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Human-readable text report
    Summary,
    /// Full evaluation as JSON
    Json,
    /// Per-period series as CSV
    Csv,
}

#[derive(Debug, Parser)]
#[command(name = "payoff_planner", version, about = "Compare paying a loan down early against investing the difference")]
struct Cli {
    /// JSON file of calculator inputs; flags below override its values
    #[arg(long)]
    scenario: Option<PathBuf>,

    #[arg(long)]
    home_price: Option<f64>,

    /// Down payment, as percent of price or an amount (see --down-payment-type)
    #[arg(long)]
    down_payment: Option<f64>,

    #[arg(long, value_enum)]
    down_payment_type: Option<DownPaymentType>,

    /// Annual interest rate in percent
    #[arg(long)]
    interest_rate: Option<f64>,

    /// Term in years
    #[arg(long)]
    loan_term: Option<u32>,

    #[arg(long, value_enum)]
    frequency: Option<PaymentFrequency>,

    /// Extra principal paid every period
    #[arg(long)]
    extra: Option<f64>,

    /// One-time extra principal payment
    #[arg(long)]
    one_time_payment: Option<f64>,

    /// Month (from 1) in which the one-time payment is made
    #[arg(long)]
    one_time_payment_month: Option<u32>,

    /// Assumed annual investment return in percent
    #[arg(long)]
    investment_return: Option<f64>,

    #[arg(long, value_enum, default_value_t = Currency::Usd)]
    currency: Currency,

    #[arg(long, value_enum, default_value_t = OutputFormat::Summary)]
    output: OutputFormat,

    /// Count payoff dates from this date instead of today (YYYY-MM-DD)
    #[arg(long)]
    as_of: Option<NaiveDate>,

    /// Schedule rows shown in the summary report
    #[arg(long, default_value_t = 12)]
    rows: usize,
}

impl Cli {
    /// Start from the scenario file (or defaults) and apply flag overrides
    fn inputs(&self) -> Result<CalculatorInputs> {
        let mut inputs = match &self.scenario {
            Some(path) => load_inputs_json(path)
                .with_context(|| format!("failed to load scenario {}", path.display()))?,
            None => CalculatorInputs::default(),
        };

        if let Some(v) = self.home_price { inputs.home_price = v; }
        if let Some(v) = self.down_payment { inputs.down_payment = v; }
        if let Some(v) = self.down_payment_type { inputs.down_payment_type = v; }
        if let Some(v) = self.interest_rate { inputs.interest_rate = v; }
        if let Some(v) = self.loan_term { inputs.loan_term = v; }
        if let Some(v) = self.frequency { inputs.payment_frequency = v; }
        if let Some(v) = self.extra { inputs.extra_per_payment = v; }
        if let Some(v) = self.one_time_payment { inputs.one_time_payment = v; }
        if let Some(v) = self.one_time_payment_month { inputs.one_time_payment_month = v; }
        if let Some(v) = self.investment_return { inputs.investment_return = v; }

        Ok(inputs)
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let inputs = cli.inputs()?;
    let runner = match cli.as_of {
        Some(date) => ScenarioRunner::with_as_of(date),
        None => ScenarioRunner::new(),
    };

    let evaluation = runner.evaluate(&inputs)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.output {
        OutputFormat::Summary => {
            writeln!(out, "Payoff Planner v{}", env!("CARGO_PKG_VERSION"))?;
            writeln!(out, "======================\n")?;
            writeln!(out, "Loan amount: {:.2}", inputs.loan_amount())?;
            if evaluation.accelerated.payoff_status == PayoffStatus::Truncated {
                writeln!(out, "Warning: the accelerated plan did not reach payoff within the schedule bound")?;
            }
            write!(out, "{}", SummaryReport::new(&evaluation, cli.currency, cli.rows))?;
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, &evaluation)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => write_series(&mut out, &evaluation)?,
    }

    Ok(())
}
