//! Load calculator scenarios from CSV batches or single JSON files

use super::data::PaymentFrequency;
use super::inputs::{CalculatorInputs, DownPaymentType};
use crate::error::{PlannerError, PlannerResult};
use csv::Reader;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// One scenario with an identifier, as read from a batch file
#[derive(Debug, Clone)]
pub struct NamedScenario {
    pub scenario_id: String,
    pub inputs: CalculatorInputs,
}

/// Raw CSV row of a scenario batch file
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    scenario_id: String,
    home_price: f64,
    down_payment: f64,
    down_payment_type: String,
    interest_rate: f64,
    loan_term: u32,
    payment_frequency: String,
    #[serde(default)]
    extra_per_payment: Option<f64>,
    #[serde(default)]
    one_time_payment: Option<f64>,
    #[serde(default)]
    one_time_payment_month: Option<u32>,
    #[serde(default)]
    investment_return: Option<f64>,
}

impl CsvRow {
    fn into_scenario(self) -> PlannerResult<NamedScenario> {
        let down_payment_type = match self.down_payment_type.trim() {
            "percent" | "%" => DownPaymentType::Percent,
            "amount" => DownPaymentType::Amount,
            other => {
                return Err(PlannerError::UnknownVariant {
                    field: "down payment type",
                    value: other.to_string(),
                })
            }
        };
        let payment_frequency: PaymentFrequency = self.payment_frequency.parse()?;
        let defaults = CalculatorInputs::default();

        Ok(NamedScenario {
            scenario_id: self.scenario_id,
            inputs: CalculatorInputs {
                home_price: self.home_price,
                down_payment: self.down_payment,
                down_payment_type,
                interest_rate: self.interest_rate,
                loan_term: self.loan_term,
                payment_frequency,
                extra_per_payment: self.extra_per_payment.unwrap_or(0.0),
                one_time_payment: self.one_time_payment.unwrap_or(0.0),
                one_time_payment_month: self
                    .one_time_payment_month
                    .unwrap_or(defaults.one_time_payment_month),
                investment_return: self.investment_return.unwrap_or(defaults.investment_return),
            },
        })
    }
}

/// Load all scenarios from a CSV file
pub fn load_scenarios<P: AsRef<Path>>(path: P) -> PlannerResult<Vec<NamedScenario>> {
    let file = File::open(path)?;
    load_scenarios_from_reader(file)
}

/// Load scenarios from any reader (e.g., string buffer, request body)
pub fn load_scenarios_from_reader<R: std::io::Read>(reader: R) -> PlannerResult<Vec<NamedScenario>> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut scenarios = Vec::new();

    for result in csv_reader.deserialize() {
        let row: CsvRow = result?;
        scenarios.push(row.into_scenario()?);
    }

    log::debug!("loaded {} scenarios", scenarios.len());
    Ok(scenarios)
}

/// Load a single scenario from a JSON file; omitted fields take their defaults
pub fn load_inputs_json<P: AsRef<Path>>(path: P) -> PlannerResult<CalculatorInputs> {
    let file = File::open(path)?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}
