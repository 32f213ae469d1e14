//! CSV output: per-period series for one evaluation, one summary row per batch scenario

use super::currency::Currency;
use super::summary::format_payoff_date;
use crate::error::PlannerResult;
use crate::scenario::{Evaluation, ScenarioOutcome};
use serde::Serialize;
use std::io::Write;

/// Balance and opportunity-cost series at one period
#[derive(Debug, Serialize)]
struct SeriesRow {
    period: u32,
    standard_balance: Option<f64>,
    accelerated_balance: Option<f64>,
    extra_applied: Option<f64>,
    extra_equity: Option<f64>,
    investment_value: Option<f64>,
}

/// Write every period of either schedule; cells past a schedule's end are left blank
pub fn write_series<W: Write>(writer: W, evaluation: &Evaluation) -> PlannerResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    let standard = &evaluation.standard.schedule;
    let accelerated = &evaluation.accelerated.schedule;
    let equity = &evaluation.summary.opportunity_cost.series;
    let periods = standard.len().max(accelerated.len());

    for i in 0..periods {
        csv_writer.serialize(SeriesRow {
            period: i as u32 + 1,
            standard_balance: standard.get(i).map(|p| p.remaining_balance),
            accelerated_balance: accelerated.get(i).map(|p| p.remaining_balance),
            extra_applied: accelerated.get(i).map(|p| p.extra_applied),
            extra_equity: equity.get(i).map(|p| p.extra_equity),
            investment_value: equity.get(i).map(|p| p.investment_value),
        })?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// One line of a batch summary
#[derive(Debug, Serialize)]
struct BatchRow {
    scenario_id: String,
    currency: String,
    payment_per_period: Option<f64>,
    standard_total_interest: Option<f64>,
    accelerated_total_interest: Option<f64>,
    interest_saved: Option<f64>,
    time_saved: Option<String>,
    standard_payoff: Option<String>,
    accelerated_payoff: Option<String>,
    final_investment_value: Option<f64>,
    final_extra_equity: Option<f64>,
    difference: Option<f64>,
    errors: String,
}

impl BatchRow {
    fn from_outcome(outcome: &ScenarioOutcome, currency: Currency) -> Self {
        match &outcome.result {
            Ok(evaluation) => {
                let summary = &evaluation.summary;
                let cost = &summary.opportunity_cost;
                Self {
                    scenario_id: outcome.scenario_id.clone(),
                    currency: currency.code().to_string(),
                    payment_per_period: Some(evaluation.standard.payment_per_period),
                    standard_total_interest: Some(evaluation.standard.total_interest),
                    accelerated_total_interest: Some(evaluation.accelerated.total_interest),
                    interest_saved: Some(summary.interest_saved),
                    time_saved: Some(summary.time_saved.to_string()),
                    standard_payoff: Some(format_payoff_date(summary.standard_payoff_date)),
                    accelerated_payoff: Some(format_payoff_date(summary.accelerated_payoff_date)),
                    final_investment_value: Some(cost.final_investment_value),
                    final_extra_equity: Some(cost.final_extra_equity),
                    difference: Some(cost.difference),
                    errors: String::new(),
                }
            }
            Err(errors) => Self {
                scenario_id: outcome.scenario_id.clone(),
                currency: currency.code().to_string(),
                payment_per_period: None,
                standard_total_interest: None,
                accelerated_total_interest: None,
                interest_saved: None,
                time_saved: None,
                standard_payoff: None,
                accelerated_payoff: None,
                final_investment_value: None,
                final_extra_equity: None,
                difference: None,
                errors: errors.messages().join(" "),
            },
        }
    }
}

/// Write one summary row per scenario, failures included with their messages
pub fn write_batch_summary<W: Write>(writer: W, outcomes: &[ScenarioOutcome], currency: Currency) -> PlannerResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    for outcome in outcomes {
        csv_writer.serialize(BatchRow::from_outcome(outcome, currency))?;
    }

    csv_writer.flush()?;
    Ok(())
}
