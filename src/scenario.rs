//! Scenario runner: validate inputs, run both plans, compare
//!
//! Every evaluation is a fresh, complete recomputation. Batches fan out across
//! threads because evaluations share nothing.

use crate::amortization::{AmortizationEngine, AmortizationResult};
use crate::comparison::{compare_as_of, ComparisonSummary};
use crate::error::{PlannerResult, ValidationErrors};
use crate::loan::{CalculatorInputs, LoanParameters, NamedScenario, PaymentFrequency, PaymentStrategy};
use chrono::{Local, NaiveDate};
use rayon::prelude::*;
use serde::Serialize;

/// Standard and accelerated runs for one set of inputs, plus their comparison
#[derive(Debug, Clone, Serialize)]
pub struct Evaluation {
    pub frequency: PaymentFrequency,

    /// Run with no extra payments
    pub standard: AmortizationResult,

    /// Run with the caller's extra-payment strategy
    pub accelerated: AmortizationResult,

    /// Scheduled payment plus the recurring extra
    pub accelerated_payment_per_period: f64,

    pub summary: ComparisonSummary,

    /// Whether there is any extra money to compare against investing
    pub show_opportunity_cost: bool,
}

/// Outcome of one scenario in a batch
#[derive(Debug, Clone)]
pub struct ScenarioOutcome {
    pub scenario_id: String,
    pub result: Result<Evaluation, ValidationErrors>,
}

/// Evaluates calculator inputs against a fixed reference date
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new();
/// let evaluation = runner.evaluate(&inputs)?;
/// println!("{}", evaluation.summary.time_saved);
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    /// Date payoff dates are counted from
    as_of: NaiveDate,
}

impl ScenarioRunner {
    /// Runner counting payoff dates from today
    pub fn new() -> Self {
        Self::with_as_of(Local::now().date_naive())
    }

    pub fn with_as_of(as_of: NaiveDate) -> Self {
        Self { as_of }
    }

    pub fn as_of(&self) -> NaiveDate {
        self.as_of
    }

    /// Validate, then run both plans and compare
    ///
    /// Failed validation skips computation entirely; no partial result is produced.
    pub fn evaluate(&self, inputs: &CalculatorInputs) -> PlannerResult<Evaluation> {
        inputs.validate()?;
        Ok(self.evaluate_unchecked(&inputs.loan(), inputs.payment_frequency, &inputs.strategy()))
    }

    /// Run both plans for already-validated terms
    pub fn evaluate_unchecked(
        &self,
        loan: &LoanParameters,
        frequency: PaymentFrequency,
        strategy: &PaymentStrategy,
    ) -> Evaluation {
        let engine = AmortizationEngine::new(*loan, frequency);
        let standard = engine.run_standard();
        let accelerated = engine.run(strategy);
        let summary = compare_as_of(&standard, &accelerated, self.as_of);

        Evaluation {
            frequency,
            accelerated_payment_per_period: standard.payment_per_period + strategy.extra_per_period,
            show_opportunity_cost: strategy.has_extra_payments(),
            standard,
            accelerated,
            summary,
        }
    }

    /// Evaluate many scenarios in parallel; invalid scenarios keep their messages
    pub fn evaluate_batch(&self, scenarios: &[NamedScenario]) -> Vec<ScenarioOutcome> {
        log::info!("evaluating {} scenarios", scenarios.len());

        scenarios
            .par_iter()
            .map(|scenario| {
                let result = match scenario.inputs.validate() {
                    Ok(()) => Ok(self.evaluate_unchecked(
                        &scenario.inputs.loan(),
                        scenario.inputs.payment_frequency,
                        &scenario.inputs.strategy(),
                    )),
                    Err(errors) => {
                        log::warn!("scenario {} skipped: {}", scenario.scenario_id, errors.messages().join(" "));
                        Err(errors)
                    }
                };
                ScenarioOutcome {
                    scenario_id: scenario.scenario_id.clone(),
                    result,
                }
            })
            .collect()
    }

    /// Run several strategies against the same loan
    pub fn run_strategies(
        &self,
        loan: &LoanParameters,
        frequency: PaymentFrequency,
        strategies: &[PaymentStrategy],
    ) -> Vec<AmortizationResult> {
        let engine = AmortizationEngine::new(*loan, frequency);
        strategies.iter().map(|strategy| engine.run(strategy)).collect()
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{PlannerError, ValidationError};
    use crate::loan::DownPaymentType;

    fn runner() -> ScenarioRunner {
        ScenarioRunner::with_as_of(NaiveDate::from_ymd_opt(2026, 10, 1).unwrap())
    }

    fn reference_inputs() -> CalculatorInputs {
        CalculatorInputs {
            home_price: 300_000.0,
            down_payment: 0.0,
            down_payment_type: DownPaymentType::Amount,
            interest_rate: 6.0,
            loan_term: 30,
            payment_frequency: PaymentFrequency::Monthly,
            extra_per_payment: 200.0,
            one_time_payment: 0.0,
            one_time_payment_month: 1,
            investment_return: 7.0,
        }
    }

    #[test]
    fn test_evaluate_reference() {
        let evaluation = runner().evaluate(&reference_inputs()).expect("valid inputs");

        assert_eq!(evaluation.standard.payoff_period_index, 360);
        assert!(evaluation.accelerated.payoff_period_index < 360);
        assert!(evaluation.summary.interest_saved > 0.0);
        assert!(evaluation.show_opportunity_cost);
        assert_eq!(
            evaluation.accelerated_payment_per_period,
            evaluation.standard.payment_per_period + 200.0
        );
    }

    #[test]
    fn test_standard_run_ignores_strategy() {
        let evaluation = runner().evaluate(&reference_inputs()).unwrap();
        assert!(evaluation.standard.schedule.iter().all(|p| p.extra_applied == 0.0));
        assert_eq!(evaluation.standard.final_portfolio_value(), 0.0);
    }

    #[test]
    fn test_invalid_inputs_skip_computation() {
        let inputs = CalculatorInputs {
            interest_rate: 0.0,
            ..reference_inputs()
        };

        match runner().evaluate(&inputs) {
            Err(PlannerError::Validation(errors)) => {
                assert_eq!(errors.0, vec![ValidationError::NonPositiveInterestRate]);
            }
            other => panic!("expected validation failure, got {:?}", other),
        }
    }

    #[test]
    fn test_overflowing_inputs_do_not_panic() {
        let long_term = CalculatorInputs {
            loan_term: 100_000_000,
            payment_frequency: PaymentFrequency::Biweekly,
            ..reference_inputs()
        };
        match runner().evaluate(&long_term) {
            Err(PlannerError::Validation(errors)) => {
                assert_eq!(errors.0, vec![ValidationError::LoanTermTooLong]);
            }
            other => panic!("expected validation failure, got {:?}", other),
        }

        let far_month = CalculatorInputs {
            one_time_payment: 10_000.0,
            one_time_payment_month: 200_000_000,
            payment_frequency: PaymentFrequency::Biweekly,
            ..reference_inputs()
        };
        let evaluation = runner().evaluate(&far_month).expect("valid inputs");
        // Only the recurring extra is ever applied; the lump sum's period is never reached
        assert!(evaluation.accelerated.schedule.iter().all(|p| p.extra_applied <= 200.0));
    }

    #[test]
    fn test_no_extra_hides_opportunity_cost() {
        let inputs = CalculatorInputs {
            extra_per_payment: 0.0,
            ..reference_inputs()
        };
        let evaluation = runner().evaluate(&inputs).unwrap();
        assert!(!evaluation.show_opportunity_cost);
    }

    #[test]
    fn test_batch_keeps_order_and_failures() {
        let scenarios = vec![
            NamedScenario {
                scenario_id: "ok".to_string(),
                inputs: reference_inputs(),
            },
            NamedScenario {
                scenario_id: "bad".to_string(),
                inputs: CalculatorInputs {
                    loan_term: 0,
                    investment_return: -2.0,
                    ..reference_inputs()
                },
            },
        ];

        let outcomes = runner().evaluate_batch(&scenarios);
        assert_eq!(outcomes.len(), 2);
        assert_eq!(outcomes[0].scenario_id, "ok");
        assert!(outcomes[0].result.is_ok());
        assert_eq!(outcomes[1].scenario_id, "bad");
        assert_eq!(outcomes[1].result.as_ref().unwrap_err().len(), 2);
    }

    #[test]
    fn test_run_strategies() {
        let loan = LoanParameters::new(300_000.0, 6.0, 30);
        let strategies: Vec<_> = [0.0, 100.0, 300.0]
            .iter()
            .map(|&extra| PaymentStrategy::new(extra, 0.0, 1, 7.0))
            .collect();

        let results = runner().run_strategies(&loan, PaymentFrequency::Monthly, &strategies);
        assert_eq!(results.len(), 3);
        assert!(results[2].payoff_period_index < results[0].payoff_period_index);
    }
}
