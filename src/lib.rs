//! Payoff Planner - loan amortization with an invest-versus-prepay comparison
//!
//! This library provides:
//! - Level-payment amortization at monthly, biweekly and accelerated biweekly cadences
//! - Recurring and one-time extra principal payments
//! - A parallel investment portfolio funded by the same extra money
//! - Interest saved, time saved and payoff dates against the standard plan
//! - Text and CSV reports, single or batched

pub mod error;
pub mod loan;
pub mod amortization;
pub mod comparison;
pub mod scenario;
pub mod report;

// Re-export commonly used types
pub use error::{PlannerError, PlannerResult, ValidationError, ValidationErrors};
pub use loan::{CalculatorInputs, DownPaymentType, LoanParameters, PaymentFrequency, PaymentStrategy};
pub use amortization::{AmortizationEngine, AmortizationResult, PayoffStatus};
pub use comparison::{ComparisonSummary, OpportunityCost, TimeSaved, Verdict};
pub use scenario::{Evaluation, ScenarioOutcome, ScenarioRunner};
