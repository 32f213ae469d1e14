//! Amortization engine: balance schedule plus the parallel investment projection

mod state;
mod engine;
mod schedule;
mod payment;

pub use state::AmortizationState;
pub use engine::{run, AmortizationEngine};
pub use schedule::{AmortizationPeriod, AmortizationResult, InvestmentPeriod, PayoffStatus};
pub use payment::{annuity_payment, monthly_payment};
