//! Comparison of a standard plan against an accelerated one
//!
//! Consumes two [`AmortizationResult`](crate::amortization::AmortizationResult)s that
//! share a payment frequency and derives:
//! - interest saved and time saved
//! - payoff calendar dates for both plans
//! - the extra-equity series set against the accelerated run's investment growth
//!
//! The invest-versus-prepay difference is measured at the accelerated plan's own
//! payoff period, not at the end of the original term.

mod types;
mod projector;

pub use types::{ComparisonSummary, EquityPoint, OpportunityCost, TimeSaved, Verdict};
pub use projector::{compare, compare_as_of, opportunity_cost};
