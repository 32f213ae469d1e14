//! Error types for input validation and scenario loading
//!
//! The amortization engine itself never fails: out-of-domain numbers fall back to an
//! empty result. Everything that can go wrong happens before the engine is invoked.

use std::fmt;
use thiserror::Error;

/// Result alias used by the loaders and the scenario runner
pub type PlannerResult<T> = Result<T, PlannerError>;

/// A single failed input check
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Loan Amount must be positive. Check Home Price and Down Payment.")]
    NonPositiveLoanAmount,

    #[error("Interest Rate must be positive.")]
    NonPositiveInterestRate,

    #[error("Loan Term must be positive.")]
    NonPositiveLoanTerm,

    #[error("Loan Term cannot exceed 100 years.")]
    LoanTermTooLong,

    #[error("Investment Return cannot be negative.")]
    NegativeInvestmentReturn,
}

/// Every check that failed for one set of inputs, in evaluation order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationErrors(pub Vec<ValidationError>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Human-readable messages, one per failed check
    pub fn messages(&self) -> Vec<String> {
        self.0.iter().map(|e| e.to_string()).collect()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", err)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Top-level error for everything outside the pure engine
#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("invalid inputs:\n{0}")]
    Validation(#[from] ValidationErrors),

    #[error("unknown {field}: {value}")]
    UnknownVariant { field: &'static str, value: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
