//! Raw calculator inputs and the checks run before any amortization

use super::data::{LoanParameters, PaymentFrequency, PaymentStrategy};
use crate::error::{ValidationError, ValidationErrors};
use serde::{Deserialize, Serialize};

/// How the down payment value is expressed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DownPaymentType {
    /// Percent of the home price
    #[default]
    Percent,
    /// Fixed currency amount
    Amount,
}

/// Everything a user enters for one scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatorInputs {
    #[serde(default)]
    pub home_price: f64,

    #[serde(default)]
    pub down_payment: f64,

    #[serde(default)]
    pub down_payment_type: DownPaymentType,

    /// Annual rate in percent
    #[serde(default)]
    pub interest_rate: f64,

    /// Term in years
    #[serde(default = "default_loan_term")]
    pub loan_term: u32,

    #[serde(default)]
    pub payment_frequency: PaymentFrequency,

    #[serde(default)]
    pub extra_per_payment: f64,

    #[serde(default)]
    pub one_time_payment: f64,

    #[serde(default = "default_one_time_payment_month")]
    pub one_time_payment_month: u32,

    /// Assumed annual investment return in percent
    #[serde(default = "default_investment_return")]
    pub investment_return: f64,
}

fn default_loan_term() -> u32 { 30 }
fn default_one_time_payment_month() -> u32 { 1 }
fn default_investment_return() -> f64 { 7.0 }

impl Default for CalculatorInputs {
    fn default() -> Self {
        Self {
            home_price: 0.0,
            down_payment: 0.0,
            down_payment_type: DownPaymentType::Percent,
            interest_rate: 0.0,
            loan_term: default_loan_term(),
            payment_frequency: PaymentFrequency::Monthly,
            extra_per_payment: 0.0,
            one_time_payment: 0.0,
            one_time_payment_month: default_one_time_payment_month(),
            investment_return: default_investment_return(),
        }
    }
}

impl CalculatorInputs {
    /// Down payment in currency units
    pub fn down_payment_amount(&self) -> f64 {
        match self.down_payment_type {
            DownPaymentType::Percent => self.home_price * (self.down_payment / 100.0),
            DownPaymentType::Amount => self.down_payment,
        }
    }

    /// Amount financed
    pub fn loan_amount(&self) -> f64 {
        self.home_price - self.down_payment_amount()
    }

    pub fn loan(&self) -> LoanParameters {
        LoanParameters::new(self.loan_amount(), self.interest_rate, self.loan_term)
    }

    pub fn strategy(&self) -> PaymentStrategy {
        PaymentStrategy::new(
            self.extra_per_payment,
            self.one_time_payment,
            self.one_time_payment_month,
            self.investment_return,
        )
    }

    /// Run every input check; all failures are reported, not just the first
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = Vec::new();

        if !(self.loan_amount() > 0.0) {
            errors.push(ValidationError::NonPositiveLoanAmount);
        }
        if !(self.interest_rate > 0.0) {
            errors.push(ValidationError::NonPositiveInterestRate);
        }
        if self.loan_term == 0 {
            errors.push(ValidationError::NonPositiveLoanTerm);
        } else if self.loan_term > LoanParameters::MAX_TERM_YEARS {
            errors.push(ValidationError::LoanTermTooLong);
        }
        if self.investment_return < 0.0 {
            errors.push(ValidationError::NegativeInvestmentReturn);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(errors))
        }
    }
}
