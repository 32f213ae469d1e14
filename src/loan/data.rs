//! Loan terms, payment cadence and extra-payment strategy

use crate::error::PlannerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Payment cadence of the loan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentFrequency {
    /// 12 payments per year of the contractual monthly amount
    #[default]
    Monthly,
    /// 26 payments per year, each monthly × 12 / 26
    Biweekly,
    /// 26 payments per year, each half the monthly amount (one extra monthly payment a year)
    AcceleratedBiweekly,
}

impl PaymentFrequency {
    pub fn periods_per_year(&self) -> u32 {
        match self {
            PaymentFrequency::Monthly => 12,
            PaymentFrequency::Biweekly | PaymentFrequency::AcceleratedBiweekly => 26,
        }
    }

    /// Convert the contractual monthly payment into this cadence's per-period payment
    pub fn payment_from_monthly(&self, monthly_payment: f64) -> f64 {
        match self {
            PaymentFrequency::Monthly => monthly_payment,
            PaymentFrequency::Biweekly => monthly_payment * 12.0 / 26.0,
            PaymentFrequency::AcceleratedBiweekly => monthly_payment / 2.0,
        }
    }

    /// Period index at which something scheduled for a 1-based calendar month lands
    ///
    /// `ceil(month × periods_per_year / 12)`, computed in integers. Month 0, and any
    /// month whose period does not fit in a `u32`, maps to period 0, which the engine
    /// never reaches.
    pub fn period_for_month(&self, month: u32) -> u32 {
        let period = (u64::from(month) * u64::from(self.periods_per_year())).div_ceil(12);
        u32::try_from(period).unwrap_or(0)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentFrequency::Monthly => "monthly",
            PaymentFrequency::Biweekly => "biweekly",
            PaymentFrequency::AcceleratedBiweekly => "accelerated-biweekly",
        }
    }

    /// Label used next to a payment amount, e.g. "$1,798.65 / accelerated biweekly"
    pub fn label(&self) -> String {
        self.as_str().replace('-', " ")
    }
}

impl fmt::Display for PaymentFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentFrequency {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "monthly" => Ok(PaymentFrequency::Monthly),
            "biweekly" => Ok(PaymentFrequency::Biweekly),
            "accelerated-biweekly" => Ok(PaymentFrequency::AcceleratedBiweekly),
            other => Err(PlannerError::UnknownVariant {
                field: "payment frequency",
                value: other.to_string(),
            }),
        }
    }
}

/// Fixed-rate loan terms for one evaluation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanParameters {
    /// Amount borrowed
    pub principal: f64,

    /// Nominal annual rate in percent (6.0 = 6%)
    pub annual_rate_percent: f64,

    /// Contractual term in years
    pub term_years: u32,
}

impl LoanParameters {
    /// Longest term the engine will amortize
    pub const MAX_TERM_YEARS: u32 = 100;

    pub fn new(principal: f64, annual_rate_percent: f64, term_years: u32) -> Self {
        Self {
            principal,
            annual_rate_percent,
            term_years,
        }
    }

    /// Whether the engine can amortize these terms
    ///
    /// Written as negated comparisons so NaN inputs are treated as degenerate. Terms
    /// beyond [`MAX_TERM_YEARS`](Self::MAX_TERM_YEARS) are degenerate too.
    pub fn is_amortizable(&self) -> bool {
        !(self.principal <= 0.0 || self.principal.is_nan())
            && !(self.annual_rate_percent <= 0.0 || self.annual_rate_percent.is_nan())
            && (1..=Self::MAX_TERM_YEARS).contains(&self.term_years)
    }

    /// Number of periods in the contractual term at the given cadence, saturating at `u32::MAX`
    pub fn nominal_periods(&self, frequency: PaymentFrequency) -> u32 {
        self.term_years.saturating_mul(frequency.periods_per_year())
    }
}

/// Extra payments on top of the contractual schedule, and the return they would earn if invested
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PaymentStrategy {
    /// Added to every payment
    pub extra_per_period: f64,

    /// Lump sum applied once
    pub one_time_payment: f64,

    /// 1-based calendar month of the lump sum
    pub one_time_payment_month: u32,

    /// Annual return in percent used for the opportunity-cost projection
    pub investment_return_percent: f64,
}

impl PaymentStrategy {
    /// No extra money at all: the standard plan
    pub fn none() -> Self {
        Self::default()
    }

    pub fn new(
        extra_per_period: f64,
        one_time_payment: f64,
        one_time_payment_month: u32,
        investment_return_percent: f64,
    ) -> Self {
        Self {
            extra_per_period,
            one_time_payment,
            one_time_payment_month,
            investment_return_percent,
        }
    }

    pub fn has_extra_payments(&self) -> bool {
        self.extra_per_period > 0.0 || self.one_time_payment > 0.0
    }
}
