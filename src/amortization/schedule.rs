//! Schedule output structures for amortization runs

use crate::loan::PaymentFrequency;
use serde::{Deserialize, Serialize};

/// A single period of the balance schedule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmortizationPeriod {
    /// 1-based period index
    pub index: u32,

    /// Principal still owed after this period's payment, never negative
    pub remaining_balance: f64,

    /// Extra principal scheduled this period, including any one-time payment
    pub extra_applied: f64,
}

/// A single period of the opportunity-cost portfolio
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InvestmentPeriod {
    pub index: u32,
    pub portfolio_value: f64,
}

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayoffStatus {
    /// Balance reached zero at `payoff_period_index`
    #[default]
    PaidOff,
    /// Safety bound hit with a balance still outstanding; `payoff_period_index` is the nominal term
    Truncated,
    /// Inputs could not be amortized; the result is empty
    Degenerate,
}

/// Complete result of one amortization run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationResult {
    /// Balance schedule in chronological order
    pub schedule: Vec<AmortizationPeriod>,

    /// Scheduled payment per period, before extras
    pub payment_per_period: f64,

    pub total_interest: f64,

    /// Principal plus total interest
    pub total_paid: f64,

    pub payoff_period_index: u32,

    pub periods_per_year: u32,

    /// Portfolio value per period, aligned index-for-index with `schedule`
    pub investment_growth: Vec<InvestmentPeriod>,

    pub payoff_status: PayoffStatus,
}

impl AmortizationResult {
    /// Empty result returned for inputs that cannot be amortized
    pub fn degenerate(frequency: PaymentFrequency) -> Self {
        Self {
            schedule: Vec::new(),
            payment_per_period: 0.0,
            total_interest: 0.0,
            total_paid: 0.0,
            payoff_period_index: 0,
            periods_per_year: frequency.periods_per_year(),
            investment_growth: Vec::new(),
            payoff_status: PayoffStatus::Degenerate,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.schedule.is_empty()
    }

    /// Balance after period `index` (1-based)
    ///
    /// Past the end of the schedule the last recorded balance is held; the loan is
    /// already retired and contributes no further decline. Empty schedules report zero.
    pub fn balance_at(&self, index: u32) -> f64 {
        if index == 0 {
            return self.schedule.first().map(|p| p.remaining_balance).unwrap_or(0.0);
        }
        self.schedule
            .get(index as usize - 1)
            .or_else(|| self.schedule.last())
            .map(|p| p.remaining_balance)
            .unwrap_or(0.0)
    }

    pub fn final_balance(&self) -> f64 {
        self.schedule.last().map(|p| p.remaining_balance).unwrap_or(0.0)
    }

    pub fn final_portfolio_value(&self) -> f64 {
        self.investment_growth.last().map(|p| p.portfolio_value).unwrap_or(0.0)
    }

    /// Sum of all extra principal applied, one-time payment included
    pub fn total_extra_applied(&self) -> f64 {
        self.schedule.iter().map(|p| p.extra_applied).sum()
    }

    /// Calendar months until payoff: `ceil(payoff_period_index / (periods_per_year / 12))`
    ///
    /// Evaluated in integers as `ceil(payoff × 12 / ppy)`, so exact multiples such as
    /// 65 biweekly periods give 30 months with no floating-point spill into a 31st.
    pub fn months_to_payoff(&self) -> u32 {
        if self.periods_per_year == 0 {
            return 0;
        }
        (self.payoff_period_index * 12).div_ceil(self.periods_per_year)
    }
}
