//! Result types for comparing a standard plan against an accelerated one

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Whole years plus remaining months
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TimeSaved {
    pub years: u32,
    pub months: u32,
}

impl TimeSaved {
    /// Convert a period count using `periods_per_year` as the basis
    ///
    /// Years are whole periods-per-year blocks; the remainder is rounded to the nearest
    /// month. A remainder that rounds up to 12 months carries into the years.
    /// Negative counts (accelerated slower than standard) report zero.
    pub fn from_periods(periods: i64, periods_per_year: u32) -> Self {
        if periods <= 0 || periods_per_year == 0 {
            return Self::default();
        }

        let ppy = periods_per_year as i64;
        let mut years = (periods / ppy) as u32;
        let remainder = (periods % ppy) as f64;
        let mut months = (remainder / (periods_per_year as f64 / 12.0)).round() as u32;

        if months >= 12 {
            years += 1;
            months -= 12;
        }

        Self { years, months }
    }

    pub fn total_months(&self) -> u32 {
        self.years * 12 + self.months
    }
}

impl fmt::Display for TimeSaved {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}y {}m", self.years, self.months)
    }
}

/// One point of the invest-versus-prepay comparison
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EquityPoint {
    pub index: u32,

    /// Standard balance minus accelerated balance at this period
    pub extra_equity: f64,

    /// Value of the same extra money had it been invested
    pub investment_value: f64,
}

/// Which use of the extra money ends ahead
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "choice", content = "advantage", rename_all = "snake_case")]
pub enum Verdict {
    /// Investing ends ahead by this amount
    Invest(f64),
    /// Paying down the loan ends ahead (or level) by this amount
    Prepay(f64),
}

/// Extra equity from accelerated paydown against the invested alternative
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpportunityCost {
    /// One point per accelerated schedule period
    pub series: Vec<EquityPoint>,

    pub final_investment_value: f64,

    pub final_extra_equity: f64,

    /// `final_investment_value − final_extra_equity`; positive favours investing
    pub difference: f64,
}

impl OpportunityCost {
    pub fn verdict(&self) -> Verdict {
        if self.difference > 0.0 {
            Verdict::Invest(self.difference)
        } else {
            Verdict::Prepay(self.difference.abs())
        }
    }
}

/// Aggregate comparison between the standard and accelerated plans
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonSummary {
    /// Interest avoided by the accelerated plan, floored at zero
    pub interest_saved: f64,

    /// Standard payoff period minus accelerated payoff period
    pub periods_saved: i64,

    pub time_saved: TimeSaved,

    pub standard_payoff_months: u32,
    pub accelerated_payoff_months: u32,

    pub standard_payoff_date: NaiveDate,
    pub accelerated_payoff_date: NaiveDate,

    pub opportunity_cost: OpportunityCost,
}
