//! Running state of one amortization run
//!
//! The loan balance and the hypothetical investment portfolio are advanced together so
//! that every schedule period has exactly one matching investment period.

/// State of the loan and the side portfolio at a point in time during amortization
#[derive(Debug, Clone)]
pub struct AmortizationState {
    /// Current period (1-indexed once the first period has started)
    pub period: u32,

    /// Outstanding principal
    pub balance: f64,

    /// Interest accrued so far
    pub total_interest: f64,

    /// Value of the extra payments had they been invested instead
    pub portfolio: f64,

    /// Period at which the one-time payment is due (0 = never)
    pub one_time_period: u32,
}

impl AmortizationState {
    /// Initialize state at loan origination
    pub fn new(principal: f64, one_time_period: u32) -> Self {
        Self {
            period: 0,
            balance: principal,
            total_interest: 0.0,
            portfolio: 0.0,
            one_time_period,
        }
    }

    /// Advance to the next period
    pub fn advance_period(&mut self) {
        self.period += 1;
    }

    pub fn is_paid_off(&self) -> bool {
        self.balance <= 0.0
    }

    pub fn is_one_time_period(&self) -> bool {
        self.period == self.one_time_period
    }

    /// Contribute this period's extra money at period start, then grow for one period
    pub fn grow_portfolio(&mut self, contribution: f64, periodic_rate: f64) {
        self.portfolio = (self.portfolio + contribution) * (1.0 + periodic_rate);
    }
}
