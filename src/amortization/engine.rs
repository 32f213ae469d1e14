//! Core amortization engine for period-by-period balance schedules

use super::payment::monthly_payment;
use super::schedule::{AmortizationPeriod, AmortizationResult, InvestmentPeriod, PayoffStatus};
use super::state::AmortizationState;
use crate::loan::{LoanParameters, PaymentFrequency, PaymentStrategy};

/// Loop bound as a multiple of the nominal number of periods
const SAFETY_BOUND_MULTIPLIER: u32 = 2;

/// Upper limit on schedule capacity reserved before the loop starts
const MAX_PREALLOCATED_PERIODS: u32 = 1_200;

/// Amortization engine for one loan at one payment cadence
#[derive(Debug, Clone, Copy)]
pub struct AmortizationEngine {
    loan: LoanParameters,
    frequency: PaymentFrequency,
}

impl AmortizationEngine {
    pub fn new(loan: LoanParameters, frequency: PaymentFrequency) -> Self {
        Self { loan, frequency }
    }

    pub fn loan(&self) -> &LoanParameters {
        &self.loan
    }

    pub fn frequency(&self) -> PaymentFrequency {
        self.frequency
    }

    /// Scheduled payment per period at this cadence
    ///
    /// Always anchored on the contractual monthly payment, so biweekly plans are
    /// fractions of it rather than independently amortized.
    pub fn payment_per_period(&self) -> f64 {
        let monthly = monthly_payment(self.loan.principal, self.loan.annual_rate_percent, self.loan.term_years);
        self.frequency.payment_from_monthly(monthly)
    }

    /// Run with no extra or one-time payments
    pub fn run_standard(&self) -> AmortizationResult {
        self.run(&PaymentStrategy::none())
    }

    /// Run the balance and investment recurrences in lockstep
    pub fn run(&self, strategy: &PaymentStrategy) -> AmortizationResult {
        if !self.loan.is_amortizable() {
            log::debug!("degenerate loan terms {:?}, returning empty schedule", self.loan);
            return AmortizationResult::degenerate(self.frequency);
        }

        self.run_with_payment(strategy, self.payment_per_period())
    }

    /// Amortize with an explicit per-period payment instead of the annuity payment
    pub(crate) fn run_with_payment(&self, strategy: &PaymentStrategy, payment: f64) -> AmortizationResult {
        let periods_per_year = self.frequency.periods_per_year();
        let periodic_rate = self.loan.annual_rate_percent / periods_per_year as f64 / 100.0;
        let periodic_investment_rate = strategy.investment_return_percent / periods_per_year as f64 / 100.0;

        let nominal_periods = self.loan.nominal_periods(self.frequency);
        let max_periods = nominal_periods.saturating_mul(SAFETY_BOUND_MULTIPLIER);
        let capacity = nominal_periods.min(MAX_PREALLOCATED_PERIODS) as usize;

        let one_time_period = self.frequency.period_for_month(strategy.one_time_payment_month);
        let mut state = AmortizationState::new(self.loan.principal, one_time_period);

        let mut result = AmortizationResult {
            schedule: Vec::with_capacity(capacity),
            payment_per_period: payment,
            total_interest: 0.0,
            total_paid: 0.0,
            payoff_period_index: nominal_periods,
            periods_per_year,
            investment_growth: Vec::with_capacity(capacity),
            payoff_status: PayoffStatus::Truncated,
        };

        while state.period < max_periods && !state.is_paid_off() {
            state.advance_period();

            let extra = self.calculate_period(&mut state, payment, periodic_rate, strategy);

            result.schedule.push(AmortizationPeriod {
                index: state.period,
                remaining_balance: state.balance.max(0.0),
                extra_applied: extra,
            });

            state.grow_portfolio(extra, periodic_investment_rate);
            result.investment_growth.push(InvestmentPeriod {
                index: state.period,
                portfolio_value: state.portfolio,
            });

            if state.is_paid_off() {
                result.payoff_period_index = state.period;
                result.payoff_status = PayoffStatus::PaidOff;
            }
        }

        if result.payoff_status == PayoffStatus::Truncated {
            log::warn!(
                "balance {:.2} still outstanding after {} periods; reporting nominal payoff period {}",
                state.balance,
                max_periods,
                nominal_periods
            );
        }

        result.total_interest = state.total_interest;
        result.total_paid = self.loan.principal + state.total_interest;

        log::debug!(
            "{} run: payment {:.2}, payoff period {}, interest {:.2}",
            self.frequency,
            payment,
            result.payoff_period_index,
            result.total_interest
        );

        result
    }

    /// Apply one period's interest and principal; returns the extra scheduled this period
    fn calculate_period(
        &self,
        state: &mut AmortizationState,
        payment: f64,
        periodic_rate: f64,
        strategy: &PaymentStrategy,
    ) -> f64 {
        let interest = state.balance * periodic_rate;
        let mut principal_portion = payment - interest;

        let mut extra = strategy.extra_per_period;
        if state.is_one_time_period() {
            extra += strategy.one_time_payment;
        }

        // Final period: the scheduled payment alone clears the loan
        if state.balance < payment {
            principal_portion = state.balance;
            extra = 0.0;
        }

        let retired = (principal_portion + extra).clamp(0.0, state.balance);

        state.balance -= retired;
        state.total_interest += interest;

        extra
    }
}

/// Amortize `loan` at `frequency` under `strategy`
pub fn run(loan: &LoanParameters, frequency: PaymentFrequency, strategy: &PaymentStrategy) -> AmortizationResult {
    AmortizationEngine::new(*loan, frequency).run(strategy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn reference_loan() -> LoanParameters {
        LoanParameters::new(300_000.0, 6.0, 30)
    }

    fn with_extra(extra: f64) -> PaymentStrategy {
        PaymentStrategy::new(extra, 0.0, 1, 7.0)
    }

    fn assert_monotonic(result: &AmortizationResult) {
        for pair in result.schedule.windows(2) {
            assert!(
                pair[0].remaining_balance >= pair[1].remaining_balance,
                "balance rose between periods {} and {}",
                pair[0].index,
                pair[1].index
            );
        }
        assert!(result.schedule.iter().all(|p| p.remaining_balance >= 0.0));
    }

    #[test]
    fn test_standard_monthly_pays_off_at_term() {
        let result = run(&reference_loan(), PaymentFrequency::Monthly, &PaymentStrategy::none());

        assert_abs_diff_eq!(result.payment_per_period, 1798.65, epsilon = 0.01);
        assert_eq!(result.payoff_period_index, 360);
        assert_eq!(result.schedule.len(), 360);
        assert_eq!(result.payoff_status, PayoffStatus::PaidOff);
        assert_eq!(result.final_balance(), 0.0);
        assert_monotonic(&result);
    }

    #[test]
    fn test_term_matches_for_other_loans() {
        for (principal, rate, years) in [(150_000.0, 3.25, 15), (80_000.0, 9.0, 10), (500_000.0, 7.5, 25)] {
            let loan = LoanParameters::new(principal, rate, years);
            let result = run(&loan, PaymentFrequency::Monthly, &PaymentStrategy::none());
            assert_eq!(result.payoff_period_index, years * 12);
        }
    }

    #[test]
    fn test_total_paid_is_principal_plus_interest() {
        let loan = reference_loan();
        for strategy in [PaymentStrategy::none(), with_extra(200.0), PaymentStrategy::new(0.0, 25_000.0, 6, 5.0)] {
            let result = run(&loan, PaymentFrequency::Biweekly, &strategy);
            assert_eq!(result.total_paid, loan.principal + result.total_interest);
        }
    }

    #[test]
    fn test_standard_interest_matches_closed_form() {
        let result = run(&reference_loan(), PaymentFrequency::Monthly, &PaymentStrategy::none());
        // 359 full payments plus a final period slightly smaller than the payment
        let approx_interest = 1798.65 * 360.0 - 300_000.0;
        assert_relative_eq!(result.total_interest, approx_interest, max_relative = 1e-4);
    }

    #[test]
    fn test_accelerated_biweekly_pays_off_sooner() {
        let loan = reference_loan();
        let monthly = run(&loan, PaymentFrequency::Monthly, &PaymentStrategy::none());
        let accelerated = run(&loan, PaymentFrequency::AcceleratedBiweekly, &PaymentStrategy::none());

        assert_abs_diff_eq!(accelerated.payment_per_period, 1798.65 / 2.0, epsilon = 0.01);
        assert_eq!(accelerated.periods_per_year, 26);
        assert!(accelerated.months_to_payoff() < monthly.months_to_payoff());
        assert!(accelerated.total_interest < monthly.total_interest);
        assert_monotonic(&accelerated);
    }

    #[test]
    fn test_accelerated_biweekly_sooner_across_loans() {
        for (principal, rate, years) in [(100_000.0, 4.0, 15), (250_000.0, 6.5, 30), (40_000.0, 12.0, 5)] {
            let loan = LoanParameters::new(principal, rate, years);
            let monthly = run(&loan, PaymentFrequency::Monthly, &PaymentStrategy::none());
            let accelerated = run(&loan, PaymentFrequency::AcceleratedBiweekly, &PaymentStrategy::none());
            assert!(accelerated.months_to_payoff() < monthly.months_to_payoff());
        }
    }

    #[test]
    fn test_plain_biweekly_payment() {
        let result = run(&reference_loan(), PaymentFrequency::Biweekly, &PaymentStrategy::none());
        assert_abs_diff_eq!(result.payment_per_period, 1798.6516 * 12.0 / 26.0, epsilon = 0.001);
        assert_monotonic(&result);
        assert!(result.payoff_period_index <= 30 * 26);
    }

    #[test]
    fn test_extra_payment_monotonicity() {
        let loan = reference_loan();
        let mut prev = run(&loan, PaymentFrequency::Monthly, &with_extra(0.0));

        for extra in [50.0, 100.0, 200.0, 500.0, 1000.0, 5000.0] {
            let next = run(&loan, PaymentFrequency::Monthly, &with_extra(extra));
            assert!(next.payoff_period_index <= prev.payoff_period_index);
            assert!(next.total_interest <= prev.total_interest);
            assert_monotonic(&next);
            prev = next;
        }
    }

    #[test]
    fn test_one_time_payment_lands_once() {
        let strategy = PaymentStrategy::new(0.0, 10_000.0, 12, 0.0);
        let result = run(&reference_loan(), PaymentFrequency::Monthly, &strategy);

        for period in &result.schedule {
            if period.index == 12 {
                assert_eq!(period.extra_applied, 10_000.0);
            } else {
                assert_eq!(period.extra_applied, 0.0);
            }
        }

        let drop_at_12 = result.balance_at(11) - result.balance_at(12);
        assert!(drop_at_12 > 10_000.0);
    }

    #[test]
    fn test_one_time_payment_biweekly_period() {
        let strategy = PaymentStrategy::new(0.0, 5_000.0, 6, 0.0);
        let result = run(&reference_loan(), PaymentFrequency::AcceleratedBiweekly, &strategy);

        let lump: Vec<u32> = result
            .schedule
            .iter()
            .filter(|p| p.extra_applied > 0.0)
            .map(|p| p.index)
            .collect();
        assert_eq!(lump, vec![13]);
    }

    #[test]
    fn test_extra_combines_with_one_time_payment() {
        let strategy = PaymentStrategy::new(100.0, 1_000.0, 3, 0.0);
        let result = run(&reference_loan(), PaymentFrequency::Monthly, &strategy);

        assert_eq!(result.schedule[1].extra_applied, 100.0);
        assert_eq!(result.schedule[2].extra_applied, 1_100.0);
        assert_eq!(result.schedule[3].extra_applied, 100.0);
    }

    #[test]
    fn test_final_period_applies_no_extra() {
        let result = run(&reference_loan(), PaymentFrequency::Monthly, &with_extra(200.0));
        let last = result.schedule.last().unwrap();

        assert_eq!(last.remaining_balance, 0.0);
        assert_eq!(last.extra_applied, 0.0);
    }

    #[test]
    fn test_lump_larger_than_balance_clamps() {
        let loan = LoanParameters::new(10_000.0, 5.0, 5);
        let strategy = PaymentStrategy::new(0.0, 50_000.0, 2, 0.0);
        let result = run(&loan, PaymentFrequency::Monthly, &strategy);

        assert_eq!(result.payoff_period_index, 2);
        assert_eq!(result.schedule.len(), 2);
        assert_eq!(result.final_balance(), 0.0);
        assert_monotonic(&result);
    }

    #[test]
    fn test_investment_growth_aligned_with_schedule() {
        let result = run(&reference_loan(), PaymentFrequency::Monthly, &with_extra(200.0));

        assert_eq!(result.investment_growth.len(), result.schedule.len());
        for (period, growth) in result.schedule.iter().zip(&result.investment_growth) {
            assert_eq!(period.index, growth.index);
        }
    }

    #[test]
    fn test_investment_growth_compounds() {
        let strategy = PaymentStrategy::new(100.0, 0.0, 1, 12.0);
        let result = run(&reference_loan(), PaymentFrequency::Monthly, &strategy);

        assert_abs_diff_eq!(result.investment_growth[0].portfolio_value, 101.0, epsilon = 1e-9);
        assert_abs_diff_eq!(result.investment_growth[1].portfolio_value, 203.01, epsilon = 1e-9);
    }

    #[test]
    fn test_zero_return_portfolio_is_sum_of_extras() {
        let strategy = PaymentStrategy::new(250.0, 3_000.0, 4, 0.0);
        let result = run(&reference_loan(), PaymentFrequency::Monthly, &strategy);

        assert_relative_eq!(result.final_portfolio_value(), result.total_extra_applied(), max_relative = 1e-12);
    }

    #[test]
    fn test_degenerate_inputs() {
        let loan = LoanParameters::new(0.0, 5.0, 30);
        let result = run(&loan, PaymentFrequency::Monthly, &PaymentStrategy::new(0.0, 0.0, 1, 0.0));

        assert!(result.schedule.is_empty());
        assert!(result.investment_growth.is_empty());
        assert_eq!(result.total_interest, 0.0);
        assert_eq!(result.total_paid, 0.0);
        assert_eq!(result.payment_per_period, 0.0);
        assert_eq!(result.payoff_status, PayoffStatus::Degenerate);
    }

    #[test]
    fn test_degenerate_rate_and_term() {
        let zero_rate = run(&LoanParameters::new(100_000.0, 0.0, 30), PaymentFrequency::Monthly, &PaymentStrategy::none());
        let zero_term = run(&LoanParameters::new(100_000.0, 5.0, 0), PaymentFrequency::Biweekly, &PaymentStrategy::none());

        assert!(zero_rate.is_empty());
        assert!(zero_term.is_empty());
        assert_eq!(zero_term.periods_per_year, 26);
    }

    #[test]
    fn test_reference_accelerated_plan() {
        let loan = reference_loan();
        let standard = run(&loan, PaymentFrequency::Monthly, &PaymentStrategy::none());
        let accelerated = run(&loan, PaymentFrequency::Monthly, &with_extra(200.0));

        assert_eq!(standard.payoff_period_index, 360);
        assert!(accelerated.payoff_period_index < 360);
        assert!(standard.total_interest - accelerated.total_interest > 0.0);
    }

    #[test]
    fn test_safety_bound_truncates_schedule() {
        // A 4,000 payment on a one-year 100,000 loan still leaves about 11,000 owed after 24 periods
        let loan = LoanParameters::new(100_000.0, 6.0, 1);
        let engine = AmortizationEngine::new(loan, PaymentFrequency::Monthly);
        let result = engine.run_with_payment(&PaymentStrategy::none(), 4_000.0);

        assert_eq!(result.payoff_status, PayoffStatus::Truncated);
        assert_eq!(result.schedule.len(), 24);
        assert_eq!(result.investment_growth.len(), 24);
        assert_eq!(result.payoff_period_index, 12);
        assert!(result.final_balance() > 0.0);
        assert_eq!(result.total_paid, loan.principal + result.total_interest);
        assert_monotonic(&result);
    }

    #[test]
    fn test_payment_below_interest_never_grows_balance() {
        let loan = LoanParameters::new(100_000.0, 6.0, 1);
        let engine = AmortizationEngine::new(loan, PaymentFrequency::Biweekly);
        let result = engine.run_with_payment(&PaymentStrategy::none(), 100.0);

        assert_eq!(result.payoff_status, PayoffStatus::Truncated);
        assert_eq!(result.schedule.len(), 52);
        assert_eq!(result.payoff_period_index, 26);
        assert!(result.schedule.iter().all(|p| p.remaining_balance == 100_000.0));
    }

    #[test]
    fn test_tiny_rate_pays_off_near_term() {
        let loan = LoanParameters::new(300_000.0, 1.3e-12, 30);
        let result = run(&loan, PaymentFrequency::Monthly, &PaymentStrategy::none());

        assert_relative_eq!(result.payment_per_period, 300_000.0 / 360.0, max_relative = 1e-9);
        assert_eq!(result.payoff_status, PayoffStatus::PaidOff);
        // Rounding may leave a sub-cent balance for one more period
        assert!((360..=361).contains(&result.payoff_period_index));
    }

    #[test]
    fn test_overlong_term_is_degenerate() {
        let loan = LoanParameters::new(300_000.0, 6.0, 100_000_000);
        let result = run(&loan, PaymentFrequency::Biweekly, &with_extra(200.0));

        assert!(result.is_empty());
        assert_eq!(result.payoff_status, PayoffStatus::Degenerate);
    }

    #[test]
    fn test_unreachable_one_time_month_is_never_applied() {
        for month in [200_000_000, u32::MAX] {
            let strategy = PaymentStrategy::new(0.0, 10_000.0, month, 0.0);
            let result = run(&reference_loan(), PaymentFrequency::Biweekly, &strategy);

            assert_eq!(result.payoff_status, PayoffStatus::PaidOff);
            assert_eq!(result.total_extra_applied(), 0.0);
        }
    }

    #[test]
    fn test_engine_is_reentrant() {
        let engine = AmortizationEngine::new(reference_loan(), PaymentFrequency::Monthly);
        let first = engine.run(&with_extra(200.0));
        let _other = engine.run(&with_extra(900.0));
        let again = engine.run(&with_extra(200.0));

        assert_eq!(first, again);
    }
}
