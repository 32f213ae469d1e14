//! Standard-versus-accelerated comparison and the opportunity-cost projection

use super::types::{ComparisonSummary, EquityPoint, OpportunityCost, TimeSaved};
use crate::amortization::AmortizationResult;
use chrono::{Datelike, Days, Local, Months, NaiveDate};

/// Compare two runs with payoff dates counted from today
pub fn compare(standard: &AmortizationResult, accelerated: &AmortizationResult) -> ComparisonSummary {
    compare_as_of(standard, accelerated, Local::now().date_naive())
}

/// Compare two runs with payoff dates counted from `as_of`
///
/// Both runs are expected to share a payment frequency; the standard run's
/// periods-per-year is the basis for converting saved periods into years and months.
pub fn compare_as_of(
    standard: &AmortizationResult,
    accelerated: &AmortizationResult,
    as_of: NaiveDate,
) -> ComparisonSummary {
    let interest_saved = (standard.total_interest - accelerated.total_interest).max(0.0);

    let periods_saved = standard.payoff_period_index as i64 - accelerated.payoff_period_index as i64;
    let time_saved = TimeSaved::from_periods(periods_saved, standard.periods_per_year);

    let standard_payoff_months = standard.months_to_payoff();
    let accelerated_payoff_months = accelerated.months_to_payoff();

    ComparisonSummary {
        interest_saved,
        periods_saved,
        time_saved,
        standard_payoff_months,
        accelerated_payoff_months,
        standard_payoff_date: add_months(as_of, standard_payoff_months),
        accelerated_payoff_date: add_months(as_of, accelerated_payoff_months),
        opportunity_cost: opportunity_cost(standard, accelerated),
    }
}

/// Extra equity at each accelerated period against the invested alternative
///
/// The comparison is terminal at the accelerated run's own payoff period.
pub fn opportunity_cost(standard: &AmortizationResult, accelerated: &AmortizationResult) -> OpportunityCost {
    let series: Vec<EquityPoint> = accelerated
        .schedule
        .iter()
        .zip(&accelerated.investment_growth)
        .map(|(period, growth)| EquityPoint {
            index: period.index,
            extra_equity: standard.balance_at(period.index) - period.remaining_balance,
            investment_value: growth.portfolio_value,
        })
        .collect();

    let final_investment_value = accelerated.final_portfolio_value();
    let final_extra_equity = series.last().map(|p| p.extra_equity).unwrap_or(0.0);

    OpportunityCost {
        series,
        final_investment_value,
        final_extra_equity,
        difference: final_investment_value - final_extra_equity,
    }
}

/// Add calendar months keeping the day-of-month offset, so a day past the end of the
/// target month rolls into the next one (Oct 31 + 4 months = Mar 3)
fn add_months(date: NaiveDate, months: u32) -> NaiveDate {
    date.with_day(1)
        .and_then(|first| first.checked_add_months(Months::new(months)))
        .and_then(|target| target.checked_add_days(Days::new(u64::from(date.day0()))))
        .unwrap_or(NaiveDate::MAX)
}
