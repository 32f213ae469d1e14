//! Plain-text summary of an evaluation

use super::currency::{format_currency, Currency};
use super::table::schedule_table;
use crate::comparison::{OpportunityCost, Verdict};
use crate::scenario::Evaluation;
use chrono::NaiveDate;
use std::fmt;

/// Month and year only, e.g. `Oct 2056`
pub fn format_payoff_date(date: NaiveDate) -> String {
    date.format("%b %Y").to_string()
}

/// One-sentence verdict on investing versus prepaying
pub fn opportunity_message(cost: &OpportunityCost, currency: Currency) -> String {
    match cost.verdict() {
        Verdict::Invest(advantage) => format!(
            "By investing your extra payments, you could potentially have {} more in net worth \
             by the time your mortgage would have been paid off.",
            format_currency(advantage, currency, 0)
        ),
        Verdict::Prepay(advantage) => format!(
            "By making extra payments on your mortgage, you are projected to be {} ahead \
             compared to investing.",
            format_currency(advantage, currency, 0)
        ),
    }
}

/// Text report over one evaluation, rendered through `Display`
pub struct SummaryReport<'a> {
    evaluation: &'a Evaluation,
    currency: Currency,
    rows: usize,
}

impl<'a> SummaryReport<'a> {
    /// Report with the first `rows` rows of the balance table (0 omits the table)
    pub fn new(evaluation: &'a Evaluation, currency: Currency, rows: usize) -> Self {
        Self { evaluation, currency, rows }
    }

    fn money(&self, amount: f64) -> String {
        format_currency(amount, self.currency, 2)
    }

    fn comparison_line(&self, f: &mut fmt::Formatter<'_>, label: &str, standard: &str, accelerated: &str) -> fmt::Result {
        writeln!(f, "{:<24} {:>16} {:>16}", label, standard, accelerated)
    }

    fn write_table(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "{:>6} {:>16} {:>16}", "Period", "Standard", "Accelerated")?;
        writeln!(f, "{}", "-".repeat(40))?;

        let table = schedule_table(&self.evaluation.standard, &self.evaluation.accelerated);
        for row in table.iter().take(self.rows) {
            let accelerated = match row.accelerated_balance {
                Some(balance) => self.money(balance),
                None => "Paid Off".to_string(),
            };
            writeln!(f, "{:>6} {:>16} {:>16}", row.period, self.money(row.standard_balance), accelerated)?;
        }
        Ok(())
    }
}

impl fmt::Display for SummaryReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let evaluation = self.evaluation;
        let summary = &evaluation.summary;

        writeln!(f, "Payment frequency: {}", evaluation.frequency.label())?;
        writeln!(f)?;
        self.comparison_line(f, "", "Standard", "Accelerated")?;
        writeln!(f, "{}", "-".repeat(58))?;
        self.comparison_line(
            f,
            "Payment per period",
            &self.money(evaluation.standard.payment_per_period),
            &self.money(evaluation.accelerated_payment_per_period),
        )?;
        self.comparison_line(
            f,
            "Total interest",
            &self.money(evaluation.standard.total_interest),
            &self.money(evaluation.accelerated.total_interest),
        )?;
        self.comparison_line(
            f,
            "Total paid",
            &self.money(evaluation.standard.total_paid),
            &self.money(evaluation.accelerated.total_paid),
        )?;
        self.comparison_line(
            f,
            "Payoff date",
            &format_payoff_date(summary.standard_payoff_date),
            &format_payoff_date(summary.accelerated_payoff_date),
        )?;
        writeln!(f)?;
        writeln!(f, "Interest saved: {}", self.money(summary.interest_saved))?;
        writeln!(f, "Time saved:     {}", summary.time_saved)?;

        if evaluation.show_opportunity_cost {
            let cost = &summary.opportunity_cost;
            writeln!(f)?;
            writeln!(f, "Invested instead: {}", self.money(cost.final_investment_value))?;
            writeln!(f, "Extra equity:     {}", self.money(cost.final_extra_equity))?;
            writeln!(f, "{}", opportunity_message(cost, self.currency))?;
        }

        if self.rows > 0 {
            self.write_table(f)?;
        }
        Ok(())
    }
}

/// Render the full text report: headline figures, verdict, and the first `rows` table rows
pub fn render_summary(evaluation: &Evaluation, currency: Currency, rows: usize) -> String {
    SummaryReport::new(evaluation, currency, rows).to_string()
}
