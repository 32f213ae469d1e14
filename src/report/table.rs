//! Side-by-side schedule rows for tabular display

use crate::amortization::AmortizationResult;
use serde::Serialize;

/// One row of the standard-versus-accelerated balance table
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScheduleRow {
    pub period: u32,
    pub standard_balance: f64,

    /// `None` when there is no accelerated schedule at all ("Paid Off")
    pub accelerated_balance: Option<f64>,
}

/// Build the balance table over the standard schedule
///
/// Accelerated balances past the end of their schedule read as zero, and the table
/// stops at the first row where the accelerated balance reaches zero.
pub fn schedule_table(standard: &AmortizationResult, accelerated: &AmortizationResult) -> Vec<ScheduleRow> {
    let mut rows = Vec::new();

    for (i, period) in standard.schedule.iter().enumerate() {
        let accelerated_balance = match accelerated.schedule.get(i) {
            Some(p) => Some(p.remaining_balance),
            None if !accelerated.schedule.is_empty() => Some(0.0),
            None => None,
        };

        rows.push(ScheduleRow {
            period: i as u32 + 1,
            standard_balance: period.remaining_balance,
            accelerated_balance,
        });

        if matches!(accelerated_balance, Some(b) if b <= 0.0) {
            break;
        }
    }

    rows
}
