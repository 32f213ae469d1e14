//! Presentation of evaluations: currency text, balance tables, CSV series

mod currency;
mod table;
mod summary;
mod csv_out;

pub use currency::{format_currency, Currency};
pub use table::{schedule_table, ScheduleRow};
pub use summary::{format_payoff_date, opportunity_message, render_summary, SummaryReport};
pub use csv_out::{write_batch_summary, write_series};
