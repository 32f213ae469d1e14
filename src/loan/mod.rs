//! Loan terms, user inputs and scenario loading

mod data;
mod inputs;
pub mod loader;

pub use data::{LoanParameters, PaymentFrequency, PaymentStrategy};
pub use inputs::{CalculatorInputs, DownPaymentType};
pub use loader::{load_inputs_json, load_scenarios, load_scenarios_from_reader, NamedScenario};
