pub mod bracket;
pub mod calculator;
pub mod loan;
pub mod quote;
pub mod rounding;

#[cfg(feature = "fee_table")]
pub mod table;

pub use bracket::{BracketSide, FeeBracket, FeeLookup};
pub use calculator::{FeeCalculator, FeeCalculatorConfig, FeeOutcome, FeeQuote};
pub use loan::LoanRequest;
pub use quote::{calculate_fee, FeeInput, FeeOutput};
pub use rounding::round_up;

#[cfg(feature = "fee_table")]
pub use table::{FeeSchedule, FeeTable};
