use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;
use tracing::debug;

use loan_fee_core::fee::{self, FeeCalculatorConfig, FeeInput};
use loan_fee_core::Currency;

use crate::input;

/// Arguments for a loan fee calculation
#[derive(Args)]
pub struct FeeArgs {
    /// Requested loan amount (e.g. 2750.00)
    #[arg(long)]
    pub amount: Option<Decimal>,

    /// Loan term in months
    #[arg(long)]
    pub term: Option<u32>,

    /// Currency code used for the bracket lookup
    #[arg(long)]
    pub currency: Option<String>,

    /// Smallest loan amount priced; smaller requests are priced at this amount
    #[arg(long)]
    pub loan_minimum: Option<Decimal>,

    /// Largest loan amount priced; larger requests are priced at this amount
    #[arg(long)]
    pub loan_maximum: Option<Decimal>,

    /// Step that lookup amounts and fees are rounded up onto
    #[arg(long)]
    pub rounding_multiple: Option<u32>,

    /// Path to a JSON fee table (defaults to the standard GBP table)
    #[arg(long)]
    pub fee_table: Option<String>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_fee(args: FeeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let fee_input = resolve_fee_input(&args, input::stdin::read_stdin::<FeeInput>)?;

    let table = input::file::load_fee_table(args.fee_table.as_deref())?;
    debug!(amount = %fee_input.amount, term = fee_input.term, "calculating fee");

    let result = fee::calculate_fee(&fee_input, &table)?;
    Ok(serde_json::to_value(result)?)
}

/// `--input` file first, then JSON piped on stdin, then individual flags.
fn resolve_fee_input<F>(args: &FeeArgs, piped: F) -> Result<FeeInput, Box<dyn std::error::Error>>
where
    F: FnOnce() -> Result<Option<FeeInput>, Box<dyn std::error::Error>>,
{
    if let Some(ref path) = args.input {
        return input::file::read_json(path);
    }
    if let Some(data) = piped()? {
        return Ok(data);
    }
    Ok(FeeInput {
        amount: args
            .amount
            .ok_or("--amount is required (or provide --input)")?,
        term: args.term.ok_or("--term is required (or provide --input)")?,
        config: config_from_flags(args),
    })
}

fn config_from_flags(args: &FeeArgs) -> FeeCalculatorConfig {
    let defaults = FeeCalculatorConfig::default();
    FeeCalculatorConfig {
        currency: args
            .currency
            .as_deref()
            .map(Currency::from_code)
            .unwrap_or(defaults.currency),
        loan_minimum: args.loan_minimum.unwrap_or(defaults.loan_minimum),
        loan_maximum: args.loan_maximum.unwrap_or(defaults.loan_maximum),
        rounding_multiple: args.rounding_multiple.unwrap_or(defaults.rounding_multiple),
    }
}
