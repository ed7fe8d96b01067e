use clap::Args;
use serde_json::{json, Value};

use loan_fee_core::Currency;

use crate::input;

/// Arguments for listing fee brackets
#[derive(Args)]
pub struct ScheduleArgs {
    /// Currency code to list
    #[arg(long, default_value = "GBP")]
    pub currency: String,

    /// Only list this term (months)
    #[arg(long)]
    pub term: Option<u32>,

    /// Path to a JSON fee table (defaults to the standard GBP table)
    #[arg(long)]
    pub fee_table: Option<String>,
}

/// One row per bracket: currency, term, loan amount, fee.
pub fn run_schedule(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let table = input::file::load_fee_table(args.fee_table.as_deref())?;
    let currency = Currency::from_code(&args.currency);

    let terms = match args.term {
        Some(term) => vec![term],
        None => table.terms(&currency),
    };

    let code = currency.code();
    let rows: Vec<Value> = terms
        .iter()
        .flat_map(|&term| {
            table.brackets(&currency, term).iter().map(move |b| {
                json!({
                    "currency": code,
                    "term": term,
                    "loan_amount": b.loan_amount,
                    "fee_amount": b.fee_amount,
                })
            })
        })
        .collect();

    if rows.is_empty() {
        return Err(format!(
            "No fee brackets for {}{}",
            currency,
            args.term.map(|t| format!(" / {t} months")).unwrap_or_default()
        )
        .into());
    }

    Ok(Value::Array(rows))
}
