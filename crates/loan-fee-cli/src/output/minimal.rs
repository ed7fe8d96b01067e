use serde_json::Value;

use super::cell;

/// Print just the fee, or one `term loan_amount fee_amount` line per bracket.
pub fn print_minimal(value: &Value) {
    match value {
        Value::Array(rows) => {
            for row in rows {
                println!(
                    "{} {} {}",
                    cell(&row["term"]),
                    cell(&row["loan_amount"]),
                    cell(&row["fee_amount"])
                );
            }
        }
        _ => {
            let fee = value.get("result").and_then(|r| r.get("fee")).unwrap_or(value);
            println!("{}", cell(fee));
        }
    }
}
