use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::warn;

use crate::error::LoanFeeError;
use crate::fee::bracket::{FeeBracket, FeeLookup};
use crate::fee::calculator::{FeeCalculator, FeeCalculatorConfig, FeeOutcome};
use crate::fee::loan::LoanRequest;
use crate::types::{with_metadata, ComputationOutput, Money, Term};
use crate::LoanFeeResult;

/// Input for a single fee computation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeeInput {
    /// Requested loan amount
    pub amount: Money,
    /// Loan term in months
    pub term: Term,
    /// Calculator settings; omitted fields take their defaults
    #[serde(default)]
    pub config: FeeCalculatorConfig,
}

/// Output of the fee computation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeeOutput {
    /// Fee charged; zero when no fee could be determined
    pub fee: Money,
    /// False when no upper bracket existed and `fee` is a placeholder zero
    pub fee_determined: bool,
    /// Clamped and rounded amount used for the bracket lookup
    pub lookup_amount: Money,
    pub outcome: FeeOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lower_bracket: Option<FeeBracket>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upper_bracket: Option<FeeBracket>,
}

/// Compute a loan fee against `lookup`, wrapped in the standard envelope.
///
/// The request amount is clamped into `[loan_minimum, loan_maximum]` and
/// rounded up onto `rounding_multiple` before the bracket lookup. The fee is
/// interpolated linearly between the lower and upper bracket and rounded up
/// again. Clamping and missing brackets are reported as warnings.
pub fn calculate_fee<L: FeeLookup>(
    input: &FeeInput,
    lookup: &L,
) -> LoanFeeResult<ComputationOutput<FeeOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_fee_input(input)?;

    let config = &input.config;
    if input.amount < config.loan_minimum {
        warnings.push(format!(
            "Amount {} is below the minimum loan of {}; priced at the minimum",
            input.amount, config.loan_minimum
        ));
    } else if input.amount > config.loan_maximum {
        warnings.push(format!(
            "Amount {} exceeds the maximum loan of {}; priced at the maximum",
            input.amount, config.loan_maximum
        ));
    }

    let calculator = FeeCalculator::with_config(lookup, config.clone());
    let quote = calculator.quote(&LoanRequest::new(input.amount, input.term));

    match quote.outcome {
        FeeOutcome::NoUpperBracket => {
            warn!(
                lookup_amount = %quote.lookup_amount,
                term = input.term,
                currency = %config.currency,
                "no upper fee bracket"
            );
            warnings.push(format!(
                "No fee bracket at or above {} for a {}-month term in {}; fee could not be determined",
                quote.lookup_amount, input.term, config.currency
            ));
        }
        FeeOutcome::UpperBracketOnly => warnings.push(format!(
            "No fee bracket below {}; upper bracket fee used without interpolation",
            quote.lookup_amount
        )),
        FeeOutcome::DegenerateBrackets => warnings.push(
            "Interpolation between the brackets is undefined; larger fee used".to_string(),
        ),
        FeeOutcome::Interpolated => {}
    }

    let output = FeeOutput {
        fee: quote.fee,
        fee_determined: quote.determined_fee().is_some(),
        lookup_amount: quote.lookup_amount,
        outcome: quote.outcome,
        lower_bracket: quote.lower_bracket,
        upper_bracket: quote.upper_bracket,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Linear interpolation between fee brackets, rounded up to multiple",
        input,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn validate_fee_input(input: &FeeInput) -> LoanFeeResult<()> {
    if input.amount < Decimal::ZERO {
        return Err(LoanFeeError::InvalidInput {
            field: "amount".into(),
            reason: "Loan amount cannot be negative".into(),
        });
    }
    if input.term == 0 {
        return Err(LoanFeeError::InvalidInput {
            field: "term".into(),
            reason: "Loan term must be at least one month".into(),
        });
    }
    if input.config.loan_minimum < Decimal::ZERO {
        return Err(LoanFeeError::InvalidInput {
            field: "config.loan_minimum".into(),
            reason: "Loan minimum cannot be negative".into(),
        });
    }
    if input.config.loan_minimum > input.config.loan_maximum {
        return Err(LoanFeeError::InvalidInput {
            field: "config.loan_minimum / config.loan_maximum".into(),
            reason: format!(
                "Loan minimum {} exceeds loan maximum {}",
                input.config.loan_minimum, input.config.loan_maximum
            ),
        });
    }
    Ok(())
}
