use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::fee::bracket::{BracketSide, FeeBracket, FeeLookup};
use crate::fee::loan::LoanRequest;
use crate::fee::rounding::round_up;
use crate::types::{Currency, Money};

/// Settings that shape every fee computed by a [`FeeCalculator`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeeCalculatorConfig {
    /// Currency the lookup is queried in
    pub currency: Currency,
    /// Requests below this amount are priced as this amount
    pub loan_minimum: Money,
    /// Requests above this amount are priced as this amount
    pub loan_maximum: Money,
    /// Lookup keys and interpolated fees are rounded up onto this step
    pub rounding_multiple: u32,
}

impl Default for FeeCalculatorConfig {
    fn default() -> Self {
        Self {
            currency: Currency::GBP,
            loan_minimum: dec!(1000.00),
            loan_maximum: dec!(20000.00),
            rounding_multiple: 5,
        }
    }
}

/// How a fee was arrived at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeeOutcome {
    /// Linear interpolation between the lower and upper bracket
    Interpolated,
    /// No lower bracket; the upper bracket's fee is used as quoted
    UpperBracketOnly,
    /// Interpolation is undefined (both brackets share a loan amount, or the
    /// arithmetic leaves the range of `Decimal`); the larger fee is used
    DegenerateBrackets,
    /// No upper bracket; the fee is reported as zero
    NoUpperBracket,
}

/// A computed fee together with the inputs that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeQuote {
    pub fee: Money,
    /// Clamped and rounded amount the lookup was queried with
    pub lookup_amount: Money,
    pub outcome: FeeOutcome,
    pub lower_bracket: Option<FeeBracket>,
    pub upper_bracket: Option<FeeBracket>,
}

impl FeeQuote {
    /// The fee, or `None` when no upper bracket existed.
    ///
    /// `fee` reads `0.00` in that case, which is indistinguishable from a
    /// genuine zero fee.
    pub fn determined_fee(&self) -> Option<Money> {
        match self.outcome {
            FeeOutcome::NoUpperBracket => None,
            _ => Some(self.fee),
        }
    }
}

/// Interpolates loan fees between brackets supplied by a [`FeeLookup`].
#[derive(Debug, Clone)]
pub struct FeeCalculator<L> {
    lookup: L,
    config: FeeCalculatorConfig,
}

impl<L: FeeLookup> FeeCalculator<L> {
    pub fn new(lookup: L) -> Self {
        Self::with_config(lookup, FeeCalculatorConfig::default())
    }

    pub fn with_config(lookup: L, config: FeeCalculatorConfig) -> Self {
        Self { lookup, config }
    }

    pub fn config(&self) -> &FeeCalculatorConfig {
        &self.config
    }

    pub fn lookup(&self) -> &L {
        &self.lookup
    }

    pub fn set_currency(&mut self, currency: Currency) {
        self.config.currency = currency;
    }

    pub fn set_loan_minimum(&mut self, loan_minimum: Money) {
        self.config.loan_minimum = loan_minimum;
    }

    pub fn set_loan_maximum(&mut self, loan_maximum: Money) {
        self.config.loan_maximum = loan_maximum;
    }

    pub fn set_rounding_multiple(&mut self, rounding_multiple: u32) {
        self.config.rounding_multiple = rounding_multiple;
    }

    /// Fee for `request`. Returns `0.00` when no fee can be determined.
    pub fn calculate(&self, request: &LoanRequest) -> Money {
        self.quote(request).fee
    }

    /// Fee for `request` along with the brackets and branch that produced it.
    pub fn quote(&self, request: &LoanRequest) -> FeeQuote {
        let lookup_amount = self.lookup_amount(request.amount());
        let currency = &self.config.currency;

        let lower = self
            .lookup
            .find(lookup_amount, request.term(), currency, BracketSide::Lower);
        let upper = self
            .lookup
            .find(lookup_amount, request.term(), currency, BracketSide::Upper);

        let (fee, outcome) = match (lower, upper) {
            (Some(lo), Some(hi)) => self.interpolate(lookup_amount, &lo, &hi),
            (None, Some(hi)) => (hi.fee_amount, FeeOutcome::UpperBracketOnly),
            (_, None) => (Decimal::ZERO, FeeOutcome::NoUpperBracket),
        };

        debug!(
            amount = %request.amount(),
            term = request.term(),
            %currency,
            %lookup_amount,
            %fee,
            ?outcome,
            "fee quoted"
        );

        FeeQuote {
            fee,
            lookup_amount,
            outcome,
            lower_bracket: lower,
            upper_bracket: upper,
        }
    }

    /// Clamp `amount` into the configured range and round it onto the step.
    pub(crate) fn lookup_amount(&self, amount: Money) -> Money {
        let clamped = if amount < self.config.loan_minimum {
            self.config.loan_minimum
        } else if amount > self.config.loan_maximum {
            self.config.loan_maximum
        } else {
            amount
        };
        round_up(clamped, self.config.rounding_multiple)
    }

    fn interpolate(&self, amount: Money, lo: &FeeBracket, hi: &FeeBracket) -> (Money, FeeOutcome) {
        let fallback = (
            hi.fee_amount.max(lo.fee_amount),
            FeeOutcome::DegenerateBrackets,
        );

        let span = match hi.loan_amount.checked_sub(lo.loan_amount) {
            Some(span) if !span.is_zero() => span,
            _ => return fallback,
        };

        let fee = amount
            .checked_sub(lo.loan_amount)
            .zip(hi.fee_amount.checked_sub(lo.fee_amount))
            .and_then(|(offset, rise)| offset.checked_mul(rise))
            .and_then(|scaled| scaled.checked_div(span))
            .and_then(|step| lo.fee_amount.checked_add(step));

        match fee {
            Some(fee) => (
                round_up(fee, self.config.rounding_multiple),
                FeeOutcome::Interpolated,
            ),
            None => {
                debug!(%amount, "interpolation out of decimal range");
                fallback
            }
        }
    }
}
