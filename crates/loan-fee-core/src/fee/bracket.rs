use serde::{Deserialize, Serialize};

use crate::types::{Currency, Money, Term};

/// A calibration point: at `loan_amount` the fee is `fee_amount`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeBracket {
    pub loan_amount: Money,
    pub fee_amount: Money,
}

impl FeeBracket {
    pub fn new(loan_amount: Money, fee_amount: Money) -> Self {
        Self {
            loan_amount,
            fee_amount,
        }
    }
}

/// Which neighbouring bracket a lookup asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BracketSide {
    /// Nearest bracket strictly below the amount
    Lower,
    /// Nearest bracket at or above the amount
    Upper,
}

impl From<bool> for BracketSide {
    /// `true` asks for the upper bracket.
    fn from(want_upper: bool) -> Self {
        if want_upper {
            BracketSide::Upper
        } else {
            BracketSide::Lower
        }
    }
}

/// Source of fee brackets.
///
/// Implementations return the nearest known bracket for the given term and
/// currency on the requested side of `amount`, or `None` when there is none.
/// A failing data source should surface as `None`.
pub trait FeeLookup {
    fn find(
        &self,
        amount: Money,
        term: Term,
        currency: &Currency,
        side: BracketSide,
    ) -> Option<FeeBracket>;
}

impl<L: FeeLookup + ?Sized> FeeLookup for &L {
    fn find(
        &self,
        amount: Money,
        term: Term,
        currency: &Currency,
        side: BracketSide,
    ) -> Option<FeeBracket> {
        (**self).find(amount, term, currency, side)
    }
}

impl<L: FeeLookup + ?Sized> FeeLookup for Box<L> {
    fn find(
        &self,
        amount: Money,
        term: Term,
        currency: &Currency,
        side: BracketSide,
    ) -> Option<FeeBracket> {
        (**self).find(amount, term, currency, side)
    }
}
