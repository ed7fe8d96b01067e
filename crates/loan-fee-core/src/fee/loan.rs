use serde::{Deserialize, Serialize};

use crate::types::{Money, Term};

/// A loan application as seen by the fee calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanRequest {
    amount: Money,
    term: Term,
}

impl LoanRequest {
    pub fn new(amount: Money, term: Term) -> Self {
        Self { amount, term }
    }

    /// Requested principal
    pub fn amount(&self) -> Money {
        self.amount
    }

    /// Term in months; passed to the fee lookup as-is
    pub fn term(&self) -> Term {
        self.term
    }
}
