use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::error::LoanFeeError;
use crate::fee::bracket::{BracketSide, FeeBracket, FeeLookup};
use crate::types::{Currency, Money, Term};
use crate::LoanFeeResult;

/// Standard 12-month fee structure: (loan amount, fee).
const STANDARD_TERM_12: [(u32, u32); 20] = [
    (1000, 50),
    (2000, 90),
    (3000, 90),
    (4000, 115),
    (5000, 100),
    (6000, 120),
    (7000, 140),
    (8000, 160),
    (9000, 180),
    (10000, 200),
    (11000, 220),
    (12000, 240),
    (13000, 260),
    (14000, 280),
    (15000, 300),
    (16000, 320),
    (17000, 340),
    (18000, 360),
    (19000, 380),
    (20000, 400),
];

/// Standard 24-month fee structure: (loan amount, fee).
const STANDARD_TERM_24: [(u32, u32); 20] = [
    (1000, 70),
    (2000, 100),
    (3000, 120),
    (4000, 160),
    (5000, 200),
    (6000, 240),
    (7000, 280),
    (8000, 320),
    (9000, 360),
    (10000, 400),
    (11000, 440),
    (12000, 480),
    (13000, 520),
    (14000, 560),
    (15000, 600),
    (16000, 640),
    (17000, 680),
    (18000, 720),
    (19000, 760),
    (20000, 800),
];

/// All brackets for one currency and term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeSchedule {
    pub currency: Currency,
    pub term: Term,
    pub brackets: Vec<FeeBracket>,
}

/// In-memory fee brackets keyed by currency and term.
///
/// Brackets within a schedule are kept sorted by loan amount with no two
/// sharing a loan amount. Serialized as a list of [`FeeSchedule`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<FeeSchedule>", into = "Vec<FeeSchedule>")]
pub struct FeeTable {
    schedules: BTreeMap<(Currency, Term), Vec<FeeBracket>>,
}

impl FeeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard GBP fee structure for 12 and 24 month terms.
    pub fn standard() -> Self {
        let mut table = Self::new();
        for (term, rows) in [(12, &STANDARD_TERM_12), (24, &STANDARD_TERM_24)] {
            for &(loan, fee) in rows.iter() {
                table.insert(
                    Currency::GBP,
                    term,
                    FeeBracket::new(Decimal::from(loan), Decimal::from(fee)),
                );
            }
        }
        table
    }

    /// Build a table from schedules, rejecting malformed brackets.
    pub fn from_schedules(schedules: Vec<FeeSchedule>) -> LoanFeeResult<Self> {
        let mut table = Self::new();
        let mut seen: BTreeSet<(Currency, Term)> = BTreeSet::new();

        for schedule in schedules {
            let key = (schedule.currency.clone(), schedule.term);
            if !seen.insert(key) {
                return Err(LoanFeeError::InvalidInput {
                    field: "schedules".into(),
                    reason: format!(
                        "Duplicate schedule for {} / {} months",
                        schedule.currency, schedule.term
                    ),
                });
            }
            validate_schedule(&schedule)?;
            for bracket in schedule.brackets {
                table.insert(schedule.currency.clone(), schedule.term, bracket);
            }
        }

        Ok(table)
    }

    /// Add a bracket, replacing any bracket at the same loan amount.
    pub fn insert(&mut self, currency: Currency, term: Term, bracket: FeeBracket) {
        let brackets = self.schedules.entry((currency, term)).or_default();
        let idx = brackets.partition_point(|b| b.loan_amount < bracket.loan_amount);
        let replaces = brackets
            .get(idx)
            .is_some_and(|existing| existing.loan_amount == bracket.loan_amount);
        if replaces {
            brackets[idx] = bracket;
        } else {
            brackets.insert(idx, bracket);
        }
    }

    /// Brackets for a currency and term, in ascending loan amount.
    pub fn brackets(&self, currency: &Currency, term: Term) -> &[FeeBracket] {
        self.schedules
            .get(&(currency.clone(), term))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Terms with at least one bracket in `currency`.
    pub fn terms(&self, currency: &Currency) -> Vec<Term> {
        self.schedules
            .keys()
            .filter(|(c, _)| c == currency)
            .map(|(_, term)| *term)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.schedules.is_empty()
    }
}

impl FeeLookup for FeeTable {
    fn find(
        &self,
        amount: Money,
        term: Term,
        currency: &Currency,
        side: BracketSide,
    ) -> Option<FeeBracket> {
        let brackets = self.brackets(currency, term);
        let first_at_or_above = brackets.partition_point(|b| b.loan_amount < amount);
        match side {
            BracketSide::Upper => brackets.get(first_at_or_above).copied(),
            BracketSide::Lower => first_at_or_above
                .checked_sub(1)
                .and_then(|idx| brackets.get(idx))
                .copied(),
        }
    }
}

impl TryFrom<Vec<FeeSchedule>> for FeeTable {
    type Error = LoanFeeError;

    fn try_from(schedules: Vec<FeeSchedule>) -> Result<Self, Self::Error> {
        Self::from_schedules(schedules)
    }
}

impl From<FeeTable> for Vec<FeeSchedule> {
    fn from(table: FeeTable) -> Self {
        table
            .schedules
            .into_iter()
            .map(|((currency, term), brackets)| FeeSchedule {
                currency,
                term,
                brackets,
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn validate_schedule(schedule: &FeeSchedule) -> LoanFeeResult<()> {
    if schedule.brackets.is_empty() {
        return Err(LoanFeeError::InsufficientData(format!(
            "Schedule for {} / {} months has no brackets",
            schedule.currency, schedule.term
        )));
    }

    let mut loan_amounts: BTreeSet<Money> = BTreeSet::new();
    for bracket in &schedule.brackets {
        if bracket.loan_amount < Decimal::ZERO || bracket.fee_amount < Decimal::ZERO {
            return Err(LoanFeeError::InvalidInput {
                field: "brackets".into(),
                reason: format!(
                    "Negative amount in bracket {} -> {} ({} / {} months)",
                    bracket.loan_amount, bracket.fee_amount, schedule.currency, schedule.term
                ),
            });
        }
        if !loan_amounts.insert(bracket.loan_amount.normalize()) {
            return Err(LoanFeeError::InvalidInput {
                field: "brackets".into(),
                reason: format!(
                    "Duplicate loan amount {} ({} / {} months)",
                    bracket.loan_amount, schedule.currency, schedule.term
                ),
            });
        }
    }
    Ok(())
}
