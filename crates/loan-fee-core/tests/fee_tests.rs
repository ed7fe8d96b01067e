use loan_fee_core::fee::{
    calculate_fee, FeeBracket, FeeCalculator, FeeCalculatorConfig, FeeInput, FeeLookup,
    FeeOutcome, FeeSchedule, FeeTable, LoanRequest,
};
use loan_fee_core::{Currency, LoanFeeError};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Calculator against the standard fee structure
// ===========================================================================

fn standard_calculator() -> FeeCalculator<FeeTable> {
    FeeCalculator::new(FeeTable::standard())
}

#[test]
fn test_standard_24_month_interpolation() {
    // 11000 -> 440, 12000 -> 480; halfway is 460
    let calc = standard_calculator();
    assert_eq!(calc.calculate(&LoanRequest::new(dec!(11500), 24)), dec!(460));
}

#[test]
fn test_standard_12_month_interpolation() {
    // 19000 -> 380, 20000 -> 400; a quarter of the way is 385
    let calc = standard_calculator();
    assert_eq!(calc.calculate(&LoanRequest::new(dec!(19250), 12)), dec!(385));
}

#[test]
fn test_standard_documented_example() {
    let calc = standard_calculator();
    assert_eq!(calc.calculate(&LoanRequest::new(dec!(2750), 24)), dec!(115));
}

#[test]
fn test_standard_bracket_amounts_price_exactly() {
    let calc = standard_calculator();
    assert_eq!(calc.calculate(&LoanRequest::new(dec!(3000), 24)), dec!(120));
    assert_eq!(calc.calculate(&LoanRequest::new(dec!(2000), 24)), dec!(100));
    assert_eq!(calc.calculate(&LoanRequest::new(dec!(20000), 24)), dec!(800));
}

#[test]
fn test_standard_falling_segment_is_rounded_up() {
    // 4000 -> 115, 5000 -> 100; 4500 gives 107.5 -> ceil 108 -> 110
    let calc = standard_calculator();
    assert_eq!(calc.calculate(&LoanRequest::new(dec!(4500), 12)), dec!(110));
}

#[test]
fn test_standard_fractional_amount() {
    // key 1235; 50 + 235 * 40 / 1000 = 59.4 -> 60
    let calc = standard_calculator();
    let quote = calc.quote(&LoanRequest::new(dec!(1234.56), 12));
    assert_eq!(quote.lookup_amount, dec!(1235));
    assert_eq!(quote.fee, dec!(60));
}

#[test]
fn test_standard_minimum_has_no_lower_bracket() {
    let calc = standard_calculator();
    let quote = calc.quote(&LoanRequest::new(dec!(500), 12));
    assert_eq!(quote.lookup_amount, dec!(1000));
    assert_eq!(quote.fee, dec!(50));
    assert_eq!(quote.outcome, FeeOutcome::UpperBracketOnly);
}

#[test]
fn test_standard_above_maximum_priced_at_maximum() {
    let calc = standard_calculator();
    assert_eq!(calc.calculate(&LoanRequest::new(dec!(25000), 24)), dec!(800));
}

#[test]
fn test_unknown_term_yields_zero() {
    let calc = standard_calculator();
    let quote = calc.quote(&LoanRequest::new(dec!(5000), 36));
    assert_eq!(quote.fee, Decimal::ZERO);
    assert_eq!(quote.determined_fee(), None);
}

#[test]
fn test_unknown_currency_yields_zero() {
    let mut calc = standard_calculator();
    calc.set_currency(Currency::EUR);
    assert_eq!(calc.calculate(&LoanRequest::new(dec!(5000), 24)), Decimal::ZERO);
}

#[test]
fn test_raised_maximum_runs_off_the_table() {
    let mut calc = standard_calculator();
    calc.set_loan_maximum(dec!(30000));
    let quote = calc.quote(&LoanRequest::new(dec!(25000), 24));
    assert_eq!(quote.outcome, FeeOutcome::NoUpperBracket);
    assert_eq!(quote.lower_bracket, Some(FeeBracket::new(dec!(20000), dec!(800))));
}

#[test]
fn test_boxed_lookup() {
    let lookup: Box<dyn FeeLookup> = Box::new(FeeTable::standard());
    let calc = FeeCalculator::new(lookup);
    assert_eq!(calc.calculate(&LoanRequest::new(dec!(11500), 24)), dec!(460));
}

// ===========================================================================
// Envelope
// ===========================================================================

#[test]
fn test_calculate_fee_envelope_json() {
    let input = FeeInput {
        amount: dec!(2750),
        term: 24,
        config: FeeCalculatorConfig::default(),
    };
    let output = calculate_fee(&input, &FeeTable::standard()).unwrap();
    let value = serde_json::to_value(&output).unwrap();

    let fee: Decimal = value["result"]["fee"].as_str().unwrap().parse().unwrap();
    assert_eq!(fee, dec!(115));
    assert_eq!(value["result"]["outcome"], serde_json::json!("interpolated"));
    assert_eq!(value["result"]["fee_determined"], serde_json::json!(true));
    assert_eq!(value["assumptions"]["term"], serde_json::json!(24));
}

#[test]
fn test_calculate_fee_invalid_range() {
    let input = FeeInput {
        amount: dec!(2750),
        term: 24,
        config: FeeCalculatorConfig {
            loan_minimum: dec!(30000),
            ..FeeCalculatorConfig::default()
        },
    };
    let err = calculate_fee(&input, &FeeTable::standard()).unwrap_err();
    assert!(matches!(err, LoanFeeError::InvalidInput { .. }));
}

#[test]
fn test_calculate_fee_at_decimal_limit_does_not_panic() {
    let limit = Decimal::MAX - Decimal::ONE;
    let input = FeeInput {
        amount: limit,
        term: 24,
        config: FeeCalculatorConfig {
            loan_maximum: limit,
            ..FeeCalculatorConfig::default()
        },
    };
    let output = calculate_fee(&input, &FeeTable::standard()).unwrap();
    assert_eq!(output.result.lookup_amount, limit);
    assert_eq!(output.result.fee, Decimal::ZERO);
    assert!(!output.result.fee_determined);
}

#[test]
fn test_calculate_fee_accepts_currency_codes_in_json() {
    let input: FeeInput = serde_json::from_str(
        r#"{"amount": "2750", "term": 24, "config": {"currency": "gbp"}}"#,
    )
    .unwrap();
    assert_eq!(input.config.currency, Currency::GBP);
    let output = calculate_fee(&input, &FeeTable::standard()).unwrap();
    assert_eq!(output.result.fee, dec!(115));
    assert!(output.result.fee_determined);

    let other: FeeInput = serde_json::from_str(
        r#"{"amount": "2750", "term": 24, "config": {"currency": "CHF"}}"#,
    )
    .unwrap();
    assert_eq!(other.config.currency, Currency::Other("CHF".into()));
}

// ===========================================================================
// Fee table files
// ===========================================================================

#[test]
fn test_fee_table_from_json_sorts_brackets() {
    let json = r#"[
        {
            "currency": "EUR",
            "term": 6,
            "brackets": [
                { "loan_amount": "2000", "fee_amount": "60" },
                { "loan_amount": "1000", "fee_amount": "40" }
            ]
        }
    ]"#;
    let table: FeeTable = serde_json::from_str(json).unwrap();
    assert_eq!(
        table.brackets(&Currency::EUR, 6),
        &[
            FeeBracket::new(dec!(1000), dec!(40)),
            FeeBracket::new(dec!(2000), dec!(60)),
        ]
    );

    let mut calc = FeeCalculator::new(table);
    calc.set_currency(Currency::EUR);
    assert_eq!(calc.calculate(&LoanRequest::new(dec!(1500), 6)), dec!(50));
}

#[test]
fn test_fee_table_json_rejects_negative_fee() {
    let json = r#"[
        {
            "currency": "GBP",
            "term": 12,
            "brackets": [{ "loan_amount": "1000", "fee_amount": "-1" }]
        }
    ]"#;
    assert!(serde_json::from_str::<FeeTable>(json).is_err());
}

#[test]
fn test_standard_table_survives_serialization() {
    let table = FeeTable::standard();
    let json = serde_json::to_string(&table).unwrap();
    let parsed: FeeTable = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, table);

    let schedules: Vec<FeeSchedule> = parsed.into();
    assert_eq!(schedules.len(), 2);
    assert_eq!(schedules[0].term, 12);
    assert_eq!(schedules[1].brackets[0], FeeBracket::new(dec!(1000), dec!(70)));
}
