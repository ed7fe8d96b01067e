use loan_fee_core::fee::{self, FeeInput, FeeTable};
use napi::Result as NapiResult;
use napi_derive::napi;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

/// Fee for a `FeeInput` JSON document, priced against `feeTableJson` when
/// given and the standard table otherwise.
#[napi]
pub fn calculate_fee(input_json: String, fee_table_json: Option<String>) -> NapiResult<String> {
    let input: FeeInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let table = match fee_table_json {
        Some(json) => serde_json::from_str::<FeeTable>(&json).map_err(to_napi_error)?,
        None => FeeTable::standard(),
    };
    let output = fee::calculate_fee(&input, &table).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// The standard fee table as a JSON list of schedules.
#[napi]
pub fn standard_fee_table() -> NapiResult<String> {
    serde_json::to_string(&FeeTable::standard()).map_err(to_napi_error)
}
