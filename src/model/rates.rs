use serde::Deserialize;
use std::collections::BTreeMap;

/// Body of a latest-rates response from the exchange rate service.
///
/// Every field is optional so that partial or unexpected bodies still decode; a missing rate is
/// handled by the caller, not by the decoder.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct RatesResponse {
    /// `"success"` or `"error"`.
    #[serde(default)]
    pub result: Option<String>,

    /// Base currency the rates are quoted against.
    #[serde(default)]
    pub base_code: Option<String>,

    #[serde(default)]
    pub time_last_update_utc: Option<String>,

    /// Reason for an `"error"` result, e.g. `unsupported-code`.
    #[serde(default, rename = "error-type")]
    pub error_type: Option<String>,

    /// Destination units per base unit, keyed by currency code.
    #[serde(default)]
    pub rates: BTreeMap<String, f64>,
}

impl RatesResponse {
    pub fn is_error(&self) -> bool {
        self.result.as_deref() == Some("error")
    }

    /// The quoted rate for `code`, if the service sent one.
    pub fn rate(&self, code: &str) -> Option<f64> {
        self.rates.get(code).copied()
    }
}
