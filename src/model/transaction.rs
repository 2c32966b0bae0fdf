use serde::{Deserialize, Serialize};

/// A persisted currency conversion, as returned by the transaction store.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Opaque identifier assigned by the store.
    #[serde(rename = "_id")]
    pub id: String,

    #[serde(flatten)]
    pub record: NewTransaction,
}

/// A currency conversion captured at submission time, before the store assigns an identifier.
///
/// Records the store sends back may be incomplete. A missing text field reads as empty and a
/// missing number as `NaN`.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    #[serde(default)]
    pub from_country: String,
    #[serde(default)]
    pub to_country: String,
    #[serde(default)]
    pub from_currency: String,
    #[serde(default)]
    pub to_currency: String,

    /// Destination units per source unit.
    #[serde(default = "nan", deserialize_with = "number_or_null")]
    pub exchange_rate: f64,

    /// Source currency amount.
    #[serde(default = "nan", deserialize_with = "number_or_null")]
    pub amount: f64,

    /// Destination currency amount. Not guaranteed to equal `amount * exchange_rate`.
    #[serde(default = "nan", deserialize_with = "number_or_null")]
    pub converted_amount: f64,

    /// Locale-formatted submission date.
    #[serde(default)]
    pub date: String,

    /// Locale-formatted submission time.
    #[serde(default)]
    pub time: String,
}

impl Transaction {
    pub fn new(id: impl Into<String>, record: NewTransaction) -> Self {
        Self {
            id: id.into(),
            record,
        }
    }
}

impl std::ops::Deref for Transaction {
    type Target = NewTransaction;

    fn deref(&self) -> &Self::Target {
        &self.record
    }
}

fn nan() -> f64 {
    f64::NAN
}

// serde_json writes non-finite floats as `null`, so a NaN amount comes back that way.
fn number_or_null<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    struct NumberOrNull;

    impl<'de> serde::de::Visitor<'de> for NumberOrNull {
        type Value = f64;

        fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
            formatter.write_str("number or null")
        }

        fn visit_f64<E>(self, value: f64) -> Result<f64, E>
        where
            E: serde::de::Error,
        {
            Ok(value)
        }

        fn visit_i64<E>(self, value: i64) -> Result<f64, E>
        where
            E: serde::de::Error,
        {
            Ok(value as f64)
        }

        fn visit_u64<E>(self, value: u64) -> Result<f64, E>
        where
            E: serde::de::Error,
        {
            Ok(value as f64)
        }

        fn visit_unit<E>(self) -> Result<f64, E>
        where
            E: serde::de::Error,
        {
            Ok(f64::NAN)
        }

        fn visit_none<E>(self) -> Result<f64, E>
        where
            E: serde::de::Error,
        {
            Ok(f64::NAN)
        }
    }

    deserializer.deserialize_any(NumberOrNull)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_record;
    use serde_json::json;
    use similar_asserts::assert_eq;

    #[test]
    fn test_new_transaction_wire_shape() {
        let actual = serde_json::to_value(sample_record()).unwrap();
        let expected = json!({
            "fromCountry": "USD",
            "toCountry": "INR",
            "fromCurrency": "USD",
            "toCurrency": "INR",
            "exchangeRate": 83.5,
            "amount": 10.0,
            "convertedAmount": 835.0,
            "date": "10/17/2026",
            "time": "3:04:05 PM",
        });
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_transaction_from_store() {
        // The store adds bookkeeping fields of its own; they are ignored.
        let body = json!({
            "_id": "abc123",
            "fromCountry": "USD",
            "toCountry": "INR",
            "fromCurrency": "USD",
            "toCurrency": "INR",
            "exchangeRate": 83.5,
            "amount": 10,
            "convertedAmount": 835,
            "date": "10/17/2026",
            "time": "3:04:05 PM",
            "createdAt": "2026-10-17T15:04:05.000Z",
            "__v": 0,
        });
        let actual: Transaction = serde_json::from_value(body).unwrap();
        assert_eq!(actual, Transaction::new("abc123", sample_record()));
        assert_eq!(actual.amount, 10.0);
    }

    #[test]
    fn test_nan_amount_survives_round_trip() {
        let mut record = sample_record();
        record.amount = f64::NAN;
        record.converted_amount = f64::NAN;

        let body = serde_json::to_value(&record).unwrap();
        assert_eq!(body["amount"], serde_json::Value::Null);

        let mut body = body;
        body["_id"] = json!("nan1");
        let actual: Transaction = serde_json::from_value(body).unwrap();
        assert!(actual.amount.is_nan());
        assert!(actual.converted_amount.is_nan());
        assert_eq!(actual.exchange_rate, 83.5);
    }

    #[test]
    fn test_incomplete_record_keeps_list() {
        let mut short = serde_json::to_value(sample_record()).unwrap();
        short["_id"] = json!("short");
        let fields = short.as_object_mut().unwrap();
        fields.remove("time");
        fields.remove("amount");

        let mut full = serde_json::to_value(sample_record()).unwrap();
        full["_id"] = json!("full");

        let body = json!([full, short]);
        let actual: Vec<Transaction> = serde_json::from_value(body).unwrap();
        assert_eq!(actual.len(), 2);
        assert_eq!(actual[0], Transaction::new("full", sample_record()));
        assert_eq!(actual[1].id, "short");
        assert_eq!(actual[1].time, "");
        assert!(actual[1].amount.is_nan());
        assert_eq!(actual[1].date, "10/17/2026");
    }

    #[test]
    fn test_missing_id_is_rejected() {
        let body = serde_json::to_value(sample_record()).unwrap();
        assert!(serde_json::from_value::<Transaction>(body).is_err());
    }
}
