/*
[INPUT]:  Raw JSON values returned by the gateway
[OUTPUT]: Amount/timestamp conversions shared by requests and endpoints
[POS]:    Data layer - value helpers for API communication
[UPDATE]: When API schema changes or new types added
*/

use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::Value;

/// Read a monetary amount from a JSON number or numeric string.
pub fn decimal_from_value(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(number) => parse_decimal(&number.to_string()),
        Value::String(raw) => parse_decimal(raw.trim()),
        _ => None,
    }
}

/// Amount field of a payment record, if present and numeric.
pub fn payment_amount(payment: &Value) -> Option<Decimal> {
    payment.get("amount").and_then(decimal_from_value)
}

/// Status field of a payment record.
pub fn payment_status(payment: &Value) -> Option<&str> {
    payment.get("status").and_then(Value::as_str)
}

/// A payment counts as paid only when its status is `paid` and its amount
/// equals `amount` exactly.
pub fn is_paid_payment(payment: &Value, amount: Decimal) -> bool {
    payment_status(payment) == Some("paid") && payment_amount(payment) == Some(amount)
}

fn parse_decimal(raw: &str) -> Option<Decimal> {
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
}

pub(crate) mod serde_helpers {
    use super::Decimal;
    use rust_decimal::prelude::ToPrimitive;
    use serde::ser::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};
    use serde_json::Value;

    /// Amounts go over the wire as JSON numbers; whole values as integers.
    pub fn serialize_amount<S>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let normalized = value.normalize();
        if normalized.scale() == 0 {
            if let Some(int) = normalized.to_i64() {
                return serializer.serialize_i64(int);
            }
        }

        match normalized.to_f64() {
            Some(float) => serializer.serialize_f64(float),
            None => Err(S::Error::custom("amount out of range")),
        }
    }

    pub fn serialize_amount_option<S>(
        value: &Option<Decimal>,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(amount) => serialize_amount(amount, serializer),
            None => serializer.serialize_none(),
        }
    }

    /// Epoch seconds sent either as an integer, a float or a numeric string.
    pub fn deserialize_epoch_option<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        let Some(value) = value else {
            return Ok(None);
        };

        match &value {
            Value::Null => Ok(None),
            Value::Number(number) => number
                .as_i64()
                .or_else(|| number.as_f64().map(|secs| secs.trunc() as i64))
                .map(Some)
                .ok_or_else(|| serde::de::Error::custom("invalid epoch timestamp")),
            Value::String(raw) => {
                let raw = raw.trim();
                raw.parse::<i64>()
                    .or_else(|_| raw.parse::<f64>().map(|secs| secs.trunc() as i64))
                    .map(Some)
                    .map_err(serde::de::Error::custom)
            }
            _ => Err(serde::de::Error::custom("invalid epoch timestamp")),
        }
    }
}
