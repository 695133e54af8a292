/*
[INPUT]:  Caller-supplied payment parameters
[OUTPUT]: Typed request records with required-field validation
[POS]:    Data layer - request bodies and queries for API communication
[UPDATE]: When API schema changes or new types added
*/

use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::http::{IamportError, Result};

use super::models::serde_helpers;

/// Required-field check run before any request leaves the client.
pub trait Validate {
    /// Fails with [`IamportError::Validation`] naming the first missing field.
    fn validate(&self) -> Result<()>;
}

fn present(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.is_empty())
}

fn require(fields: &[(&str, bool)]) -> Result<()> {
    match fields.iter().find(|(_, ok)| !ok) {
        Some((name, _)) => Err(IamportError::missing(*name)),
        None => Ok(()),
    }
}

/// Reject an empty identifier before it becomes a path segment.
pub(crate) fn require_non_empty(field: &str, value: &str) -> Result<()> {
    require(&[(field, !value.is_empty())])
}

/// Lookup by either identifier; `merchant_uid` wins when both are set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FindRequest {
    pub merchant_uid: Option<String>,
    pub imp_uid: Option<String>,
}

impl FindRequest {
    pub fn by_merchant_uid(merchant_uid: impl Into<String>) -> Self {
        Self {
            merchant_uid: Some(merchant_uid.into()),
            imp_uid: None,
        }
    }

    pub fn by_imp_uid(imp_uid: impl Into<String>) -> Self {
        Self {
            merchant_uid: None,
            imp_uid: Some(imp_uid.into()),
        }
    }
}

impl Validate for FindRequest {
    fn validate(&self) -> Result<()> {
        require(&[(
            "merchant_uid or imp_uid",
            present(&self.merchant_uid) || present(&self.imp_uid),
        )])
    }
}

/// Query for `GET /payments/status/{status}`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PaymentStatusQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sorting: Option<String>,
}

/// Body for `POST /payments/cancel`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CancelRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imp_uid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant_uid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Partial cancel amount; omitted for a full cancel
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serde_helpers::serialize_amount_option"
    )]
    pub amount: Option<Decimal>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serde_helpers::serialize_amount_option"
    )]
    pub checksum: Option<Decimal>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CancelRequest {
    pub fn by_imp_uid(imp_uid: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            imp_uid: Some(imp_uid.into()),
            reason: Some(reason.into()),
            ..Default::default()
        }
    }

    pub fn by_merchant_uid(merchant_uid: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            merchant_uid: Some(merchant_uid.into()),
            reason: Some(reason.into()),
            ..Default::default()
        }
    }
}

impl Validate for CancelRequest {
    fn validate(&self) -> Result<()> {
        require(&[
            (
                "merchant_uid or imp_uid",
                present(&self.imp_uid) || present(&self.merchant_uid),
            ),
            ("reason", present(&self.reason)),
        ])
    }
}

/// Body for `POST` and `PUT /payments/prepare`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrepareRequest {
    pub merchant_uid: String,
    #[serde(serialize_with = "serde_helpers::serialize_amount")]
    pub amount: Decimal,
}

impl Validate for PrepareRequest {
    fn validate(&self) -> Result<()> {
        require_non_empty("merchant_uid", &self.merchant_uid)
    }
}

/// Body for `POST /subscribe/payments/onetime`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PayOnetimeRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant_uid: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serde_helpers::serialize_amount_option"
    )]
    pub amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_number: Option<String>,
    /// `YYYY-MM`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry: Option<String>,
    /// Birth date `YYMMDD`, or business registration number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pwd_2digit: Option<String>,
    /// Store the card under this billing key as a side effect
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_uid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buyer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buyer_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buyer_tel: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Validate for PayOnetimeRequest {
    fn validate(&self) -> Result<()> {
        require(&[
            ("merchant_uid", present(&self.merchant_uid)),
            ("amount", self.amount.is_some()),
            ("card_number", present(&self.card_number)),
            ("expiry", present(&self.expiry)),
            ("birth", present(&self.birth)),
            ("pwd_2digit", present(&self.pwd_2digit)),
        ])
    }
}

/// Body for `POST /subscribe/payments/again`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PayAgainRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_uid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant_uid: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serde_helpers::serialize_amount_option"
    )]
    pub amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Validate for PayAgainRequest {
    fn validate(&self) -> Result<()> {
        require(&[
            ("customer_uid", present(&self.customer_uid)),
            ("merchant_uid", present(&self.merchant_uid)),
            ("amount", self.amount.is_some()),
        ])
    }
}

/// Body for `POST /subscribe/payments/foreign`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PayForeignRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant_uid: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serde_helpers::serialize_amount_option"
    )]
    pub amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Validate for PayForeignRequest {
    fn validate(&self) -> Result<()> {
        require(&[
            ("merchant_uid", present(&self.merchant_uid)),
            ("amount", self.amount.is_some()),
            ("card_number", present(&self.card_number)),
            ("expiry", present(&self.expiry)),
        ])
    }
}

/// One scheduled charge inside [`PayScheduleRequest`]
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScheduleEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant_uid: Option<String>,
    /// Epoch seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule_at: Option<i64>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serde_helpers::serialize_amount_option"
    )]
    pub amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buyer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buyer_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buyer_tel: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buyer_addr: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buyer_postcode: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body for `POST /subscribe/payments/schedule`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PayScheduleRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_uid: Option<String>,
    pub schedules: Vec<ScheduleEntry>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Validate for PayScheduleRequest {
    fn validate(&self) -> Result<()> {
        require(&[("customer_uid", present(&self.customer_uid))])?;

        // Field-major: report the first field any schedule lacks.
        let entries = &self.schedules;
        require(&[
            (
                "merchant_uid",
                entries.iter().all(|entry| present(&entry.merchant_uid)),
            ),
            (
                "schedule_at",
                entries.iter().all(|entry| entry.schedule_at.is_some()),
            ),
            ("amount", entries.iter().all(|entry| entry.amount.is_some())),
        ])
    }
}

/// Query for `GET /subscribe/payments/schedule`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScheduleRangeQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule_from: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule_to: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl Validate for ScheduleRangeQuery {
    fn validate(&self) -> Result<()> {
        require(&[
            ("schedule_from", self.schedule_from.is_some()),
            ("schedule_to", self.schedule_to.is_some()),
        ])
    }
}

/// Body for `POST /subscribe/payments/unschedule`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PayUnscheduleRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_uid: Option<String>,
    /// Empty cancels every pending schedule of the customer
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub merchant_uid: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Validate for PayUnscheduleRequest {
    fn validate(&self) -> Result<()> {
        require(&[("customer_uid", present(&self.customer_uid))])
    }
}

/// Body for `POST /subscribe/customers/{customer_uid}`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CustomerCreateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_uid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pwd_2digit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_tel: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_addr: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_postcode: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Validate for CustomerCreateRequest {
    fn validate(&self) -> Result<()> {
        require(&[
            ("customer_uid", present(&self.customer_uid)),
            ("card_number", present(&self.card_number)),
            ("expiry", present(&self.expiry)),
            ("birth", present(&self.birth)),
        ])
    }
}

/// Body for `POST /certifications/otp/request`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OtpCertificationRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender_digit: Option<String>,
    /// `SKT`, `KTF`, `LGT`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carrier: Option<String>,
    pub is_mvno: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pg: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Validate for OtpCertificationRequest {
    fn validate(&self) -> Result<()> {
        require(&[
            ("name", present(&self.name)),
            ("phone", present(&self.phone)),
            ("birth", present(&self.birth)),
            ("gender_digit", present(&self.gender_digit)),
            ("carrier", present(&self.carrier)),
        ])
    }
}
