/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Response envelope and credential-exchange payload
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::models::serde_helpers;

/// Wrapper every gateway response is delivered in.
///
/// `code == 0` means success and `response` carries the result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T = Value> {
    pub code: i64,
    pub message: Option<String>,
    pub response: Option<T>,
}

impl<T> Envelope<T> {
    pub fn is_success(&self) -> bool {
        self.code == 0
    }
}

/// Payload of `POST /users/getToken`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TokenResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    /// Epoch seconds (UTC)
    #[serde(default, deserialize_with = "serde_helpers::deserialize_epoch_option")]
    pub expired_at: Option<i64>,
    /// Gateway clock at issue time, epoch seconds
    #[serde(default, deserialize_with = "serde_helpers::deserialize_epoch_option")]
    pub now: Option<i64>,
}
