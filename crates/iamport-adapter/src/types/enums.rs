/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust enums with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use std::fmt;

use serde::{Deserialize, Serialize};

/// Payment status as used by the lookup endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// Only valid for `/payments/status/{status}`
    All,
    Ready,
    Paid,
    #[serde(alias = "canceled")]
    Cancelled,
    Failed,
}

impl PaymentStatus {
    /// Path segment used by the gateway
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::All => "all",
            PaymentStatus::Ready => "ready",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Cancelled => "cancelled",
            PaymentStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serializes_as_path_segment() {
        for status in [
            PaymentStatus::All,
            PaymentStatus::Ready,
            PaymentStatus::Paid,
            PaymentStatus::Cancelled,
            PaymentStatus::Failed,
        ] {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json.trim_matches('"'), status.as_str());
        }
    }

    #[test]
    fn test_status_accepts_american_spelling() {
        let status: PaymentStatus = serde_json::from_str("\"canceled\"").unwrap();
        assert_eq!(status, PaymentStatus::Cancelled);
    }
}
