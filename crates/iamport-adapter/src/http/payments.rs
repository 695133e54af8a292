/*
[INPUT]:  Payment identifiers, amounts and cancel parameters
[OUTPUT]: Payment records and prepare/cancel results
[POS]:    HTTP layer - payment lookup, prepare and cancel endpoints
[UPDATE]: When adding new payment endpoints or changing parameters
*/

use rust_decimal::Decimal;
use serde_json::Value;

use crate::http::{IamportClient, Result};
use crate::types::requests::require_non_empty;
use crate::types::{
    CancelRequest, FindRequest, PaymentStatus, PaymentStatusQuery, PrepareRequest, Validate,
    is_paid_payment, payment_amount,
};

impl IamportClient {
    /// List payments by status
    ///
    /// GET /payments/status/{status}
    pub async fn find_by_status(
        &self,
        status: PaymentStatus,
        query: &PaymentStatusQuery,
    ) -> Result<Value> {
        self.get_at_with_query(&["payments", "status", status.as_str()], query)
            .await
    }

    /// Query payment by merchant_uid and optional status
    ///
    /// GET /payments/find/{merchant_uid}[/{status}]
    pub async fn find_by_merchant_uid(
        &self,
        merchant_uid: &str,
        status: Option<PaymentStatus>,
    ) -> Result<Value> {
        require_non_empty("merchant_uid", merchant_uid)?;
        match status {
            Some(status) => {
                self.get_at(&["payments", "find", merchant_uid, status.as_str()])
                    .await
            }
            None => self.get_at(&["payments", "find", merchant_uid]).await,
        }
    }

    /// Query payment by imp_uid
    ///
    /// GET /payments/{imp_uid}
    pub async fn find_by_imp_uid(&self, imp_uid: &str) -> Result<Value> {
        require_non_empty("imp_uid", imp_uid)?;
        self.get_at(&["payments", imp_uid]).await
    }

    /// Query payment by merchant_uid, falling back to imp_uid
    pub async fn find(&self, request: &FindRequest) -> Result<Value> {
        request.validate()?;
        match request.merchant_uid.as_deref().filter(|uid| !uid.is_empty()) {
            Some(merchant_uid) => self.find_by_merchant_uid(merchant_uid, None).await,
            None => {
                let imp_uid = request.imp_uid.as_deref().unwrap_or_default();
                self.find_by_imp_uid(imp_uid).await
            }
        }
    }

    /// Cancel a payment identified by imp_uid or merchant_uid
    ///
    /// POST /payments/cancel
    pub async fn cancel(&self, request: &CancelRequest) -> Result<Value> {
        request.validate()?;
        self.post_at(&["payments", "cancel"], request).await
    }

    /// POST /payments/cancel with `imp_uid`
    pub async fn cancel_by_imp_uid(&self, imp_uid: &str, reason: &str) -> Result<Value> {
        self.cancel(&CancelRequest::by_imp_uid(imp_uid, reason)).await
    }

    /// POST /payments/cancel with `merchant_uid`
    pub async fn cancel_by_merchant_uid(&self, merchant_uid: &str, reason: &str) -> Result<Value> {
        self.cancel(&CancelRequest::by_merchant_uid(merchant_uid, reason))
            .await
    }

    /// Check that a payment is paid for exactly `amount`.
    ///
    /// Uses `prior` when given instead of looking the payment up.
    /// A `null` or empty prior counts as absent.
    pub async fn is_paid(
        &self,
        amount: Decimal,
        prior: Option<&Value>,
        request: &FindRequest,
    ) -> Result<bool> {
        if let Some(payment) = prior.filter(|payment| !is_empty_payload(payment)) {
            return Ok(is_paid_payment(payment, amount));
        }
        let payment = self.find(request).await?;
        Ok(is_paid_payment(&payment, amount))
    }

    /// Register the expected amount for merchant_uid before payment
    ///
    /// POST /payments/prepare
    pub async fn prepare(&self, merchant_uid: &str, amount: Decimal) -> Result<Value> {
        let request = PrepareRequest {
            merchant_uid: merchant_uid.to_string(),
            amount,
        };
        request.validate()?;
        self.post_at(&["payments", "prepare"], &request).await
    }

    /// Compare `amount` with the registered one
    ///
    /// GET /payments/prepare/{merchant_uid}
    pub async fn prepare_validate(&self, merchant_uid: &str, amount: Decimal) -> Result<bool> {
        require_non_empty("merchant_uid", merchant_uid)?;
        let prepared = self.get_at(&["payments", "prepare", merchant_uid]).await?;
        Ok(payment_amount(&prepared) == Some(amount))
    }

    /// Change the registered amount
    ///
    /// PUT /payments/prepare
    pub async fn adjust_prepare_amount(&self, merchant_uid: &str, amount: Decimal) -> Result<Value> {
        let request = PrepareRequest {
            merchant_uid: merchant_uid.to_string(),
            amount,
        };
        request.validate()?;
        self.put_at(&["payments", "prepare"], &request).await
    }

    /// Revoke an issued virtual account
    ///
    /// DELETE /vbanks/{imp_uid}
    pub async fn revoke_vbank_by_imp_uid(&self, imp_uid: &str) -> Result<Value> {
        require_non_empty("imp_uid", imp_uid)?;
        self.delete_at(&["vbanks", imp_uid]).await
    }
}

fn is_empty_payload(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}
