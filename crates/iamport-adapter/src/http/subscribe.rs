/*
[INPUT]:  Card details, billing keys (customer_uid) and schedules
[OUTPUT]: Charge, schedule and billing-key results
[POS]:    HTTP layer - recurring payment endpoints (billing keys)
[UPDATE]: When adding new subscribe endpoints or changing parameters
*/

use serde_json::Value;

use crate::http::{IamportClient, Result};
use crate::types::requests::require_non_empty;
use crate::types::{
    CustomerCreateRequest, PayAgainRequest, PayForeignRequest, PayOnetimeRequest,
    PayScheduleRequest, PayUnscheduleRequest, ScheduleRangeQuery, Validate,
};

impl IamportClient {
    /// Charge a card once, optionally storing it as a billing key
    ///
    /// POST /subscribe/payments/onetime
    pub async fn pay_onetime(&self, request: &PayOnetimeRequest) -> Result<Value> {
        request.validate()?;
        self.post_at(&["subscribe", "payments", "onetime"], request)
            .await
    }

    /// Charge a stored billing key
    ///
    /// POST /subscribe/payments/again
    pub async fn pay_again(&self, request: &PayAgainRequest) -> Result<Value> {
        request.validate()?;
        self.post_at(&["subscribe", "payments", "again"], request)
            .await
    }

    /// Charge a foreign card without authentication (deprecated by the gateway)
    ///
    /// POST /subscribe/payments/foreign
    pub async fn pay_foreign(&self, request: &PayForeignRequest) -> Result<Value> {
        request.validate()?;
        self.post_at(&["subscribe", "payments", "foreign"], request)
            .await
    }

    /// Register scheduled charges for a billing key
    ///
    /// POST /subscribe/payments/schedule
    pub async fn pay_schedule(&self, request: &PayScheduleRequest) -> Result<Value> {
        request.validate()?;
        self.post_at(&["subscribe", "payments", "schedule"], request)
            .await
    }

    /// Query a scheduled charge
    ///
    /// GET /subscribe/payments/schedule/{merchant_uid}
    pub async fn pay_schedule_get(&self, merchant_uid: &str) -> Result<Value> {
        require_non_empty("merchant_uid", merchant_uid)?;
        self.get_at(&["subscribe", "payments", "schedule", merchant_uid])
            .await
    }

    /// Query scheduled charges in a time range
    ///
    /// GET /subscribe/payments/schedule?schedule_from=..&schedule_to=..
    pub async fn pay_schedule_get_between(&self, query: &ScheduleRangeQuery) -> Result<Value> {
        query.validate()?;
        self.get_at_with_query(&["subscribe", "payments", "schedule"], query)
            .await
    }

    /// Cancel scheduled charges
    ///
    /// POST /subscribe/payments/unschedule
    pub async fn pay_unschedule(&self, request: &PayUnscheduleRequest) -> Result<Value> {
        request.validate()?;
        self.post_at(&["subscribe", "payments", "unschedule"], request)
            .await
    }

    /// Register a card as billing key `customer_uid`
    ///
    /// POST /subscribe/customers/{customer_uid}
    pub async fn customer_create(&self, request: &CustomerCreateRequest) -> Result<Value> {
        request.validate()?;
        let customer_uid = request.customer_uid.as_deref().unwrap_or_default();
        self.post_at(&["subscribe", "customers", customer_uid], request)
            .await
    }

    /// Query a billing key
    ///
    /// GET /subscribe/customers/{customer_uid}
    pub async fn customer_get(&self, customer_uid: &str) -> Result<Value> {
        require_non_empty("customer_uid", customer_uid)?;
        self.get_at(&["subscribe", "customers", customer_uid]).await
    }

    /// Delete a billing key
    ///
    /// DELETE /subscribe/customers/{customer_uid}
    pub async fn customer_delete(&self, customer_uid: &str) -> Result<Value> {
        require_non_empty("customer_uid", customer_uid)?;
        self.delete_at(&["subscribe", "customers", customer_uid])
            .await
    }
}
