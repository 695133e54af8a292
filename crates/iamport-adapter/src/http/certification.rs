/*
[INPUT]:  Certification imp_uid and personal info for SMS OTP
[OUTPUT]: Certification results
[POS]:    HTTP layer - SMS identity certification endpoints
[UPDATE]: When adding new certification endpoints
*/

use serde_json::{Value, json};

use crate::http::{IamportClient, Result};
use crate::types::requests::require_non_empty;
use crate::types::{OtpCertificationRequest, Validate};

impl IamportClient {
    /// Query a certification result
    ///
    /// GET /certifications/{imp_uid}
    pub async fn find_certification(&self, imp_uid: &str) -> Result<Value> {
        require_non_empty("imp_uid", imp_uid)?;
        self.get_at(&["certifications", imp_uid]).await
    }

    /// Delete a certification result
    ///
    /// DELETE /certifications/{imp_uid}
    pub async fn cancel_certification(&self, imp_uid: &str) -> Result<Value> {
        require_non_empty("imp_uid", imp_uid)?;
        self.delete_at(&["certifications", imp_uid]).await
    }

    /// Send an OTP by SMS for the given person
    ///
    /// POST /certifications/otp/request
    pub async fn init_otp_certification(&self, request: &OtpCertificationRequest) -> Result<Value> {
        request.validate()?;
        self.post_at(&["certifications", "otp", "request"], request)
            .await
    }

    /// Complete an OTP certification
    ///
    /// POST /certifications/otp/confirm/{imp_uid}
    pub async fn confirm_otp_certification(&self, imp_uid: &str, otp: &str) -> Result<Value> {
        require_non_empty("imp_uid", imp_uid)?;
        require_non_empty("otp", otp)?;
        let body = json!({ "otp": otp });
        self.post_at(&["certifications", "otp", "confirm", imp_uid], &body)
            .await
    }
}
