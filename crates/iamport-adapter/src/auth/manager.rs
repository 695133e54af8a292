/*
[INPUT]:  API key pair and HTTP client
[OUTPUT]: Valid access token (refreshed through /users/getToken when needed)
[POS]:    Auth layer - orchestrates the credential exchange
[UPDATE]: When auth endpoint or refresh flow changes
*/

use chrono::DateTime;
use tracing::debug;

use crate::http::{IamportClient, IamportError, Result};
use crate::types::TokenResponse;

impl IamportClient {
    /// Return a token that is valid for longer than the refresh gap.
    ///
    /// 1. Reuse the cached token when it is outside the gap
    /// 2. Otherwise take the refresh guard and re-check (another call may
    ///    have refreshed while we waited)
    /// 3. Clear the cache, exchange credentials, store the new token
    ///
    /// Exchange failures surface as [`IamportError::Auth`].
    pub async fn get_token(&self) -> Result<String> {
        if let Some(token) = self.tokens.valid_token().await {
            return Ok(token);
        }

        let _guard = self.tokens.refresh_guard().await;
        if let Some(token) = self.tokens.valid_token().await {
            debug!("access token refreshed by a concurrent call");
            return Ok(token);
        }

        self.tokens.clear().await;
        let issued = self.request_token().await?;

        let token = issued
            .access_token
            .filter(|token| !token.is_empty())
            .ok_or_else(|| {
                IamportError::Auth(Box::new(IamportError::InvalidResponse(
                    "token response missing access_token".to_string(),
                )))
            })?;
        let expires_at = issued
            .expired_at
            .and_then(|secs| DateTime::from_timestamp(secs, 0));

        self.tokens.set_token(token.clone(), expires_at).await;
        debug!(expires_at = ?expires_at, "access token refreshed");
        Ok(token)
    }

    /// POST /users/getToken
    ///
    /// Unauthenticated; body is `{imp_key, imp_secret}`.
    async fn request_token(&self) -> Result<TokenResponse> {
        let http = self.http().await?;
        let url = self.url(&["users", "getToken"])?;
        let builder = http.post(url).json(self.credentials());
        self.send_json(builder)
            .await
            .map_err(|e| IamportError::Auth(Box::new(e)))
    }
}
