/*
[INPUT]:  Access tokens and expiration timestamps
[OUTPUT]: Cached token lookup and refresh coordination
[POS]:    Auth layer - token lifecycle management
[UPDATE]: When changing the validity rule or storage strategy
*/

use chrono::{DateTime, Duration, Utc};
use tokio::sync::{Mutex, MutexGuard, RwLock};

/// Stored token with the gateway-reported expiry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenData {
    pub token: String,
    /// `None` when the gateway sent no `expired_at`; such a token is never reused
    pub expires_at: Option<DateTime<Utc>>,
}

impl TokenData {
    /// Reusable only while strictly more than `refresh_gap` remains.
    pub fn is_valid_at(&self, now: DateTime<Utc>, refresh_gap: Duration) -> bool {
        match self.expires_at {
            Some(expires_at) => expires_at - now > refresh_gap,
            None => false,
        }
    }
}

/// Async-safe access-token cache owned by one client
#[derive(Debug)]
pub struct TokenManager {
    refresh_gap: Duration,
    data: RwLock<Option<TokenData>>,
    refresh: Mutex<()>,
}

impl TokenManager {
    /// Create a new empty token manager
    pub fn new(refresh_gap: Duration) -> Self {
        Self {
            refresh_gap,
            data: RwLock::new(None),
            refresh: Mutex::new(()),
        }
    }

    pub fn refresh_gap(&self) -> Duration {
        self.refresh_gap
    }

    /// Cached token if it is still outside the refresh gap
    pub async fn valid_token(&self) -> Option<String> {
        let now = Utc::now();
        let guard = self.data.read().await;
        guard
            .as_ref()
            .filter(|data| data.is_valid_at(now, self.refresh_gap))
            .map(|data| data.token.clone())
    }

    /// Store a new token with its expiry
    pub async fn set_token(&self, token: String, expires_at: Option<DateTime<Utc>>) {
        let mut guard = self.data.write().await;
        *guard = Some(TokenData { token, expires_at });
    }

    /// Get token data if available
    pub async fn token_data(&self) -> Option<TokenData> {
        self.data.read().await.clone()
    }

    /// Clear the stored token
    pub async fn clear(&self) {
        let mut guard = self.data.write().await;
        *guard = None;
    }

    /// Serializes refreshes: one exchange in flight per manager.
    pub(crate) async fn refresh_guard(&self) -> MutexGuard<'_, ()> {
        self.refresh.lock().await
    }
}
