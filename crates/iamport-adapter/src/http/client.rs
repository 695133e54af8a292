/*
[INPUT]:  HTTP configuration (base URL, pool size, timeout, credentials)
[OUTPUT]: Pooled reqwest client and the authenticated request executor
[POS]:    HTTP layer - core client implementation
[UPDATE]: When adding connection options or changing client behavior
*/

use std::env;
use std::fmt;
use std::time::{Duration, Instant};

use reqwest::{Client, Method, RequestBuilder, StatusCode, Url, header};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::{RwLock, Semaphore};
use tracing::{debug, info};

use crate::auth::TokenManager;
use crate::http::{IamportError, Result};
use crate::types::Envelope;

/// Production gateway origin
pub const IAMPORT_API_URL: &str = "https://api.iamport.kr";
pub const DEFAULT_POOL_SIZE: usize = 100;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);
/// Refresh this long before the gateway-reported expiry
pub const DEFAULT_TOKEN_REFRESH_GAP: Duration = Duration::from_secs(60);

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    /// Max concurrent requests (and idle pooled connections) per client
    pub pool_size: usize,
    /// Total per-request timeout
    pub timeout: Duration,
    pub token_refresh_gap: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: IAMPORT_API_URL.to_string(),
            pool_size: DEFAULT_POOL_SIZE,
            timeout: DEFAULT_TIMEOUT,
            token_refresh_gap: DEFAULT_TOKEN_REFRESH_GAP,
        }
    }
}

impl ClientConfig {
    /// Defaults overlaid with `IAMPORT_API_URL`, `IAMPORT_POOL_SIZE`,
    /// `IAMPORT_TIMEOUT_SECS` and `IAMPORT_TOKEN_REFRESH_GAP_SECS`.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        if let Ok(base_url) = env::var("IAMPORT_API_URL") {
            config.base_url = base_url;
        }
        if let Some(pool_size) = env_number("IAMPORT_POOL_SIZE")? {
            config.pool_size = pool_size as usize;
        }
        if let Some(secs) = env_number("IAMPORT_TIMEOUT_SECS")? {
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = env_number("IAMPORT_TOKEN_REFRESH_GAP_SECS")? {
            config.token_refresh_gap = Duration::from_secs(secs);
        }
        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_pool_size(mut self, pool_size: usize) -> Self {
        self.pool_size = pool_size;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_token_refresh_gap(mut self, gap: Duration) -> Self {
        self.token_refresh_gap = gap;
        self
    }
}

fn env_number(name: &str) -> Result<Option<u64>> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| IamportError::Config(format!("{name} must be a number: {e}"))),
        Err(_) => Ok(None),
    }
}

/// REST API key pair; serialized as the `/users/getToken` body
#[derive(Clone, Serialize)]
pub struct Credentials {
    pub imp_key: String,
    pub imp_secret: String,
}

impl Credentials {
    pub fn new(imp_key: impl Into<String>, imp_secret: impl Into<String>) -> Self {
        Self {
            imp_key: imp_key.into(),
            imp_secret: imp_secret.into(),
        }
    }

    /// Read `IMP_KEY` and `IMP_SECRET`
    pub fn from_env() -> Result<Self> {
        let imp_key = env::var("IMP_KEY")
            .map_err(|_| IamportError::Config("IMP_KEY is not set".to_string()))?;
        let imp_secret = env::var("IMP_SECRET")
            .map_err(|_| IamportError::Config("IMP_SECRET is not set".to_string()))?;
        Ok(Self::new(imp_key, imp_secret))
    }

    fn validate(&self) -> Result<()> {
        if self.imp_key.is_empty() || self.imp_secret.is_empty() {
            return Err(IamportError::Config(
                "IMP_KEY OR IMP_SECRET MISSED".to_string(),
            ));
        }
        Ok(())
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("imp_key", &self.imp_key)
            .field("imp_secret", &"<redacted>")
            .finish()
    }
}

/// State of the pooled transport
#[derive(Debug)]
enum Connection {
    Idle,
    Open(Client),
    Closed,
}

/// Main HTTP client for the Iamport REST API
#[derive(Debug)]
pub struct IamportClient {
    config: ClientConfig,
    credentials: Credentials,
    base_url: Url,
    connection: RwLock<Connection>,
    permits: Semaphore,
    pub(crate) tokens: TokenManager,
}

impl IamportClient {
    /// Create a new client with default configuration
    pub fn new(credentials: Credentials) -> Result<Self> {
        Self::with_config(credentials, ClientConfig::default())
    }

    /// Create a new client with custom configuration.
    ///
    /// No connection is made until [`open`](Self::open) or the first call.
    pub fn with_config(credentials: Credentials, config: ClientConfig) -> Result<Self> {
        credentials.validate()?;
        if config.pool_size == 0 {
            return Err(IamportError::Config(
                "pool_size must be at least 1".to_string(),
            ));
        }
        let refresh_gap = chrono::Duration::from_std(config.token_refresh_gap)
            .map_err(|e| IamportError::Config(format!("invalid token_refresh_gap: {e}")))?;

        let base_url = Url::parse(&config.base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(IamportError::Config(format!(
                "base URL cannot carry a path: {base_url}"
            )));
        }

        Ok(Self {
            permits: Semaphore::new(config.pool_size),
            tokens: TokenManager::new(refresh_gap),
            connection: RwLock::new(Connection::Idle),
            base_url,
            credentials,
            config,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Get the token manager
    pub fn token_manager(&self) -> &TokenManager {
        &self.tokens
    }

    /// Open the connection pool. Also reopens a closed client.
    pub async fn open(&self) -> Result<()> {
        let mut guard = self.connection.write().await;
        if matches!(*guard, Connection::Open(_)) {
            return Ok(());
        }
        *guard = Connection::Open(self.build_http()?);
        info!(base_url = %self.base_url, "iamport connection pool opened");
        Ok(())
    }

    /// Release the connection pool. Later calls fail with
    /// [`IamportError::ConnectionClosed`] until [`open`](Self::open).
    pub async fn close(&self) {
        let mut guard = self.connection.write().await;
        if matches!(*guard, Connection::Open(_)) {
            info!(base_url = %self.base_url, "iamport connection pool closed");
        }
        *guard = Connection::Closed;
    }

    pub async fn is_closed(&self) -> bool {
        matches!(*self.connection.read().await, Connection::Closed)
    }

    /// Current transport, opened lazily unless the client was closed.
    pub(crate) async fn http(&self) -> Result<Client> {
        {
            let guard = self.connection.read().await;
            match &*guard {
                Connection::Open(client) => return Ok(client.clone()),
                Connection::Closed => return Err(IamportError::ConnectionClosed),
                Connection::Idle => {}
            }
        }

        let mut guard = self.connection.write().await;
        match &*guard {
            Connection::Open(client) => Ok(client.clone()),
            Connection::Closed => Err(IamportError::ConnectionClosed),
            Connection::Idle => {
                let client = self.build_http()?;
                *guard = Connection::Open(client.clone());
                info!(base_url = %self.base_url, "iamport connection pool opened");
                Ok(client)
            }
        }
    }

    fn build_http(&self) -> Result<Client> {
        Client::builder()
            .timeout(self.config.timeout)
            .pool_max_idle_per_host(self.config.pool_size)
            .build()
            .map_err(IamportError::Transport)
    }

    /// Build full URL from percent-encoded path segments
    pub(crate) fn url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        {
            let mut path = url.path_segments_mut().map_err(|_| {
                IamportError::Config(format!("base URL cannot carry a path: {}", self.base_url))
            })?;
            path.pop_if_empty().extend(segments);
        }
        Ok(url)
    }

    /// Send a request and unwrap the envelope into `T`.
    ///
    /// Non-200 statuses fail before the body is read.
    pub(crate) async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let timeout = self.config.timeout;
        let started = Instant::now();
        let _permit = match tokio::time::timeout(timeout, self.permits.acquire()).await {
            Ok(permit) => permit.map_err(|_| IamportError::ConnectionClosed)?,
            Err(_) => return Err(IamportError::Timeout { duration: timeout }),
        };

        // The wait for a pool slot counts against the total timeout.
        let response = builder
            .timeout(timeout.saturating_sub(started.elapsed()))
            .send()
            .await
            .map_err(|e| IamportError::from_transport(e, timeout))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(IamportError::Http {
                code: status.as_u16(),
                reason: status_reason(status),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| IamportError::from_transport(e, timeout))?;
        let envelope: Envelope = serde_json::from_slice(&body)?;
        if !envelope.is_success() {
            return Err(IamportError::Response {
                code: envelope.code,
                message: envelope.message.unwrap_or_default(),
            });
        }

        let payload = envelope.response.unwrap_or(Value::Null);
        Ok(serde_json::from_value(payload)?)
    }

    async fn authorized(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder> {
        let http = self.http().await?;
        let token = self.get_token().await?;
        let url = self.url(segments)?;
        debug!(method = %method, path = url.path(), "iamport request");
        Ok(http
            .request(method, url)
            .header(header::AUTHORIZATION, token))
    }

    pub(crate) async fn get_at(&self, segments: &[&str]) -> Result<Value> {
        let builder = self.authorized(Method::GET, segments).await?;
        self.send_json(builder).await
    }

    pub(crate) async fn get_at_with_query<Q>(&self, segments: &[&str], query: &Q) -> Result<Value>
    where
        Q: Serialize + ?Sized,
    {
        let builder = self.authorized(Method::GET, segments).await?;
        self.send_json(builder.query(query)).await
    }

    pub(crate) async fn post_at<B>(&self, segments: &[&str], body: &B) -> Result<Value>
    where
        B: Serialize + ?Sized,
    {
        let builder = self.authorized(Method::POST, segments).await?;
        self.send_json(builder.json(body)).await
    }

    pub(crate) async fn put_at<B>(&self, segments: &[&str], body: &B) -> Result<Value>
    where
        B: Serialize + ?Sized,
    {
        let builder = self.authorized(Method::PUT, segments).await?;
        self.send_json(builder.json(body)).await
    }

    pub(crate) async fn delete_at(&self, segments: &[&str]) -> Result<Value> {
        let builder = self.authorized(Method::DELETE, segments).await?;
        self.send_json(builder).await
    }

    /// Authenticated `GET`; returns the envelope's `response` (`Null` if absent)
    pub async fn get(&self, path: &str) -> Result<Value> {
        self.get_at(&split_path(path)).await
    }

    /// Authenticated `GET` with a query string
    pub async fn get_with_query<Q>(&self, path: &str, query: &Q) -> Result<Value>
    where
        Q: Serialize + ?Sized,
    {
        self.get_at_with_query(&split_path(path), query).await
    }

    /// Authenticated `POST` with a JSON body
    pub async fn post<B>(&self, path: &str, body: &B) -> Result<Value>
    where
        B: Serialize + ?Sized,
    {
        self.post_at(&split_path(path), body).await
    }

    /// Authenticated `PUT` with a JSON body
    pub async fn put<B>(&self, path: &str, body: &B) -> Result<Value>
    where
        B: Serialize + ?Sized,
    {
        self.put_at(&split_path(path), body).await
    }

    /// Authenticated `DELETE`
    pub async fn delete(&self, path: &str) -> Result<Value> {
        self.delete_at(&split_path(path)).await
    }
}

/// Reason text for an HTTP status; non-standard codes fall back to the number.
fn status_reason(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => reason.to_string(),
        None => status.as_u16().to_string(),
    }
}

fn split_path(path: &str) -> Vec<&str> {
    path.split('/').filter(|segment| !segment.is_empty()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials() -> Credentials {
        Credentials::new("imp_apikey", "imp_secret")
    }

    #[test]
    fn test_missing_credentials_rejected() {
        let err = IamportClient::new(Credentials::new("", "secret")).unwrap_err();
        assert!(matches!(err, IamportError::Config(_)));

        let err = IamportClient::new(Credentials::new("key", "")).unwrap_err();
        assert!(matches!(err, IamportError::Config(_)));
    }

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "https://api.iamport.kr");
        assert_eq!(config.pool_size, 100);
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.token_refresh_gap, Duration::from_secs(60));
    }

    #[test]
    fn test_zero_pool_size_rejected() {
        let config = ClientConfig::default().with_pool_size(0);
        let err = IamportClient::with_config(credentials(), config).unwrap_err();
        assert!(matches!(err, IamportError::Config(_)));
    }

    #[test]
    fn test_url_encodes_segments() {
        let client = IamportClient::new(credentials()).unwrap();
        let url = client.url(&["payments", "find", "order/1 a"]).unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.iamport.kr/payments/find/order%2F1%20a"
        );
    }

    #[test]
    fn test_url_keeps_base_path() {
        let config = ClientConfig::default().with_base_url("http://127.0.0.1:8080/v1/");
        let client = IamportClient::with_config(credentials(), config).unwrap();
        let url = client.url(&["users", "getToken"]).unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8080/v1/users/getToken");
    }

    #[test]
    fn test_split_path_drops_empty_segments() {
        assert_eq!(
            split_path("/payments//prepare/"),
            vec!["payments", "prepare"]
        );
    }

    #[test]
    fn test_status_reason_never_empty() {
        assert_eq!(status_reason(StatusCode::NOT_FOUND), "Not Found");
        let unofficial = StatusCode::from_u16(520).unwrap();
        assert_eq!(status_reason(unofficial), "520");
    }

    #[test]
    fn test_credentials_debug_redacts_secret() {
        let rendered = format!("{:?}", Credentials::new("imp_apikey", "s3cr3t-value"));
        assert!(rendered.contains("imp_apikey"));
        assert!(!rendered.contains("s3cr3t"));
        assert!(rendered.contains("<redacted>"));
    }

    #[tokio::test]
    async fn test_close_is_idempotent_and_blocks_reuse() {
        let client = IamportClient::new(credentials()).unwrap();
        assert!(!client.is_closed().await);

        client.close().await;
        client.close().await;
        assert!(client.is_closed().await);
        assert!(matches!(
            client.http().await,
            Err(IamportError::ConnectionClosed)
        ));

        client.open().await.unwrap();
        assert!(!client.is_closed().await);
        assert!(client.http().await.is_ok());
    }
}
