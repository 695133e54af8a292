/*
[INPUT]:  HTTP client configuration and API endpoints
[OUTPUT]: HTTP responses and typed API results
[POS]:    HTTP layer - REST API communication
[UPDATE]: When adding new endpoints or changing client behavior
*/

pub mod certification;
pub mod client;
pub mod error;
pub mod payments;
pub mod subscribe;

pub use error::{IamportError, Result};

pub use client::{
    ClientConfig, Credentials, DEFAULT_POOL_SIZE, DEFAULT_TIMEOUT, DEFAULT_TOKEN_REFRESH_GAP,
    IAMPORT_API_URL, IamportClient,
};
