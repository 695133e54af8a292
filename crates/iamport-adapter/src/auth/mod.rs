/*
[INPUT]:  API key pair and gateway token endpoint
[OUTPUT]: Valid bearer tokens for authenticated calls
[POS]:    Auth layer - handles Iamport access-token lifecycle
[UPDATE]: When token exchange or refresh policy changes
*/

pub mod manager;
pub mod token;

pub use token::{TokenData, TokenManager};
