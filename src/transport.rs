//! # Remote Transport
//!
//! The seams through which the studio reaches the network and the clock.
//!
//! - [`HttpTransport`]: POST a JSON body, get back status + raw body
//! - [`Sleep`]: suspend between retry attempts
//!
//! Production code uses [`ReqwestTransport`] and [`TokioSleep`]; tests swap
//! in scripted implementations so retry timing can be asserted without
//! actually waiting.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::error::FlyerError;

/// Status and body of an HTTP response.
#[derive(Debug, Clone)]
pub struct HttpReply {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpReply {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Build a reply whose body is the given JSON value.
    pub fn json_body(status: u16, value: &serde_json::Value) -> Self {
        Self::new(status, value.to_string())
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decode the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, FlyerError> {
        serde_json::from_slice(&self.body)
            .map_err(|e| FlyerError::Decode(format!("invalid JSON response: {}", e)))
    }
}

/// Sends JSON requests to remote endpoints.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn post_json(&self, url: &str, body: &serde_json::Value) -> Result<HttpReply, FlyerError>;
}

/// Suspends the calling task.
#[async_trait]
pub trait Sleep: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// [`HttpTransport`] backed by a shared reqwest client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self, FlyerError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("flyerforge/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FlyerError::Transport(format!("HTTP client error: {}", e)))?;
        Ok(Self { client })
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn post_json(&self, url: &str, body: &serde_json::Value) -> Result<HttpReply, FlyerError> {
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| FlyerError::Transport(format!("Request failed: {}", e)))?;
        let status = response.status().as_u16();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| FlyerError::Transport(format!("Failed to read response body: {}", e)))?;

        Ok(HttpReply::new(status, bytes.to_vec()))
    }
}

/// [`Sleep`] on the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleep;

#[async_trait]
impl Sleep for TokioSleep {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
