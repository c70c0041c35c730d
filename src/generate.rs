//! # Background Generation Client
//!
//! Requests candidate background images for a text prompt from a remote
//! `:predict` endpoint, retrying transient failures with exponential backoff.
//!
//! ## Wire Format
//!
//! ```text
//! request   {"instances": [{"prompt": "..."}], "parameters": {"sampleCount": 4}}
//! success   {"predictions": [{"bytesBase64Encoded": "..."}, ...]}
//! failure   {"error": {"message": "..."}}            (body optional)
//! ```
//!
//! ## Retry Policy
//!
//! | Outcome | Action |
//! |---------|--------|
//! | 2xx with ≥1 prediction | done |
//! | 429 or 5xx | wait, retry |
//! | 2xx with 0 predictions, transport or decode failure | wait, retry; reported if final |
//! | other non-2xx | fail immediately |
//!
//! The wait after attempt `n` (counting from 0) is `2^n × 1s` plus up to 1s
//! of random jitter. At most 5 attempts are made and nothing waits after the
//! last one; when all fail, the last error is returned.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

use crate::config::StudioConfig;
use crate::error::FlyerError;
use crate::media::ImageData;
use crate::transport::{HttpReply, HttpTransport, Sleep};

/// Number of candidates requested per generation.
pub const SAMPLE_COUNT: u32 = 4;

pub const BLANK_PROMPT_MESSAGE: &str = "Please enter an image theme (prompt).";
pub const NO_IMAGES_MESSAGE: &str = "No images were generated.";

#[derive(Debug, Serialize)]
struct PredictRequest<'a> {
    instances: [Instance<'a>; 1],
    parameters: Parameters,
}

#[derive(Debug, Serialize)]
struct Instance<'a> {
    prompt: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Parameters {
    sample_count: u32,
}

#[derive(Debug, Deserialize)]
struct PredictResponse {
    #[serde(default)]
    predictions: Vec<Prediction>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Prediction {
    bytes_base64_encoded: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: Option<String>,
}

/// Bounded exponential backoff with full jitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_jitter: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            base_delay: Duration::from_millis(1000),
            max_jitter: Duration::from_millis(1000),
        }
    }
}

impl RetryPolicy {
    /// Delay before the attempt following `attempt`, given a jitter amount.
    pub fn delay(&self, attempt: u32, jitter: Duration) -> Duration {
        self.base_delay * 2u32.saturating_pow(attempt) + jitter.min(self.max_jitter)
    }

    /// Delay with jitter drawn uniformly from `[0, max_jitter)`.
    pub fn jittered_delay(&self, attempt: u32) -> Duration {
        let jitter_us = self.max_jitter.as_micros() as u64;
        let jitter = if jitter_us == 0 {
            Duration::ZERO
        } else {
            Duration::from_micros(rand::rng().random_range(0..jitter_us))
        };
        self.delay(attempt, jitter)
    }

    /// Rate limiting and server errors are worth another try.
    pub fn is_retryable_status(status: u16) -> bool {
        status == 429 || status >= 500
    }
}

enum Attempt {
    Success(Vec<ImageData>),
    Retry(FlyerError),
    Fatal(FlyerError),
}

/// Client for the image generation endpoint.
#[derive(Clone)]
pub struct GenerationClient {
    transport: Arc<dyn HttpTransport>,
    sleeper: Arc<dyn Sleep>,
    url: String,
    policy: RetryPolicy,
}

impl GenerationClient {
    pub fn new(transport: Arc<dyn HttpTransport>, sleeper: Arc<dyn Sleep>, url: impl Into<String>) -> Self {
        Self {
            transport,
            sleeper,
            url: url.into(),
            policy: RetryPolicy::default(),
        }
    }

    pub fn from_config(config: &StudioConfig, transport: Arc<dyn HttpTransport>, sleeper: Arc<dyn Sleep>) -> Self {
        if !config.has_api_key() {
            log::warn!("[generate] No API key configured; generation requests will be rejected");
        }
        Self::new(transport, sleeper, config.generation_url())
    }

    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    /// Generate candidate backgrounds for `prompt`.
    pub async fn generate(&self, prompt: &str) -> Result<Vec<ImageData>, FlyerError> {
        if prompt.trim().is_empty() {
            return Err(FlyerError::Validation(BLANK_PROMPT_MESSAGE.to_string()));
        }

        let request = PredictRequest {
            instances: [Instance { prompt }],
            parameters: Parameters {
                sample_count: SAMPLE_COUNT,
            },
        };
        let payload = serde_json::to_value(&request)
            .map_err(|e| FlyerError::Decode(format!("Failed to encode request: {}", e)))?;

        let mut last_error = None;
        for attempt in 0..self.policy.max_attempts {
            match self.attempt(&payload).await {
                Attempt::Success(images) => {
                    log::info!(
                        "[generate] Received {} image(s) on attempt {}",
                        images.len(),
                        attempt + 1
                    );
                    return Ok(images);
                }
                Attempt::Fatal(err) => {
                    log::error!("[generate] Attempt {} failed: {}", attempt + 1, err);
                    return Err(err);
                }
                Attempt::Retry(err) => {
                    log::warn!(
                        "[generate] Attempt {}/{} failed: {}",
                        attempt + 1,
                        self.policy.max_attempts,
                        err
                    );
                    last_error = Some(err);
                    if attempt + 1 < self.policy.max_attempts {
                        let delay = self.policy.jittered_delay(attempt);
                        log::debug!("[generate] Backing off for {:?}", delay);
                        self.sleeper.sleep(delay).await;
                    }
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            FlyerError::Generation(
                "An error occurred while generating images. Please try again.".to_string(),
            )
        }))
    }

    async fn attempt(&self, payload: &serde_json::Value) -> Attempt {
        let reply = match self.transport.post_json(&self.url, payload).await {
            Ok(reply) => reply,
            Err(err) => return Attempt::Retry(err),
        };

        if RetryPolicy::is_retryable_status(reply.status) {
            return Attempt::Retry(service_error(&reply));
        }
        if !reply.is_success() {
            return Attempt::Fatal(service_error(&reply));
        }

        let response: PredictResponse = match reply.json() {
            Ok(response) => response,
            Err(err) => return Attempt::Retry(err),
        };
        if response.predictions.is_empty() {
            return Attempt::Retry(FlyerError::Generation(NO_IMAGES_MESSAGE.to_string()));
        }

        Attempt::Success(
            response
                .predictions
                .iter()
                .map(|p| ImageData::from_png_base64(&p.bytes_base64_encoded))
                .collect(),
        )
    }
}

/// Error for a non-success reply, preferring the server's own message.
fn service_error(reply: &HttpReply) -> FlyerError {
    let message = reply
        .json::<ErrorBody>()
        .ok()
        .and_then(|body| body.error)
        .and_then(|detail| detail.message)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| format!("Request failed with status {}", reply.status));

    FlyerError::Service {
        status: reply.status,
        message,
    }
}
