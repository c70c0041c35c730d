//! Scripted transport and clock shared by the integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;

use flyerforge::error::FlyerError;
use flyerforge::generate::GenerationClient;
use flyerforge::studio::Studio;
use flyerforge::submit::SubmissionClient;
use flyerforge::transport::{HttpReply, HttpTransport, Sleep};

pub const GENERATE_URL: &str = "http://generate.test/predict?key=test";
pub const SAVE_URL: &str = "http://backend.test/save";
pub const EMAIL_URL: &str = "http://backend.test/email";

/// One scripted outcome.
pub enum Scripted {
    Reply(HttpReply),
    Fail(String),
}

/// Transport that answers from a script and records every request.
#[derive(Default)]
pub struct MockTransport {
    script: Mutex<VecDeque<Scripted>>,
    requests: Mutex<Vec<(String, serde_json::Value)>>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn reply(&self, status: u16, body: serde_json::Value) {
        self.push(Scripted::Reply(HttpReply::json_body(status, &body)));
    }

    pub fn reply_raw(&self, status: u16, body: &str) {
        self.push(Scripted::Reply(HttpReply::new(status, body)));
    }

    pub fn fail(&self, message: &str) {
        self.push(Scripted::Fail(message.to_string()));
    }

    fn push(&self, outcome: Scripted) {
        self.script.lock().unwrap().push_back(outcome);
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<(String, serde_json::Value)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn post_json(&self, url: &str, body: &serde_json::Value) -> Result<HttpReply, FlyerError> {
        self.requests.lock().unwrap().push((url.to_string(), body.clone()));
        match self.script.lock().unwrap().pop_front() {
            Some(Scripted::Reply(reply)) => Ok(reply),
            Some(Scripted::Fail(message)) => Err(FlyerError::Transport(message)),
            None => panic!("unexpected request to {}", url),
        }
    }
}

/// Transport that holds every request until released, then answers from
/// the wrapped script.
pub struct GatedTransport {
    inner: Arc<MockTransport>,
    entered: Notify,
    release: Notify,
}

impl GatedTransport {
    pub fn new(inner: Arc<MockTransport>) -> Arc<Self> {
        Arc::new(Self {
            inner,
            entered: Notify::new(),
            release: Notify::new(),
        })
    }

    /// Wait until a request is being held.
    pub async fn wait_for_request(&self) {
        self.entered.notified().await;
    }

    /// Let the held request through.
    pub fn release(&self) {
        self.release.notify_one();
    }
}

#[async_trait]
impl HttpTransport for GatedTransport {
    async fn post_json(&self, url: &str, body: &serde_json::Value) -> Result<HttpReply, FlyerError> {
        self.entered.notify_one();
        self.release.notified().await;
        self.inner.post_json(url, body).await
    }
}

/// Sleep that returns immediately and records the requested durations.
#[derive(Default)]
pub struct RecordingSleep {
    delays: Mutex<Vec<Duration>>,
}

impl RecordingSleep {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn delays(&self) -> Vec<Duration> {
        self.delays.lock().unwrap().clone()
    }
}

#[async_trait]
impl Sleep for RecordingSleep {
    async fn sleep(&self, duration: Duration) {
        self.delays.lock().unwrap().push(duration);
    }
}

/// A successful prediction response with `count` images.
pub fn predictions(count: usize) -> serde_json::Value {
    let items: Vec<_> = (0..count)
        .map(|i| serde_json::json!({"bytesBase64Encoded": format!("IMG{}", i), "mimeType": "image/png"}))
        .collect();
    serde_json::json!({ "predictions": items })
}

pub fn generation_client(transport: &Arc<MockTransport>, sleeper: &Arc<RecordingSleep>) -> GenerationClient {
    GenerationClient::new(transport.clone(), sleeper.clone(), GENERATE_URL)
}

pub fn submission_client(transport: &Arc<MockTransport>) -> SubmissionClient {
    SubmissionClient::new(transport.clone(), SAVE_URL, EMAIL_URL)
}

/// Studio wired to one mock transport for every endpoint.
pub fn studio(transport: &Arc<MockTransport>, sleeper: &Arc<RecordingSleep>) -> Studio {
    Studio::new(generation_client(transport, sleeper), submission_client(transport))
}
