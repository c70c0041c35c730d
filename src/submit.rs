//! # Submission Client
//!
//! Sends a finished design to the external persistence/notification
//! service. Both operations inline the full design, image payloads included.
//!
//! ```text
//! persist   POST {"flyerData": {...}}
//! email     POST {"email": "...", "flyerData": {...}}
//! failure   {"message": "..."}                       (body optional)
//! ```
//!
//! The service itself is outside this crate; only the request contract is
//! implemented here.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::config::StudioConfig;
use crate::design::Design;
use crate::error::FlyerError;
use crate::layout::ElementPositions;
use crate::media::ImageData;
use crate::transport::{HttpReply, HttpTransport};

pub const BLANK_EMAIL_MESSAGE: &str = "Please enter a valid email address.";
const SAVE_FAILED_MESSAGE: &str = "Could not save design. Please try again.";
const EMAIL_FAILED_MESSAGE: &str = "Could not send the email. Please try again.";

/// Serialized form of a complete design.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlyerData {
    pub title: String,
    pub subtitle: String,
    pub year: String,
    pub qr_text: String,
    pub powered_by_text: String,
    pub logo_line1: String,
    pub logo_line2: String,
    pub background_image: Option<ImageData>,
    pub uploaded_logo: Option<ImageData>,
    pub element_positions: ElementPositions,
}

impl FlyerData {
    pub fn new(design: &Design, positions: &ElementPositions, background: Option<&ImageData>) -> Self {
        Self {
            title: design.title.clone(),
            subtitle: design.subtitle.clone(),
            year: design.year.clone(),
            qr_text: design.qr_text.clone(),
            powered_by_text: design.powered_by_text.clone(),
            logo_line1: design.logo_line1.clone(),
            logo_line2: design.logo_line2.clone(),
            background_image: background.cloned(),
            uploaded_logo: design.uploaded_logo.clone(),
            element_positions: *positions,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SaveRequest<'a> {
    flyer_data: &'a FlyerData,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EmailRequest<'a> {
    email: &'a str,
    flyer_data: &'a FlyerData,
}

#[derive(Debug, Deserialize)]
struct MessageBody {
    message: Option<String>,
}

/// Reject blank destination addresses. Returns the trimmed address.
pub fn validate_email_address(address: &str) -> Result<&str, FlyerError> {
    let trimmed = address.trim();
    if trimmed.is_empty() {
        return Err(FlyerError::Validation(BLANK_EMAIL_MESSAGE.to_string()));
    }
    Ok(trimmed)
}

/// Client for the persist and email endpoints.
#[derive(Clone)]
pub struct SubmissionClient {
    transport: Arc<dyn HttpTransport>,
    save_url: String,
    email_url: String,
}

impl SubmissionClient {
    pub fn new(transport: Arc<dyn HttpTransport>, save_url: impl Into<String>, email_url: impl Into<String>) -> Self {
        Self {
            transport,
            save_url: save_url.into(),
            email_url: email_url.into(),
        }
    }

    pub fn from_config(config: &StudioConfig, transport: Arc<dyn HttpTransport>) -> Self {
        Self::new(transport, config.save_endpoint.clone(), config.email_endpoint.clone())
    }

    /// Persist the design. Returns the service's JSON reply.
    pub async fn persist_design(&self, data: &FlyerData) -> Result<serde_json::Value, FlyerError> {
        let body = encode(&SaveRequest { flyer_data: data })?;
        let reply = self.post(&self.save_url, &body, SAVE_FAILED_MESSAGE).await?;
        log::info!("[submit] Design saved (HTTP {})", reply.status);
        decode_reply(&reply)
    }

    /// Email the design to `address`. Blank addresses fail without a request.
    pub async fn email_design(&self, address: &str, data: &FlyerData) -> Result<serde_json::Value, FlyerError> {
        let email = validate_email_address(address)?;
        let body = encode(&EmailRequest {
            email,
            flyer_data: data,
        })?;
        let reply = self.post(&self.email_url, &body, EMAIL_FAILED_MESSAGE).await?;
        log::info!("[submit] Design emailed to {} (HTTP {})", email, reply.status);
        decode_reply(&reply)
    }

    async fn post(&self, url: &str, body: &serde_json::Value, fallback: &str) -> Result<HttpReply, FlyerError> {
        let reply = self.transport.post_json(url, body).await.map_err(|e| {
            log::error!("[submit] {} failed: {}", url, e);
            FlyerError::Transport(fallback.to_string())
        })?;

        if !reply.is_success() {
            let message = reply
                .json::<MessageBody>()
                .ok()
                .and_then(|b| b.message)
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| fallback.to_string());
            log::error!("[submit] {} returned HTTP {}: {}", url, reply.status, message);
            return Err(FlyerError::Service {
                status: reply.status,
                message,
            });
        }

        Ok(reply)
    }
}

fn encode<T: Serialize>(request: &T) -> Result<serde_json::Value, FlyerError> {
    serde_json::to_value(request).map_err(|e| FlyerError::Decode(format!("Failed to encode request: {}", e)))
}

/// An empty success body is accepted as `null`.
fn decode_reply(reply: &HttpReply) -> Result<serde_json::Value, FlyerError> {
    if reply.body.iter().all(u8::is_ascii_whitespace) {
        return Ok(serde_json::Value::Null);
    }
    reply.json()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_flyer_data_shape() {
        let data = FlyerData::new(&Design::default(), &ElementPositions::default(), None);
        let value = serde_json::to_value(&SaveRequest { flyer_data: &data }).unwrap();
        let flyer = &value["flyerData"];
        assert_eq!(flyer["title"], "Title");
        assert_eq!(flyer["qrText"], "Scan the QR code for the event Agenda");
        assert_eq!(flyer["poweredByText"], "POWERED BY");
        assert_eq!(flyer["logoLine1"], "Partner");
        assert_eq!(flyer["logoLine2"], " Name");
        assert_eq!(flyer["backgroundImage"], serde_json::Value::Null);
        assert_eq!(flyer["uploadedLogo"], serde_json::Value::Null);
        assert_eq!(flyer["elementPositions"]["footer-bottom"], serde_json::json!({"x": 100, "y": 350}));
        assert_eq!(flyer.as_object().unwrap().len(), 10);
    }

    #[test]
    fn test_email_request_shape() {
        let data = FlyerData::new(&Design::default(), &ElementPositions::default(), None);
        let value = encode(&EmailRequest {
            email: "a@b.c",
            flyer_data: &data,
        })
        .unwrap();
        assert_eq!(value["email"], "a@b.c");
        assert!(value["flyerData"].is_object());
    }

    #[test]
    fn test_validate_email_address() {
        assert!(validate_email_address("").unwrap_err().is_validation());
        assert!(validate_email_address(" \t ").is_err());
        assert_eq!(validate_email_address(" x@y.z ").unwrap(), "x@y.z");
    }

    #[test]
    fn test_empty_success_body_is_null() {
        assert_eq!(decode_reply(&HttpReply::new(200, "")).unwrap(), serde_json::Value::Null);
        assert_eq!(
            decode_reply(&HttpReply::new(200, r#"{"id": 7}"#)).unwrap(),
            serde_json::json!({"id": 7})
        );
    }
}
