//! # Studio
//!
//! Drives a [`Session`] together with the remote clients.
//!
//! The session sits behind an async `RwLock`. Every long-running operation
//! takes the lock only to begin (validate, raise its busy flag, snapshot
//! what it needs) and again to finish (record the outcome). The network
//! call and any image processing run with the lock released, so edits and
//! pointer events keep flowing while a request is outstanding.
//!
//! Busy flags keep at most one generation, one save and one email in flight.
//! There is no cancellation: a started retry sequence runs to completion.

use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{RwLock, RwLockReadGuard};

use crate::config::StudioConfig;
use crate::error::FlyerError;
use crate::generate::GenerationClient;
use crate::media::{self, ImageData, normalize_background};
use crate::session::{Command, Session, UploadSlot, UploadTicket};
use crate::submit::SubmissionClient;
use crate::transport::{HttpTransport, ReqwestTransport, Sleep, TokioSleep};

/// Session plus the clients that act on it.
pub struct Studio {
    session: RwLock<Session>,
    generator: GenerationClient,
    submitter: SubmissionClient,
}

impl Studio {
    pub fn new(generator: GenerationClient, submitter: SubmissionClient) -> Self {
        Self {
            session: RwLock::new(Session::new()),
            generator,
            submitter,
        }
    }

    /// Studio talking to the configured endpoints over HTTP.
    pub fn from_config(config: &StudioConfig) -> Result<Self, FlyerError> {
        let transport: Arc<dyn HttpTransport> = Arc::new(ReqwestTransport::new()?);
        let sleeper: Arc<dyn Sleep> = Arc::new(TokioSleep);
        Ok(Self::new(
            GenerationClient::from_config(config, transport.clone(), sleeper),
            SubmissionClient::from_config(config, transport),
        ))
    }

    /// Read access to the session.
    pub async fn session(&self) -> RwLockReadGuard<'_, Session> {
        self.session.read().await
    }

    pub async fn apply(&self, command: Command) -> Result<(), FlyerError> {
        self.session.write().await.apply(command)
    }

    /// Generate a new background set from the session prompt.
    ///
    /// Returns the number of images received.
    pub async fn generate_backgrounds(&self) -> Result<usize, FlyerError> {
        let prompt = self.session.write().await.begin_generation()?;
        log::info!("[generate] Requesting backgrounds for prompt {:?}", prompt);

        let outcome = self.generator.generate(&prompt).await;

        self.session.write().await.finish_generation(&outcome);
        outcome.map(|images| images.len())
    }

    /// Send the current design to the persistence endpoint.
    pub async fn save_design(&self) -> Result<serde_json::Value, FlyerError> {
        let data = self.session.write().await.begin_save()?;
        let outcome = self.submitter.persist_design(&data).await;
        self.session.write().await.finish_save(&outcome);
        outcome
    }

    /// Email the current design to the session's address.
    pub async fn send_email(&self) -> Result<serde_json::Value, FlyerError> {
        let (address, data) = self.session.write().await.begin_email()?;
        let outcome = self.submitter.email_design(&address, &data).await;
        self.session.write().await.finish_email(&outcome, Instant::now());
        outcome
    }

    /// Store an uploaded logo. Returns false if the upload was ignored or superseded.
    ///
    /// Uploads whose media type is not `image/*` are ignored without touching
    /// the session.
    pub async fn upload_logo(&self, media_type: &str, bytes: &[u8]) -> Result<bool, FlyerError> {
        // Non-images never take a ticket, so they cannot supersede an upload in flight.
        if !media::is_image_media_type(media_type) {
            return Ok(false);
        }
        let ticket = self.session.write().await.begin_upload(UploadSlot::Logo);
        let outcome = Ok(media::logo_from_upload(media_type, bytes));
        self.finish_upload(ticket, outcome).await
    }

    /// Normalize and store an uploaded background.
    pub async fn upload_background(&self, media_type: String, bytes: Vec<u8>) -> Result<bool, FlyerError> {
        if !media::is_image_media_type(&media_type) {
            return Ok(false);
        }
        let ticket = self.session.write().await.begin_upload(UploadSlot::Background);

        let outcome = tokio::task::spawn_blocking(move || normalize_background(&media_type, &bytes))
            .await
            .map_err(|e| FlyerError::Image(format!("Processing error: {}", e)))
            .and_then(|result| result);

        self.finish_upload(ticket, outcome).await
    }

    async fn finish_upload(
        &self,
        ticket: UploadTicket,
        outcome: Result<Option<ImageData>, FlyerError>,
    ) -> Result<bool, FlyerError> {
        let stored = matches!(outcome, Ok(Some(_)));
        let current = self.session.write().await.complete_upload(ticket, &outcome);
        outcome?;
        if stored && current {
            log::info!("[upload] Stored new {:?} image", ticket.slot());
        }
        Ok(stored && current)
    }
}
