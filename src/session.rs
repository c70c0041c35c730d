//! # Session State
//!
//! The single owner of everything the user edits during a session: the
//! [`Design`], the Coordinate Model, the active [`BackgroundSource`], the
//! last generated image set, and the flags and banners of in-flight
//! operations.
//!
//! Synchronous edits go through [`Session::apply`] with a [`Command`].
//! Asynchronous operations (generation, save, email) are split into a
//! `begin_*` step that validates and raises a busy flag, and a `finish_*`
//! step that records the outcome; the network call happens in between,
//! outside any borrow of the session (see [`crate::studio`]).
//!
//! Nothing here is persisted. A session lives until the process exits or
//! the design is submitted.

use serde::Serialize;
use std::time::{Duration, Instant};
use uuid::Uuid;

use crate::design::{Design, TextField};
use crate::drag::{DragSurface, PointerEvent};
use crate::error::FlyerError;
use crate::layout::{ElementId, ElementPositions, Face, Position};
use crate::media::ImageData;
use crate::render::{self, RenderInput, RenderedFlyer};
use crate::submit::{FlyerData, validate_email_address};

/// How long the email success indicator stays visible.
pub const EMAIL_SUCCESS_VISIBLE: Duration = Duration::from_secs(5);

pub const DEFAULT_PROMPT: &str = "Abstract geometric background pattern, high-tech datacenter aesthetic, shades of blue, dark blue, white, and grey";

/// The fill currently used behind both canvases.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum BackgroundSource {
    /// Constant fallback color.
    #[default]
    Default,
    /// Cropped upload.
    Uploaded { image: ImageData },
    /// One image of the current generated set.
    Generated { index: usize, image: ImageData },
}

impl BackgroundSource {
    pub fn image(&self) -> Option<&ImageData> {
        match self {
            BackgroundSource::Default => None,
            BackgroundSource::Uploaded { image } | BackgroundSource::Generated { image, .. } => Some(image),
        }
    }

    pub fn is_default(&self) -> bool {
        matches!(self, BackgroundSource::Default)
    }
}

/// Synchronous edit to a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    SetText(TextField, String),
    SetPrompt(String),
    SetEmailAddress(String),
    MoveElement(ElementId, Position),
    ResetPositions,
    SelectGenerated(usize),
    Pointer(Face, PointerEvent),
    DismissError,
}

/// Image slot an upload writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadSlot {
    Logo,
    Background,
}

impl UploadSlot {
    fn index(self) -> usize {
        match self {
            UploadSlot::Logo => 0,
            UploadSlot::Background => 1,
        }
    }
}

/// Handle for one upload; only the most recently issued ticket per slot
/// may complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadTicket {
    slot: UploadSlot,
    seq: u64,
}

impl UploadTicket {
    pub fn slot(&self) -> UploadSlot {
        self.slot
    }
}

/// Serializable snapshot of a session.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub id: Uuid,
    pub design: Design,
    pub element_positions: ElementPositions,
    pub background: BackgroundSource,
    pub default_background: Option<&'static str>,
    pub generated_images: Vec<ImageData>,
    pub prompt: String,
    pub email_address: String,
    pub error: Option<String>,
    pub generating: bool,
    pub saving: bool,
    pub sending_email: bool,
    pub email_success: bool,
    pub dragging: Vec<ElementId>,
}

/// Top-level session state.
#[derive(Debug)]
pub struct Session {
    id: Uuid,
    design: Design,
    positions: ElementPositions,
    background: BackgroundSource,
    uploaded_background: Option<ImageData>,
    generated: Vec<ImageData>,
    prompt: String,
    email_address: String,
    error: Option<String>,
    generating: bool,
    saving: bool,
    sending_email: bool,
    email_sent_at: Option<Instant>,
    surfaces: [DragSurface; 2],
    upload_seq: [u64; 2],
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            design: Design::default(),
            positions: ElementPositions::default(),
            background: BackgroundSource::Default,
            uploaded_background: None,
            generated: Vec::new(),
            prompt: DEFAULT_PROMPT.to_string(),
            email_address: String::new(),
            error: None,
            generating: false,
            saving: false,
            sending_email: false,
            email_sent_at: None,
            surfaces: [DragSurface::new(Face::Front), DragSurface::new(Face::Back)],
            upload_seq: [0; 2],
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn design(&self) -> &Design {
        &self.design
    }

    pub fn positions(&self) -> &ElementPositions {
        &self.positions
    }

    pub fn background(&self) -> &BackgroundSource {
        &self.background
    }

    pub fn uploaded_background(&self) -> Option<&ImageData> {
        self.uploaded_background.as_ref()
    }

    pub fn generated(&self) -> &[ImageData] {
        &self.generated
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn email_address(&self) -> &str {
        &self.email_address
    }

    /// Current inline error banner.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_generating(&self) -> bool {
        self.generating
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    pub fn is_sending_email(&self) -> bool {
        self.sending_email
    }

    pub fn surface(&self, face: Face) -> &DragSurface {
        &self.surfaces[face_index(face)]
    }

    /// Apply a synchronous edit.
    pub fn apply(&mut self, command: Command) -> Result<(), FlyerError> {
        match command {
            Command::SetText(field, value) => self.design.set_text(field, value),
            Command::SetPrompt(prompt) => self.prompt = prompt,
            Command::SetEmailAddress(address) => self.email_address = address,
            Command::MoveElement(id, position) => self.positions.set(id, position),
            Command::ResetPositions => self.positions.reset(),
            Command::SelectGenerated(index) => {
                let image = self.generated.get(index).cloned().ok_or_else(|| {
                    FlyerError::Validation(format!("No generated image at index {}", index))
                })?;
                self.background = BackgroundSource::Generated { index, image };
            }
            Command::Pointer(face, event) => self.handle_pointer(face, event),
            Command::DismissError => self.error = None,
        }
        Ok(())
    }

    fn handle_pointer(&mut self, face: Face, event: PointerEvent) {
        if let PointerEvent::Down { target, .. } = event
            && target.face() != face
        {
            return;
        }

        let mut moves = Vec::new();
        self.surfaces[face_index(face)].handle(event, &self.positions, |id, position| {
            moves.push((id, position));
        });
        for (id, position) in moves {
            self.positions.set(id, position);
        }
    }

    /// Start an upload into `slot`, superseding any upload still in flight.
    pub fn begin_upload(&mut self, slot: UploadSlot) -> UploadTicket {
        let seq = &mut self.upload_seq[slot.index()];
        *seq += 1;
        UploadTicket { slot, seq: *seq }
    }

    /// Record the outcome of an upload.
    ///
    /// `Ok(None)` means the upload was not an image and is ignored. Returns
    /// false when a newer upload to the same slot has since started.
    pub fn complete_upload(
        &mut self,
        ticket: UploadTicket,
        outcome: &Result<Option<ImageData>, FlyerError>,
    ) -> bool {
        if self.upload_seq[ticket.slot.index()] != ticket.seq {
            log::debug!("[upload] Dropping stale {:?} upload", ticket.slot);
            return false;
        }

        match outcome {
            Ok(Some(image)) => match ticket.slot {
                UploadSlot::Logo => self.design.uploaded_logo = Some(image.clone()),
                UploadSlot::Background => {
                    self.uploaded_background = Some(image.clone());
                    self.background = BackgroundSource::Uploaded { image: image.clone() };
                }
            },
            Ok(None) => {}
            Err(err) => self.error = Some(err.to_string()),
        }
        true
    }

    /// Validate the prompt and mark generation in flight. Returns the prompt.
    pub fn begin_generation(&mut self) -> Result<String, FlyerError> {
        if self.generating {
            return Err(FlyerError::Busy("Generation".to_string()));
        }
        self.error = None;
        if self.prompt.trim().is_empty() {
            let err = FlyerError::Validation(crate::generate::BLANK_PROMPT_MESSAGE.to_string());
            self.error = Some(err.to_string());
            return Err(err);
        }
        self.generating = true;
        self.generated.clear();
        Ok(self.prompt.clone())
    }

    /// Record a generation outcome; the first image becomes the background.
    pub fn finish_generation(&mut self, outcome: &Result<Vec<ImageData>, FlyerError>) {
        self.generating = false;
        match outcome {
            Ok(images) => {
                if let Some(first) = images.first() {
                    self.background = BackgroundSource::Generated {
                        index: 0,
                        image: first.clone(),
                    };
                }
                self.generated = images.clone();
            }
            Err(err) => self.error = Some(err.to_string()),
        }
    }

    /// Mark a save in flight and snapshot the design to send.
    pub fn begin_save(&mut self) -> Result<FlyerData, FlyerError> {
        if self.saving {
            return Err(FlyerError::Busy("Save".to_string()));
        }
        self.saving = true;
        Ok(self.flyer_data())
    }

    pub fn finish_save(&mut self, outcome: &Result<serde_json::Value, FlyerError>) {
        self.saving = false;
        if let Err(err) = outcome {
            self.error = Some(err.to_string());
        }
    }

    /// Validate the address and mark an email in flight.
    ///
    /// Returns the trimmed address and the design snapshot.
    pub fn begin_email(&mut self) -> Result<(String, FlyerData), FlyerError> {
        if self.sending_email {
            return Err(FlyerError::Busy("Email".to_string()));
        }
        let address = match validate_email_address(&self.email_address) {
            Ok(address) => address.to_string(),
            Err(err) => {
                self.error = Some(err.to_string());
                return Err(err);
            }
        };
        self.sending_email = true;
        self.error = None;
        self.email_sent_at = None;
        Ok((address, self.flyer_data()))
    }

    pub fn finish_email(&mut self, outcome: &Result<serde_json::Value, FlyerError>, now: Instant) {
        self.sending_email = false;
        match outcome {
            Ok(_) => {
                self.email_sent_at = Some(now);
                self.email_address.clear();
            }
            Err(err) => self.error = Some(err.to_string()),
        }
    }

    /// Whether the email success indicator is showing at `now`.
    pub fn email_success_visible(&self, now: Instant) -> bool {
        self.email_sent_at
            .is_some_and(|sent| now.saturating_duration_since(sent) < EMAIL_SUCCESS_VISIBLE)
    }

    /// Full design as sent to the submission service.
    pub fn flyer_data(&self) -> FlyerData {
        FlyerData::new(&self.design, &self.positions, self.background.image())
    }

    pub fn render_input(&self, face: Face) -> RenderInput<'_> {
        RenderInput::new(&self.design, &self.positions, self.background.image())
            .with_dragging(self.surface(face).dragging())
    }

    pub fn render_face(&self, face: Face) -> String {
        render::render_face(&self.render_input(face), face)
    }

    pub fn render(&self) -> RenderedFlyer {
        RenderedFlyer {
            front: self.render_face(Face::Front),
            back: self.render_face(Face::Back),
        }
    }

    pub fn view(&self, now: Instant) -> SessionView {
        SessionView {
            id: self.id,
            design: self.design.clone(),
            element_positions: self.positions,
            background: self.background.clone(),
            default_background: self
                .background
                .is_default()
                .then_some(render::DEFAULT_BACKGROUND),
            generated_images: self.generated.clone(),
            prompt: self.prompt.clone(),
            email_address: self.email_address.clone(),
            error: self.error.clone(),
            generating: self.generating,
            saving: self.saving,
            sending_email: self.sending_email,
            email_success: self.email_success_visible(now),
            dragging: self
                .surfaces
                .iter()
                .filter_map(|s| s.dragging())
                .collect(),
        }
    }
}

fn face_index(face: Face) -> usize {
    match face {
        Face::Front => 0,
        Face::Back => 1,
    }
}
