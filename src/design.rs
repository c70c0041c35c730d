//! # Design
//!
//! The user-editable content of a flyer: text fields and the uploaded logo.
//! Layout lives in [`crate::layout`] and the background in
//! [`crate::session::BackgroundSource`]; the three together make up what is
//! rendered and submitted.

use serde::{Deserialize, Serialize};

use crate::media::ImageData;

/// Text content and logo of a flyer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Design {
    pub title: String,
    pub subtitle: String,
    pub year: String,
    pub qr_text: String,
    pub powered_by_text: String,
    pub logo_line1: String,
    pub logo_line2: String,
    pub uploaded_logo: Option<ImageData>,
}

impl Default for Design {
    fn default() -> Self {
        Self {
            title: "Title".to_string(),
            subtitle: "Subtitle".to_string(),
            year: "2025".to_string(),
            qr_text: "Scan the QR code for the event Agenda".to_string(),
            powered_by_text: "POWERED BY".to_string(),
            logo_line1: "Partner".to_string(),
            logo_line2: " Name".to_string(),
            uploaded_logo: None,
        }
    }
}

/// Editable text fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TextField {
    Title,
    Subtitle,
    Year,
    QrText,
    PoweredByText,
    LogoLine1,
    LogoLine2,
}

impl Design {
    pub fn text(&self, field: TextField) -> &str {
        match field {
            TextField::Title => &self.title,
            TextField::Subtitle => &self.subtitle,
            TextField::Year => &self.year,
            TextField::QrText => &self.qr_text,
            TextField::PoweredByText => &self.powered_by_text,
            TextField::LogoLine1 => &self.logo_line1,
            TextField::LogoLine2 => &self.logo_line2,
        }
    }

    pub fn set_text(&mut self, field: TextField, value: String) {
        let slot = match field {
            TextField::Title => &mut self.title,
            TextField::Subtitle => &mut self.subtitle,
            TextField::Year => &mut self.year,
            TextField::QrText => &mut self.qr_text,
            TextField::PoweredByText => &mut self.powered_by_text,
            TextField::LogoLine1 => &mut self.logo_line1,
            TextField::LogoLine2 => &mut self.logo_line2,
        };
        *slot = value;
    }
}

/// Partial text update; absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextUpdate {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub year: Option<String>,
    pub qr_text: Option<String>,
    pub powered_by_text: Option<String>,
    pub logo_line1: Option<String>,
    pub logo_line2: Option<String>,
}

impl TextUpdate {
    /// The fields present in this update.
    pub fn into_fields(self) -> Vec<(TextField, String)> {
        [
            (TextField::Title, self.title),
            (TextField::Subtitle, self.subtitle),
            (TextField::Year, self.year),
            (TextField::QrText, self.qr_text),
            (TextField::PoweredByText, self.powered_by_text),
            (TextField::LogoLine1, self.logo_line1),
            (TextField::LogoLine2, self.logo_line2),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.map(|v| (field, v)))
        .collect()
    }
}
