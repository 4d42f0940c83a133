//! Image payloads exchanged with the image collaborator.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// An image file staged for upload.
#[derive(Clone, Debug)]
pub struct NewImage {
    pub filename: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl NewImage {
    pub fn new(
        filename: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            filename: filename.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// Upload confirmation returned by the backend.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UploadedImage {
    pub filename: String,
    #[serde(default)]
    pub original_name: Option<String>,
    pub size: usize,
    #[serde(rename = "mimetype")]
    pub mime_type: String,
    pub url: String,
}

/// Metadata for a stored image.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ImageInfo {
    pub filename: String,
    pub size: usize,
    pub created: Option<DateTime<Utc>>,
    pub modified: Option<DateTime<Utc>>,
    pub url: String,
}
