//! Media storage collaborator.
//!
//! Uploaded file bytes are handed to a [`MediaStorage`] which returns the
//! public URL recorded on the video. The service never serves media itself.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::{AppError, Result};

mod s3;

pub use s3::S3MediaStorage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Video,
    Thumbnail,
}

impl MediaKind {
    fn prefix(&self) -> &'static str {
        match self {
            MediaKind::Video => "videos",
            MediaKind::Thumbnail => "thumbnails",
        }
    }

    fn accepts(&self, content_type: &mime::Mime) -> bool {
        match self {
            MediaKind::Video => content_type.type_() == mime::VIDEO,
            MediaKind::Thumbnail => content_type.type_() == mime::IMAGE,
        }
    }
}

/// One file received from a multipart form.
#[derive(Debug, Clone)]
pub struct MediaUpload {
    pub kind: MediaKind,
    pub file_name: Option<String>,
    pub content_type: mime::Mime,
    pub bytes: Vec<u8>,
}

impl MediaUpload {
    /// Reject empty bodies and mismatched content types before storing.
    pub fn validate(&self) -> Result<()> {
        if self.bytes.is_empty() {
            return Err(AppError::BadRequest(format!(
                "{} is empty",
                self.field_label()
            )));
        }
        if !self.kind.accepts(&self.content_type) {
            return Err(AppError::BadRequest(format!(
                "{} has unsupported content type {}",
                self.field_label(),
                self.content_type
            )));
        }
        Ok(())
    }

    /// Object key: `<prefix>/<uuid>[.<ext>]`, extension taken from the client file name.
    pub fn object_key(&self) -> String {
        let extension = self
            .file_name
            .as_deref()
            .and_then(|name| name.rsplit_once('.'))
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()));

        match extension {
            Some(ext) => format!("{}/{}.{}", self.kind.prefix(), Uuid::new_v4(), ext),
            None => format!("{}/{}", self.kind.prefix(), Uuid::new_v4()),
        }
    }

    fn field_label(&self) -> &'static str {
        match self.kind {
            MediaKind::Video => "Video file",
            MediaKind::Thumbnail => "Thumbnail image",
        }
    }
}

#[async_trait]
pub trait MediaStorage: Send + Sync {
    /// Persist the upload and return its public URL.
    async fn store(&self, upload: MediaUpload) -> Result<String>;
}
