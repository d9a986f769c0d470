//! Optional photo attached to the answer set.
//!
//! Loading is asynchronous. A load that finishes after the user removed the photo,
//! or after a newer load was started, must not overwrite the slot, so every load
//! carries a ticket and only the latest ticket may commit.

use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::ImageError;
use crate::wire::InlineImage;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageAttachment {
    /// `data:<mime>;base64,<payload>`
    pub data_uri: String,
    pub mime_type: String,
}

impl ImageAttachment {
    pub fn from_bytes(bytes: &[u8], mime_type: &str) -> Self {
        Self {
            data_uri: format!("data:{};base64,{}", mime_type, STANDARD.encode(bytes)),
            mime_type: mime_type.to_string(),
        }
    }

    /// The base64 part after the first comma of the data URI.
    pub fn payload(&self) -> &str {
        self.data_uri.split_once(',').map(|(_, p)| p).unwrap_or("")
    }

    pub fn to_inline(&self) -> InlineImage {
        InlineImage { mime_type: self.mime_type.clone(), data: self.payload().to_string() }
    }
}

/// MIME type for the image extensions a photo picker would accept.
pub fn mime_for_path(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    let mime = match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "heic" => "image/heic",
        "heif" => "image/heif",
        _ => return None,
    };
    Some(mime)
}

/// Read an image file fully and encode it as a data URI.
pub async fn load_image(path: &Path) -> Result<ImageAttachment, ImageError> {
    let shown = path.display().to_string();
    let mime = mime_for_path(path).ok_or_else(|| ImageError::NotAnImage(shown.clone()))?;
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| ImageError::Read { path: shown.clone(), source })?;
    debug!(path = %shown, bytes = bytes.len(), mime, "image loaded");
    Ok(ImageAttachment::from_bytes(&bytes, mime))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// Single-slot holder for the attached photo.
#[derive(Debug, Default)]
pub struct ImageSlot {
    generation: u64,
    current: Option<ImageAttachment>,
}

impl ImageSlot {
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        LoadTicket(self.generation)
    }

    /// Store `image` if `ticket` is still the most recent request. Returns whether it was stored.
    pub fn commit(&mut self, ticket: LoadTicket, image: ImageAttachment) -> bool {
        if ticket.0 != self.generation {
            debug!(ticket = ticket.0, latest = self.generation, "dropping stale image load");
            return false;
        }
        self.current = Some(image);
        true
    }

    /// Remove the photo and invalidate any load still in flight.
    pub fn clear(&mut self) {
        self.generation += 1;
        self.current = None;
    }

    pub fn get(&self) -> Option<&ImageAttachment> {
        self.current.as_ref()
    }

    /// Load `path` and commit it under a fresh ticket.
    pub async fn load_from(&mut self, path: &Path) -> Result<bool, ImageError> {
        let ticket = self.begin_load();
        let image = load_image(path).await?;
        Ok(self.commit(ticket, image))
    }
}
