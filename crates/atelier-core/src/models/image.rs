//! Image payloads accepted by the API.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::Deserialize;

use crate::errors::{StorefrontError, StorefrontResult};

/// An image as sent in a JSON body: original file name plus base64 data.
#[derive(Debug, Clone, Deserialize)]
pub struct EncodedImage {
    pub file_name: String,
    pub data_base64: String,
}

/// A decoded image ready for the blob store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl EncodedImage {
    pub fn decode(&self) -> StorefrontResult<ImageUpload> {
        let bytes = STANDARD.decode(self.data_base64.trim()).map_err(|e| {
            StorefrontError::validation(format!("image {} is not valid base64: {e}", self.file_name))
        })?;
        Ok(ImageUpload {
            file_name: self.file_name.clone(),
            bytes,
        })
    }
}
