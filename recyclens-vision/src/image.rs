use crate::error::{Result, VisionError};
use base64::{engine::general_purpose::STANDARD, Engine as _};

/// Base64-encoded image payload as submitted by a client. Validation happens
/// once, before the pipeline runs; providers receive the payload unchanged.
#[derive(Debug, Clone)]
pub struct ImagePayload {
    base64: String,
}

impl ImagePayload {
    /// Accepts raw base64 or a `data:` URL, stripping the URL header.
    pub fn new(data: impl Into<String>) -> Self {
        let data = data.into();
        let base64 = match data.strip_prefix("data:") {
            Some(rest) => rest
                .split_once("base64,")
                .map(|(_, b64)| b64.to_string())
                .unwrap_or(data),
            None => data,
        };
        Self { base64 }
    }

    pub fn base64(&self) -> &str {
        &self.base64
    }

    /// Decode and check the payload against the size bound and the image
    /// type allow-list (JPEG, PNG, GIF, WebP by magic bytes).
    pub fn validate(&self, max_bytes: usize) -> Result<()> {
        if self.base64.is_empty() {
            return Err(VisionError::InvalidImage("no image data provided".to_string()));
        }

        let bytes = STANDARD
            .decode(self.base64.as_bytes())
            .map_err(|e| VisionError::InvalidImage(format!("invalid base64: {}", e)))?;

        if bytes.len() > max_bytes {
            return Err(VisionError::InvalidImage(format!(
                "image size {} exceeds {} byte limit",
                bytes.len(),
                max_bytes
            )));
        }

        if !is_supported_image(&bytes) {
            return Err(VisionError::InvalidImage(
                "unsupported image type, expected JPEG, PNG, GIF or WebP".to_string(),
            ));
        }

        Ok(())
    }
}

fn is_supported_image(bytes: &[u8]) -> bool {
    if bytes.len() < 12 {
        return false;
    }
    bytes.starts_with(&[0xFF, 0xD8, 0xFF])
        || bytes.starts_with(&[0x89, b'P', b'N', b'G'])
        || bytes.starts_with(b"GIF8")
        || (bytes.starts_with(b"RIFF") && &bytes[8..12] == b"WEBP")
}
