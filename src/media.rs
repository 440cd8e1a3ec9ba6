use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::error::{GeminiError, Result};

/// An image embedded as a self-describing `data:` URI: MIME type plus a
/// base64 payload, usable anywhere a normal image URL is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataUri {
    pub mime_type: String,
    /// Base64-encoded image bytes, without the `data:...;base64,` prefix.
    pub data: String,
}

impl DataUri {
    pub fn new(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        DataUri {
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    /// Parses a `data:<mime>;base64,<payload>` string. Only base64 data
    /// URIs are accepted; the payload must be non-empty.
    pub fn parse(input: &str) -> Result<Self> {
        let rest = input.strip_prefix("data:").ok_or_else(|| {
            GeminiError::validation("source_image", "expected a `data:` URI")
        })?;
        let (header, payload) = rest.split_once(',').ok_or_else(|| {
            GeminiError::validation("source_image", "malformed data URI, missing `,` separator")
        })?;
        let mime_type = header.strip_suffix(";base64").ok_or_else(|| {
            GeminiError::validation("source_image", "only base64-encoded data URIs are supported")
        })?;
        if mime_type.is_empty() {
            return Err(GeminiError::validation("source_image", "data URI has no MIME type"));
        }
        if payload.is_empty() {
            return Err(GeminiError::validation("source_image", "data URI has an empty payload"));
        }
        Ok(DataUri::new(mime_type, payload))
    }

    pub fn from_bytes(mime_type: impl Into<String>, bytes: &[u8]) -> Self {
        DataUri::new(mime_type, STANDARD.encode(bytes))
    }

    /// Reads an image file and encodes it, inferring the MIME type from
    /// the file extension (png, jpg/jpeg, webp, gif).
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mime_type = mime_for_extension(path)?;
        let bytes = std::fs::read(path).map_err(|e| {
            GeminiError::InternalError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Ok(DataUri::from_bytes(mime_type, &bytes))
    }

    /// Decodes the base64 payload back into raw image bytes.
    pub fn decode(&self) -> Result<Vec<u8>> {
        STANDARD.decode(&self.data).map_err(|e| {
            GeminiError::validation("source_image", format!("invalid base64 payload: {}", e))
        })
    }

    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }
}

impl fmt::Display for DataUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "data:{};base64,{}", self.mime_type, self.data)
    }
}

fn mime_for_extension(path: &Path) -> Result<&'static str> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .ok_or_else(|| {
            GeminiError::validation(
                "source_image",
                format!("{} has no file extension to infer a MIME type from", path.display()),
            )
        })?;

    match extension.as_str() {
        "png" => Ok("image/png"),
        "jpg" | "jpeg" => Ok("image/jpeg"),
        "webp" => Ok("image/webp"),
        "gif" => Ok("image/gif"),
        other => Err(GeminiError::validation(
            "source_image",
            format!("unsupported image extension `{}`", other),
        )),
    }
}
