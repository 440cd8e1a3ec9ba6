//! Request and response types for the two image generation operations.

use serde::{Deserialize, Serialize};

use crate::error::{GeminiError, Result};
use crate::media::DataUri;

/// Request for generating an image from a text prompt.
#[derive(Debug, Clone, Deserialize)]
pub struct TextToImageRequest {
    pub prompt: String,
    /// Overrides the client's default model when set.
    #[serde(default)]
    pub model_id: Option<String>,
}

impl TextToImageRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        TextToImageRequest {
            prompt: prompt.into(),
            model_id: None,
        }
    }

    pub fn with_model(mut self, model_id: impl Into<String>) -> Self {
        self.model_id = Some(model_id.into());
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.prompt.trim().is_empty() {
            return Err(GeminiError::validation("prompt", "prompt must not be empty"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TextToImageResponse {
    /// Data URI of the generated image, or a file URI when the provider
    /// returns a reference instead of inline bytes.
    pub image_url: String,
    /// The model that produced the image.
    pub model: String,
}

/// Request for transforming an existing image with a text instruction.
#[derive(Debug, Clone, Deserialize)]
pub struct ImageToImageRequest {
    /// The source image as a `data:<mime>;base64,<payload>` URI.
    pub source_image: String,
    pub prompt: String,
    #[serde(default)]
    pub model_id: Option<String>,
}

impl ImageToImageRequest {
    pub fn new(source_image: impl Into<String>, prompt: impl Into<String>) -> Self {
        ImageToImageRequest {
            source_image: source_image.into(),
            prompt: prompt.into(),
            model_id: None,
        }
    }

    pub fn with_model(mut self, model_id: impl Into<String>) -> Self {
        self.model_id = Some(model_id.into());
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.source_image.trim().is_empty() {
            return Err(GeminiError::validation(
                "source_image",
                "a source image is required",
            ));
        }
        if self.prompt.trim().is_empty() {
            return Err(GeminiError::validation("prompt", "prompt must not be empty"));
        }
        Ok(())
    }

    /// Parses and checks the source image, rejecting non-image payloads
    /// before anything is sent to the provider.
    pub fn source_data(&self) -> Result<DataUri> {
        if self.source_image.trim().is_empty() {
            return Err(GeminiError::validation(
                "source_image",
                "a source image is required",
            ));
        }
        let uri = DataUri::parse(&self.source_image)?;
        if !uri.is_image() {
            return Err(GeminiError::validation(
                "source_image",
                format!("expected an image MIME type, got `{}`", uri.mime_type),
            ));
        }
        Ok(uri)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ImageToImageResponse {
    /// Data URI or file URI of the transformed image.
    pub transformed_image: String,
    pub model: String,
}
