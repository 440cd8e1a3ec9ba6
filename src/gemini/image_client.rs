use std::sync::Arc;

use crate::error::{GeminiError, Result};
use crate::gemini::transport::GenerationTransport;
use crate::models::{
    GenerateContentRequest, GenerateContentResponse, ImageToImageRequest, ImageToImageResponse,
    ModelInfo, TextToImageRequest, TextToImageResponse,
};

/// Client for the image generation operations. Cheap to clone; clones
/// share the underlying transport.
#[derive(Clone)]
pub struct ImageClient {
    transport: Arc<dyn GenerationTransport>,
    default_model: String,
}

impl ImageClient {
    pub fn new(transport: Arc<dyn GenerationTransport>, default_model: impl Into<String>) -> Self {
        ImageClient {
            transport,
            default_model: default_model.into(),
        }
    }

    /// Image-capable models this client is known to work with.
    pub fn supported_models() -> Vec<ModelInfo> {
        vec![
            ModelInfo {
                id: "gemini-2.0-flash-preview-image-generation".to_string(),
                name: "Gemini 2.0 Flash (image generation preview)".to_string(),
                provider: "Google".to_string(),
                description: "Fast multimodal model with interleaved text and image output"
                    .to_string(),
            },
            ModelInfo {
                id: "gemini-2.5-flash-image-preview".to_string(),
                name: "Gemini 2.5 Flash Image (preview)".to_string(),
                provider: "Google".to_string(),
                description: "Higher-fidelity image generation and editing preview".to_string(),
            },
        ]
    }

    /// Generates an image from a text prompt. Fails with a validation
    /// error before any network traffic when the prompt is empty, and
    /// with `GenerationFailed` when the provider responds without an
    /// image.
    pub async fn text_to_image(&self, request: TextToImageRequest) -> Result<TextToImageResponse> {
        request.validate()?;
        let model = request.model_id.as_deref().unwrap_or(&self.default_model);
        log::info!("Generating image with model: {}", model);

        let wire = GenerateContentRequest::text_to_image(request.prompt);
        let response = self.transport.generate_content(model, wire).await?;
        let image_url = require_image(&response)?;

        Ok(TextToImageResponse {
            image_url,
            model: model.to_string(),
        })
    }

    /// Transforms a source image according to a text instruction. The
    /// same empty-payload rule applies as for `text_to_image`.
    pub async fn image_to_image(
        &self,
        request: ImageToImageRequest,
    ) -> Result<ImageToImageResponse> {
        request.validate()?;
        let source = request.source_data()?;
        let model = request.model_id.as_deref().unwrap_or(&self.default_model);
        log::info!("Transforming image with model: {}", model);

        let wire = GenerateContentRequest::image_to_image(&source, request.prompt);
        let response = self.transport.generate_content(model, wire).await?;
        let transformed_image = require_image(&response)?;

        Ok(ImageToImageResponse {
            transformed_image,
            model: model.to_string(),
        })
    }
}

/// A response without a usable image part is a provider fault, whatever
/// the HTTP status said.
fn require_image(response: &GenerateContentResponse) -> Result<String> {
    response.first_image_reference().ok_or_else(|| {
        let mut message = "No image was returned by the image generation model".to_string();
        if let Some(feedback) = &response.prompt_feedback {
            if let Some(reason) = &feedback.block_reason {
                message.push_str(&format!(" (prompt blocked: {})", reason));
            }
        }
        GeminiError::GenerationFailed(message)
    })
}
