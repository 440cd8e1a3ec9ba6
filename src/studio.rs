//! Prompt composition and session state for interactive image work.
//!
//! The types here sit above the raw operations: an [`ImagePrompt`] turns
//! a base description and a creativity level into the full prompt the
//! model sees, and a [`Studio`] runs generations while keeping every
//! result in its [`Gallery`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{GeminiError, Result};
use crate::gemini::GeminiClient;
use crate::media::DataUri;
use crate::models::{ImageToImageRequest, TextToImageRequest};

/// Base prompts shorter than this are rejected before generation.
pub const MIN_PROMPT_LEN: usize = 10;
pub const DEFAULT_CREATIVITY: f32 = 0.5;

/// Style suggestions offered when generating from scratch.
pub const GENERATE_SUGGESTIONS: [&str; 4] =
    ["Photorealistic", "Synthwave", "Steampunk", "Low poly"];

/// Style suggestions offered when transforming an existing image.
pub const TRANSFORM_SUGGESTIONS: [&str; 4] =
    ["Cinematic", "3D Render", "Anime", "Vibrant Colors"];

/// A user-facing prompt: a base description plus a creativity level in
/// `0.0..=1.0` that is folded into the final prompt text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImagePrompt {
    pub base_prompt: String,
    pub creativity: f32,
}

impl ImagePrompt {
    pub fn new(base_prompt: impl Into<String>) -> Self {
        ImagePrompt {
            base_prompt: base_prompt.into(),
            creativity: DEFAULT_CREATIVITY,
        }
    }

    pub fn with_creativity(mut self, creativity: f32) -> Self {
        self.creativity = creativity;
        self
    }

    /// Appends a style suggestion to the base prompt, comma-separated.
    pub fn append_suggestion(&mut self, suggestion: &str) {
        if self.base_prompt.is_empty() {
            self.base_prompt = suggestion.to_string();
        } else {
            self.base_prompt = format!("{}, {}", self.base_prompt, suggestion);
        }
    }

    pub fn validate(&self) -> Result<()> {
        // The minimum is counted in characters, not bytes
        if self.base_prompt.trim().chars().count() < MIN_PROMPT_LEN {
            return Err(GeminiError::validation(
                "base_prompt",
                format!("Prompt must be at least {} characters", MIN_PROMPT_LEN),
            ));
        }
        if !(0.0..=1.0).contains(&self.creativity) {
            return Err(GeminiError::validation(
                "creativity",
                format!("creativity must be between 0.0 and 1.0, got {}", self.creativity),
            ));
        }
        Ok(())
    }

    /// The full prompt sent to the model, creativity included.
    pub fn compose(&self) -> String {
        format!(
            "{}, with a creativity level of {:.2}",
            self.base_prompt, self.creativity
        )
    }
}

/// One finished generation, as stored in the gallery.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedImageRecord {
    pub id: Uuid,
    /// Data URI or file URI of the image.
    pub url: String,
    /// The composed prompt the model actually saw.
    pub full_prompt: String,
    /// The base prompt the user typed.
    pub base_prompt: String,
    pub created_at: DateTime<Utc>,
}

impl GeneratedImageRecord {
    fn new(url: String, full_prompt: String, base_prompt: String) -> Self {
        GeneratedImageRecord {
            id: Uuid::new_v4(),
            url,
            full_prompt,
            base_prompt,
            created_at: Utc::now(),
        }
    }
}

/// Session gallery, most recent image first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Gallery {
    images: Vec<GeneratedImageRecord>,
}

impl Gallery {
    pub fn new() -> Self {
        Gallery::default()
    }

    pub fn add(&mut self, record: GeneratedImageRecord) {
        self.images.insert(0, record);
    }

    pub fn iter(&self) -> impl Iterator<Item = &GeneratedImageRecord> {
        self.images.iter()
    }

    pub fn latest(&self) -> Option<&GeneratedImageRecord> {
        self.images.first()
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

/// Runs prompts against a client and collects the results. Failed
/// generations leave the gallery untouched.
pub struct Studio {
    client: GeminiClient,
    gallery: Gallery,
}

impl Studio {
    pub fn new(client: GeminiClient) -> Self {
        Studio {
            client,
            gallery: Gallery::new(),
        }
    }

    pub fn gallery(&self) -> &Gallery {
        &self.gallery
    }

    /// Validates and composes the prompt, generates an image, and
    /// records it in the gallery.
    pub async fn generate(&mut self, prompt: &ImagePrompt) -> Result<GeneratedImageRecord> {
        prompt.validate()?;
        let full_prompt = prompt.compose();

        let response = self
            .client
            .image()
            .text_to_image(TextToImageRequest::new(full_prompt.clone()))
            .await?;

        let record =
            GeneratedImageRecord::new(response.image_url, full_prompt, prompt.base_prompt.clone());
        self.gallery.add(record.clone());
        Ok(record)
    }

    /// Same flow as [`Studio::generate`], applied to a source image.
    pub async fn transform(
        &mut self,
        source: &DataUri,
        prompt: &ImagePrompt,
    ) -> Result<GeneratedImageRecord> {
        prompt.validate()?;
        let full_prompt = prompt.compose();

        let response = self
            .client
            .image()
            .image_to_image(ImageToImageRequest::new(
                source.to_string(),
                full_prompt.clone(),
            ))
            .await?;

        let record = GeneratedImageRecord::new(
            response.transformed_image,
            full_prompt,
            prompt.base_prompt.clone(),
        );
        self.gallery.add(record.clone());
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gemini::transport::stub::{inline_image_response, StubTransport};
    use crate::models::GenerateContentResponse;

    const MODEL: &str = "gemini-2.0-flash-preview-image-generation";

    #[test]
    fn compose_appends_creativity_with_two_decimals() {
        let prompt = ImagePrompt::new("A stunning castle on a floating island, digital art");
        assert_eq!(
            prompt.compose(),
            "A stunning castle on a floating island, digital art, with a creativity level of 0.50"
        );
    }

    #[test]
    fn compose_respects_custom_creativity() {
        let prompt = ImagePrompt::new("a rainy street").with_creativity(0.85);
        assert_eq!(prompt.compose(), "a rainy street, with a creativity level of 0.85");
    }

    #[test]
    fn validate_rejects_short_prompts() {
        let err = ImagePrompt::new("too short").validate().unwrap_err();
        match err {
            GeminiError::ValidationError { field, message } => {
                assert_eq!(field, "base_prompt");
                assert!(message.contains("at least 10 characters"));
            }
            other => panic!("expected ValidationError, got {:?}", other),
        }
    }

    #[test]
    fn validate_accepts_exactly_ten_characters() {
        assert!(ImagePrompt::new("ten chars!").validate().is_ok());
    }

    #[test]
    fn validate_counts_characters_not_bytes() {
        // 4 characters but 12 bytes
        let err = ImagePrompt::new("猫の絵を").validate().unwrap_err();
        assert!(matches!(err, GeminiError::ValidationError { field: "base_prompt", .. }));

        // 12 characters
        assert!(ImagePrompt::new("猫の絵を描いてください！").validate().is_ok());
    }

    #[test]
    fn validate_rejects_out_of_range_creativity() {
        let high = ImagePrompt::new("a perfectly valid prompt").with_creativity(1.5);
        let err = high.validate().unwrap_err();
        assert!(matches!(err, GeminiError::ValidationError { field: "creativity", .. }));

        let low = ImagePrompt::new("a perfectly valid prompt").with_creativity(-0.1);
        assert!(low.validate().is_err());
    }

    #[test]
    fn validate_accepts_creativity_bounds() {
        assert!(ImagePrompt::new("a perfectly valid prompt")
            .with_creativity(0.0)
            .validate()
            .is_ok());
        assert!(ImagePrompt::new("a perfectly valid prompt")
            .with_creativity(1.0)
            .validate()
            .is_ok());
    }

    #[test]
    fn append_suggestion_extends_the_prompt() {
        let mut prompt = ImagePrompt::new("a mountain lake");
        prompt.append_suggestion("Photorealistic");
        assert_eq!(prompt.base_prompt, "a mountain lake, Photorealistic");
    }

    #[test]
    fn append_suggestion_seeds_an_empty_prompt() {
        let mut prompt = ImagePrompt::new("");
        prompt.append_suggestion("Synthwave");
        assert_eq!(prompt.base_prompt, "Synthwave");
    }

    #[test]
    fn gallery_orders_most_recent_first() {
        let mut gallery = Gallery::new();
        gallery.add(GeneratedImageRecord::new(
            "data:image/png;base64,Zmlyc3Q=".to_string(),
            "first prompt".to_string(),
            "first".to_string(),
        ));
        gallery.add(GeneratedImageRecord::new(
            "data:image/png;base64,c2Vjb25k".to_string(),
            "second prompt".to_string(),
            "second".to_string(),
        ));

        assert_eq!(gallery.len(), 2);
        assert_eq!(gallery.latest().unwrap().base_prompt, "second");
        let order: Vec<_> = gallery.iter().map(|r| r.base_prompt.as_str()).collect();
        assert_eq!(order, vec!["second", "first"]);
    }

    #[tokio::test]
    async fn generate_records_the_composed_prompt() {
        let stub = StubTransport::returning(inline_image_response("image/png", "AAAA"));
        let client = GeminiClient::with_transport(stub.clone(), MODEL);
        let mut studio = Studio::new(client);

        let prompt = ImagePrompt::new("A stunning castle on a floating island, digital art");
        let record = studio.generate(&prompt).await.unwrap();

        assert_eq!(record.url, "data:image/png;base64,AAAA");
        assert_eq!(
            record.full_prompt,
            "A stunning castle on a floating island, digital art, with a creativity level of 0.50"
        );
        assert_eq!(
            record.base_prompt,
            "A stunning castle on a floating island, digital art"
        );
        assert_eq!(studio.gallery().len(), 1);
        assert_eq!(studio.gallery().latest().unwrap().id, record.id);
    }

    #[tokio::test]
    async fn transform_sends_the_source_and_records_the_result() {
        let stub = StubTransport::returning(inline_image_response("image/png", "QkJC"));
        let client = GeminiClient::with_transport(stub.clone(), MODEL);
        let mut studio = Studio::new(client);

        let source = DataUri::new("image/jpeg", "QUFB");
        let prompt = ImagePrompt::new("make it look like winter").with_creativity(0.2);
        let record = studio.transform(&source, &prompt).await.unwrap();

        assert_eq!(record.url, "data:image/png;base64,QkJC");
        assert_eq!(
            record.full_prompt,
            "make it look like winter, with a creativity level of 0.20"
        );

        let calls = stub.calls();
        assert_eq!(calls.len(), 1);
        let parts = &calls[0].request.contents[0].parts;
        assert!(parts[0].inline_data.is_some());
        assert_eq!(
            parts[1].text.as_deref(),
            Some("make it look like winter, with a creativity level of 0.20")
        );
    }

    #[tokio::test]
    async fn short_prompt_fails_before_any_call_and_keeps_gallery_empty() {
        let stub = StubTransport::returning(inline_image_response("image/png", "AAAA"));
        let client = GeminiClient::with_transport(stub.clone(), MODEL);
        let mut studio = Studio::new(client);

        let err = studio.generate(&ImagePrompt::new("tiny")).await.unwrap_err();

        assert!(matches!(err, GeminiError::ValidationError { field: "base_prompt", .. }));
        assert_eq!(stub.call_count(), 0);
        assert!(studio.gallery().is_empty());
    }

    #[tokio::test]
    async fn failed_generation_leaves_the_gallery_untouched() {
        let stub = StubTransport::returning(GenerateContentResponse::default());
        let client = GeminiClient::with_transport(stub, MODEL);
        let mut studio = Studio::new(client);

        let err = studio
            .generate(&ImagePrompt::new("a prompt long enough to pass"))
            .await
            .unwrap_err();

        assert!(matches!(err, GeminiError::GenerationFailed(_)));
        assert!(studio.gallery().is_empty());
    }
}
