//! Request and response shapes for the `generateContent` endpoint.

use serde::{Deserialize, Serialize};

use crate::media::DataUri;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Modality {
    Text,
    Image,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    #[serde(rename = "responseModalities")]
    pub response_modalities: Vec<Modality>,
}

impl GenerationConfig {
    /// The image preview models reject image-only requests; TEXT must
    /// accompany IMAGE in the requested modalities.
    pub fn text_and_image() -> Self {
        GenerationConfig {
            response_modalities: vec![Modality::Text, Modality::Image],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InlineData {
    #[serde(rename = "mimeType")]
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileData {
    #[serde(rename = "fileUri")]
    pub file_uri: String,
    #[serde(rename = "mimeType", default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

/// One part of a content turn. Exactly one variant field is set per part;
/// unknown part kinds in responses deserialize with all fields `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(rename = "inlineData", default, skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
    #[serde(rename = "fileData", default, skip_serializing_if = "Option::is_none")]
    pub file_data: Option<FileData>,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Part {
            text: Some(text.into()),
            ..Part::default()
        }
    }

    pub fn inline_image(image: &DataUri) -> Self {
        Part {
            inline_data: Some(InlineData {
                mime_type: image.mime_type.clone(),
                data: image.data.clone(),
            }),
            ..Part::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub role: String,
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    pub fn user(parts: Vec<Part>) -> Self {
        Content {
            role: "user".to_string(),
            parts,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    pub generation_config: GenerationConfig,
}

impl GenerateContentRequest {
    pub fn text_to_image(prompt: impl Into<String>) -> Self {
        GenerateContentRequest {
            contents: vec![Content::user(vec![Part::text(prompt)])],
            generation_config: GenerationConfig::text_and_image(),
        }
    }

    /// The source image leads and the instruction follows; the preview
    /// models key the edit on whichever image precedes the text.
    pub fn image_to_image(source: &DataUri, prompt: impl Into<String>) -> Self {
        GenerateContentRequest {
            contents: vec![Content::user(vec![
                Part::inline_image(source),
                Part::text(prompt),
            ])],
            generation_config: GenerationConfig::text_and_image(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(rename = "finishReason", default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PromptFeedback {
    #[serde(rename = "blockReason", default, skip_serializing_if = "Option::is_none")]
    pub block_reason: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(rename = "promptFeedback", default, skip_serializing_if = "Option::is_none")]
    pub prompt_feedback: Option<PromptFeedback>,
}

impl GenerateContentResponse {
    /// Walks every candidate part and returns the first usable image, as
    /// a data URI for inline payloads or the raw URI for file references.
    /// Parts with empty data are skipped.
    pub fn first_image_reference(&self) -> Option<String> {
        for candidate in &self.candidates {
            let content = match &candidate.content {
                Some(content) => content,
                None => continue,
            };
            for part in &content.parts {
                if let Some(inline) = &part.inline_data {
                    if !inline.data.is_empty() {
                        return Some(
                            DataUri::new(inline.mime_type.clone(), inline.data.clone()).to_string(),
                        );
                    }
                }
                if let Some(file) = &part.file_data {
                    if !file.file_uri.is_empty() {
                        return Some(file.file_uri.clone());
                    }
                }
            }
        }
        None
    }
}
