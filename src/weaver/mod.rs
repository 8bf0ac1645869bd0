//! Story generation and translation on top of a [`TextModel`].
//!
//! Each call makes exactly one model request. Nothing is cached or retried;
//! any failure, including a reply with no usable text, is reported as
//! [`WeaverError::RequestFailed`].

pub mod language;
pub mod prompts;
pub mod state;

use log::{debug, error, info};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

use crate::model::TextModel;

pub const EMPTY_STORY_MESSAGE: &str =
    "The AI couldn't weave a story this time. Try a different word!";
pub const EMPTY_TRANSLATION_MESSAGE: &str =
    "The AI couldn't translate the story this time. Try again or a different language.";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WeaverError {
    #[error("{0}")]
    RequestFailed(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryRequest {
    pub input_word: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoryResponse {
    pub story: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationRequest {
    pub text_to_translate: String,
    pub target_language: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationResponse {
    pub translated_text: String,
}

#[derive(Clone)]
pub struct StoryWeaver {
    model: Arc<dyn TextModel>,
}

impl StoryWeaver {
    pub fn new(model: Arc<dyn TextModel>) -> Self {
        Self { model }
    }

    pub async fn generate_story(&self, request: &StoryRequest) -> Result<StoryResponse, WeaverError> {
        info!("Generating story for: {}", request.input_word);
        let prompt = prompts::story_prompt(&request.input_word);

        let story = self
            .ask(&prompt, prompts::STORY_FIELD)
            .await
            .map_err(|e| {
                error!("Error generating story: {:#}", e);
                WeaverError::RequestFailed(format!("Failed to generate story: {}", e))
            })?
            .ok_or_else(|| WeaverError::RequestFailed(EMPTY_STORY_MESSAGE.to_string()))?;

        Ok(StoryResponse { story })
    }

    /// The target language is passed through as given; the offered list is a page affordance.
    pub async fn translate_story(
        &self,
        request: &TranslationRequest,
    ) -> Result<TranslationResponse, WeaverError> {
        info!("Translating story to {}", request.target_language);
        let prompt = prompts::translation_prompt(&request.text_to_translate, &request.target_language);

        let translated_text = self
            .ask(&prompt, prompts::TRANSLATION_FIELD)
            .await
            .map_err(|e| {
                error!("Error translating story: {:#}", e);
                WeaverError::RequestFailed(format!("Failed to translate story: {}", e))
            })?
            .ok_or_else(|| WeaverError::RequestFailed(EMPTY_TRANSLATION_MESSAGE.to_string()))?;

        Ok(TranslationResponse { translated_text })
    }

    // Ok(None) means the model answered but said nothing usable
    async fn ask(&self, prompt: &str, field: &str) -> anyhow::Result<Option<String>> {
        let reply = self.model.complete(prompt).await?;
        debug!("Raw model reply: {}", reply);
        Ok(structured_output(&reply, field))
    }
}

/// Pulls the requested field out of a JSON reply, or takes the reply as plain text.
/// A JSON object without a string in that field is not usable output.
pub fn structured_output(reply: &str, field: &str) -> Option<String> {
    let body = strip_code_fence(reply.trim());

    let text = match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(map)) => match map.get(field) {
            Some(Value::String(s)) => s.trim().to_string(),
            _ => return None,
        },
        Ok(Value::String(s)) => s.trim().to_string(),
        _ => body.to_string(),
    };

    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let Some(inner) = rest.strip_suffix("```") else {
        return text;
    };
    // drop the language tag line, e.g. ```json
    match inner.split_once('\n') {
        Some((_, body)) => body.trim(),
        None => inner.trim(),
    }
}
