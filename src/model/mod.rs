use anyhow::Result;
use async_trait::async_trait;
use log::{debug, info};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::config::LlmSettings;

/// A fallible, non-deterministic function from prompt to text.
#[async_trait]
pub trait TextModel: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String>;
}

#[derive(Debug, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "user")]
    User,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

// A wrapper for an OpenAI-compatible chat completion server
pub struct ChatCompletionModel {
    settings: LlmSettings,
    client: Client,
}

impl ChatCompletionModel {
    pub fn new(settings: LlmSettings) -> Result<Self> {
        info!("Using completion server at: {}", settings.server_url);

        let client = Client::builder().timeout(settings.timeout).build()?;

        Ok(Self { settings, client })
    }

    fn max_tokens(&self) -> usize {
        // Some servers reject budgets outside this range regardless of what we send
        let requested = self.settings.max_tokens;
        if requested < 100 {
            info!("Increasing max_tokens from {} to minimum of 100", requested);
            100
        } else if requested > 4096 {
            info!("Capping max_tokens from {} to maximum of 4096", requested);
            4096
        } else {
            requested
        }
    }
}

#[async_trait]
impl TextModel for ChatCompletionModel {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let max_tokens = self.max_tokens();
        debug!("Prompt: {}", prompt);

        let url = format!("{}/v1/chat/completions", self.settings.server_url);

        let messages = vec![Message {
            role: Role::User,
            content: prompt.to_string(),
        }];

        let payload = json!({
            "model": self.settings.model,
            "messages": messages,
            "temperature": self.settings.temperature,
            "top_p": self.settings.top_p,
            "max_tokens": max_tokens
        });

        info!("Sending completion request with max_tokens: {}", max_tokens);
        debug!("Payload: {}", payload);

        let mut request = self.client.post(&url).json(&payload);
        if let Some(key) = &self.settings.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;
            return Err(anyhow::anyhow!(
                "API request failed ({}): {}",
                status,
                error_text
            ));
        }

        let response_json: Value = response.json().await?;
        debug!("Response JSON: {}", response_json);

        let content = extract_content(&response_json)
            .ok_or_else(|| anyhow::anyhow!("Failed to extract content from response"))?;

        info!("Response length: {} characters", content.len());
        Ok(content.to_string())
    }
}

fn extract_content(response: &Value) -> Option<&str> {
    response
        .get("choices")
        .and_then(|choices| choices.get(0))
        .and_then(|choice| choice.get("message"))
        .and_then(|message| message.get("content"))
        .and_then(|content| content.as_str())
}
