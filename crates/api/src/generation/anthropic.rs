//! [`TextGenerator`] implementation backed by the Anthropic Messages API.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;
use jobtrail_core::error::CoreError;
use jobtrail_core::generation::{build_ideas_prompt, build_post_prompt, extract_json_array,
    PostIdeaDraft};

use crate::config::AnthropicConfig;
use crate::generation::{PostRequest, TextGenerator};

const MESSAGES_URL: &str = "https://api.anthropic.com/v1/messages";
const API_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 1024;

/// HTTP client for the Anthropic Messages API.
pub struct AnthropicGenerator {
    client: reqwest::Client,
    config: AnthropicConfig,
}

#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: String,
}

impl AnthropicGenerator {
    pub fn new(config: AnthropicConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Send one prompt and return the concatenated text blocks.
    async fn complete(&self, prompt: &str) -> Result<String, CoreError> {
        let body = json!({
            "model": self.config.model,
            "max_tokens": MAX_TOKENS,
            "messages": [{ "role": "user", "content": prompt }],
        });

        let response = self
            .client
            .post(MESSAGES_URL)
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| CoreError::external(format!("Request failed: {e}")))?;

        match response.status() {
            StatusCode::OK => {}
            StatusCode::TOO_MANY_REQUESTS => {
                return Err(CoreError::rate_limited(
                    "Text generation provider rate limit exceeded",
                ));
            }
            StatusCode::UNAUTHORIZED => {
                return Err(CoreError::auth_misconfigured(
                    "Text generation API key was rejected",
                ));
            }
            status => {
                return Err(CoreError::external(format!(
                    "Text generation provider returned {status}"
                )));
            }
        }

        let parsed: MessagesResponse = response
            .json()
            .await
            .map_err(|e| CoreError::external(format!("Malformed provider response: {e}")))?;

        let text: String = parsed
            .content
            .into_iter()
            .map(|block| block.text)
            .collect();
        if text.is_empty() {
            return Err(CoreError::external("Provider returned no text content"));
        }
        Ok(text)
    }
}

#[async_trait]
impl TextGenerator for AnthropicGenerator {
    async fn generate_post(&self, request: &PostRequest<'_>) -> Result<String, CoreError> {
        let prompt = build_post_prompt(
            request.topic,
            request.description,
            request.skills,
            request.tone,
            request.max_words,
        );
        let text = self.complete(&prompt).await?;
        Ok(text.trim().to_string())
    }

    async fn generate_ideas(
        &self,
        skills: &[String],
        count: u32,
    ) -> Result<Vec<PostIdeaDraft>, CoreError> {
        let prompt = build_ideas_prompt(skills, count);
        let text = self.complete(&prompt).await?;

        // The model may wrap the array in prose despite the instructions.
        let array = extract_json_array(&text)
            .ok_or_else(|| CoreError::external("Provider response contained no JSON array"))?;
        let ideas: Vec<PostIdeaDraft> = serde_json::from_str(array)
            .map_err(|e| CoreError::external(format!("Provider returned invalid ideas: {e}")))?;

        if ideas.is_empty() {
            return Err(CoreError::external("Provider returned an empty idea list"));
        }
        Ok(ideas)
    }
}
