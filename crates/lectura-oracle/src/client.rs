//! OpenAI-compatible chat client for judgement requests.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;

/// Chat completions client.
///
/// Talks to any OpenAI-compatible endpoint; the curation prompts always
/// request a JSON object response at temperature zero.
#[derive(Debug, Clone)]
pub struct ChatClient {
    api_key: String,
    http_client: reqwest::Client,
    base_url: String,
}

/// Chat API request
#[derive(Debug, Clone, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<Message>,
    max_tokens: usize,
    temperature: f32,
    response_format: ResponseFormat,
}

/// Response format specification
#[derive(Debug, Clone, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: String,
}

/// Chat message
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Message {
    role: String,
    content: String,
}

/// Chat API response
#[derive(Debug, Clone, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

/// Response choice
#[derive(Debug, Clone, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

/// Response message
#[derive(Debug, Clone, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

impl ChatClient {
    /// Create a new chat client.
    ///
    /// Reads the API key from `OPENAI_API_KEY` and the endpoint from
    /// `OPENAI_API_BASE` (defaulting to the public API).
    ///
    /// # Errors
    /// Returns an error if `OPENAI_API_KEY` is not set or HTTP client
    /// creation fails.
    #[must_use = "creating a client that is not used is a waste of resources"]
    pub fn new() -> Result<Self> {
        let api_key =
            env::var("OPENAI_API_KEY").context("OPENAI_API_KEY environment variable not set")?;

        let http_client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .context("Failed to create HTTP client")?;

        let base_url =
            env::var("OPENAI_API_BASE").unwrap_or_else(|_| "https://api.openai.com/v1".to_string());

        Ok(Self {
            api_key,
            http_client,
            base_url,
        })
    }

    /// Send a chat completion request and return the raw message content.
    ///
    /// # Errors
    /// Returns an error if the API request fails, the response is not
    /// valid JSON, or it carries no content.
    #[must_use = "this function returns an API response that should be processed"]
    pub async fn chat_completion(
        &self,
        model: &str,
        system: &str,
        prompt: &str,
        max_tokens: usize,
    ) -> Result<String> {
        let request = ChatRequest {
            model: model.to_string(),
            messages: vec![
                Message {
                    role: "system".to_string(),
                    content: system.to_string(),
                },
                Message {
                    role: "user".to_string(),
                    content: prompt.to_string(),
                },
            ],
            max_tokens,
            temperature: 0.0, // deterministic judgements
            response_format: ResponseFormat {
                format_type: "json_object".to_string(),
            },
        };

        let response = self
            .http_client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .context("Failed to send chat API request")?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .context("Failed to read chat API response")?;

        if !status.is_success() {
            anyhow::bail!("Chat API request failed with status {status}: {response_text}");
        }

        let chat_response: ChatResponse =
            serde_json::from_str(&response_text).context("Failed to parse chat API response")?;

        let message_content = chat_response
            .choices
            .first()
            .context("No choices in chat response")?
            .message
            .content
            .clone()
            .context("No content in chat response")?;

        Ok(message_content)
    }
}
