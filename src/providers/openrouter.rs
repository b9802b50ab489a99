use reqwest::Client;
use serde_json::json;
use std::time::Duration;
use thiserror::Error;

const OPENROUTER_API_URL: &str = "https://openrouter.ai/api/v1/chat/completions";
const MODEL: &str = "google/gemma-2-9b-it:free";

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("API error: {0}")]
    Api(String),
    #[error("Response carried no message content")]
    MissingContent,
}

/// OpenRouter chat-completion client backing the Q&A endpoint.
pub struct OpenRouterClient {
    client: Client,
    api_key: String,
}

impl OpenRouterClient {
    pub fn new(api_key: String) -> Result<Self, ChatError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| ChatError::Network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, api_key })
    }

    /// Send one system+user prompt pair and return the assistant's reply.
    ///
    /// Single attempt; the caller converts any failure into a generic
    /// "temporarily unavailable" answer.
    pub async fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<String, ChatError> {
        let payload = json!({
            "model": MODEL,
            "messages": [
                { "role": "system", "content": system_prompt },
                { "role": "user", "content": user_prompt },
            ],
            "temperature": 0.3,
            "max_tokens": 150,
        });

        let response = self
            .client
            .post(OPENROUTER_API_URL)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| ChatError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ChatError::Api(format!(
                "HTTP {}: {}",
                status.as_u16(),
                &body[..body.len().min(500)]
            )));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ChatError::Network(e.to_string()))?;

        body.get("choices")
            .and_then(|c| c.get(0))
            .and_then(|c| c.get("message"))
            .and_then(|m| m.get("content"))
            .and_then(|v| v.as_str())
            .map(|s| s.trim().to_string())
            .ok_or(ChatError::MissingContent)
    }
}
