use async_trait::async_trait;
use log::error;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::errors::ProviderError;
use crate::providers::{Provider, TranslationRequest, clean_completion};

/// OpenAI client for interacting with the chat completions API
#[derive(Debug)]
pub struct OpenAI {
    /// HTTP client for API requests
    client: Client,
    /// API key for authentication
    api_key: String,
    /// API endpoint URL (optional, defaults to public API)
    endpoint: String,
    /// Model name
    model: String,
}

/// OpenAI chat completion request
#[derive(Debug, Serialize)]
pub struct OpenAIRequest {
    /// The model to use
    model: String,

    /// The messages for the conversation
    messages: Vec<OpenAIMessage>,

    /// Temperature for generation
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

/// OpenAI message format
#[derive(Debug, Serialize, Deserialize)]
pub struct OpenAIMessage {
    /// Role of the message sender (system, user, assistant)
    pub role: String,

    /// Content of the message
    #[serde(default)]
    pub content: Option<String>,
}

/// OpenAI response
#[derive(Debug, Deserialize)]
pub struct OpenAIResponse {
    /// Completion choices
    #[serde(default)]
    pub choices: Vec<OpenAIChoice>,
}

/// Individual choice in an OpenAI response
#[derive(Debug, Deserialize)]
pub struct OpenAIChoice {
    pub message: OpenAIMessage,
}

impl OpenAIRequest {
    /// Create a new OpenAI request
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            messages: Vec::new(),
            temperature: None,
        }
    }

    /// Add a message to the request
    pub fn add_message(mut self, role: impl Into<String>, content: impl Into<String>) -> Self {
        self.messages.push(OpenAIMessage {
            role: role.into(),
            content: Some(content.into()),
        });
        self
    }

    /// Set the temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

impl OpenAI {
    /// Create a new OpenAI client
    pub fn new(
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            endpoint: endpoint.into(),
            model: model.into(),
        }
    }

    fn api_url(&self) -> String {
        if self.endpoint.is_empty() {
            "https://api.openai.com/v1/chat/completions".to_string()
        } else {
            format!("{}/chat/completions", self.endpoint.trim_end_matches('/'))
        }
    }

    /// Send a chat completion request
    pub async fn send(&self, request: &OpenAIRequest) -> Result<OpenAIResponse, ProviderError> {
        let response = self
            .client
            .post(self.api_url())
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("OpenAI API error ({}): {}", status, message);
            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    ProviderError::AuthenticationError(message)
                }
                _ => ProviderError::ApiError {
                    status_code: status.as_u16(),
                    message,
                },
            });
        }

        response
            .json::<OpenAIResponse>()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))
    }

    /// Extract text from an OpenAI response
    pub fn extract_text(response: &OpenAIResponse) -> Option<String> {
        response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
    }
}

#[async_trait]
impl Provider for OpenAI {
    fn name(&self) -> &str {
        "openai"
    }

    async fn complete(&self, request: &TranslationRequest) -> Result<String, ProviderError> {
        let chat = OpenAIRequest::new(&self.model)
            .add_message("system", request.system_prompt())
            .add_message("user", &request.text)
            .temperature(request.temperature);

        let response = self.send(&chat).await?;
        let text = Self::extract_text(&response).ok_or(ProviderError::EmptyResponse)?;
        let cleaned = clean_completion(&request.text, &text);
        if cleaned.is_empty() {
            return Err(ProviderError::EmptyResponse);
        }
        Ok(cleaned)
    }
}
