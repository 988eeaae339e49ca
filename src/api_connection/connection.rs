use dotenv::dotenv;
use reqwest::Client;
use std::env;
use std::error::Error;
use std::fmt;

use super::endpoints::{ChatCompletionRequest, ChatCompletionResponse, Provider, GROQ_API_BASE};

#[derive(Debug)]
pub enum ApiConnectionError {
    MissingApiKey(String),
    InvalidRequest(String),
    NetworkError(reqwest::Error),
    SerializationError(serde_json::Error),
    ApiError {
        status: reqwest::StatusCode,
        error_body: String,
    },
    EmptyResponse,
}

impl fmt::Display for ApiConnectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiConnectionError::MissingApiKey(key_name) => {
                write!(f, "API key not found in environment: {}", key_name)
            }
            ApiConnectionError::InvalidRequest(reason) => write!(f, "Invalid request: {}", reason),
            ApiConnectionError::NetworkError(err) => write!(f, "Network error: {}", err),
            ApiConnectionError::SerializationError(err) => {
                write!(f, "Serialization error: {}", err)
            }
            ApiConnectionError::ApiError { status, error_body } => {
                write!(f, "API error {}: {}", status, error_body)
            }
            ApiConnectionError::EmptyResponse => write!(f, "API returned no menu content"),
        }
    }
}

impl Error for ApiConnectionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ApiConnectionError::NetworkError(err) => Some(err),
            ApiConnectionError::SerializationError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiConnectionError {
    fn from(err: reqwest::Error) -> Self {
        ApiConnectionError::NetworkError(err)
    }
}

impl From<serde_json::Error> for ApiConnectionError {
    fn from(err: serde_json::Error) -> Self {
        ApiConnectionError::SerializationError(err)
    }
}

/// Removes a single wrapping markdown code fence (```` ```markdown ````, ```` ```md ```` or bare ```` ``` ````).
pub fn strip_code_fences(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(inner) = trimmed
        .strip_prefix("```")
        .and_then(|rest| rest.strip_suffix("```"))
    else {
        return trimmed;
    };
    // Drop the info string on the opening line, if any.
    match inner.split_once('\n') {
        Some((info, body)) if !info.trim().contains(' ') => body.trim(),
        _ => inner.trim(),
    }
}

impl ChatCompletionResponse {
    /// Text of the first choice, with any wrapping code fence removed.
    pub fn first_content(&self) -> Result<&str, ApiConnectionError> {
        let content = self
            .choices
            .first()
            .and_then(|choice| choice.message.content.as_deref())
            .map(strip_code_fences)
            .unwrap_or_default();
        if content.is_empty() {
            return Err(ApiConnectionError::EmptyResponse);
        }
        Ok(content)
    }
}

impl Provider {
    pub fn groq(api_key_env_var_name: &str) -> Self {
        dotenv().ok();
        Self::Groq {
            api_key: api_key_env_var_name.to_string(),
            base_url: GROQ_API_BASE.to_string(),
        }
    }

    /// Points the provider at another OpenAI-compatible host (e.g. a local mock server).
    pub fn with_base_url(self, url: impl Into<String>) -> Self {
        match self {
            Provider::Groq { api_key, .. } => Provider::Groq {
                api_key,
                base_url: url.into(),
            },
        }
    }

    pub async fn call_chat_completion(
        &self,
        request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, ApiConnectionError> {
        let has_prompt = request
            .messages
            .iter()
            .any(|m| m.role == "user" && !m.content.trim().is_empty());
        if !has_prompt {
            return Err(ApiConnectionError::InvalidRequest(
                "Prompt is required".to_string(),
            ));
        }

        match self {
            Provider::Groq {
                api_key: api_key_env_var_name,
                base_url,
            } => {
                dotenv().ok();
                let actual_api_key = env::var(api_key_env_var_name)
                    .map_err(|_| ApiConnectionError::MissingApiKey(api_key_env_var_name.clone()))?;

                let client = Client::new();
                let url = format!("{}/chat/completions", base_url.trim_end_matches('/'));
                tracing::debug!(%url, model = %request.model, "sending chat completion request");

                let response = client
                    .post(&url)
                    .bearer_auth(actual_api_key)
                    .header("Content-Type", "application/json")
                    .json(&request)
                    .send()
                    .await?;

                if response.status().is_success() {
                    let chat_response = response.json::<ChatCompletionResponse>().await?;
                    if let Some(usage) = &chat_response.usage {
                        tracing::debug!(total_tokens = usage.total_tokens, "chat completion finished");
                    }
                    Ok(chat_response)
                } else {
                    let status = response.status();
                    let error_body = response
                        .text()
                        .await
                        .unwrap_or_else(|_| "Failed to read error body".to_string());
                    tracing::warn!(%status, "chat completion request rejected");
                    Err(ApiConnectionError::ApiError { status, error_body })
                }
            }
        }
    }
}
