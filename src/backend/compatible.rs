//! OpenAI-compatible chat-completions backend.
//!
//! Most hosted LLM APIs speak the same `/chat/completions` wire format;
//! Groq (the default here), OpenAI, Mistral and many gateways are all
//! reachable through this one implementation.

use super::scrub::sanitize_api_error;
use super::traits::TextBackend;
use super::types::{ChatMessage, ChatRole};
use crate::error::BackendError;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub struct OpenAiCompatibleBackend {
    name: String,
    /// Pre-computed `"Bearer <key>"` header value (avoids `format!` per request).
    cached_auth_header: Option<String>,
    /// Pre-computed chat completions URL (avoids `format!` per request).
    cached_chat_url: String,
    timeout_secs: u64,
    client: Client,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    temperature: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

fn role_str(role: ChatRole) -> &'static str {
    match role {
        ChatRole::System => "system",
        ChatRole::User => "user",
        ChatRole::Assistant => "assistant",
    }
}

impl OpenAiCompatibleBackend {
    pub fn new(name: &str, base_url: &str, api_key: Option<&str>, timeout: Duration) -> Self {
        let base_url = base_url.trim_end_matches('/');
        let cached_chat_url = if base_url.ends_with("chat/completions") {
            base_url.to_string()
        } else {
            format!("{base_url}/chat/completions")
        };

        Self {
            name: name.to_string(),
            cached_auth_header: api_key.map(|k| format!("Bearer {k}")),
            cached_chat_url,
            timeout_secs: timeout.as_secs(),
            client: Client::builder()
                .timeout(timeout)
                .connect_timeout(Duration::from_secs(10))
                .build()
                .unwrap_or_else(|_| Client::new()),
        }
    }

    fn build_request<'a>(
        messages: &'a [ChatMessage],
        model: &'a str,
        temperature: f64,
        max_tokens: Option<u32>,
    ) -> ChatRequest<'a> {
        ChatRequest {
            model,
            messages: messages
                .iter()
                .map(|m| WireMessage {
                    role: role_str(m.role),
                    content: &m.content,
                })
                .collect(),
            temperature,
            max_tokens,
        }
    }

    fn transport_error(&self, err: &reqwest::Error) -> BackendError {
        if err.is_timeout() {
            BackendError::Timeout {
                backend: self.name.clone(),
                secs: self.timeout_secs,
            }
        } else {
            BackendError::Request {
                backend: self.name.clone(),
                message: sanitize_api_error(&err.to_string()),
            }
        }
    }
}

#[async_trait]
impl TextBackend for OpenAiCompatibleBackend {
    fn name(&self) -> &str {
        &self.name
    }

    async fn generate(
        &self,
        messages: &[ChatMessage],
        model: &str,
        temperature: f64,
        max_tokens: Option<u32>,
    ) -> Result<String, BackendError> {
        let Some(auth_header) = self.cached_auth_header.as_ref() else {
            return Err(BackendError::Auth {
                backend: self.name.clone(),
            });
        };

        let request = Self::build_request(messages, model, temperature, max_tokens);

        let response = self
            .client
            .post(&self.cached_chat_url)
            .header("Authorization", auth_header)
            .json(&request)
            .send()
            .await
            .map_err(|e| self.transport_error(&e))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(BackendError::Auth {
                backend: self.name.clone(),
            });
        }
        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after_secs = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok())
                .unwrap_or(0);
            return Err(BackendError::RateLimited {
                backend: self.name.clone(),
                retry_after_secs,
            });
        }
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<failed to read backend error body>".to_string());
            return Err(BackendError::Api {
                backend: self.name.clone(),
                status: status.as_u16(),
                message: sanitize_api_error(&body),
            });
        }

        let chat: ChatResponse = response.json().await.map_err(|e| BackendError::Request {
            backend: self.name.clone(),
            message: format!("response JSON decode failed: {e}"),
        })?;

        chat.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| BackendError::NoContent {
                backend: self.name.clone(),
            })
    }
}
