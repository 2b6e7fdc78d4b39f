use crate::{
    completion_api::{
        ChatCompletion, ChatCompletionCreateParams, ChatCompletionMessageParam,
        ChatCompletionTextMessageParam,
    },
    CompletionError, CompletionResult,
};
use portfolio_content::client_utils;
use reqwest::{
    header::{self, HeaderMap, HeaderName, HeaderValue},
    Client,
};
use std::collections::HashMap;

const PROVIDER: &str = "openai";

pub const DEFAULT_CHAT_MODEL: &str = "gpt-3.5-turbo";

/// Sampling parameters for one completion request.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionParams {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f64,
    pub presence_penalty: f64,
    pub frequency_penalty: f64,
}

impl Default for CompletionParams {
    fn default() -> Self {
        Self {
            model: DEFAULT_CHAT_MODEL.to_string(),
            max_tokens: 600,
            temperature: 0.7,
            presence_penalty: 0.3,
            frequency_penalty: 0.3,
        }
    }
}

/// Who authored one turn handed to the completion API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionRole {
    System,
    User,
    Assistant,
}

/// One turn handed to the completion API.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionTurn {
    pub role: CompletionRole,
    pub content: String,
}

impl CompletionTurn {
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: CompletionRole::System,
            content: content.into(),
        }
    }

    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: CompletionRole::User,
            content: content.into(),
        }
    }

    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: CompletionRole::Assistant,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub params: CompletionParams,
    pub turns: Vec<CompletionTurn>,
}

/// A chat completion provider. One attempt per call; retry policy and
/// fallback belong to the caller.
#[async_trait::async_trait]
pub trait CompletionModel: Send + Sync {
    fn provider(&self) -> &'static str;
    /// Generate the assistant's reply to the supplied turns. The returned
    /// text is trimmed.
    async fn complete(&self, request: CompletionRequest) -> CompletionResult<String>;
}

/// Client for an OpenAI-compatible chat completions endpoint.
pub struct OpenAICompatModel {
    api_key: String,
    base_url: String,
    client: Client,
    headers: HashMap<String, String>,
}

#[derive(Clone, Default)]
pub struct OpenAICompatModelOptions {
    pub api_key: String,
    pub base_url: Option<String>,
    pub headers: Option<HashMap<String, String>>,
    pub client: Option<Client>,
}

impl OpenAICompatModel {
    #[must_use]
    pub fn new(options: OpenAICompatModelOptions) -> Self {
        let OpenAICompatModelOptions {
            api_key,
            base_url,
            headers,
            client,
        } = options;

        let base_url = base_url
            .unwrap_or_else(|| "https://api.openai.com/v1".to_string())
            .trim_end_matches('/')
            .to_string();
        let client = client.unwrap_or_else(Client::new);
        let headers = headers.unwrap_or_default();

        Self {
            api_key,
            base_url,
            client,
            headers,
        }
    }

    fn request_headers(&self) -> CompletionResult<HeaderMap> {
        let mut headers = HeaderMap::new();

        let auth_header =
            HeaderValue::from_str(&format!("Bearer {}", self.api_key)).map_err(|error| {
                CompletionError::InvalidInput(format!("Invalid API key header value: {error}"))
            })?;
        headers.insert(header::AUTHORIZATION, auth_header);

        for (key, value) in &self.headers {
            let header_name = HeaderName::from_bytes(key.as_bytes()).map_err(|error| {
                CompletionError::InvalidInput(format!("Invalid header name '{key}': {error}"))
            })?;
            let header_value = HeaderValue::from_str(value).map_err(|error| {
                CompletionError::InvalidInput(format!("Invalid header value for '{key}': {error}"))
            })?;
            headers.insert(header_name, header_value);
        }

        Ok(headers)
    }
}

fn convert_to_create_params(request: CompletionRequest) -> ChatCompletionCreateParams {
    let CompletionRequest { params, turns } = request;
    ChatCompletionCreateParams {
        messages: turns
            .into_iter()
            .map(|turn| {
                let message = ChatCompletionTextMessageParam {
                    content: turn.content,
                };
                match turn.role {
                    CompletionRole::System => ChatCompletionMessageParam::System(message),
                    CompletionRole::User => ChatCompletionMessageParam::User(message),
                    CompletionRole::Assistant => ChatCompletionMessageParam::Assistant(message),
                }
            })
            .collect(),
        model: params.model,
        frequency_penalty: Some(params.frequency_penalty),
        max_tokens: Some(params.max_tokens),
        presence_penalty: Some(params.presence_penalty),
        temperature: Some(params.temperature),
    }
}

#[async_trait::async_trait]
impl CompletionModel for OpenAICompatModel {
    fn provider(&self) -> &'static str {
        PROVIDER
    }

    async fn complete(&self, request: CompletionRequest) -> CompletionResult<String> {
        let body = convert_to_create_params(request);
        let headers = self.request_headers()?;

        let response: ChatCompletion = client_utils::post_json(
            &self.client,
            &format!("{}/chat/completions", self.base_url),
            &body,
            headers,
        )
        .await
        .map_err(CompletionError::from)?;

        let choice = response.choices.into_iter().next().ok_or_else(|| {
            CompletionError::Invariant(PROVIDER, "No choices in response".to_string())
        })?;

        if let Some(refusal) = &choice.message.refusal {
            if !refusal.is_empty() {
                return Err(CompletionError::Refusal(refusal.clone()));
            }
        }

        let content = choice.message.content.ok_or_else(|| {
            CompletionError::Invariant(PROVIDER, "No content in response message".to_string())
        })?;

        Ok(content.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_params_carry_roles_and_sampling() {
        let request = CompletionRequest {
            params: CompletionParams::default(),
            turns: vec![
                CompletionTurn::system("context"),
                CompletionTurn::user("hello"),
                CompletionTurn::assistant("hi"),
            ],
        };
        let body = convert_to_create_params(request);
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["model"], DEFAULT_CHAT_MODEL);
        assert_eq!(json["max_tokens"], 600);
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["role"], "user");
        assert_eq!(json["messages"][2]["role"], "assistant");
        assert_eq!(json["messages"][1]["content"], "hello");
    }
}
