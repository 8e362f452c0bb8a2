//! OpenAI-compatible chat-completions provider
//!
//! Serves both OpenAI and OpenRouter, which share the
//! `POST {api_base}/chat/completions` wire format with bearer auth.

use crate::agent_mode::AgentMode;
use crate::config::{OpenAiConfig, OpenRouterConfig};
use crate::error::{Result, ThinkloopError};
use crate::prompts::build_system_prompt;
use crate::providers::base::{Message, Provider, Role};
use crate::tools::ToolDescriptor;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Connection settings for one OpenAI-compatible endpoint
#[derive(Debug, Clone)]
pub struct OpenAiCompatibleSettings {
    /// Backend name used in logs and errors
    pub label: String,
    /// API base URL without the `/chat/completions` suffix
    pub api_base: String,
    /// Bearer token
    pub api_key: String,
    /// Model name
    pub model: String,
    /// Completion token cap
    pub max_tokens: u32,
    /// Extra headers sent with each request
    pub extra_headers: Vec<(String, String)>,
}

impl OpenAiCompatibleSettings {
    /// Settings for the OpenAI API
    pub fn openai(config: &OpenAiConfig, api_key: String, model_override: Option<&str>) -> Self {
        Self {
            label: "openai".to_string(),
            api_base: config.api_base.clone(),
            api_key,
            model: model_override.unwrap_or(&config.model).to_string(),
            max_tokens: config.max_tokens,
            extra_headers: Vec::new(),
        }
    }

    /// Settings for the OpenRouter gateway
    pub fn openrouter(
        config: &OpenRouterConfig,
        api_key: String,
        model_override: Option<&str>,
    ) -> Self {
        Self {
            label: "openrouter".to_string(),
            api_base: config.api_base.clone(),
            api_key,
            model: model_override.unwrap_or(&config.model).to_string(),
            max_tokens: config.max_tokens,
            extra_headers: vec![("X-Title".to_string(), "thinkloop".to_string())],
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    max_tokens: u32,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: Role,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

/// Provider for OpenAI-compatible endpoints
///
/// # Examples
///
/// ```
/// use thinkloop::config::OpenAiConfig;
/// use thinkloop::providers::{OpenAiCompatibleProvider, OpenAiCompatibleSettings, Provider};
/// use std::time::Duration;
///
/// let settings = OpenAiCompatibleSettings::openai(&OpenAiConfig::default(), "sk-test".to_string(), None);
/// let provider = OpenAiCompatibleProvider::new(settings, Duration::from_secs(30)).unwrap();
/// assert_eq!(provider.name(), "openai");
/// assert_eq!(provider.model(), "gpt-4.1-nano");
/// ```
#[derive(Debug, Clone)]
pub struct OpenAiCompatibleProvider {
    client: Client,
    settings: OpenAiCompatibleSettings,
}

impl OpenAiCompatibleProvider {
    /// Create a provider with its own HTTP client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(settings: OpenAiCompatibleSettings, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ThinkloopError::Http)?;
        tracing::info!(
            "Initialized {} provider: model={}, base={}",
            settings.label,
            settings.model,
            settings.api_base
        );
        Ok(Self { client, settings })
    }

    /// Model requests are sent to
    pub fn model(&self) -> &str {
        &self.settings.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.settings.api_base.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl Provider for OpenAiCompatibleProvider {
    fn name(&self) -> &str {
        &self.settings.label
    }

    async fn generate_response(
        &self,
        history: &[Message],
        tools: &[ToolDescriptor],
    ) -> Result<String> {
        let system_prompt = build_system_prompt(AgentMode::Standard, tools);
        let mut messages = Vec::with_capacity(history.len() + 1);
        messages.push(WireMessage {
            role: Role::System,
            content: &system_prompt,
        });
        messages.extend(history.iter().map(|m| WireMessage {
            role: m.role,
            content: &m.content,
        }));

        let request = ChatRequest {
            model: &self.settings.model,
            messages,
            max_tokens: self.settings.max_tokens,
            stream: false,
        };

        tracing::debug!(
            "Sending {} request: {} messages, {} tools",
            self.settings.label,
            request.messages.len(),
            tools.len()
        );

        let mut builder = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.settings.api_key)
            .json(&request);
        for (name, value) in &self.settings.extra_headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.send().await.map_err(|e| {
            tracing::error!("{} request failed: {}", self.settings.label, e);
            ThinkloopError::Provider(format!("{} request failed: {}", self.settings.label, e))
        })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!(
                "{} returned error {}: {}",
                self.settings.label,
                status,
                error_text
            );
            return Err(ThinkloopError::Provider(format!(
                "{} returned error {}: {}",
                self.settings.label, status, error_text
            ))
            .into());
        }

        let body: ChatResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse {} response: {}", self.settings.label, e);
            ThinkloopError::Provider(format!(
                "Failed to parse {} response: {}",
                self.settings.label, e
            ))
        })?;

        if let Some(error) = body.error {
            return Err(ThinkloopError::Provider(format!(
                "{} API error: {}",
                self.settings.label, error.message
            ))
            .into());
        }

        let content = body
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                ThinkloopError::Provider(format!("{} returned no choices", self.settings.label))
            })?;

        tracing::debug!("{} reply: {} bytes", self.settings.label, content.len());
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{OpenAiConfig, OpenRouterConfig};

    #[test]
    fn test_openai_settings_use_config_defaults() {
        let settings =
            OpenAiCompatibleSettings::openai(&OpenAiConfig::default(), "k".to_string(), None);
        assert_eq!(settings.model, "gpt-4.1-nano");
        assert_eq!(settings.max_tokens, 9060);
        assert!(settings.extra_headers.is_empty());
    }

    #[test]
    fn test_model_override() {
        let settings = OpenAiCompatibleSettings::openrouter(
            &OpenRouterConfig::default(),
            "k".to_string(),
            Some("openai/gpt-4o-mini"),
        );
        assert_eq!(settings.model, "openai/gpt-4o-mini");
        assert_eq!(settings.label, "openrouter");
        assert_eq!(settings.extra_headers[0].0, "X-Title");
    }

    #[test]
    fn test_endpoint_tolerates_trailing_slash() {
        let mut config = OpenAiConfig::default();
        config.api_base = "http://localhost:1234/v1/".to_string();
        let settings = OpenAiCompatibleSettings::openai(&config, "k".to_string(), None);
        let provider = OpenAiCompatibleProvider::new(settings, Duration::from_secs(5)).unwrap();
        assert_eq!(provider.endpoint(), "http://localhost:1234/v1/chat/completions");
    }

    #[test]
    fn test_request_serialization_shape() {
        let request = ChatRequest {
            model: "m",
            messages: vec![WireMessage {
                role: Role::User,
                content: "hi",
            }],
            max_tokens: 10,
            stream: false,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["stream"], false);
    }
}
