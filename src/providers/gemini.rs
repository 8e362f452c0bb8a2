//! Google Gemini provider
//!
//! Gemini has no system role. The system prompt is sent as the first user
//! turn, followed by a fixed model acknowledgement, then the conversation
//! with `assistant` mapped to `model` and every other role to `user`.

use crate::agent_mode::AgentMode;
use crate::config::GeminiConfig;
use crate::error::{Result, ThinkloopError};
use crate::prompts::build_system_prompt;
use crate::providers::base::{Message, Provider, Role};
use crate::tools::ToolDescriptor;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Model turn sent after the system prompt
pub const PRIMING_ACKNOWLEDGEMENT: &str = "Understood. I'm ready to help.";

const HISTORY_HEADER: &str = "\n\nHere is the conversation so far:\n";

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

/// Provider for the Gemini `generateContent` API
#[derive(Debug, Clone)]
pub struct GeminiProvider {
    client: Client,
    config: GeminiConfig,
    api_key: String,
    model: String,
}

impl GeminiProvider {
    /// Create a provider
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(
        config: GeminiConfig,
        api_key: String,
        model_override: Option<&str>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ThinkloopError::Http)?;
        let model = model_override.unwrap_or(&config.model).to_string();
        tracing::info!("Initialized gemini provider: model={}", model);
        Ok(Self {
            client,
            config,
            api_key,
            model,
        })
    }

    /// Model requests are sent to
    pub fn model(&self) -> &str {
        &self.model
    }

    fn build_contents(history: &[Message], tools: &[ToolDescriptor]) -> Vec<Content> {
        let system_prompt = build_system_prompt(AgentMode::Standard, tools);
        let mut contents = Vec::with_capacity(history.len() + 2);
        contents.push(Content {
            role: "user".to_string(),
            parts: vec![Part {
                text: format!("{}{}", system_prompt, HISTORY_HEADER),
            }],
        });
        contents.push(Content {
            role: "model".to_string(),
            parts: vec![Part {
                text: PRIMING_ACKNOWLEDGEMENT.to_string(),
            }],
        });
        for message in history {
            let role = match message.role {
                Role::Assistant => "model",
                Role::User | Role::System => "user",
            };
            contents.push(Content {
                role: role.to_string(),
                parts: vec![Part {
                    text: message.content.clone(),
                }],
            });
        }
        contents
    }
}

#[async_trait]
impl Provider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate_response(
        &self,
        history: &[Message],
        tools: &[ToolDescriptor],
    ) -> Result<String> {
        let request = GenerateRequest {
            contents: Self::build_contents(history, tools),
            generation_config: GenerationConfig {
                max_output_tokens: self.config.max_output_tokens,
            },
        };
        let url = format!(
            "{}/models/{}:generateContent",
            self.config.api_base.trim_end_matches('/'),
            self.model
        );

        tracing::debug!("Sending gemini request: {} contents", request.contents.len());

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Gemini request failed: {}", e);
                ThinkloopError::Provider(format!("Gemini request failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Gemini returned error {}: {}", status, error_text);
            return Err(ThinkloopError::Provider(format!(
                "Gemini returned error {}: {}",
                status, error_text
            ))
            .into());
        }

        let body: GenerateResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse Gemini response: {}", e);
            ThinkloopError::Provider(format!("Failed to parse Gemini response: {}", e))
        })?;

        let text: String = body
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| content.parts.into_iter().map(|p| p.text).collect())
            .unwrap_or_default();

        if text.is_empty() {
            return Err(ThinkloopError::Provider(
                "Gemini response was empty or in an unexpected format".to_string(),
            )
            .into());
        }

        Ok(text)
    }
}
