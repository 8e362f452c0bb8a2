//! Provider module for Thinkloop
//!
//! The [`Provider`] abstraction and its OpenAI-compatible and Gemini
//! implementations.

pub mod base;
pub mod gemini;
pub mod openai;

pub use base::{Message, Provider, Role};
pub use gemini::GeminiProvider;
pub use openai::{OpenAiCompatibleProvider, OpenAiCompatibleSettings};

use crate::config::Config;
use crate::error::{Result, ThinkloopError};
use std::time::Duration;

/// Create the provider selected by the configuration
///
/// `auto` is resolved from the available API keys first.
///
/// # Errors
///
/// Returns `ThinkloopError::MissingCredentials` if no key is available for
/// the selected backend, or an HTTP error if the client cannot be built.
pub fn create_provider(config: &Config) -> Result<Box<dyn Provider>> {
    let provider_type = config.resolve_provider_type()?;
    let provider = &config.provider;
    let timeout = Duration::from_secs(provider.request_timeout_seconds);
    let model_override = provider.model.as_deref();

    let missing = |name: &str| ThinkloopError::MissingCredentials(name.to_string());

    match provider_type.as_str() {
        "openai" => {
            let key = provider.openai.api_key.clone().ok_or_else(|| missing("openai"))?;
            let settings = OpenAiCompatibleSettings::openai(&provider.openai, key, model_override);
            Ok(Box::new(OpenAiCompatibleProvider::new(settings, timeout)?))
        }
        "openrouter" => {
            let key = provider
                .openrouter
                .api_key
                .clone()
                .ok_or_else(|| missing("openrouter"))?;
            let settings =
                OpenAiCompatibleSettings::openrouter(&provider.openrouter, key, model_override);
            Ok(Box::new(OpenAiCompatibleProvider::new(settings, timeout)?))
        }
        "gemini" => {
            let key = provider.gemini.api_key.clone().ok_or_else(|| missing("gemini"))?;
            Ok(Box::new(GeminiProvider::new(
                provider.gemini.clone(),
                key,
                model_override,
                timeout,
            )?))
        }
        other => Err(ThinkloopError::Provider(format!("Unknown provider type: {}", other)).into()),
    }
}
