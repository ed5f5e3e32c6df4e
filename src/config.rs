//! Runtime settings.
//!
//! Every knob has a sensible default; an optional YAML file overrides the
//! ones a deployment cares about. Secrets never live here; API keys come in
//! through the CLI or environment (see [`crate::cli`]).
//!
//! ```yaml
//! chat_model: "meta-llama/llama-4-scout-17b-16e-instruct"
//! chat_temperature: 0.3
//! http_timeout_secs: 10
//! ```

use std::error::Error;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

/// Settings loaded from an optional YAML file, defaults otherwise.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Base URL of the OpenAI-compatible chat-completions provider.
    pub chat_base_url: String,
    /// Model identifier sent with each generation request.
    pub chat_model: String,
    /// Sampling temperature for generation.
    pub chat_temperature: f32,
    /// Token budget for generation responses.
    pub chat_max_tokens: u32,
    /// SerpAPI search endpoint.
    pub search_endpoint: String,
    /// Timeout in seconds for all outbound HTTP.
    pub http_timeout_secs: u64,
    /// Maximum retry attempts for generation calls.
    pub generation_retries: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            chat_base_url: "https://api.groq.com/openai/v1".to_string(),
            chat_model: "meta-llama/llama-4-scout-17b-16e-instruct".to_string(),
            chat_temperature: 0.3,
            chat_max_tokens: 1024,
            search_endpoint: "https://serpapi.com/search.json".to_string(),
            http_timeout_secs: 10,
            generation_retries: 5,
        }
    }
}

impl Settings {
    /// Load settings from `path`, or the defaults when no file is given.
    pub async fn load(path: Option<&Path>) -> Result<Self, Box<dyn Error>> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = tokio::fs::read_to_string(path).await?;
        let settings: Self = serde_yaml::from_str(&text)?;
        info!(path = %path.display(), "Loaded settings file");
        Ok(settings)
    }
}
