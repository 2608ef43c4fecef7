//! LLM service for remote feedback classification
//!
//! Provides the [`ClassificationBackend`] seam used by the few-shot
//! classifier, and [`LlmService`], its implementation over two providers:
//! - Google Gemini (`generateContent`)
//! - Anthropic Messages API

use crate::config::{ClassifierConfig, LlmProvider};
use crate::error::{Result, UsabilityError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Completion backend: prompt in, raw model text out
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClassificationBackend: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String>;

    /// Cheap reachability and credential check
    async fn check(&self) -> Result<()> {
        Ok(())
    }
}

/// Configuration for LLM service
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub provider: LlmProvider,

    /// Provider API key
    pub api_key: String,

    pub model: String,

    /// Max tokens for responses
    pub max_tokens: usize,

    /// Temperature for sampling
    pub temperature: f32,

    /// Transport timeout for one request
    pub timeout: Duration,

    /// Endpoint override (proxies, test servers)
    pub base_url: Option<String>,
}

impl LlmConfig {
    /// Build from classifier settings; `None` when no credential is set
    pub fn from_classifier(config: &ClassifierConfig) -> Option<Self> {
        let api_key = config.api_key()?;
        Some(Self {
            provider: config.provider,
            api_key,
            model: config.model(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            timeout: config.timeout(),
            base_url: config.base_url.clone(),
        })
    }

    fn base_url(&self) -> &str {
        match (&self.base_url, self.provider) {
            (Some(url), _) => url,
            (None, LlmProvider::Gemini) => "https://generativelanguage.googleapis.com",
            (None, LlmProvider::Anthropic) => "https://api.anthropic.com",
        }
    }
}

/// LLM service for feedback classification
pub struct LlmService {
    config: LlmConfig,
    client: reqwest::Client,
}

/// Anthropic API message format
#[derive(Debug, Serialize)]
struct AnthropicRequest {
    model: String,
    max_tokens: usize,
    temperature: f32,
    messages: Vec<Message>,
}

#[derive(Debug, Serialize)]
struct Message {
    role: String,
    content: String,
}

/// Anthropic API response format
#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    content: Vec<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    text: String,
}

/// Gemini generateContent request format
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: usize,
}

/// Gemini generateContent response format
#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: GeminiContent,
}

impl LlmService {
    /// Create a new LLM service with custom config
    pub fn new(config: LlmConfig) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(UsabilityError::Config(config::ConfigError::Message(format!(
                "{} not set",
                config.provider.api_key_var()
            ))));
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self { config, client })
    }

    pub fn provider(&self) -> LlmProvider {
        self.config.provider
    }

    /// Fetch the configured model's metadata; fails when the endpoint is
    /// unreachable or rejects the credential
    async fn fetch_model(&self) -> Result<()> {
        let request = match self.config.provider {
            LlmProvider::Gemini => self
                .client
                .get(format!(
                    "{}/v1beta/models/{}",
                    self.config.base_url(),
                    self.config.model
                ))
                .header("x-goog-api-key", &self.config.api_key),
            LlmProvider::Anthropic => self
                .client
                .get(format!(
                    "{}/v1/models/{}",
                    self.config.base_url(),
                    self.config.model
                ))
                .header("x-api-key", &self.config.api_key)
                .header("anthropic-version", "2023-06-01"),
        };

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(UsabilityError::Backend(format!(
                "Model lookup failed with status {}",
                response.status()
            )));
        }

        debug!("{:?} backend reachable ({})", self.config.provider, self.config.model);
        Ok(())
    }

    /// Make an API call to the configured provider
    async fn call_api(&self, prompt: &str) -> Result<String> {
        match self.config.provider {
            LlmProvider::Gemini => self.call_gemini(prompt).await,
            LlmProvider::Anthropic => self.call_anthropic(prompt).await,
        }
    }

    async fn call_gemini(&self, prompt: &str) -> Result<String> {
        debug!("Calling Gemini API ({})", self.config.model);

        let request = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: self.config.temperature,
                max_output_tokens: self.config.max_tokens,
            },
        };

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url(),
            self.config.model
        );

        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(UsabilityError::Backend(format!(
                "API request failed with status {}: {}",
                status, error_text
            )));
        }

        let api_response: GeminiResponse = response
            .json()
            .await
            .map_err(|e| UsabilityError::Backend(format!("Failed to parse response: {}", e)))?;

        api_response
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.clone())
            .ok_or_else(|| UsabilityError::Backend("Empty response from API".to_string()))
    }

    async fn call_anthropic(&self, prompt: &str) -> Result<String> {
        debug!("Calling Anthropic API ({})", self.config.model);

        let request = AnthropicRequest {
            model: self.config.model.clone(),
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
            messages: vec![Message {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
        };

        let response = self
            .client
            .post(format!("{}/v1/messages", self.config.base_url()))
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", "2023-06-01")
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(UsabilityError::Backend(format!(
                "API request failed with status {}: {}",
                status, error_text
            )));
        }

        let api_response: AnthropicResponse = response
            .json()
            .await
            .map_err(|e| UsabilityError::Backend(format!("Failed to parse response: {}", e)))?;

        api_response
            .content
            .first()
            .map(|c| c.text.clone())
            .ok_or_else(|| UsabilityError::Backend("Empty response from API".to_string()))
    }
}

#[async_trait]
impl ClassificationBackend for LlmService {
    async fn complete(&self, prompt: &str) -> Result<String> {
        self.call_api(prompt).await
    }

    async fn check(&self) -> Result<()> {
        self.fetch_model().await
    }
}
