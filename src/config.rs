//! Engine configuration
//!
//! Settings are layered with the `config` crate:
//! 1. Built-in defaults (every section is `#[serde(default)]`)
//! 2. Optional TOML file
//! 3. Environment overrides prefixed `USABILITY__` (e.g.
//!    `USABILITY__CLASSIFIER__STRATEGY=remote_few_shot`)
//!
//! API keys never live in the file. They are read from the provider's
//! environment variable, and a missing key is a valid configuration in which
//! the remote classifier reports `NotConfigured` for every item.

use crate::error::{Result, UsabilityError};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// Environment variable prefix for overrides
const ENV_PREFIX: &str = "USABILITY";

/// Complete engine configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub scoring: ScoringConfig,
    pub classifier: ClassifierConfig,
    pub insights: InsightConfig,
    pub layout: LayoutConfig,
    pub cache: CacheConfig,
}

impl EngineConfig {
    /// Load defaults, then the optional file, then environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            debug!("Loading engine configuration from {}", path.display());
            builder = builder.add_source(config::File::from(path).required(false));
        }

        let settings = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Render the effective configuration as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| UsabilityError::Other(format!("Failed to render config: {}", e)))
    }
}

/// What to do with a respondent whose answers are incomplete
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidAnswerPolicy {
    /// Exclude the respondent and count the exclusion
    #[default]
    Exclude,

    /// Substitute the neutral midpoint (3) for missing answers.
    /// Out-of-range values still exclude the respondent.
    NeutralMidpoint,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub invalid_answer_policy: InvalidAnswerPolicy,
}

/// Which classification strategy the engine constructs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassifierStrategy {
    #[default]
    Heuristic,
    RemoteFewShot,
}

/// Remote LLM provider used by the few-shot strategy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LlmProvider {
    #[default]
    Gemini,
    Anthropic,
}

impl LlmProvider {
    /// Environment variable holding this provider's credential
    pub fn api_key_var(&self) -> &'static str {
        match self {
            LlmProvider::Gemini => "GOOGLE_API_KEY",
            LlmProvider::Anthropic => "ANTHROPIC_API_KEY",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            LlmProvider::Gemini => "gemini-1.5-flash",
            LlmProvider::Anthropic => "claude-3-5-haiku-20241022",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    pub strategy: ClassifierStrategy,
    pub provider: LlmProvider,

    /// Model override; provider default when unset
    pub model: Option<String>,

    /// Endpoint override for the remote backend (proxies, gateways)
    pub base_url: Option<String>,

    /// Per-call timeout for the remote backend
    pub timeout_secs: u64,

    pub max_tokens: usize,
    pub temperature: f32,

    /// Layer the keyword→category lookup on top of heuristic sentiment
    pub heuristic_categories: bool,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            strategy: ClassifierStrategy::default(),
            provider: LlmProvider::default(),
            model: None,
            base_url: None,
            timeout_secs: 15,
            max_tokens: 32,
            temperature: 0.0,
            heuristic_categories: true,
        }
    }
}

impl ClassifierConfig {
    /// Credential for the configured provider, if present and non-empty
    pub fn api_key(&self) -> Option<String> {
        env::var(self.provider.api_key_var())
            .ok()
            .filter(|key| !key.trim().is_empty())
    }

    pub fn model(&self) -> String {
        self.model
            .clone()
            .unwrap_or_else(|| self.provider.default_model().to_string())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Thresholds for the insight rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InsightConfig {
    /// Scores below this fire the low-score rule
    pub acceptable_score: f64,

    /// Normalized term-frequency cutoffs per theme
    pub navigation_cutoff: f64,
    pub explainability_cutoff: f64,
    pub visualization_cutoff: f64,

    /// Share of classified comments that are negative
    pub negative_share_cutoff: f64,

    /// Share of commented items whose label degraded to Error/NotConfigured
    pub degraded_share_cutoff: f64,

    /// Number of terms listed in the topics section
    pub top_terms: usize,
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            acceptable_score: 68.0,
            navigation_cutoff: 0.05,
            explainability_cutoff: 0.05,
            visualization_cutoff: 0.08,
            negative_share_cutoff: 0.3,
            degraded_share_cutoff: 0.5,
            top_terms: 10,
        }
    }
}

/// Page geometry for the report, in points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub page_width: f32,
    pub page_height: f32,
    pub top_margin: f32,
    pub bottom_margin: f32,
    pub side_margin: f32,

    /// Vertical space between consecutive sections
    pub gap: f32,

    /// Height of the block substituted for a missing chart
    pub placeholder_height: f32,

    pub line_height: f32,
    pub chart_height: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        // A4 portrait
        Self {
            page_width: 595.0,
            page_height: 842.0,
            top_margin: 56.0,
            bottom_margin: 56.0,
            side_margin: 48.0,
            gap: 16.0,
            placeholder_height: 96.0,
            line_height: 14.0,
            chart_height: 220.0,
        }
    }
}

impl LayoutConfig {
    /// Vertical space available for sections on one page
    pub fn usable_height(&self) -> f32 {
        self.page_height - self.top_margin - self.bottom_margin
    }

    pub fn content_width(&self) -> f32 {
        self.page_width - 2.0 * self.side_margin
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub enabled: bool,
    pub capacity: usize,
    pub ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            capacity: 32,
            ttl_secs: 600,
        }
    }
}
