//! Runtime configuration loaded from an optional YAML file.
//!
//! Every field has a default, so a partial file (or no file at all) is valid:
//!
//! ```yaml
//! dedup:
//!   threshold: 0.7
//!   lookback: 7
//! fallback:
//!   count: 3
//!   pool:
//!     - source: 司法部
//!       title: 《关于进一步完善法律援助工作的实施意见》发布
//!       summary: ...
//!       impact: ...
//! llm:
//!   endpoint: https://open.bigmodel.cn/api/paas/v4/chat/completions
//!   model: glm-4.7
//! ```

use crate::dedup::{DEFAULT_LOOKBACK, DEFAULT_SIMILARITY_THRESHOLD};
use crate::error::BriefError;
use crate::fallback::{DEFAULT_FALLBACK_COUNT, default_pool};
use crate::models::NewsItem;
use serde::Deserialize;
use std::path::Path;
use tracing::{info, instrument};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub dedup: DedupConfig,
    pub fallback: FallbackConfig,
    pub llm: LlmConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DedupConfig {
    /// Whole-text similarity ratio above which a brief is rejected.
    pub threshold: f64,
    /// How many archived briefs to compare against.
    pub lookback: usize,
}

impl Default for DedupConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_SIMILARITY_THRESHOLD,
            lookback: DEFAULT_LOOKBACK,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FallbackConfig {
    pub count: usize,
    pub pool: Vec<NewsItem>,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            count: DEFAULT_FALLBACK_COUNT,
            pool: default_pool(),
        }
    }
}

/// Settings for the OpenAI-compatible chat-completions endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub endpoint: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout_secs: u64,
    pub max_retries: usize,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://open.bigmodel.cn/api/paas/v4/chat/completions".to_string(),
            model: "glm-4.7".to_string(),
            temperature: 0.8,
            max_tokens: 2000,
            timeout_secs: 30,
            max_retries: 3,
        }
    }
}

impl Config {
    /// Parse a YAML document.
    pub fn from_yaml(yaml: &str) -> Result<Self, BriefError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load from `path`, or return defaults when no path is given.
    #[instrument(level = "info", skip_all)]
    pub async fn load(path: Option<&Path>) -> Result<Self, BriefError> {
        let Some(path) = path else {
            info!("No config file given; using built-in defaults");
            return Ok(Self::default());
        };
        let yaml = tokio::fs::read_to_string(path).await?;
        let config = Self::from_yaml(&yaml)?;
        info!(
            path = %path.display(),
            threshold = config.dedup.threshold,
            lookback = config.dedup.lookback,
            pool = config.fallback.pool.len(),
            "Loaded configuration"
        );
        Ok(config)
    }
}
