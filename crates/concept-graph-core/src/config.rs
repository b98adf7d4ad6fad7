//! Configuration management for the concept graph.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{GraphError, GraphResult};

/// Main configuration structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GraphConfig {
    #[serde(default)]
    pub embedding: EmbeddingConfig,
    #[serde(default)]
    pub index: IndexConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl GraphConfig {
    /// Load configuration from files and environment.
    ///
    /// Configuration is loaded in order:
    /// 1. config/default.toml (base settings)
    /// 2. config/{CONCEPT_GRAPH_ENV}.toml (environment-specific)
    /// 3. Environment variables with CONCEPT_GRAPH_ prefix
    pub fn load() -> GraphResult<Self> {
        let env = std::env::var("CONCEPT_GRAPH_ENV").unwrap_or_else(|_| "development".to_string());

        let builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{}", env)).required(false))
            .add_source(config::Environment::with_prefix("CONCEPT_GRAPH").separator("__"));

        let config: GraphConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> GraphResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            GraphError::Config(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        let config: GraphConfig = toml_from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Configuration with defaults for testing/development.
    pub fn default_config() -> Self {
        Self::default()
    }

    /// Validate configuration values.
    pub fn validate(&self) -> GraphResult<()> {
        if self.embedding.dimension == 0 {
            return Err(GraphError::Config(
                "embedding.dimension must be positive".to_string(),
            ));
        }
        if !self.index.dedup_epsilon.is_finite() || self.index.dedup_epsilon < 0.0 {
            return Err(GraphError::Config(
                "index.dedup_epsilon must be a non-negative finite number".to_string(),
            ));
        }
        if self.index.default_top_k == 0 {
            return Err(GraphError::Config(
                "index.default_top_k must be positive".to_string(),
            ));
        }
        if self.index.dedup_scan_k == 0 {
            return Err(GraphError::Config(
                "index.dedup_scan_k must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

fn toml_from_str(content: &str) -> GraphResult<GraphConfig> {
    let builder = config::Config::builder()
        .add_source(config::File::from_str(content, config::FileFormat::Toml));
    Ok(builder.build()?.try_deserialize()?)
}

/// Embedding provider settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmbeddingConfig {
    /// Embedding vector dimension. Fixed for the lifetime of a graph.
    #[serde(default = "default_dimension")]
    pub dimension: usize,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            dimension: default_dimension(),
        }
    }
}

fn default_dimension() -> usize {
    384
}

/// Similarity index settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IndexConfig {
    /// Maximum nearest-neighbor distance at which two texts are considered
    /// the same concept. This is the dedup design knob: near-zero so only
    /// texts that normalize to (effectively) the same phrase collapse.
    #[serde(default = "default_dedup_epsilon")]
    pub dedup_epsilon: f32,

    /// Default number of index hits retrieved per query.
    #[serde(default = "default_top_k")]
    pub default_top_k: usize,

    /// How many nearest slots `add_node` scans when looking for a duplicate.
    /// Edge-typed slots inside the scan window are skipped, so this bounds
    /// how many co-located edge phrases the dedup lookup can see past.
    #[serde(default = "default_dedup_scan_k")]
    pub dedup_scan_k: usize,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            dedup_epsilon: default_dedup_epsilon(),
            default_top_k: default_top_k(),
            dedup_scan_k: default_dedup_scan_k(),
        }
    }
}

fn default_dedup_epsilon() -> f32 {
    1e-4
}

fn default_top_k() -> usize {
    4
}

fn default_dedup_scan_k() -> usize {
    8
}

/// Logging settings, consumed by binaries when initializing tracing.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Log level filter (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
