use crate::error::{DocdeckError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::Path;

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
    /// Provided via CLI argument
    Cli,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
            ConfigSource::Cli => 3,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Layered client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the retrieval backend
    pub endpoint: ConfigValue<String>,

    /// Result cap passed to every search call
    pub search_limit: ConfigValue<usize>,

    /// Minimum-score floor passed to every search call
    pub min_score: ConfigValue<f32>,

    /// Quiet period before a settled query fires a search
    pub debounce_ms: ConfigValue<u64>,

    /// How long a finished upload batch stays visible
    pub retention_ms: ConfigValue<u64>,

    /// Chunking hint sent with each upload
    pub max_chunk_size: ConfigValue<usize>,

    /// Chunking hint sent with each upload
    pub chunk_overlap: ConfigValue<usize>,
}

impl ClientConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        Self {
            endpoint: ConfigValue::new(
                "http://localhost:8200".to_string(),
                ConfigSource::Default,
            ),
            search_limit: ConfigValue::new(10, ConfigSource::Default),
            min_score: ConfigValue::new(0.0, ConfigSource::Default),
            debounce_ms: ConfigValue::new(500, ConfigSource::Default),
            retention_ms: ConfigValue::new(2000, ConfigSource::Default),
            max_chunk_size: ConfigValue::new(2000, ConfigSource::Default),
            chunk_overlap: ConfigValue::new(300, ConfigSource::Default),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| DocdeckError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to read config file: {}", e),
            })?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| DocdeckError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        if let Some(endpoint) = file_config.endpoint {
            self.endpoint.update(endpoint, ConfigSource::File);
        }

        if let Some(search_limit) = file_config.search_limit {
            self.search_limit.update(search_limit, ConfigSource::File);
        }

        if let Some(min_score) = file_config.min_score {
            self.min_score.update(min_score, ConfigSource::File);
        }

        if let Some(debounce_ms) = file_config.debounce_ms {
            self.debounce_ms.update(debounce_ms, ConfigSource::File);
        }

        if let Some(retention_ms) = file_config.retention_ms {
            self.retention_ms.update(retention_ms, ConfigSource::File);
        }

        if let Some(max_chunk_size) = file_config.max_chunk_size {
            self.max_chunk_size.update(max_chunk_size, ConfigSource::File);
        }

        if let Some(chunk_overlap) = file_config.chunk_overlap {
            self.chunk_overlap.update(chunk_overlap, ConfigSource::File);
        }

        Ok(self)
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        if let Ok(endpoint) = env::var("DOCDECK_ENDPOINT") {
            self.endpoint.update(endpoint, ConfigSource::Environment);
        }

        if let Ok(limit_str) = env::var("DOCDECK_SEARCH_LIMIT") {
            match limit_str.parse::<usize>() {
                Ok(limit) => self.search_limit.update(limit, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid DOCDECK_SEARCH_LIMIT value '{}': expected integer",
                    limit_str
                ),
            }
        }

        if let Ok(score_str) = env::var("DOCDECK_MIN_SCORE") {
            match score_str.parse::<f32>() {
                Ok(score) => self.min_score.update(score, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid DOCDECK_MIN_SCORE value '{}': expected float",
                    score_str
                ),
            }
        }

        if let Ok(ms_str) = env::var("DOCDECK_DEBOUNCE_MS") {
            match ms_str.parse::<u64>() {
                Ok(ms) => self.debounce_ms.update(ms, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid DOCDECK_DEBOUNCE_MS value '{}': expected milliseconds",
                    ms_str
                ),
            }
        }

        if let Ok(ms_str) = env::var("DOCDECK_RETENTION_MS") {
            match ms_str.parse::<u64>() {
                Ok(ms) => self.retention_ms.update(ms, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid DOCDECK_RETENTION_MS value '{}': expected milliseconds",
                    ms_str
                ),
            }
        }

        if let Ok(size_str) = env::var("DOCDECK_MAX_CHUNK_SIZE") {
            match size_str.parse::<usize>() {
                Ok(size) => self.max_chunk_size.update(size, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid DOCDECK_MAX_CHUNK_SIZE value '{}': expected integer",
                    size_str
                ),
            }
        }

        if let Ok(overlap_str) = env::var("DOCDECK_CHUNK_OVERLAP") {
            match overlap_str.parse::<usize>() {
                Ok(overlap) => self.chunk_overlap.update(overlap, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid DOCDECK_CHUNK_OVERLAP value '{}': expected integer",
                    overlap_str
                ),
            }
        }

        self
    }

    /// Update configuration from CLI arguments
    pub fn update_from_cli(&mut self, overrides: CliConfigOverrides) {
        if let Some(endpoint) = overrides.endpoint {
            self.endpoint.update(endpoint, ConfigSource::Cli);
        }

        if let Some(search_limit) = overrides.search_limit {
            self.search_limit.update(search_limit, ConfigSource::Cli);
        }

        if let Some(min_score) = overrides.min_score {
            self.min_score.update(min_score, ConfigSource::Cli);
        }

        if let Some(debounce_ms) = overrides.debounce_ms {
            self.debounce_ms.update(debounce_ms, ConfigSource::Cli);
        }
    }

    /// Get all configuration values as a map for inspection
    pub fn to_inspection_map(&self) -> HashMap<String, (String, ConfigSource)> {
        let mut map = HashMap::new();

        map.insert(
            "endpoint".to_string(),
            (self.endpoint.value.clone(), self.endpoint.source),
        );

        map.insert(
            "search_limit".to_string(),
            (self.search_limit.value.to_string(), self.search_limit.source),
        );

        map.insert(
            "min_score".to_string(),
            (self.min_score.value.to_string(), self.min_score.source),
        );

        map.insert(
            "debounce_ms".to_string(),
            (self.debounce_ms.value.to_string(), self.debounce_ms.source),
        );

        map.insert(
            "retention_ms".to_string(),
            (self.retention_ms.value.to_string(), self.retention_ms.source),
        );

        map.insert(
            "max_chunk_size".to_string(),
            (self.max_chunk_size.value.to_string(), self.max_chunk_size.source),
        );

        map.insert(
            "chunk_overlap".to_string(),
            (self.chunk_overlap.value.to_string(), self.chunk_overlap.source),
        );

        map
    }
}

/// Configuration loaded from TOML file
#[derive(Debug, Deserialize, Serialize)]
struct FileConfig {
    endpoint: Option<String>,
    search_limit: Option<usize>,
    min_score: Option<f32>,
    debounce_ms: Option<u64>,
    retention_ms: Option<u64>,
    max_chunk_size: Option<usize>,
    chunk_overlap: Option<usize>,
}

/// CLI configuration overrides
#[derive(Debug, Default)]
pub struct CliConfigOverrides {
    pub endpoint: Option<String>,
    pub search_limit: Option<usize>,
    pub min_score: Option<f32>,
    pub debounce_ms: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::with_defaults();
        assert_eq!(config.endpoint.value, "http://localhost:8200");
        assert_eq!(config.endpoint.source, ConfigSource::Default);
        assert_eq!(config.search_limit.value, 10);
        assert_eq!(config.min_score.value, 0.0);
        assert_eq!(config.debounce_ms.value, 500);
        assert_eq!(config.retention_ms.value, 2000);
    }

    #[test]
    fn test_config_precedence() {
        let mut value = ConfigValue::new(100, ConfigSource::Default);

        // File should override default
        value.update(200, ConfigSource::File);
        assert_eq!(value.value, 200);
        assert_eq!(value.source, ConfigSource::File);

        // Environment should override file
        value.update(300, ConfigSource::Environment);
        assert_eq!(value.value, 300);
        assert_eq!(value.source, ConfigSource::Environment);

        // CLI should override environment
        value.update(400, ConfigSource::Cli);
        assert_eq!(value.value, 400);
        assert_eq!(value.source, ConfigSource::Cli);

        // Lower precedence should not override
        value.update(500, ConfigSource::File);
        assert_eq!(value.value, 400); // Still CLI value
        assert_eq!(value.source, ConfigSource::Cli);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
endpoint = "http://retrieval.internal:9000"
search_limit = 25
debounce_ms = 250
"#
        )
        .unwrap();

        let config = ClientConfig::with_defaults().load_from_file(file.path()).unwrap();

        assert_eq!(config.endpoint.value, "http://retrieval.internal:9000");
        assert_eq!(config.endpoint.source, ConfigSource::File);
        assert_eq!(config.search_limit.value, 25);
        assert_eq!(config.debounce_ms.value, 250);
        // Untouched keys keep defaults
        assert_eq!(config.retention_ms.value, 2000);
        assert_eq!(config.retention_ms.source, ConfigSource::Default);
    }

    #[test]
    fn test_load_from_missing_file_is_an_error() {
        let result = ClientConfig::with_defaults().load_from_file("/nonexistent/docdeck.toml");
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = ClientConfig::with_defaults();

        let overrides = CliConfigOverrides {
            endpoint: Some("http://staging:8200".to_string()),
            search_limit: Some(5),
            min_score: None,
            debounce_ms: None,
        };

        config.update_from_cli(overrides);

        assert_eq!(config.endpoint.value, "http://staging:8200");
        assert_eq!(config.endpoint.source, ConfigSource::Cli);
        assert_eq!(config.search_limit.value, 5);
        assert_eq!(config.search_limit.source, ConfigSource::Cli);
        // These should still be defaults
        assert_eq!(config.min_score.source, ConfigSource::Default);
        assert_eq!(config.debounce_ms.source, ConfigSource::Default);
    }

    #[test]
    fn test_inspection_map() {
        let config = ClientConfig::with_defaults();
        let map = config.to_inspection_map();

        assert!(map.contains_key("endpoint"));
        assert!(map.contains_key("search_limit"));
        assert!(map.contains_key("debounce_ms"));
        assert!(map.contains_key("retention_ms"));

        let (limit_value, limit_source) = &map["search_limit"];
        assert_eq!(limit_value, "10");
        assert_eq!(*limit_source, ConfigSource::Default);
    }
}
