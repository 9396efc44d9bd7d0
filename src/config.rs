//! Configuration file support for the diagnosis engine.
//!
//! All tunables live in one document, loaded either from YAML directly
//! ([`AgroverseConfig::from_yaml`], [`AgroverseConfig::from_file`]) or layered
//! with environment overrides ([`AgroverseConfig::load`]).
//!
//! ## Example YAML Configuration
//!
//! ```yaml
//! version: "1.0"
//! name: "greenhouse-north"
//!
//! engine:
//!   match_threshold: 0.7
//!   match_count: 5
//!   weights:
//!     w1: 0.40   # absolute
//!     w2: 0.15   # relative (normalized)
//!     w3: 0.20   # clarity
//!     w4: 0.10   # symptom distinctness
//!     w5: 0.15   # seasonal
//!
//! symptoms:
//!   normalize_unicode: true
//!   lowercase: true
//!   strip_punctuation: true
//!   stop_words: [and, or, the, in, on, at, to, of, with, may, can]
//!
//! seasonal:
//!   table_path: "config/seasonal.json"
//!
//! logging:
//!   level: "info"
//!   json: false
//! ```
//!
//! ## Environment overrides
//!
//! [`AgroverseConfig::load`] reads an optional `agroverse.{yaml,json,toml}` in
//! the working directory (or an explicit file), then applies variables of the
//! form `AGROVERSE__<SECTION>__<KEY>`:
//!
//! ```text
//! AGROVERSE__ENGINE__MATCH_COUNT=3
//! AGROVERSE__LOGGING__JSON=true
//! AGROVERSE__SYMPTOMS__STOP_WORDS=and,or,the
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use confidence::ConfidenceWeights;
use diagnosis::{
    ComposerConfig, DiagnosisComposer, DiagnosisError, DEFAULT_MATCH_COUNT,
    DEFAULT_MATCH_THRESHOLD,
};
use seasonal::{SeasonalError, SeasonalTable};
use serde::{Deserialize, Serialize};
use symptoms::NormalizerConfig;
use thiserror::Error;
use tracing::debug;

/// Prefix of environment variables read by [`AgroverseConfig::load`].
pub const ENV_PREFIX: &str = "AGROVERSE";

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("failed to assemble layered config: {0}")]
    Layered(#[from] ::config::ConfigError),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),

    #[error("failed to load seasonal table: {0}")]
    SeasonalTable(#[from] SeasonalError),
}

impl From<DiagnosisError> for ConfigLoadError {
    fn from(err: DiagnosisError) -> Self {
        ConfigLoadError::Validation(err.to_string())
    }
}

/// Top-level configuration document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AgroverseConfig {
    /// Configuration format version
    #[serde(default = "default_config_version")]
    pub version: String,

    /// Optional configuration name/description
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub engine: EngineConfig,

    #[serde(default)]
    pub symptoms: NormalizerConfig,

    #[serde(default)]
    pub seasonal: SeasonalConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AgroverseConfig {
    /// Load a YAML configuration file from the given path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse YAML configuration from a string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: AgroverseConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Layered load: defaults, then the config file, then `AGROVERSE__*`
    /// environment variables.
    ///
    /// With `path = None` an `agroverse.{yaml,json,toml}` file in the working
    /// directory is used when present.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigLoadError> {
        Self::load_layered(path, None)
    }

    /// `env` replaces the process environment when given.
    fn load_layered(
        path: Option<&Path>,
        env: Option<HashMap<String, String>>,
    ) -> Result<Self, ConfigLoadError> {
        let mut builder = ::config::Config::builder();
        builder = match path {
            Some(path) => builder.add_source(::config::File::from(path).required(true)),
            None => builder.add_source(::config::File::with_name("agroverse").required(false)),
        };
        let builder = builder.add_source(
            ::config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("symptoms.stop_words")
                .try_parsing(true)
                .source(env),
        );

        let config: AgroverseConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        debug!(
            version = %config.version,
            name = ?config.name,
            match_count = config.engine.match_count,
            "config_loaded"
        );
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => Ok(()),
            v => Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }?;

        self.logging.validate()?;
        self.composer_config().validate()?;
        Ok(())
    }

    pub fn composer_config(&self) -> ComposerConfig {
        ComposerConfig {
            match_threshold: self.engine.match_threshold,
            top_k: self.engine.match_count,
            weights: self.engine.weights,
            normalizer: self.symptoms.clone(),
        }
    }

    /// Build a composer, loading the seasonal table file when one is configured.
    pub fn build_composer(&self) -> Result<DiagnosisComposer, ConfigLoadError> {
        let composer = DiagnosisComposer::new(self.composer_config())?;
        match &self.seasonal.table_path {
            Some(path) => {
                let table = SeasonalTable::from_json_file(path)?;
                Ok(composer.with_seasonal_table(Arc::new(table)))
            }
            None => Ok(composer),
        }
    }
}

impl Default for AgroverseConfig {
    fn default() -> Self {
        Self {
            version: default_config_version(),
            name: None,
            engine: EngineConfig::default(),
            symptoms: NormalizerConfig::default(),
            seasonal: SeasonalConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Candidate retrieval and scoring configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default = "default_match_threshold")]
    pub match_threshold: f64,

    #[serde(default = "default_match_count", alias = "top_k")]
    pub match_count: usize,

    #[serde(default)]
    pub weights: ConfidenceWeights,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            match_threshold: default_match_threshold(),
            match_count: default_match_count(),
            weights: ConfidenceWeights::default(),
        }
    }
}

/// Where seasonal patterns come from. Without a path the builtin table is used.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonalConfig {
    #[serde(default)]
    pub table_path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of the human-readable format.
    #[serde(default)]
    pub json: bool,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.level.to_ascii_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" | "off" => Ok(()),
            other => Err(ConfigLoadError::Validation(format!(
                "logging.level must be one of trace, debug, info, warn, error, off; got '{other}'"
            ))),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_config_version() -> String {
    "1.0".to_string()
}
fn default_match_threshold() -> f64 {
    DEFAULT_MATCH_THRESHOLD
}
fn default_match_count() -> usize {
    DEFAULT_MATCH_COUNT
}
fn default_log_level() -> String {
    "info".to_string()
}
