use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};
use strum_macros::{Display, EnumString};
use thiserror::Error;

/// Top-level configuration of the KFG pipeline.
///
/// Every field has a default, so an empty JSON object is a valid configuration:
///
/// ```rust
/// use kfg::config::{KfgConfig, ScopeMode, Strictness};
///
/// let config = KfgConfig::from_json_str(r#"{ "parser": { "strictness": "strict" } }"#).unwrap();
/// assert_eq!(config.parser.strictness, Strictness::Strict);
/// assert_eq!(config.parser.scope_mode, ScopeMode::Persistent);
/// assert!(config.filter.protect_strings);
/// assert!(!config.tokenizer.fold_whitespace);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KfgConfig {
    #[serde(default)]
    pub tokenizer: TokenizerConfig,

    #[serde(default)]
    pub filter: FilterConfig,

    #[serde(default)]
    pub parser: ParserConfig,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenizerConfig {
    /// Classify tab and carriage return bytes as spaces instead of symbol bytes.
    #[serde(default)]
    pub fold_whitespace: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Keep spaces and comment markers found between quotes.
    #[serde(default = "default_true")]
    pub protect_strings: bool,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            protect_strings: default_true(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserConfig {
    #[serde(default)]
    pub strictness: Strictness,

    #[serde(default)]
    pub scope_mode: ScopeMode,
}

impl ParserConfig {
    pub fn strict() -> Self {
        Self {
            strictness: Strictness::Strict,
            ..Self::default()
        }
    }
}

/// How array and dictionary parsers treat content that is not a value.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Strictness {
    /// Stray tokens and invalid scalars are dropped with a warning.
    #[default]
    Lenient,
    /// Stray tokens and invalid scalars abort the parse.
    Strict,
}

/// Lifetime of `name::` scope declarations.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ScopeMode {
    /// Declared scopes stay active for every following assignment.
    #[default]
    Persistent,
    /// Declared scopes are consumed by the next assignment.
    SingleUse,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config: {0}")]
    Json(#[from] serde_json::Error),
}

impl KfgConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = serde_json::from_reader(BufReader::new(file))?;
        tracing::debug!("config loaded from {}: {:?}", path.display(), config);
        Ok(config)
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

fn default_true() -> bool {
    true
}
