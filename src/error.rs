use thiserror::Error;

use crate::analyzer::ParseError;
use crate::config::ConfigError;

#[derive(Error, Debug)]
pub enum KfgError {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    // reading the source file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialize error: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type KfgResult<T> = Result<T, KfgError>;
