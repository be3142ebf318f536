use std::path::PathBuf;

use thiserror::Error;

pub type SelectorResult<T> = Result<T, SelectorError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    #[error("invalid configuration: {0}")]
    Configuration(String),

    #[error("invalid value: {0}")]
    Validation(String),
}

pub type RequirementsResult<T> = Result<T, RequirementsError>;

#[derive(Debug, Error)]
pub enum RequirementsError {
    #[error("failed to access `{path}`: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid packaging descriptor `{path}`: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("extra `{0}` is not defined in the packaging descriptor")]
    UnknownExtra(String),
}
