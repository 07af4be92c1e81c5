use std::{io, path::PathBuf};
use thiserror::Error;

use crate::clue::BucketKind;

pub type Result<T> = std::result::Result<T, LocatorError>;

#[derive(Debug, Error)]
pub enum LocatorError {
    #[error("Invalid {kind} bucket index: {index}")]
    InvalidBucket { kind: BucketKind, index: i64 },

    #[error("Unknown {kind} bucket: {label}")]
    UnknownBucket { kind: BucketKind, label: String },

    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid color '{0}': expected #RRGGBB")]
    Color(String),

    #[error("Failed to create directory {path}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to create file {path}")]
    CreateFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to read file {path}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Image(#[from] image::ImageError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<toml::de::Error> for LocatorError {
    fn from(err: toml::de::Error) -> Self {
        LocatorError::Config(format!("TOML parse error: {}", err))
    }
}
