// src/error.rs

use std::path::PathBuf;

/// Errors raised while loading configuration or validating rule tables.
///
/// Normalizing and expanding text never fails; only the opt-in strict checks
/// and the file loaders return these.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid registry JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize registry: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("invalid settings in {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// An earlier pattern is a strict prefix of a later, longer one and
    /// will always win at their shared start position.
    #[error("pattern #{earlier} ({earlier_acronym}) shadows longer pattern #{later} ({later_acronym})")]
    ShadowedPattern {
        earlier: usize,
        earlier_acronym: String,
        later: usize,
        later_acronym: String,
    },

    #[error("pattern #{0} has no tokens")]
    EmptyPattern(usize),
}

pub type Result<T> = std::result::Result<T, Error>;
