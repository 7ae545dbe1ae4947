//! Error taxonomy for podsettle.
//!
//! Only [`ConnectionError`] is fatal to a check. Every other error is
//! accumulated as a soft error by the correlation engine and surfaced in the
//! final report.

use thiserror::Error;

/// A failure note that does not conform to the static pod failure template.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// The text did not match the template at all.
    #[error("note does not match static pod failure template: {text:?}")]
    NoMatch { text: String },

    /// The template matched but the revision token is not a valid integer.
    #[error("invalid revision {token:?} in note: {text:?}")]
    InvalidRevision { token: String, text: String },
}

/// Listing events for a namespace failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// Network, auth or API server failure while listing events.
    #[error("failed to list {source_kind} events in namespace {namespace}: {message}")]
    Transport {
        source_kind: String,
        namespace: String,
        message: String,
    },
}

impl SourceError {
    pub fn transport(
        source_kind: impl Into<String>,
        namespace: impl Into<String>,
        message: impl std::fmt::Display,
    ) -> Self {
        SourceError::Transport {
            source_kind: source_kind.into(),
            namespace: namespace.into(),
            message: message.to_string(),
        }
    }
}

/// The cluster client could not be constructed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConnectionError {
    /// Client configuration could not be loaded or inferred.
    #[error("cluster config could not be loaded: {0}")]
    Config(String),

    /// The client could not be built from a loaded configuration.
    #[error("cluster client could not be created: {0}")]
    Client(String),
}

/// A recoverable error accumulated during correlation.
///
/// Soft errors are reported collectively at the end of a check and never
/// abort it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SoftError {
    #[error(transparent)]
    Transport(#[from] SourceError),

    #[error(transparent)]
    Extraction(#[from] ExtractionError),
}

/// Invalid check configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("no namespaces configured")]
    NoNamespaces,

    #[error("namespace names must not be empty")]
    EmptyNamespace,

    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// Result type for check configuration.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
