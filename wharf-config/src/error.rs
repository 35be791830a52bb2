//! Error types for wharf-config.

use std::path::PathBuf;

use thiserror::Error;

/// A workspace document could not be read, parsed, or shape-checked.
///
/// All variants are fatal and surfaced before any resolution begins.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Underlying I/O failure reading the document.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML parse error — includes document path and line context from
    /// serde_yaml.
    #[error("failed to parse workspace document at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// The document parsed but its shape is not a legal workspace document.
    #[error("invalid workspace document at {path}: {reason}")]
    Invalid { path: PathBuf, reason: String },
}

/// Convenience constructor for [`SchemaError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> SchemaError {
    SchemaError::Io {
        path: path.into(),
        source,
    }
}
