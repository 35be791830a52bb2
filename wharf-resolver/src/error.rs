//! Error types for wharf-resolver.

use std::path::PathBuf;

use thiserror::Error;

use wharf_config::SchemaError;
use wharf_core::PointerError;
use wharf_discovery::DiscoveryError;

/// All errors that can arise while resolving documents into a workspace.
///
/// A failing entry aborts resolution of its whole document; nothing is
/// retried.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The document failed shape validation before resolution began.
    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),

    /// A structurally valid but semantically invalid entry.
    #[error("invalid configuration in {path}: {reason}")]
    Configuration { path: PathBuf, reason: String },

    /// Multiple repositories discovered at one location with no explicit
    /// `location_name` to disambiguate them.
    #[error(
        "an explicit location_name is required when one location hosts \
         multiple repositories (found {names:?})"
    )]
    AmbiguousLocationName { names: Vec<String> },

    /// Target discovery failed (loader, remote lister, or zero targets).
    #[error("discovery error: {0}")]
    Discovery(#[from] DiscoveryError),

    /// A code pointer could not be constructed from the entry's fields.
    #[error("pointer error: {0}")]
    Pointer(#[from] PointerError),
}

/// Convenience constructor for [`ResolveError::Configuration`].
pub(crate) fn config_err(path: impl Into<PathBuf>, reason: impl Into<String>) -> ResolveError {
    ResolveError::Configuration {
        path: path.into(),
        reason: reason.into(),
    }
}
