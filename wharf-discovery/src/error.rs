//! Error types for wharf-discovery.

use std::path::PathBuf;

use thiserror::Error;

/// The in-process target loader could not produce a definition.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The requested attribute does not exist at the origin.
    #[error("attribute '{attribute}' not found at {origin}")]
    AttributeNotFound { origin: String, attribute: String },

    /// Loading or introspecting the origin failed, with the underlying
    /// cause flattened to a message.
    #[error("failed to load {origin}: {message}")]
    LoadFailed { origin: String, message: String },
}

/// The remote lister's child process or RPC round-trip failed.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// The discovery child could not be spawned.
    #[error("failed to spawn discovery child '{executable}': {message}")]
    Spawn {
        executable: PathBuf,
        message: String,
    },

    /// The child ran but the listing call failed or returned garbage.
    #[error("remote listing failed for {origin}: {message}")]
    ListingFailed { origin: String, message: String },

    /// The child did not answer within the lister's deadline. The lister
    /// tears the child down before returning this.
    #[error("discovery child for {origin} timed out after {seconds}s")]
    Timeout { origin: String, seconds: u64 },
}

/// Target discovery failed. Never retried here — retry policy, if any,
/// belongs to the remote-lister collaborator.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("target loader error: {0}")]
    Load(#[from] LoadError),

    #[error("remote lister error: {0}")]
    Remote(#[from] RemoteError),

    /// Enumeration succeeded but found nothing loadable.
    #[error("no loadable repository targets found at {origin}")]
    NoLoadableTargets { origin: String },
}
