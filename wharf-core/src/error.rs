//! Error types for wharf-core.

use thiserror::Error;

/// A code pointer constructor was given malformed input.
#[derive(Debug, Error)]
pub enum PointerError {
    /// A required pointer field was empty or blank.
    #[error("code pointer field '{field}' must be non-empty")]
    EmptyField { field: &'static str },
}

/// Lookup of a name absent from a merged workspace.
#[derive(Debug, Error)]
#[error("no repository location named '{name}' in workspace")]
pub struct UnknownLocationError {
    pub name: String,
}
