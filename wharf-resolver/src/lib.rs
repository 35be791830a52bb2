//! Wharf resolver library — from workspace documents to a merged
//! [`Workspace`](wharf_core::Workspace) of repository location handles.
//!
//! Public API surface:
//! - [`resolve`] — [`DocumentResolver`]
//! - [`merge`] — document folding and the one-call disk entrypoints
//! - [`naming`] — location naming rules
//! - [`error`] — [`ResolveError`]

mod builder;
pub mod error;
pub mod merge;
pub mod naming;
pub mod resolve;

pub use error::ResolveError;
pub use merge::{load_workspace_from_yaml_path, load_workspace_from_yaml_paths};
pub use naming::{assign_location_name, grpc_location_name};
pub use resolve::DocumentResolver;
