//! Wharf configuration library — document model, schema checks, loading.
//!
//! Public API surface:
//! - [`model`] — typed workspace document and location entries
//! - [`schema`] — semantic validation and opt-in resolution
//! - [`paths`] — document-relative path rebasing, home expansion
//! - [`loader`] — YAML document loading
//! - [`error`] — [`SchemaError`]

pub mod error;
pub mod loader;
pub mod model;
pub mod paths;
pub mod schema;

pub use error::SchemaError;
pub use loader::{load_document_from_path, load_documents};
pub use model::{
    FileRef, FileSpec, GrpcServerSpec, LegacyRepositoryRef, LocationEntry, ModuleRef,
    ModuleSpec, PackageRef, PackageSpec, PythonEnvironmentSpec, TargetConfig,
    WorkspaceDocument,
};
pub use schema::{ensure_workspace_document, resolved_api, GRPC_OPT_IN};
