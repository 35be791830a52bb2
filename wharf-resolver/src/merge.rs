//! Workspace merging — fold handles from one or more documents into a
//! single mapping keyed by location name.
//!
//! The fold is last-document-wins: a later document's handle under an
//! already-seen name silently replaces the earlier one, even across
//! unrelated documents. Downstream callers rely on this being
//! deterministic, so documents are processed strictly in the order given.

use std::path::{Path, PathBuf};

use wharf_config::loader::load_documents;
use wharf_config::model::WorkspaceDocument;
use wharf_core::Workspace;

use crate::error::ResolveError;
use crate::resolve::DocumentResolver;

impl DocumentResolver<'_> {
    /// Resolve each document in order and fold every handle into one
    /// workspace.
    pub fn merge_documents(
        &self,
        documents: &[(WorkspaceDocument, PathBuf)],
    ) -> Result<Workspace, ResolveError> {
        let mut handles = Vec::new();
        for (document, source_path) in documents {
            handles.extend(self.resolve_document(document, source_path)?);
        }
        Ok(Workspace::from_handles(handles))
    }
}

/// Load, resolve, and merge workspace documents from disk in one call.
///
/// The canonical entrypoint for callers holding only document paths.
pub fn load_workspace_from_yaml_paths(
    paths: &[PathBuf],
    resolver: &DocumentResolver<'_>,
) -> Result<Workspace, ResolveError> {
    let documents = load_documents(paths)?;
    tracing::debug!(documents = documents.len(), "loaded workspace documents");
    resolver.merge_documents(&documents)
}

/// `load_workspace_from_yaml_paths` convenience for a single document.
pub fn load_workspace_from_yaml_path(
    path: &Path,
    resolver: &DocumentResolver<'_>,
) -> Result<Workspace, ResolveError> {
    load_workspace_from_yaml_paths(&[path.to_path_buf()], resolver)
}
