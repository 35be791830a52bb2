//! Document resolution — one workspace document in, an ordered list of
//! location handles out.
//!
//! Resolution is synchronous and strictly entry-ordered; a failing entry
//! aborts its whole document. Collaborators are threaded through the
//! resolver value — there is no process-wide registry of any kind.

use std::path::Path;

use wharf_config::model::{LocationEntry, WorkspaceDocument};
use wharf_config::schema::{ensure_workspace_document, resolved_api};
use wharf_core::{Api, RepositoryLocationHandle};
use wharf_discovery::{RemoteLister, TargetLoader};

use crate::builder::{
    handle_from_file_spec, handle_from_grpc_server, handle_from_legacy_repository,
    handle_from_module_spec, handle_from_package_spec, handle_from_python_environment,
};
use crate::error::ResolveError;

/// Resolves workspace documents against a pair of discovery collaborators.
pub struct DocumentResolver<'a> {
    target_loader: &'a dyn TargetLoader,
    remote_lister: &'a dyn RemoteLister,
}

impl<'a> DocumentResolver<'a> {
    pub fn new(target_loader: &'a dyn TargetLoader, remote_lister: &'a dyn RemoteLister) -> Self {
        Self {
            target_loader,
            remote_lister,
        }
    }

    /// Resolve one document into handles, in entry order.
    ///
    /// The document is shape-checked first. A legacy `repository` document
    /// short-circuits into a single in-process handle.
    pub fn resolve_document(
        &self,
        document: &WorkspaceDocument,
        source_path: &Path,
    ) -> Result<Vec<RepositoryLocationHandle>, ResolveError> {
        ensure_workspace_document(document, source_path)?;

        if let Some(legacy) = &document.repository {
            tracing::warn!(
                document = %source_path.display(),
                "the legacy repository document format is deprecated; migrate to 'load_from'",
            );
            return Ok(vec![handle_from_legacy_repository(
                legacy,
                source_path,
                self.target_loader,
            )?]);
        }

        let api = resolved_api(document);
        let entries = document.load_from.as_deref().unwrap_or_default();
        let mut handles = Vec::with_capacity(entries.len());
        for entry in entries {
            let handle = self.resolve_entry(entry, source_path, api)?;
            tracing::debug!(
                location = %handle.location_name,
                strategy = handle.strategy.kind(),
                "resolved location entry",
            );
            handles.push(handle);
        }
        Ok(handles)
    }

    fn resolve_entry(
        &self,
        entry: &LocationEntry,
        source_path: &Path,
        api: Api,
    ) -> Result<RepositoryLocationHandle, ResolveError> {
        match entry {
            LocationEntry::PythonFile(spec) => handle_from_file_spec(
                spec,
                source_path,
                api,
                self.target_loader,
                self.remote_lister,
            ),
            LocationEntry::PythonModule(spec) => {
                handle_from_module_spec(spec, api, self.target_loader, self.remote_lister)
            }
            LocationEntry::PythonPackage(spec) => {
                handle_from_package_spec(spec, api, self.target_loader, self.remote_lister)
            }
            LocationEntry::GrpcServer(spec) => handle_from_grpc_server(spec, source_path),
            LocationEntry::PythonEnvironment(spec) => {
                handle_from_python_environment(spec, source_path, api, self.remote_lister)
            }
        }
    }
}
