//! Load workspace documents from YAML files.

use std::path::{Path, PathBuf};

use crate::error::{io_err, SchemaError};
use crate::model::WorkspaceDocument;

/// Read and parse one workspace document.
///
/// Returns [`SchemaError::Parse`] (with path and line context) if the YAML
/// is malformed or does not match the document shape.
pub fn load_document_from_path(path: &Path) -> Result<WorkspaceDocument, SchemaError> {
    let contents = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
    serde_yaml::from_str(&contents).map_err(|e| SchemaError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Load several documents, pairing each with its source path.
///
/// Document order is preserved — the resolver's last-document-wins merge
/// rule depends on it.
pub fn load_documents(
    paths: &[PathBuf],
) -> Result<Vec<(WorkspaceDocument, PathBuf)>, SchemaError> {
    paths
        .iter()
        .map(|path| Ok((load_document_from_path(path)?, path.clone())))
        .collect()
}
